//! Responsive breakpoint customization for generated stylesheets.
//!
//! The frontend ships CSS compiled with fixed `1024px` (tablet) and `768px` (mobile)
//! boundaries. This crate moves those boundaries to user-configured widths without
//! parsing CSS:
//!
//! - [`BreakpointResolver`] merges the hook-adjusted defaults with the persisted
//!   `dynamic_breakpoints` record; [`BreakpointScope`] caches the result per request.
//! - [`engine`] expands `@media tablet` / `@media mobile` shortcuts and rewrites
//!   boundaries inside `@media` clauses only.
//! - [`css_filter`] wires both steps into an ordered [`CssFilter`].
//! - [`Delivery`] picks between the stock stylesheet and an inline rewritten copy, and
//!   adjusts rendered block fragments.
//!
//! ```rust
//! use rebreak_breakpoints::{BreakpointResolver, css_filter};
//! use rebreak_domain::breakpoints::Breakpoints;
//!
//! let resolver = BreakpointResolver::new(Breakpoints::new("1200", ""));
//! let scope = resolver.scope();
//! let css = css_filter().apply("@media tablet{.a{b:c}}".to_owned(), scope.get());
//!
//! assert_eq!(css, "@media only screen and (max-width:1200px){.a{b:c}}");
//! ```

mod delivery;
pub mod engine;
mod error;
mod pipeline;
mod resolver;
mod settings;

pub use delivery::{BUNDLED_RESPONSIVE_CSS, Delivery, StylesheetDelivery};
pub use error::{BreakpointError, BreakpointErrorExt};
pub use pipeline::{ADJUST_BREAKPOINTS, CssFilter, EXPAND_SHORTCUTS, css_filter, register_css_filters};
pub use resolver::{BreakpointResolver, BreakpointScope, BreakpointSource};
pub use settings::{breakpoint_setting, register_settings, save_breakpoints};
