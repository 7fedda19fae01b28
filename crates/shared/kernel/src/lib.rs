//! Kernel utilities shared across slices.
//! Keep this crate lightweight: config loading, the ordered filter pipeline used for
//! every extension point, and the rendered-block model handed to feature slices.
//!
//! ## Filter pipeline
//! ```rust
//! use rebreak_kernel::hooks::FilterChain;
//!
//! let mut chain = FilterChain::<String>::new();
//! chain.add(10, "suffix", |css, ()| css + "}");
//! chain.add(9, "prefix", |css, ()| format!("@media x{{{css}"));
//! assert_eq!(chain.apply("a{b:c}".to_owned(), &()), "@media x{a{b:c}}");
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use rebreak_kernel::config::load_config;
//! let cfg: rebreak_kernel::domain::config::RebreakConfig = load_config(Some("rebreak.toml"))?;
//! ```
pub mod config;
pub mod hooks;
pub mod render;

pub use rebreak_domain as domain;
