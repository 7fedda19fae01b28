//! Web-font discovery for rendered blocks.
//!
//! Blocks carry font choices in `*FontFamily` attributes. A [`FontCollector`] created per
//! request gathers them while blocks render; at the end of the response a single
//! stylesheet URL requests every family that was seen.

mod collector;
mod url;

pub use collector::{EnqueuePredicate, FontCollector, FontRegistry, FontStylesheet, is_web_font};
pub use url::{stylesheet_url, subset_for};
