use crate::engine;
use rebreak_domain::breakpoints::ResolvedBreakpoints;
use rebreak_domain::constants::{DEFAULT_PRIORITY, SHORTCUT_PRIORITY};
use rebreak_kernel::hooks::FilterChain;
use std::borrow::Cow;

/// The CSS filter every delivered stylesheet and block fragment is piped through.
pub type CssFilter = FilterChain<String, ResolvedBreakpoints>;

pub const EXPAND_SHORTCUTS: &str = "expand-shortcuts";
pub const ADJUST_BREAKPOINTS: &str = "adjust-breakpoints";

/// Builds the standard chain: shortcut expansion at priority 9, then breakpoint
/// substitution at priority 10.
///
/// Filters registered in between see expanded shortcuts but original breakpoints.
#[must_use]
pub fn css_filter() -> CssFilter {
    let mut chain = CssFilter::new();
    register_css_filters(&mut chain);
    chain
}

/// Adds the two built-in filters to an existing chain.
pub fn register_css_filters(chain: &mut CssFilter) {
    chain
        .add(SHORTCUT_PRIORITY, EXPAND_SHORTCUTS, |css, _| reuse(css, engine::expand_shortcuts))
        .add(DEFAULT_PRIORITY, ADJUST_BREAKPOINTS, |css, breakpoints| {
            reuse(css, |text| engine::adjust(text, breakpoints))
        });
}

/// Runs `transform`, keeping the original allocation when nothing changed.
fn reuse(css: String, transform: impl FnOnce(&str) -> Cow<'_, str>) -> String {
    match transform(&css) {
        Cow::Borrowed(_) => css,
        Cow::Owned(changed) => changed,
    }
}
