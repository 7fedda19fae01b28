use rebreak_settings::SettingsError;
use std::borrow::Cow;

/// A specialized [`BreakpointError`] enum of this crate.
#[rebreak_derive::rebreak_error]
pub enum BreakpointError {
    #[error("Breakpoint settings failure{}: {source}", format_context(.context))]
    Settings { source: SettingsError, context: Option<Cow<'static, str>> },

    #[error("Responsive stylesheet unavailable{}: {source}", format_context(.context))]
    Stylesheet { source: std::io::Error, context: Option<Cow<'static, str>> },
}
