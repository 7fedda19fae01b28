use rebreak_breakpoints::BreakpointError;
use rebreak_settings::SettingsError;
use std::borrow::Cow;

/// A specialized [`FrontendError`] enum of this crate.
#[rebreak_derive::rebreak_error]
pub enum FrontendError {
    #[error("Settings store failure{}: {source}", format_context(.context))]
    Settings { source: SettingsError, context: Option<Cow<'static, str>> },

    #[error("Breakpoint failure{}: {source}", format_context(.context))]
    Breakpoints { source: BreakpointError, context: Option<Cow<'static, str>> },
}
