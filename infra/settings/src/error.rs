use std::borrow::Cow;

/// A specialized [`SettingsError`] enum of this crate.
#[rebreak_derive::rebreak_error]
pub enum SettingsError {
    #[error("Settings document not found{}: {message}", format_context(.context))]
    NotFound { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Settings document is corrupted{}: {message}", format_context(.context))]
    Corrupted { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Setting is not registered{}: {message}", format_context(.context))]
    UnknownSetting { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Setting is already registered{}: {message}", format_context(.context))]
    AlreadyRegistered { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Setting value does not match its schema{}: {message}", format_context(.context))]
    Schema { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Settings I/O failure{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Settings serialization failure{}: {source}", format_context(.context))]
    Serde { source: serde_json::Error, context: Option<Cow<'static, str>> },
}
