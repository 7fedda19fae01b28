#![allow(unreachable_pub)]

//! # Derive
//!
//! Procedural macros shared across the workspace.
//! Only one macro lives here for now: [`rebreak_error`], which turns a plain enum
//! into a `thiserror` error with context support.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! rebreak-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` unless already present.
/// * **Context Support**: Generates a companion `<Name>Ext` trait that adds `.context(..)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Conversions**: Implements `From<Source>` for variants holding a `source` field
///   (or a field marked `#[source]`/`#[from]`), so `?` works on upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Only enums are accepted.
/// 2. Every variant uses named fields.
/// 3. Variants with a source must also carry `context: Option<Cow<'static, str>>`.
///
/// A private `format_context` helper is emitted next to the enum so `#[error(..)]`
/// strings can render the optional context.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[rebreak_derive::rebreak_error]
/// pub enum SettingsError {
///     #[error("Settings I/O failure{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal settings error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &std::path::Path) -> Result<String, SettingsError> {
///     std::fs::read_to_string(path).context("Reading settings document")
/// }
/// ```
#[proc_macro_attribute]
pub fn rebreak_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(input).into()
}
