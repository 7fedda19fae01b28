//! # rebreak CLI
//!
//! Command-line access to the breakpoint settings and the CSS filter. Output goes to the
//! writer handed to [`run`] (stdout in the binary); logs go to stderr.

pub mod args;
pub mod handlers;

pub use args::{Cli, Command};

use anyhow::{Context, Result};
use rebreak::Frontend;
use rebreak::domain::config::RebreakConfig;
use std::io::Write;

/// Executes one parsed command against `config`.
///
/// # Errors
/// Returns an error if the frontend cannot be initialized or the command fails.
pub fn run(command: &Command, config: &RebreakConfig, out: &mut dyn Write) -> Result<()> {
    let frontend = Frontend::from_config(config).context("Failed to initialize frontend")?;

    match command {
        Command::Resolve => handlers::breakpoints::resolve(&frontend, out),
        Command::Set { tablet, mobile } => {
            handlers::breakpoints::set(&frontend, tablet.as_deref(), mobile.as_deref(), out)
        },
        Command::Adjust { file, output } => handlers::css::adjust(&frontend, file.as_deref(), output.as_deref(), out),
        Command::Stylesheet { raw } => handlers::css::stylesheet(&frontend, *raw, out),
        Command::Render { block, attrs, file } => {
            handlers::css::render(&frontend, block, attrs.as_deref(), file.as_deref(), out)
        },
    }
}
