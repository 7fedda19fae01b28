//! # CLI Argument Definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI structure parsing command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "rebreak")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Retarget the responsive breakpoints of generated stylesheets")]
pub struct Cli {
    /// Configuration file (defaults to `rebreak.{toml,json,yaml}` when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level regardless of the configured level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Enumeration of available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the resolved breakpoints as JSON
    Resolve,
    /// Save breakpoint overrides (an empty value clears a tier)
    Set {
        #[arg(short, long)]
        tablet: Option<String>,
        #[arg(short, long)]
        mobile: Option<String>,
    },
    /// Pipe CSS through the breakpoint filter
    Adjust {
        /// Input file (stdin when omitted)
        file: Option<PathBuf>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show how the responsive stylesheet would be delivered
    Stylesheet {
        /// Print only the CSS that ends up on the page
        #[arg(long)]
        raw: bool,
    },
    /// Post-process one rendered block fragment
    Render {
        /// Block name, e.g. `stackable/columns`
        #[arg(short, long)]
        block: String,
        /// Block attributes as a JSON object
        #[arg(short, long)]
        attrs: Option<String>,
        /// Fragment file (stdin when omitted)
        file: Option<PathBuf>,
    },
}
