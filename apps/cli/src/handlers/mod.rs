pub mod breakpoints;
pub mod css;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Reads `file`, or stdin when no file is given.
fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).context("Failed to read stdin")?;
            Ok(input)
        },
    }
}
