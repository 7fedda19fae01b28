use super::read_input;
use anyhow::{Context, Result, bail};
use rebreak::Frontend;
use rebreak::breakpoints::StylesheetDelivery;
use rebreak::kernel::render::Block;
use serde_json::{Value, json};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Filters a stylesheet from `file` (or stdin) into `output` (or `out`).
///
/// # Errors
/// Returns an error if the input cannot be read or the output cannot be written.
pub fn adjust(frontend: &Frontend, file: Option<&Path>, output: Option<&Path>, out: &mut dyn Write) -> Result<()> {
    let css = read_input(file)?;
    let adjusted = frontend.request().adjust_css(&css);

    match output {
        Some(path) => {
            std::fs::write(path, &adjusted).with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = adjusted.len(), "Adjusted stylesheet written");
        },
        None => out.write_all(adjusted.as_bytes())?,
    }
    Ok(())
}

/// Prints the delivery decision as JSON, or just the CSS that reaches the page.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn stylesheet(frontend: &Frontend, raw: bool, out: &mut dyn Write) -> Result<()> {
    let delivery = frontend.request().stylesheet();

    if raw {
        let css = match &delivery {
            StylesheetDelivery::External { .. } => frontend.delivery().responsive_css(),
            StylesheetDelivery::Inline { css, .. } => css.as_str(),
        };
        out.write_all(css.as_bytes())?;
    } else {
        writeln!(out, "{}", serde_json::to_string_pretty(&delivery)?)?;
    }
    Ok(())
}

/// Runs one block fragment through font discovery and the CSS filter and prints
/// `{content, fonts, fonts_url}`.
///
/// # Errors
/// Returns an error if `attrs` is not a JSON object or the fragment cannot be read.
pub fn render(
    frontend: &Frontend,
    name: &str,
    attrs: Option<&str>,
    file: Option<&Path>,
    out: &mut dyn Write,
) -> Result<()> {
    let mut block = Block::new(name);
    if let Some(attrs) = attrs {
        match serde_json::from_str::<Value>(attrs).context("Block attributes are not valid JSON")? {
            Value::Object(map) => block.attrs = map,
            other => bail!("Block attributes must be a JSON object, got {other}"),
        }
    }

    let content = read_input(file)?;
    let mut request = frontend.request();
    let rendered = request.render_block(&block, Some(&content)).map(|html| html.into_owned());

    let report = json!({
        "content": rendered,
        "fonts": request.fonts(),
        "fonts_url": request.fonts_url(),
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}
