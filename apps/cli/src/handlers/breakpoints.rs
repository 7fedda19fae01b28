use anyhow::{Context, Result};
use rebreak::Frontend;
use rebreak::domain::breakpoints::{Breakpoints, Tier};
use rebreak::domain::constants::BREAKPOINTS_SETTING;
use serde_json::json;
use std::io::Write;

/// Prints the resolved pair, the customized tiers and the hook-adjusted defaults.
///
/// # Errors
/// Returns an error if writing to `out` fails.
pub fn resolve(frontend: &Frontend, out: &mut dyn Write) -> Result<()> {
    let request = frontend.request();
    let resolved = request.breakpoints();

    let custom: Vec<&str> = Tier::ALL
        .into_iter()
        .filter(|tier| resolved.custom_tiers().contains(tier.flag()))
        .map(Tier::as_str)
        .collect();

    let report = json!({
        "tablet": resolved.tablet(),
        "mobile": resolved.mobile(),
        "custom": custom,
        "defaults": frontend.resolver().default_breakpoints(),
    });

    writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    Ok(())
}

/// Updates the given tiers, keeping the stored value of tiers that are not passed.
///
/// # Errors
/// Returns an error if the stored record is unreadable or cannot be written.
pub fn set(frontend: &Frontend, tablet: Option<&str>, mobile: Option<&str>, out: &mut dyn Write) -> Result<()> {
    let mut breakpoints: Breakpoints =
        frontend.store().get_or_default(BREAKPOINTS_SETTING).context("Failed to read stored breakpoints")?;

    for (tier, value) in [(Tier::Tablet, tablet), (Tier::Mobile, mobile)] {
        if let Some(value) = value {
            breakpoints.set(tier, value.trim());
        }
    }

    frontend.save_breakpoints(&breakpoints)?;
    resolve(frontend, out)
}
