use crate::error::{BreakpointError, BreakpointErrorExt};
use rebreak_domain::breakpoints::{Breakpoints, Tier};
use rebreak_domain::constants::BREAKPOINTS_SETTING;
use rebreak_settings::{PropertyType, SettingDefinition, SettingsStore};
use serde_json::json;
use tracing::info;

/// The persisted `{tablet, mobile}` record, both string-typed so `""` can mean "unset".
#[must_use]
pub fn breakpoint_setting() -> SettingDefinition {
    Tier::ALL
        .into_iter()
        .fold(
            SettingDefinition::object(BREAKPOINTS_SETTING, "Custom dynamic breakpoints"),
            |definition, tier| definition.property(tier.as_str(), PropertyType::String),
        )
        .default_value(json!({ "tablet": "", "mobile": "" }))
}

/// Registers the breakpoint record; a second call is a no-op.
///
/// # Errors
/// Returns [`BreakpointError::Settings`] if the store rejects the definition.
pub fn register_settings(store: &SettingsStore) -> Result<(), BreakpointError> {
    if store.is_registered(BREAKPOINTS_SETTING) {
        return Ok(());
    }
    store.register(breakpoint_setting()).context("Failed to register breakpoint settings")
}

/// Persists user overrides. Tiers saved as `""` fall back to the defaults.
///
/// # Errors
/// Returns [`BreakpointError::Settings`] if the record is not registered or cannot be written.
pub fn save_breakpoints(store: &SettingsStore, breakpoints: &Breakpoints) -> Result<(), BreakpointError> {
    store.set(BREAKPOINTS_SETTING, breakpoints).context("Failed to save breakpoints")?;
    info!(tablet = %breakpoints.tablet, mobile = %breakpoints.mobile, "Breakpoints saved");
    Ok(())
}
