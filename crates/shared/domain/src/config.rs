use crate::breakpoints::Breakpoints;
use serde::Deserialize;
use std::ops::{Deref, DerefMut};
use std::path::PathBuf;
use std::sync::Arc;

/// Top-level configuration shared by the frontend and the CLI.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RebreakConfigInner {
    pub settings: SettingsConfig,
    pub breakpoints: BreakpointsConfig,
    pub delivery: DeliveryConfig,
    pub blocks: BlocksConfig,
    pub fonts: FontsConfig,
    pub logging: LoggingConfig,
}

/// Thin Arc-wrapped config for inexpensive cloning into subsystems.
#[derive(Default, Debug, Clone, Deserialize)]
pub struct RebreakConfig {
    #[serde(flatten, default)]
    inner: Arc<RebreakConfigInner>,
}

impl Deref for RebreakConfig {
    type Target = RebreakConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for RebreakConfig {
    fn deref_mut(&mut self) -> &mut RebreakConfigInner {
        Arc::make_mut(&mut self.inner)
    }
}

/// Where the persisted settings document lives.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub path: PathBuf,
    pub create: bool,
}

/// Site-level breakpoint knobs.
#[derive(Default, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BreakpointsConfig {
    /// Non-empty values replace the built-in seed through the default-override hook.
    pub defaults: Breakpoints,
    /// Replacement for the bundled responsive stylesheet.
    pub stylesheet: Option<PathBuf>,
}

/// Stylesheet handles used by the delivery selector.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    pub style_handle: String,
    pub responsive_handle: String,
}

/// Block names starting with one of these prefixes get their markup adjusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    pub namespaces: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    pub enabled: bool,
    pub namespaces: Vec<String>,
    pub locale: Option<String>,
    pub handle: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Extra filter directives, e.g. `rebreak_breakpoints=debug`.
    pub filter: Option<String>,
    pub json: bool,
    pub dir: Option<PathBuf>,
    /// `minutely`, `hourly`, `daily` or `never`.
    pub rotation: String,
    pub max_files: usize,
}

// --- Default ---

impl Default for SettingsConfig {
    fn default() -> Self {
        Self { path: PathBuf::from("rebreak-settings.json"), create: true }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            style_handle: "rebreak-style".to_owned(),
            responsive_handle: "rebreak-style-responsive".to_owned(),
        }
    }
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self { namespaces: vec!["stackable/".to_owned()] }
    }
}

impl Default for FontsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespaces: vec!["stackable/".to_owned(), "ugb/".to_owned()],
            locale: None,
            handle: "rebreak-google-fonts".to_owned(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            filter: None,
            json: false,
            dir: None,
            rotation: "daily".to_owned(),
            max_files: 7,
        }
    }
}
