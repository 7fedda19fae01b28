use config::{Config, Environment, File};
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::info;

/// Prefix for environment overrides (`REBREAK__SETTINGS__PATH` maps to `settings.path`).
pub const ENV_PREFIX: &str = "REBREAK";

/// Base name of the configuration file looked up when no explicit path is given.
pub const DEFAULT_CONFIG_NAME: &str = "rebreak";

/// Custom error type for config loading.
#[rebreak_derive::rebreak_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Layered configuration loader: a file source overlaid with environment variables.
///
/// 1. **Base File**: an explicit `path` must exist. Without one, a `rebreak.{toml,json,yaml}`
///    file in the working directory is used when present; otherwise defaults apply.
/// 2. **Environment Overrides**: variables prefixed with `REBREAK__`, nested with double
///    underscores (e.g. `REBREAK__BREAKPOINTS__DEFAULTS__TABLET=1100`).
///
/// # Errors
/// Returns [`ConfigError::Config`] if an explicit file is missing, a source is malformed,
/// or the merged values do not match `T`.
///
/// # Example
/// ```rust
/// use rebreak_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct CliConfig {
///     verbose: bool,
/// }
///
/// let cfg: CliConfig = load_config(Some("config/missing.toml")).unwrap_or_default();
/// assert!(!cfg.verbose);
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let file = match path {
        Some(path) => {
            let path: &Path = path.as_ref();
            info!("Loading config from {}", path.display());
            File::from(path).required(true)
        },
        None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
    };

    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .convert_case(config::Case::Snake),
        )
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebreak_domain::config::RebreakConfig;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rebreak.toml");
        fs::write(
            &path,
            r#"
[settings]
path = "/srv/rebreak/settings.json"

[breakpoints.defaults]
mobile = "700"

[blocks]
namespaces = ["stackable/", "kadence/"]
"#,
        )
        .unwrap();

        let cfg: RebreakConfig = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.settings.path, Path::new("/srv/rebreak/settings.json"));
        assert_eq!(cfg.breakpoints.defaults.mobile, "700");
        assert!(cfg.breakpoints.defaults.tablet.is_empty());
        assert_eq!(cfg.blocks.namespaces, ["stackable/", "kadence/"]);
        assert_eq!(cfg.delivery.style_handle, "rebreak-style");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let err = load_config::<RebreakConfig>(Some(dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to build config"));
    }

    #[test]
    fn malformed_values_report_deserialize_context() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "[fonts]\nenabled = \"sometimes\"\n").unwrap();

        let err = load_config::<RebreakConfig>(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to deserialize config"));
    }
}
