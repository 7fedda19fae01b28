use crate::error::{SettingsError, SettingsErrorExt};
use crate::maintenance;
use crate::store::SettingsStore;
use private::Sealed;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Default)]
pub struct NoPath;
#[derive(Debug)]
pub struct WithPath(PathBuf);

mod private {
    pub(super) trait Sealed {}
}
impl Sealed for NoPath {}
impl Sealed for WithPath {}

#[allow(private_bounds)]
#[derive(Debug)]
pub struct SettingsStoreBuilder<S: Sealed = NoPath> {
    state: S,
    create: bool,
}

impl Default for SettingsStoreBuilder<NoPath> {
    fn default() -> Self {
        Self { state: NoPath, create: true }
    }
}

#[allow(private_bounds)]
impl<S: Sealed> SettingsStoreBuilder<S> {
    #[must_use = "Sets whether a missing settings document may be created"]
    pub const fn create(mut self, enable: bool) -> Self {
        self.create = enable;
        self
    }
}

impl SettingsStoreBuilder<NoPath> {
    #[must_use = "Creates a new settings store builder"]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "Sets the settings document path"]
    pub fn path(self, path: impl Into<PathBuf>) -> SettingsStoreBuilder<WithPath> {
        SettingsStoreBuilder { state: WithPath(path.into()), create: self.create }
    }
}

impl SettingsStoreBuilder<WithPath> {
    /// Loads the settings document and returns a shared [`SettingsStore`] handle.
    ///
    /// 1. **Self-Healing**: stale temp files from interrupted writes are removed.
    /// 2. **Loading**: an existing document must be a JSON object. A missing one is
    ///    accepted only with `create(true)` and is written on the first update.
    ///
    /// # Errors
    /// - [`SettingsError::NotFound`] if the document is missing and `create` is false.
    /// - [`SettingsError::Corrupted`] / [`SettingsError::Serde`] if it is not a JSON object.
    /// - [`SettingsError::Io`] if it cannot be read.
    pub fn open(self) -> Result<SettingsStore, SettingsError> {
        let path = self.state.0;

        maintenance::purge_tmp(&path);

        let values = match std::fs::read(&path) {
            Ok(data) if data.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(data) => {
                let document: Value = serde_json::from_slice(&data)
                    .context(format!("Failed to parse settings document: {}", path.display()))?;
                let Value::Object(values) = document else {
                    return Err(SettingsError::Corrupted {
                        message: "top-level value is not an object".into(),
                        context: Some(path.display().to_string().into()),
                    });
                };
                values
            },
            Err(err) if err.kind() == ErrorKind::NotFound && self.create => {
                info!(path = %path.display(), "Settings document not found, starting empty");
                Map::new()
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(SettingsError::NotFound {
                    message: path.display().to_string().into(),
                    context: None,
                });
            },
            Err(err) => {
                return Err(SettingsError::Io {
                    source: err,
                    context: Some(format!("Read failed: {}", path.display()).into()),
                });
            },
        };

        info!(path = %path.display(), records = values.len(), "Settings store opened");
        Ok(SettingsStore::from_parts(Some(path), values))
    }
}
