use crate::builder::SettingsStoreBuilder;
use crate::definition::SettingDefinition;
use crate::error::{SettingsError, SettingsErrorExt};
use crate::maintenance::TMP_MARKER;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

#[derive(Debug)]
pub(crate) struct StoreInner {
    pub(crate) path: Option<PathBuf>,
    pub(crate) definitions: RwLock<FxHashMap<String, SettingDefinition>>,
    pub(crate) values: RwLock<Map<String, Value>>,
    pub(crate) tmp_counter: AtomicU64,
}

/// A site-wide store of named settings records.
///
/// Records are JSON objects kept in memory and, for file-backed stores, persisted as one
/// JSON document. Handles are cheap to clone and share the same state.
///
/// # Features
/// - **Registration**: every writable record is declared up front with a
///   [`SettingDefinition`] (description, property types, default).
/// - **Validation**: writes are checked against the definition and stripped of
///   undeclared properties.
/// - **Atomic Writes**: the document is written to a unique temp file, synced and renamed
///   into place, so readers never observe a half-written file.
///
/// # Example
/// ```rust
/// use rebreak_settings::{PropertyType, SettingDefinition, SettingsStore};
/// use serde_json::json;
///
/// let store = SettingsStore::in_memory();
/// store
///     .register(
///         SettingDefinition::object("greeting", "Greeting shown on the front page")
///             .property("text", PropertyType::String)
///             .default_value(json!({ "text": "" })),
///     )
///     .unwrap();
///
/// store.set("greeting", &json!({ "text": "hello" })).unwrap();
/// let value: serde_json::Value = store.get("greeting").unwrap().unwrap();
/// assert_eq!(value["text"], "hello");
/// ```
#[derive(Debug, Clone)]
pub struct SettingsStore {
    pub(crate) inner: Arc<StoreInner>,
}

impl SettingsStore {
    #[must_use = "Creates a builder for a file-backed settings store"]
    pub fn builder() -> SettingsStoreBuilder {
        SettingsStoreBuilder::new()
    }

    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_parts(None, Map::new())
    }

    pub(crate) fn from_parts(path: Option<PathBuf>, values: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path,
                definitions: RwLock::new(FxHashMap::default()),
                values: RwLock::new(values),
                tmp_counter: AtomicU64::new(1),
            }),
        }
    }

    /// Backing file, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    /// Declares a record.
    ///
    /// # Errors
    /// Returns [`SettingsError::AlreadyRegistered`] if the name is taken.
    pub fn register(&self, definition: SettingDefinition) -> Result<(), SettingsError> {
        let mut definitions = self.inner.definitions.write();
        if definitions.contains_key(definition.name.as_ref()) {
            return Err(SettingsError::AlreadyRegistered {
                message: definition.name.to_string().into(),
                context: None,
            });
        }

        debug!(setting = %definition.name, "Registered setting");
        definitions.insert(definition.name.to_string(), definition);
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.inner.definitions.read().contains_key(name)
    }

    /// The registered definition of `name`.
    #[must_use]
    pub fn describe(&self, name: &str) -> Option<SettingDefinition> {
        self.inner.definitions.read().get(name).cloned()
    }

    /// Names of all registered records, sorted.
    #[must_use]
    pub fn registered(&self) -> Vec<String> {
        let mut names: Vec<_> = self.inner.definitions.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Reads the persisted record `name`.
    ///
    /// Returns `Ok(None)` if nothing was ever stored under that name.
    ///
    /// # Errors
    /// Returns [`SettingsError::Serde`] if the stored value does not deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, SettingsError> {
        let Some(raw) = self.inner.values.read().get(name).cloned() else {
            return Ok(None);
        };

        serde_json::from_value(raw)
            .map(Some)
            .context(format!("Failed to decode setting '{name}'"))
    }

    /// Reads `name`, falling back to its registered default.
    ///
    /// # Errors
    /// Returns [`SettingsError::UnknownSetting`] if nothing is stored and the record is
    /// not registered, or [`SettingsError::Serde`] on a type mismatch.
    pub fn get_or_default<T: DeserializeOwned>(&self, name: &str) -> Result<T, SettingsError> {
        if let Some(value) = self.get(name)? {
            return Ok(value);
        }

        let default = self
            .inner
            .definitions
            .read()
            .get(name)
            .map(|definition| definition.default().clone())
            .ok_or_else(|| SettingsError::UnknownSetting { message: name.to_owned().into(), context: None })?;

        serde_json::from_value(default).context(format!("Failed to decode default of '{name}'"))
    }

    /// Validates and stores `value` under `name`, then persists the document.
    ///
    /// # Errors
    /// - [`SettingsError::UnknownSetting`] if `name` was never registered.
    /// - [`SettingsError::Schema`] if the value does not match the definition.
    /// - [`SettingsError::Io`] / [`SettingsError::Serde`] if persisting fails; the in-memory
    ///   state is left untouched in that case.
    pub fn set<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<(), SettingsError> {
        let raw = serde_json::to_value(value).context(format!("Failed to encode setting '{name}'"))?;

        let clean = {
            let definitions = self.inner.definitions.read();
            let definition = definitions
                .get(name)
                .ok_or_else(|| SettingsError::UnknownSetting { message: name.to_owned().into(), context: None })?;
            definition.sanitize(raw)?
        };

        let mut values = self.inner.values.write();
        let mut next = values.clone();
        next.insert(name.to_owned(), clean);
        self.persist(&next)?;
        *values = next;

        info!(setting = %name, "Setting updated");
        Ok(())
    }

    /// Drops the stored value of `name`. Returns whether anything was stored.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if persisting the document fails.
    pub fn remove(&self, name: &str) -> Result<bool, SettingsError> {
        let mut values = self.inner.values.write();
        if !values.contains_key(name) {
            return Ok(false);
        }

        let mut next = values.clone();
        next.remove(name);
        self.persist(&next)?;
        *values = next;

        info!(setting = %name, "Setting removed");
        Ok(true)
    }

    fn persist(&self, values: &Map<String, Value>) -> Result<(), SettingsError> {
        let Some(path) = self.inner.path.as_deref() else {
            return Ok(());
        };

        let mut data = serde_json::to_vec_pretty(values).context("Failed to encode settings document")?;
        data.push(b'\n');

        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create settings directory: {}", parent.display()))?;
        }

        let temp = unique_tmp_path(path, &self.inner.tmp_counter);
        {
            let mut file = std::fs::OpenOptions::new()
                .create_new(true)
                .write(true)
                .open(&temp)
                .context(format!("Temp creation failed: {}", temp.display()))?;
            file.write_all(&data).context("Write failed")?;
            file.sync_all().context("Hardware sync failed")?;
        }

        if let Err(err) = std::fs::rename(&temp, path) {
            let _ = std::fs::remove_file(&temp);
            return Err(SettingsError::Io {
                source: err,
                context: Some(format!("Atomic swap failed: {} -> {}", temp.display(), path.display()).into()),
            });
        }

        debug!(path = %path.display(), "Settings document saved atomically");
        Ok(())
    }
}

fn unique_tmp_path(target: &Path, counter: &AtomicU64) -> PathBuf {
    let id = counter.fetch_add(1, Ordering::Relaxed);
    let file_name = target.file_name().and_then(|name| name.to_str()).unwrap_or("settings");
    target.with_file_name(format!("{file_name}{TMP_MARKER}{}.{id}", std::process::id()))
}
