//! # Settings Store
//!
//! Named, schema-checked settings records persisted as a single JSON document.
//!
//! ## Key Features
//! - **Registration**: records are declared with a [`SettingDefinition`] carrying a
//!   description, typed properties and a default.
//! - **Atomic Writes**: unique temp write + `fsync` + `rename`.
//! - **Self-Healing**: stale temp files from interrupted writes are removed on open.
//! - **Shared Handles**: [`SettingsStore`] is `Clone + Send + Sync`.
//!
//! ## Example
//! ```rust
//! use rebreak_settings::SettingsStore;
//! use serde_json::json;
//!
//! # let tmp = tempfile::tempdir().unwrap();
//! let path = tmp.path().join("settings.json");
//! let store = SettingsStore::builder().path(&path).create(true).open().unwrap();
//! store.register(rebreak_settings::SettingDefinition::object("misc", "Anything")).unwrap();
//! store.set("misc", &json!({ "answer": 42 })).unwrap();
//!
//! let reopened = SettingsStore::builder().path(&path).open().unwrap();
//! assert_eq!(reopened.get::<serde_json::Value>("misc").unwrap().unwrap()["answer"], 42);
//! ```

mod builder;
mod definition;
mod error;
mod maintenance;
mod store;

pub use builder::{NoPath, SettingsStoreBuilder, WithPath};
pub use definition::{PropertyType, SettingDefinition};
pub use error::{SettingsError, SettingsErrorExt};
pub use store::SettingsStore;
