use rebreak_settings::{PropertyType, SettingDefinition, SettingsError, SettingsStore};
use serde_json::{Value, json};
use std::fs;
use std::time::{Duration, SystemTime};
use tempfile::tempdir;

fn register(store: &SettingsStore) {
    store
        .register(
            SettingDefinition::object("dynamic_breakpoints", "Responsive breakpoints")
                .property("tablet", PropertyType::String)
                .property("mobile", PropertyType::String)
                .default_value(json!({ "tablet": "", "mobile": "" })),
        )
        .unwrap();
}

#[test]
fn values_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.json");

    let store = SettingsStore::builder().path(&path).open().unwrap();
    register(&store);
    store.set("dynamic_breakpoints", &json!({ "tablet": "1100", "mobile": "600", "x": 1 })).unwrap();

    let on_disk: Value = serde_json::from_slice(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(on_disk, json!({ "dynamic_breakpoints": { "tablet": "1100", "mobile": "600" } }));

    let reopened = SettingsStore::builder().path(&path).create(false).open().unwrap();
    let value: Value = reopened.get("dynamic_breakpoints").unwrap().unwrap();
    assert_eq!(value["tablet"], "1100");
    assert!(reopened.describe("dynamic_breakpoints").is_none());
}

#[test]
fn missing_document_without_create_fails() {
    let dir = tempdir().unwrap();
    let err = SettingsStore::builder().path(dir.path().join("absent.json")).create(false).open().unwrap_err();
    assert!(matches!(err, SettingsError::NotFound { .. }));
}

#[test]
fn missing_document_is_not_written_until_first_update() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = SettingsStore::builder().path(&path).open().unwrap();
    assert!(!path.exists());
    assert_eq!(store.path(), Some(path.as_path()));
}

#[test]
fn non_object_documents_are_corrupted() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    fs::write(&path, "[1, 2, 3]").unwrap();
    let err = SettingsStore::builder().path(&path).open().unwrap_err();
    assert!(matches!(err, SettingsError::Corrupted { .. }));

    fs::write(&path, "{ not json").unwrap();
    let err = SettingsStore::builder().path(&path).open().unwrap_err();
    assert!(matches!(err, SettingsError::Serde { .. }));
    assert!(err.to_string().contains("Failed to parse settings document"));
}

#[test]
fn blank_document_opens_empty() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(&path, "  \n").unwrap();

    let store = SettingsStore::builder().path(&path).open().unwrap();
    assert!(store.get::<Value>("dynamic_breakpoints").unwrap().is_none());
}

#[test]
fn failed_validation_does_not_touch_the_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");

    let store = SettingsStore::builder().path(&path).open().unwrap();
    register(&store);
    store.set("dynamic_breakpoints", &json!({ "tablet": "1100" })).unwrap();
    let before = fs::read(&path).unwrap();

    assert!(store.set("dynamic_breakpoints", &json!({ "tablet": 1200 })).is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
}

#[test]
fn stale_temp_files_are_purged_on_open() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("settings.json");
    let stale = dir.path().join("settings.json.rebreaktmp.1.1");
    let fresh = dir.path().join("settings.json.rebreaktmp.1.2");
    let unrelated = dir.path().join("other.json.rebreaktmp.1.1");

    for file in [&stale, &fresh, &unrelated] {
        fs::write(file, "{}").unwrap();
    }
    let old = SystemTime::now() - Duration::from_secs(3600);
    for file in [&stale, &unrelated] {
        fs::File::options().write(true).open(file).unwrap().set_modified(old).unwrap();
    }

    SettingsStore::builder().path(&path).open().unwrap();

    assert!(!stale.exists());
    assert!(fresh.exists());
    assert!(unrelated.exists());
}
