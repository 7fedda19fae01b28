use rebreak_domain::config::{BlocksConfig, FontsConfig, RebreakConfig, SettingsConfig};
use serde_json::json;
use std::path::PathBuf;

#[test]
fn config_defaults_are_sane() {
    let settings = SettingsConfig::default();
    assert_eq!(settings.path, PathBuf::from("rebreak-settings.json"));
    assert!(settings.create);

    assert_eq!(BlocksConfig::default().namespaces, ["stackable/"]);

    let fonts = FontsConfig::default();
    assert!(fonts.enabled);
    assert_eq!(fonts.namespaces, ["stackable/", "ugb/"]);
    assert!(fonts.locale.is_none());

    let cfg = RebreakConfig::default();
    assert_eq!(cfg.delivery.style_handle, "rebreak-style");
    assert_eq!(cfg.delivery.responsive_handle, "rebreak-style-responsive");
    assert_eq!(cfg.logging.level, "info");
    assert_eq!(cfg.logging.rotation, "daily");
    assert_eq!(cfg.logging.max_files, 7);
    assert!(cfg.logging.filter.is_none());
    assert!(cfg.breakpoints.defaults.tablet.is_empty());
}

#[test]
fn config_deserializes_partial_documents() {
    let raw = json!({
        "settings": { "path": "/var/lib/rebreak/settings.json" },
        "breakpoints": { "defaults": { "tablet": 1100 } },
        "fonts": { "locale": "uk" },
        "logging": { "rotation": "hourly", "filter": "rebreak_breakpoints=debug" }
    });

    let cfg: RebreakConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.settings.path, PathBuf::from("/var/lib/rebreak/settings.json"));
    assert!(cfg.settings.create);
    assert_eq!(cfg.breakpoints.defaults.tablet, "1100");
    assert_eq!(cfg.breakpoints.defaults.mobile, "");
    assert_eq!(cfg.fonts.locale.as_deref(), Some("uk"));
    assert_eq!(cfg.fonts.handle, "rebreak-google-fonts");
    assert_eq!(cfg.logging.rotation, "hourly");
    assert_eq!(cfg.logging.filter.as_deref(), Some("rebreak_breakpoints=debug"));
    assert_eq!(cfg.logging.max_files, 7);
}

#[test]
fn deref_mut_copies_on_write() {
    let original = RebreakConfig::default();
    let mut edited = original.clone();
    edited.blocks.namespaces.push("ugb/".to_owned());

    assert_eq!(original.blocks.namespaces.len(), 1);
    assert_eq!(edited.blocks.namespaces.len(), 2);
}
