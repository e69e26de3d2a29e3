//! Integration tests for the Settings Store

use settings_store::{SettingValue, SettingsError, SettingsStore, SettingsTree};
use tempfile::TempDir;

use crate::integration::write_file;

fn tree(pairs: Vec<(&str, SettingValue)>) -> SettingsTree {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Deep update keeps sibling keys of the nested mapping
#[test]
fn test_deep_update_keeps_siblings() {
    let mut store = SettingsStore::from_tree(tree(vec![(
        "db",
        tree(vec![("host", "a".into()), ("port", 5432.into())]).into(),
    )]));

    store.update_settings(tree(vec![("db", tree(vec![("port", 5433.into())]).into())]));

    let expected = tree(vec![(
        "db",
        tree(vec![("host", "a".into()), ("port", 5433.into())]).into(),
    )]);
    assert_eq!(store.settings(), &expected);
}

/// Text update merges typed values over existing keys
#[test]
fn test_update_from_config_str() {
    let mut store = SettingsStore::from_tree(tree(vec![("x", 1.into()), ("z", 2.into())]));

    store.update_settings_from_config_str("x = 5\ny = foo").unwrap();

    let expected = tree(vec![("x", 5.into()), ("y", "foo".into()), ("z", 2.into())]);
    assert_eq!(store.settings(), &expected);
}

/// Text update into a nested key replaces it with the flat scalar
#[test]
fn test_text_update_overwrites_nested_tree() {
    let mut store = SettingsStore::from_tree(tree(vec![(
        "db",
        tree(vec![("host", "a".into())]).into(),
    )]));
    store.update_settings_from_config_str("db = none").unwrap();
    assert_eq!(store.setting("db").unwrap(), &SettingValue::Null);
}

/// Missing reserved section fails and leaves the tree unchanged
#[test]
fn test_missing_section_leaves_store_unmodified() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(temp_dir.path(), "other.ini", "[other]\nx = 99\n");

    let mut store = SettingsStore::from_tree(tree(vec![("x", 1.into())]));
    let before = store.settings_snapshot();

    let err = store.update_settings_from_config_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::MissingSection(ref s) if s == "globals"));
    assert_eq!(store.settings(), &before);
}

/// Malformed text is never partially applied
#[test]
fn test_parse_error_applies_nothing() {
    let mut store = SettingsStore::from_tree(SettingsTree::new());
    let err = store
        .update_settings_from_config_str("good = 1\n[unterminated\nlater = 2")
        .unwrap_err();
    assert!(matches!(err, SettingsError::Parse(_)));
    assert!(store.settings().is_empty());
}

/// File update reads a full document with its own header
#[test]
fn test_update_from_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_file(
        temp_dir.path(),
        "app.ini",
        "; application settings\n[globals]\nretryCount = 3\ntimeoutSeconds = 2.5\ndebugMode = True\nlabel = staging\n",
    );

    let mut store = SettingsStore::new(|tree| {
        tree.insert("label".to_string(), "dev".into());
        tree.insert("workers".to_string(), 2.into());
        Ok(())
    })
    .unwrap();
    store.update_settings_from_config_file(&path).unwrap();

    assert_eq!(store.setting("retryCount").unwrap(), &SettingValue::Int(3));
    assert_eq!(store.setting("timeoutSeconds").unwrap(), &SettingValue::Float(2.5));
    assert_eq!(store.setting("debugMode").unwrap(), &SettingValue::Bool(true));
    assert_eq!(store.setting("label").unwrap(), &SettingValue::from("staging"));
    assert_eq!(store.setting("workers").unwrap(), &SettingValue::Int(2));
}

/// Builder without an initializer cannot produce a store
#[test]
fn test_store_requires_initializer() {
    let err = SettingsStore::builder().build().unwrap_err();
    assert!(matches!(err, SettingsError::Initialization(_)));
}

/// Lookups fail loudly; the default form is opt-in
#[test]
fn test_lookup_semantics() {
    let store = SettingsStore::from_tree(tree(vec![("KeyName", 1.into())]));
    assert!(matches!(store.setting("keyname"), Err(SettingsError::Lookup(_))));
    let fallback = SettingValue::from("fallback");
    assert_eq!(store.setting_or("keyname", &fallback), &fallback);
    assert_eq!(store.setting("KeyName").unwrap(), &SettingValue::Int(1));
}

/// The live tree is an escape hatch that bypasses merge semantics
#[test]
fn test_settings_mut_replaces_subtree_directly() {
    let mut store = SettingsStore::from_tree(tree(vec![(
        "db",
        tree(vec![("host", "a".into()), ("port", 5432.into())]).into(),
    )]));
    store
        .settings_mut()
        .insert("db".to_string(), tree(vec![("port", 1.into())]).into());
    assert!(store.setting_path("db.host").is_err());
}

/// Shallow overwrite replaces nested trees wholesale
#[test]
fn test_overwrite_settings() {
    let mut store = SettingsStore::from_tree(tree(vec![
        ("db", tree(vec![("host", "a".into())]).into()),
        ("keep", true.into()),
    ]));
    store.overwrite_settings(tree(vec![("db", tree(vec![("port", 1.into())]).into())]));
    assert!(store.setting_path("db.host").is_err());
    assert_eq!(store.setting_path("db.port").unwrap(), &SettingValue::Int(1));
    assert_eq!(store.setting("keep").unwrap(), &SettingValue::Bool(true));
}
