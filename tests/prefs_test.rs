//! ファイル保存の表示設定テスト

use clomonitor::prefs::{apply_update, open_store, PrefsUpdate};
use clomonitor_common::prefs::{APPLIED_MIGRATION_KEY, PREFS_KEY};
use clomonitor_common::{ConfiguredTheme, EffectiveTheme, SortBy, SortDirection};
use serde_json::Value;
use tempfile::tempdir;

fn read_items(path: &std::path::Path) -> serde_json::Map<String, Value> {
    let content = std::fs::read_to_string(path).expect("設定ファイルがない");
    serde_json::from_str(&content).expect("JSONではない")
}

#[test]
fn test_fresh_file_initialized() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.json");

    let store = open_store(&path);
    assert_eq!(store.prefs().search.limit, 20);

    let items = read_items(&path);
    assert!(items.contains_key(PREFS_KEY));
    assert_eq!(items.get(APPLIED_MIGRATION_KEY), Some(&Value::String("2".into())));
}

#[test]
fn test_update_persists_across_loads() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.json");

    let mut store = open_store(&path);
    let prefs = apply_update(
        &mut store,
        PrefsUpdate {
            limit: Some(60),
            sort_direction: Some(SortDirection::Desc),
            theme: Some(ConfiguredTheme::Dark),
            ..Default::default()
        },
    )
    .unwrap();
    assert_eq!(prefs.search.limit, 60);
    assert_eq!(prefs.search.sort.by, SortBy::Name);
    assert_eq!(prefs.search.sort.direction, SortDirection::Desc);
    assert_eq!(prefs.theme.effective, EffectiveTheme::Dark);

    let reloaded = open_store(&path);
    assert_eq!(*reloaded.prefs(), prefs);
}

#[test]
fn test_invalid_limit_rejected() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.json");

    let mut store = open_store(&path);
    let result = apply_update(&mut store, PrefsUpdate { limit: Some(30), ..Default::default() });
    assert!(result.is_err());
    assert_eq!(open_store(&path).prefs().search.limit, 20);
}

#[test]
fn test_legacy_file_migrated() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("prefs.json");

    let legacy = serde_json::json!({
        "guest": { "search": { "limit": 40 }, "theme": { "effective": "dark" } }
    });
    let items = serde_json::json!({ PREFS_KEY: legacy.to_string() });
    std::fs::write(&path, items.to_string()).unwrap();

    let store = open_store(&path);
    let prefs = store.prefs();
    assert_eq!(prefs.search.limit, 40);
    assert_eq!(prefs.search.sort.by, SortBy::Name);
    assert_eq!(prefs.theme.configured, ConfiguredTheme::Dark);
    assert_eq!(prefs.theme.effective, EffectiveTheme::Dark);

    assert_eq!(read_items(&path).get(APPLIED_MIGRATION_KEY), Some(&Value::String("2".into())));
}
