//! 設定ファイルのテスト

use clomonitor::config::{Config, API_URL_ENV, DEFAULT_API_BASE_URL};
use tempfile::tempdir;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let config = Config::load_from(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.timeout_seconds, 30);
    assert_eq!(config.prefs_path, None);
}

#[test]
fn test_save_and_load() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("nested").join("config.json");

    let config = Config {
        api_base_url: "http://localhost:8000".into(),
        timeout_seconds: 5,
        prefs_path: Some(dir.path().join("prefs.json")),
    };
    config.save_to(&path).unwrap();

    assert_eq!(Config::load_from(&path).unwrap(), config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"timeout_seconds": 10}"#).unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.timeout_seconds, 10);
    assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn test_broken_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ broken").unwrap();

    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_prefs_path_override() {
    let config = Config { prefs_path: Some("/tmp/clomonitor-prefs.json".into()), ..Default::default() };
    assert_eq!(config.prefs_path().unwrap(), std::path::PathBuf::from("/tmp/clomonitor-prefs.json"));
}

/// 引数 > 環境変数 > 設定ファイル（環境変数を触るのはこのテストだけ）
#[test]
fn test_api_base_url_precedence() {
    let config = Config { api_base_url: "https://from-file.example/".into(), ..Default::default() };

    std::env::remove_var(API_URL_ENV);
    assert_eq!(config.resolve_api_base_url(None), "https://from-file.example");

    std::env::set_var(API_URL_ENV, "http://from-env.example");
    assert_eq!(config.resolve_api_base_url(None), "http://from-env.example");
    assert_eq!(
        config.resolve_api_base_url(Some("http://from-flag.example/")),
        "http://from-flag.example"
    );

    std::env::remove_var(API_URL_ENV);
}
