//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use clomonitor::cli::{validate_date, SearchArgs};
use clomonitor::config::validate_base_url;
use clomonitor::error::CloMonitorError;
use clomonitor_common::api::error_from_response;
use clomonitor_common::{ApiError, ErrorKind, Prefs, StorageError};

/// APIエラーはメッセージをそのまま表示する
#[test]
fn test_api_error_transparent() {
    let err: CloMonitorError = error_from_response(400, br#"{"message": "invalid filter"}"#).into();
    assert_eq!(err.to_string(), "invalid filter");

    let err: CloMonitorError = error_from_response(502, b"<html>").into();
    assert_eq!(err.to_string(), "something went wrong");
}

/// 404もOther扱い
#[test]
fn test_not_found_is_other() {
    let err = error_from_response(404, br#"{"message": "project not found"}"#);
    assert_eq!(err.kind, ErrorKind::Other);
    assert!(matches!(
        CloMonitorError::from(err),
        CloMonitorError::Api(ApiError { kind: ErrorKind::Other, .. })
    ));
}

/// 共通ライブラリのエラーもそのまま表示する
#[test]
fn test_common_error_transparent() {
    let storage = StorageError::Unavailable("disabled".into());
    let common_display = clomonitor_common::Error::from(storage.clone()).to_string();
    let err: CloMonitorError = clomonitor_common::Error::from(storage).into();
    assert_eq!(err.to_string(), common_display);
}

/// 日付の形式
#[test]
fn test_invalid_date() {
    assert_eq!(validate_date("2022-01-31").unwrap(), "2022-01-31");

    for date in ["2022-13-01", "2022/01/01", "yesterday", ""] {
        let err = validate_date(date).unwrap_err();
        assert!(matches!(err, CloMonitorError::InvalidDate(_)), "{}", date);
        assert!(err.to_string().contains("YYYY-MM-DD"));
    }
}

/// 受け入れ日の範囲が逆
#[test]
fn test_reversed_accepted_range() {
    let args = SearchArgs {
        accepted_from: Some("2022-06-01".into()),
        accepted_to: Some("2021-01-01".into()),
        page: 1,
        ..Default::default()
    };
    assert!(matches!(args.to_filters(), Err(CloMonitorError::InvalidArgument(_))));
}

/// 選択肢にない表示件数
#[test]
fn test_invalid_limit() {
    let args = SearchArgs { limit: Some(25), page: 1, ..Default::default() };
    let err = args.to_query(&Prefs::default()).unwrap_err();
    assert!(matches!(err, CloMonitorError::InvalidArgument(_)));
    assert!(err.to_string().contains("25"));
}

/// URLスキームの検証
#[test]
fn test_invalid_base_url() {
    assert!(validate_base_url("https://clomonitor.io").is_ok());
    assert!(validate_base_url("http://localhost:8000").is_ok());
    assert!(matches!(validate_base_url("clomonitor.io"), Err(CloMonitorError::Config(_))));
}

/// CloMonitorErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        CloMonitorError::Config("テスト設定エラー".to_string()),
        CloMonitorError::InvalidArgument("page".to_string()),
        CloMonitorError::InvalidDate("2022-99-99".to_string()),
        CloMonitorError::Prompt("interrupted".to_string()),
        CloMonitorError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "missing")),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}
