//! エラー型定義

use thiserror::Error;

use crate::api::ApiError;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// 設定ストレージへのアクセス失敗
///
/// ブラウザの容量超過やシークレットモード、ファイルの権限不足など。
/// 呼び出し側はこれを握りつぶしてメモリ上の値で継続する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("read failed for '{key}': {reason}")]
    Read { key: String, reason: String },

    #[error("write failed for '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ErrorKind;

    #[test]
    fn test_error_display_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        let display = format!("{}", error);
        assert!(display.contains("IO error"));
        assert!(display.contains("file not found"));
    }

    #[test]
    fn test_error_display_json() {
        let json_error = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = Error::Json(json_error);
        assert!(format!("{}", error).contains("JSON error"));
    }

    #[test]
    fn test_error_display_storage() {
        let error: Error = StorageError::Write {
            key: "clomonitorPrefs".to_string(),
            reason: "QuotaExceededError".to_string(),
        }
        .into();
        let display = format!("{}", error);
        assert!(display.contains("clomonitorPrefs"));
        assert!(display.contains("QuotaExceededError"));
    }

    #[test]
    fn test_error_api_is_transparent() {
        let error: Error = ApiError {
            kind: ErrorKind::Other,
            message: Some("project not found".to_string()),
        }
        .into();
        assert_eq!(format!("{}", error), "project not found");
    }

    #[test]
    fn test_error_display_invalid_color() {
        let error = Error::InvalidColor("#zzz".to_string());
        assert_eq!(format!("{}", error), "Invalid color: #zzz");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
