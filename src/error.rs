use clomonitor_common::ApiError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CloMonitorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("不正な引数: {0}")]
    InvalidArgument(String),

    #[error("日付の形式が不正です（YYYY-MM-DD）: {0}")]
    InvalidDate(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Common(#[from] clomonitor_common::Error),

    #[error("HTTP通信エラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("入力エラー: {0}")]
    Prompt(String),
}

pub type Result<T> = std::result::Result<T, CloMonitorError>;
