//! REST API契約
//!
//! エンドポイントのパス組み立て、Content-Typeによるレスポンス処理、
//! エラー変換をまとめる。実際の通信（fetch / reqwest）は各クライアントが行う。

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

use crate::query::{prepare_api_query_string, SearchQuery};

pub const API_BASE: &str = "/api";
pub const REPOSITORIES_CSV_PATH: &str = "/data/repositories.csv";
/// 検索結果の総件数ヘッダ
pub const PAGINATION_TOTAL_COUNT: &str = "Pagination-Total-Count";

/// エラー種別
///
/// `NotFound` は定義のみで、HTTP層からは生成しない（非2xxはすべて `Other`）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Other,
}

/// API呼び出しエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", .message.as_deref().unwrap_or("something went wrong"))]
pub struct ApiError {
    pub kind: ErrorKind,
    pub message: Option<String>,
}

impl ApiError {
    pub fn other(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Other, message: Some(message.into()) }
    }
}

/// 非2xxレスポンスをエラーに変換
///
/// JSONボディの `message` が空でなければそれを使う。
pub fn error_from_response(status: u16, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("message").and_then(Value::as_str).map(str::to_string))
        .filter(|message| !message.is_empty());
    tracing::debug!("API error response: status={} message={:?}", status, message);
    ApiError { kind: ErrorKind::Other, message }
}

/// Content-Typeで分岐したレスポンス本体
#[derive(Debug, Clone, PartialEq)]
pub enum ApiContent {
    Json(Value),
    Text(String),
    Raw(Vec<u8>),
}

impl ApiContent {
    /// JSONとして型に変換
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ApiContent::Json(value) => serde_json::from_value(value)
                .map_err(|e| ApiError::other(format!("unexpected response: {}", e))),
            _ => Err(ApiError::other("unexpected response: not JSON")),
        }
    }

    /// テキストとして取り出す
    pub fn into_text(self) -> Result<String, ApiError> {
        match self {
            ApiContent::Text(text) => Ok(text),
            ApiContent::Raw(bytes) => String::from_utf8(bytes)
                .map_err(|_| ApiError::other("unexpected response: not UTF-8")),
            ApiContent::Json(value) => Ok(value.to_string()),
        }
    }
}

/// レスポンスの扱い方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Json,
    Text,
    Raw,
}

/// Content-Typeからの判定
pub fn content_kind(content_type: Option<&str>) -> ContentKind {
    let Some(content_type) = content_type else {
        return ContentKind::Raw;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    if mime == "application/json" {
        ContentKind::Json
    } else if mime == "text/plain" || mime == "text/markdown" || mime.contains("csv") {
        ContentKind::Text
    } else {
        ContentKind::Raw
    }
}

/// 2xxレスポンスの本体を処理する
///
/// - JSON: 配列はそのまま `{ items: [...] }` に包む。要求されたヘッダ値をマージ
/// - テキスト系: 文字列
/// - その他: バイト列のまま
///
/// # Arguments
/// * `content_type` - Content-Typeヘッダ
/// * `body` - レスポンス本体
/// * `headers` - マージするヘッダ (名前, 値)。値がないものは無視
pub fn handle_content(
    content_type: Option<&str>,
    body: Vec<u8>,
    headers: &[(&str, Option<String>)],
) -> Result<ApiContent, ApiError> {
    match content_kind(content_type) {
        ContentKind::Json => {
            let value: Value = serde_json::from_slice(&body)
                .map_err(|e| ApiError::other(format!("invalid JSON response: {}", e)))?;
            let mut object = match value {
                Value::Array(items) => {
                    let mut object = serde_json::Map::new();
                    object.insert("items".to_string(), Value::Array(items));
                    object
                }
                Value::Object(object) => object,
                other => return Ok(ApiContent::Json(other)),
            };
            for (name, value) in headers {
                if let Some(value) = value {
                    object.insert(name.to_string(), Value::String(value.clone()));
                }
            }
            Ok(ApiContent::Json(Value::Object(object)))
        }
        ContentKind::Text => String::from_utf8(body)
            .map(ApiContent::Text)
            .map_err(|_| ApiError::other("invalid text response")),
        ContentKind::Raw => Ok(ApiContent::Raw(body)),
    }
}

/// パスセグメント用のエンコード（空白は %20）
pub fn encode_segment(segment: &str) -> String {
    form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// 検索
pub fn search_projects_path(query: &SearchQuery) -> String {
    format!("{}/projects/search{}", API_BASE, prepare_api_query_string(query))
}

/// プロジェクト詳細
pub fn project_path(foundation: &str, project: &str) -> String {
    format!("{}/projects/{}/{}", API_BASE, encode_segment(foundation), encode_segment(project))
}

/// スナップショット時点のプロジェクト詳細
pub fn project_snapshot_path(foundation: &str, project: &str, date: &str) -> String {
    format!("{}/snapshots/{}", project_path(foundation, project), encode_segment(date))
}

/// 統計（財団指定は任意）
pub fn stats_path(foundation: Option<&str>) -> String {
    match foundation.filter(|f| !f.is_empty()) {
        Some(foundation) => {
            let query: String = form_urlencoded::Serializer::new(String::new())
                .append_pair("foundation", foundation)
                .finish();
            format!("{}/stats?{}", API_BASE, query)
        }
        None => format!("{}/stats", API_BASE),
    }
}

/// スナップショット時点の統計
pub fn stats_snapshot_path(date: &str) -> String {
    format!("{}/stats/snapshots/{}", API_BASE, encode_segment(date))
}

/// リポジトリのレポート(Markdown)
pub fn report_path(foundation: &str, project: &str, repository: &str) -> String {
    format!("{}/{}/report.md", project_path(foundation, project), encode_segment(repository))
}

/// 閲覧数カウント（POST, 204）
pub fn track_view_path(project_id: &str) -> String {
    format!("{}/projects/views/{}", API_BASE, encode_segment(project_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{build_search_params, SortBy, SortDirection};
    use crate::types::SearchResults;
    use serde_json::json;

    #[test]
    fn test_content_kind() {
        assert_eq!(content_kind(Some("application/json; charset=utf-8")), ContentKind::Json);
        assert_eq!(content_kind(Some("text/markdown")), ContentKind::Text);
        assert_eq!(content_kind(Some("text/plain;charset=UTF-8")), ContentKind::Text);
        assert_eq!(content_kind(Some("text/csv")), ContentKind::Text);
        assert_eq!(content_kind(Some("image/png")), ContentKind::Raw);
        assert_eq!(content_kind(None), ContentKind::Raw);
    }

    #[test]
    fn test_json_array_wrapped_with_headers() {
        let content = handle_content(
            Some("application/json"),
            br#"[{"name":"envoy"}]"#.to_vec(),
            &[(PAGINATION_TOTAL_COUNT, Some("42".to_string()))],
        )
        .unwrap();
        assert_eq!(
            content,
            ApiContent::Json(json!({
                "items": [{ "name": "envoy" }],
                "Pagination-Total-Count": "42"
            }))
        );

        let results: SearchResults = content.into_json().unwrap();
        assert_eq!(results.total(), 42);
        assert_eq!(results.items[0].info.name, "envoy");
    }

    #[test]
    fn test_json_object_missing_header_ignored() {
        let content = handle_content(
            Some("application/json"),
            br#"{"generated_at": 1}"#.to_vec(),
            &[(PAGINATION_TOTAL_COUNT, None)],
        )
        .unwrap();
        assert_eq!(content, ApiContent::Json(json!({ "generated_at": 1 })));
    }

    #[test]
    fn test_text_and_raw() {
        let text = handle_content(Some("text/markdown"), b"# Report".to_vec(), &[]).unwrap();
        assert_eq!(text, ApiContent::Text("# Report".to_string()));

        let raw = handle_content(Some("application/octet-stream"), vec![0, 1], &[]).unwrap();
        assert_eq!(raw, ApiContent::Raw(vec![0, 1]));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let result = handle_content(Some("application/json"), b"{".to_vec(), &[]);
        assert_eq!(result.unwrap_err().kind, ErrorKind::Other);
    }

    #[test]
    fn test_error_from_response_message() {
        let error = error_from_response(400, br#"{"message": "invalid filter"}"#);
        assert_eq!(error, ApiError { kind: ErrorKind::Other, message: Some("invalid filter".into()) });
        assert_eq!(error.to_string(), "invalid filter");
    }

    #[test]
    fn test_error_from_response_without_message() {
        for body in [&br#"{"message": ""}"#[..], &b"not json"[..], &b""[..]] {
            let error = error_from_response(500, body);
            assert_eq!(error.message, None);
            assert_eq!(error.to_string(), "something went wrong");
        }
    }

    #[test]
    fn test_not_found_maps_to_other() {
        let error = error_from_response(404, b"");
        assert_eq!(error.kind, ErrorKind::Other);
    }

    #[test]
    fn test_paths() {
        assert_eq!(project_path("cncf", "artifact-hub"), "/api/projects/cncf/artifact-hub");
        assert_eq!(
            project_snapshot_path("cncf", "artifact-hub", "2022-10-28"),
            "/api/projects/cncf/artifact-hub/snapshots/2022-10-28"
        );
        assert_eq!(report_path("cncf", "envoy", "envoy proxy"), "/api/projects/cncf/envoy/envoy%20proxy/report.md");
        assert_eq!(stats_path(None), "/api/stats");
        assert_eq!(stats_path(Some("")), "/api/stats");
        assert_eq!(stats_path(Some("lfaidata")), "/api/stats?foundation=lfaidata");
        assert_eq!(stats_snapshot_path("2022-01-01"), "/api/stats/snapshots/2022-01-01");
        assert_eq!(track_view_path("abc"), "/api/projects/views/abc");
    }

    #[test]
    fn test_search_path() {
        let query = SearchQuery {
            filters: build_search_params("?rating=a&page=2"),
            limit: 20,
            sort_by: SortBy::Score,
            sort_direction: SortDirection::Desc,
        };
        assert_eq!(
            search_projects_path(&query),
            "/api/projects/search?rating=a&limit=20&offset=20&sort_by=score&sort_direction=desc"
        );
    }
}
