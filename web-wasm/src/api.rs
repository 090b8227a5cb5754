//! REST API クライアント（fetch）
//!
//! パス組み立てとレスポンス解釈は `clomonitor_common::api` に任せ、
//! ここではバイト列の送受信だけを行う。重複排除・キャンセル・リトライはしない。

use clomonitor_common::api::{
    self, error_from_response, handle_content, PAGINATION_TOTAL_COUNT, REPOSITORIES_CSV_PATH,
};
use clomonitor_common::{ApiContent, ApiError, ProjectDetail, SearchQuery, SearchResults, Stats};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

fn js_error(e: JsValue) -> ApiError {
    ApiError::other(format!("{:?}", e))
}

async fn read_body(response: &Response) -> Result<Vec<u8>, ApiError> {
    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(Uint8Array::new(&buffer).to_vec())
}

/// リクエストを送り、Content-Typeに応じて本体を解釈する
///
/// # Arguments
/// * `method` - HTTPメソッド
/// * `path` - 同一オリジンのパス
/// * `merge_headers` - JSON本体にマージするレスポンスヘッダ名
async fn call(method: &str, path: &str, merge_headers: &[&str]) -> Result<ApiContent, ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    let request = Request::new_with_str_and_init(path, &opts).map_err(js_error)?;

    let window = web_sys::window().ok_or_else(|| ApiError::other("no window"))?;
    let value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;

    if !response.ok() {
        let body = read_body(&response).await.unwrap_or_default();
        return Err(error_from_response(response.status(), &body));
    }

    let headers = response.headers();
    let content_type = headers.get("Content-Type").ok().flatten();
    let merged: Vec<(&str, Option<String>)> = merge_headers
        .iter()
        .map(|name| (*name, headers.get(name).ok().flatten()))
        .collect();

    let body = read_body(&response).await?;
    handle_content(content_type.as_deref(), body, &merged)
}

pub async fn search_projects(query: &SearchQuery) -> Result<SearchResults, ApiError> {
    call("GET", &api::search_projects_path(query), &[PAGINATION_TOTAL_COUNT])
        .await?
        .into_json()
}

/// プロジェクト詳細（スナップショット日付指定は任意）
pub async fn get_project_detail(
    foundation: &str,
    project: &str,
    snapshot: Option<&str>,
) -> Result<ProjectDetail, ApiError> {
    let path = match snapshot {
        Some(date) => api::project_snapshot_path(foundation, project, date),
        None => api::project_path(foundation, project),
    };
    call("GET", &path, &[]).await?.into_json()
}

pub async fn get_stats(foundation: Option<&str>, snapshot: Option<&str>) -> Result<Stats, ApiError> {
    let path = match snapshot {
        Some(date) => api::stats_snapshot_path(date),
        None => api::stats_path(foundation),
    };
    call("GET", &path, &[]).await?.into_json()
}

pub async fn get_repository_report(
    foundation: &str,
    project: &str,
    repository: &str,
) -> Result<String, ApiError> {
    call("GET", &api::report_path(foundation, project, repository), &[])
        .await?
        .into_text()
}

pub async fn get_repositories_csv() -> Result<String, ApiError> {
    call("GET", REPOSITORIES_CSV_PATH, &[]).await?.into_text()
}

/// 閲覧数を記録する（結果は待たない）
pub fn track_view(project_id: String) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = call("POST", &api::track_view_path(&project_id), &[]).await {
            gloo::console::warn!(format!("view tracking failed: {}", e));
        }
    });
}
