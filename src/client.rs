//! REST API クライアント（reqwest）
//!
//! パス組み立てとレスポンス解釈は `clomonitor_common::api` と共通。

use clomonitor_common::api::{
    self, error_from_response, handle_content, PAGINATION_TOTAL_COUNT, REPOSITORIES_CSV_PATH,
};
use clomonitor_common::{ApiContent, ProjectDetail, SearchQuery, SearchResults, Stats};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use std::time::Duration;
use tracing::debug;

use crate::error::Result;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// # Arguments
    /// * `base_url` - 例: "https://clomonitor.io"
    /// * `timeout_seconds` - リクエストのタイムアウト
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .user_agent(concat!("clomonitor-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn call(&self, method: Method, path: &str, merge_headers: &[&str]) -> Result<ApiContent> {
        let url = self.url(path);
        debug!("{} {}", method, url);

        let response = self.http.request(method, &url).send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if !status.is_success() {
            return Err(error_from_response(status.as_u16(), &body).into());
        }

        let content_type = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok());
        let merged: Vec<(&str, Option<String>)> = merge_headers
            .iter()
            .map(|name| {
                let value = headers.get(*name).and_then(|v| v.to_str().ok()).map(str::to_string);
                (*name, value)
            })
            .collect();

        Ok(handle_content(content_type, body, &merged)?)
    }

    pub async fn search_projects(&self, query: &SearchQuery) -> Result<SearchResults> {
        let content = self
            .call(Method::GET, &api::search_projects_path(query), &[PAGINATION_TOTAL_COUNT])
            .await?;
        Ok(content.into_json()?)
    }

    pub async fn get_project_detail(
        &self,
        foundation: &str,
        project: &str,
        snapshot: Option<&str>,
    ) -> Result<ProjectDetail> {
        let path = match snapshot {
            Some(date) => api::project_snapshot_path(foundation, project, date),
            None => api::project_path(foundation, project),
        };
        Ok(self.call(Method::GET, &path, &[]).await?.into_json()?)
    }

    pub async fn get_stats(&self, foundation: Option<&str>, snapshot: Option<&str>) -> Result<Stats> {
        let path = match snapshot {
            Some(date) => api::stats_snapshot_path(date),
            None => api::stats_path(foundation),
        };
        Ok(self.call(Method::GET, &path, &[]).await?.into_json()?)
    }

    pub async fn get_repository_report(
        &self,
        foundation: &str,
        project: &str,
        repository: &str,
    ) -> Result<String> {
        let path = api::report_path(foundation, project, repository);
        Ok(self.call(Method::GET, &path, &[]).await?.into_text()?)
    }

    pub async fn get_repositories_csv(&self) -> Result<String> {
        Ok(self.call(Method::GET, REPOSITORIES_CSV_PATH, &[]).await?.into_text()?)
    }
}
