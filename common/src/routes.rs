//! 画面ルーティング
//!
//! URLパスを画面に対応づける。旧形式の `/projects/:project` は
//! `cncf` 財団のURLへリダイレクトする。

use crate::api::encode_segment;
use crate::query::{prepare_query_string, SearchFilters};

/// 旧URLの既定財団
pub const DEFAULT_FOUNDATION: &str = "cncf";

/// 画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search,
    Project { foundation: String, name: String },
    Stats,
    /// 別URLへ置き換える
    Redirect(String),
    NotFound,
}

impl Route {
    /// パス（クエリ文字列を除く）から画面を決める
    pub fn resolve(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["search"] => Route::Search,
            ["stats"] => Route::Stats,
            ["projects", name] => Route::Redirect(project_href(DEFAULT_FOUNDATION, name)),
            ["projects", foundation, name] => Route::Project {
                foundation: decode_segment(foundation),
                name: decode_segment(name),
            },
            _ => Route::NotFound,
        }
    }
}

fn decode_segment(segment: &str) -> String {
    url::form_urlencoded::parse(format!("s={}", segment.replace('+', "%2B").replace('&', "%26")).as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| segment.to_string())
}

pub fn project_href(foundation: &str, name: &str) -> String {
    format!("/projects/{}/{}", encode_segment(foundation), encode_segment(name))
}

pub fn search_href(filters: &SearchFilters) -> String {
    format!("/search{}", prepare_query_string(filters))
}

/// 入力テキストだけで検索するURL（空白のみならテキストなし）
pub fn text_search_href(text: &str) -> String {
    let text = text.trim();
    search_href(&SearchFilters {
        text: Some(text.to_string()).filter(|t| !t.is_empty()),
        ..Default::default()
    })
}

pub fn stats_href() -> &'static str {
    "/stats"
}
