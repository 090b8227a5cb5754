//! 検索クエリ文字列コーデック
//!
//! URLのクエリ文字列と検索条件（SearchFilters）を相互変換する。
//! - build_search_params: クエリ文字列 → SearchFilters
//! - prepare_query_string: SearchFilters → ブラウザURL用クエリ文字列
//! - prepare_api_query_string: SearchQuery → 検索APIエンドポイント用クエリ文字列

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::checks::CHECKS;

pub const TEXT_PARAM: &str = "text";
pub const PAGE_PARAM: &str = "page";
pub const ACCEPTED_FROM_PARAM: &str = "accepted_from";
pub const ACCEPTED_TO_PARAM: &str = "accepted_to";

/// ページ番号の既定値（1始まり）
pub const DEFAULT_PAGE: u32 = 1;

/// 検索で使えるフィルタ（ホワイトリスト）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Foundation,
    Maturity,
    Rating,
    PassingCheck,
    NotPassingCheck,
}

/// フィルタの選択肢
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterChoice {
    pub value: &'static str,
    pub name: &'static str,
}

const FOUNDATION_CHOICES: &[FilterChoice] = &[
    FilterChoice { value: "cncf", name: "CNCF" },
    FilterChoice { value: "lfaidata", name: "LF AI & Data" },
];

const MATURITY_CHOICES: &[FilterChoice] = &[
    FilterChoice { value: "graduated", name: "Graduated" },
    FilterChoice { value: "incubating", name: "Incubating" },
    FilterChoice { value: "sandbox", name: "Sandbox" },
];

const RATING_CHOICES: &[FilterChoice] = &[
    FilterChoice { value: "a", name: "A [75-100]" },
    FilterChoice { value: "b", name: "B [50-74]" },
    FilterChoice { value: "c", name: "C [25-49]" },
    FilterChoice { value: "d", name: "D [0-24]" },
];

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Foundation,
        FilterKind::Maturity,
        FilterKind::Rating,
        FilterKind::PassingCheck,
        FilterKind::NotPassingCheck,
    ];

    /// クエリパラメータ名
    pub fn key(&self) -> &'static str {
        match self {
            FilterKind::Foundation => "foundation",
            FilterKind::Maturity => "maturity",
            FilterKind::Rating => "rating",
            FilterKind::PassingCheck => "passing_check",
            FilterKind::NotPassingCheck => "not_passing_check",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }

    /// 画面表示用タイトル
    pub fn title(&self) -> &'static str {
        match self {
            FilterKind::Foundation => "Foundation",
            FilterKind::Maturity => "Maturity level",
            FilterKind::Rating => "Rating",
            FilterKind::PassingCheck => "Passing check",
            FilterKind::NotPassingCheck => "Not passing check",
        }
    }

    /// 選択肢一覧（チェック系はチェックカタログから生成）
    pub fn choices(&self) -> Vec<FilterChoice> {
        match self {
            FilterKind::Foundation => FOUNDATION_CHOICES.to_vec(),
            FilterKind::Maturity => MATURITY_CHOICES.to_vec(),
            FilterKind::Rating => RATING_CHOICES.to_vec(),
            FilterKind::PassingCheck | FilterKind::NotPassingCheck => CHECKS
                .iter()
                .map(|check| FilterChoice { value: check.id, name: check.name })
                .collect(),
        }
    }
}

/// 挿入順を保持するフィルタマップ
///
/// キーの挿入順と、キーごとの値の順序をそのまま保つ。
/// エンコード結果の順序はこの順序に従う。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterMap {
    entries: Vec<(String, Vec<String>)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// キーの末尾に値を追加（キーがなければ末尾に作成）
    pub fn push(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((key.to_string(), vec![value])),
        }
    }

    /// キーの値を置き換える。空の値リストはキーごと削除する。
    pub fn set(&mut self, key: &str, values: Vec<String>) {
        if values.is_empty() {
            self.remove(key);
            return;
        }
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => *existing = values,
            None => self.entries.push((key.to_string(), values)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
    }

    pub fn contains(&self, key: &str, value: &str) -> bool {
        self.get(key).is_some_and(|values| values.iter().any(|v| v == value))
    }

    pub fn remove(&mut self, key: &str) -> Option<Vec<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// チェックボックス操作: あれば外し、なければ追加する
    pub fn toggle(&mut self, key: &str, value: &str) {
        if self.contains(key, value) {
            let remaining: Vec<String> = self
                .get(key)
                .unwrap_or_default()
                .iter()
                .filter(|v| v.as_str() != value)
                .cloned()
                .collect();
            self.set(key, remaining);
        } else {
            self.push(key, value);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(key, values)| (key.as_str(), values.as_slice()))
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut map = FilterMap::new();
        for (key, values) in iter {
            let key = key.into();
            for value in values {
                map.push(&key, value);
            }
        }
        map
    }
}

/// URLから復元される検索条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub text: Option<String>,
    pub page_number: u32,
    pub filters: FilterMap,
    /// YYYY-MM-DD（ここでは検証しない）
    pub accepted_from: Option<String>,
    pub accepted_to: Option<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            text: None,
            page_number: DEFAULT_PAGE,
            filters: FilterMap::new(),
            accepted_from: None,
            accepted_to: None,
        }
    }
}

/// 並び替えキー
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Name,
    Score,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::Score => "score",
        }
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortBy::Name),
            "score" => Ok(SortBy::Score),
            _ => Err(format!("Unknown sort field: {}. Use name or score", s)),
        }
    }
}

/// 並び順
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(format!("Unknown sort direction: {}. Use asc or desc", s)),
        }
    }
}

/// 検索APIに渡す条件（URL由来の条件 + 設定由来の件数・並び順）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub filters: SearchFilters,
    pub limit: u32,
    pub sort_by: SortBy,
    pub sort_direction: SortDirection,
}

impl SearchQuery {
    pub fn offset(&self) -> u32 {
        offset_for(self.filters.page_number, self.limit)
    }
}

/// ページ番号と件数からオフセットを求める
pub fn offset_for(page_number: u32, limit: u32) -> u32 {
    page_number.max(DEFAULT_PAGE).saturating_sub(1).saturating_mul(limit)
}

/// クエリ文字列から検索条件を組み立てる
///
/// 先頭の `?` はあってもなくてもよい。
/// ホワイトリスト外のキーは黙って無視する。
///
/// # Examples
/// ```
/// use clomonitor_common::build_search_params;
///
/// let filters = build_search_params("?maturity=graduated&maturity=incubating&page=2");
/// assert_eq!(filters.page_number, 2);
/// assert_eq!(
///     filters.filters.get("maturity").unwrap(),
///     &["graduated".to_string(), "incubating".to_string()]
/// );
/// ```
pub fn build_search_params(query: &str) -> SearchFilters {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut search = SearchFilters::default();
    let mut page_seen = false;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            TEXT_PARAM => {
                if search.text.is_none() {
                    search.text = Some(value.into_owned());
                }
            }
            ACCEPTED_FROM_PARAM => {
                if search.accepted_from.is_none() {
                    search.accepted_from = Some(value.into_owned());
                }
            }
            ACCEPTED_TO_PARAM => {
                if search.accepted_to.is_none() {
                    search.accepted_to = Some(value.into_owned());
                }
            }
            PAGE_PARAM => {
                if !page_seen {
                    page_seen = true;
                    search.page_number = parse_page(&value);
                }
            }
            other => {
                if let Some(kind) = FilterKind::from_key(other) {
                    search.filters.push(kind.key(), value.into_owned());
                }
            }
        }
    }

    search
}

fn parse_page(value: &str) -> u32 {
    match value.trim().parse::<i64>() {
        Ok(page) if page >= i64::from(DEFAULT_PAGE) => u32::try_from(page).unwrap_or(u32::MAX),
        _ => DEFAULT_PAGE,
    }
}

/// フィルタ・日付・テキストを順に書き出す（URL用とAPI用で共通）
fn append_search_params(
    serializer: &mut form_urlencoded::Serializer<'_, String>,
    search: &SearchFilters,
) {
    for (key, values) in search.filters.iter() {
        for value in values {
            serializer.append_pair(key, value);
        }
    }
    if let Some(from) = &search.accepted_from {
        serializer.append_pair(ACCEPTED_FROM_PARAM, from);
    }
    if let Some(to) = &search.accepted_to {
        serializer.append_pair(ACCEPTED_TO_PARAM, to);
    }
    if let Some(text) = &search.text {
        serializer.append_pair(TEXT_PARAM, text);
    }
}

/// ブラウザURL用のクエリ文字列を作る（`page` は常に末尾）
///
/// # Examples
/// ```
/// use clomonitor_common::{prepare_query_string, FilterMap, SearchFilters};
///
/// let mut filters = FilterMap::new();
/// filters.push("category", "0");
/// filters.push("category", "2");
/// let search = SearchFilters {
///     text: Some("test".to_string()),
///     filters,
///     ..Default::default()
/// };
/// assert_eq!(prepare_query_string(&search), "?category=0&category=2&text=test&page=1");
/// ```
pub fn prepare_query_string(search: &SearchFilters) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_search_params(&mut serializer, search);
    serializer.append_pair(PAGE_PARAM, &search.page_number.to_string());
    format!("?{}", serializer.finish())
}

/// 検索API用のクエリ文字列を作る
///
/// フィルタ部分は prepare_query_string とバイト単位で同一。
/// `page` の代わりに `limit` / `offset` / 並び順を付ける。
pub fn prepare_api_query_string(query: &SearchQuery) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    append_search_params(&mut serializer, &query.filters);
    serializer.append_pair("limit", &query.limit.to_string());
    serializer.append_pair("offset", &query.offset().to_string());
    serializer.append_pair("sort_by", query.sort_by.as_str());
    serializer.append_pair("sort_direction", query.sort_direction.as_str());
    format!("?{}", serializer.finish())
}

/// ページ送り計算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub limit: u32,
    pub current: u32,
}

impl Pagination {
    pub fn new(total: u64, limit: u32, current: u32) -> Self {
        Self { total, limit: limit.max(1), current: current.max(DEFAULT_PAGE) }
    }

    /// 総ページ数（0件でも1ページ）
    pub fn pages(&self) -> u32 {
        let pages = self.total.div_ceil(u64::from(self.limit)).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_prev(&self) -> bool {
        self.current > DEFAULT_PAGE
    }

    pub fn has_next(&self) -> bool {
        self.current < self.pages()
    }

    /// 現在ページを中心に最大 `window` 個のページ番号
    pub fn visible_pages(&self, window: u32) -> Vec<u32> {
        let pages = self.pages();
        let window = window.clamp(1, pages);
        let current = self.current.min(pages);
        let half = window / 2;
        let mut start = current.saturating_sub(half).max(DEFAULT_PAGE);
        if start + window - 1 > pages {
            start = pages + 1 - window;
        }
        (start..start + window).collect()
    }
}
