use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use clomonitor_common::prefs::is_valid_limit;
use clomonitor_common::query::DEFAULT_PAGE;
use clomonitor_common::{
    ConfiguredTheme, FilterKind, FilterMap, Prefs, SearchFilters, SearchQuery, SortBy,
    SortDirection,
};
use std::path::PathBuf;

use crate::error::{CloMonitorError, Result};

#[derive(Parser)]
#[command(name = "clomonitor")]
#[command(about = "オープンソースプロジェクトの健全性カタログを検索・表示", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// APIのベースURL（設定・環境変数より優先）
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// プロジェクトを検索
    Search(SearchArgs),

    /// プロジェクト詳細を表示
    Project {
        /// 財団 (例: cncf)
        foundation: String,

        /// プロジェクト名
        name: String,

        /// スナップショット日付 (YYYY-MM-DD)
        #[arg(long)]
        snapshot: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// リポジトリのレポート(Markdown)を表示
    Report {
        /// 財団
        foundation: String,

        /// プロジェクト名
        project: String,

        /// リポジトリ名
        repository: String,
    },

    /// 統計を表示
    Stats {
        /// 財団で絞り込み
        #[arg(long)]
        foundation: Option<String>,

        /// スナップショット日付 (YYYY-MM-DD)
        #[arg(long)]
        snapshot: Option<String>,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// リポジトリ一覧CSVを保存
    ExportCsv {
        /// 出力ファイル
        #[arg(short, long, default_value = "repositories.csv")]
        output: PathBuf,
    },

    /// 表示設定（件数・並び順・テーマ）を表示/変更
    Prefs {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 表示件数 (20/40/60)
        #[arg(long)]
        limit: Option<u32>,

        /// 並び替えキー (name/score)
        #[arg(long)]
        sort_by: Option<SortBy>,

        /// 並び順 (asc/desc)
        #[arg(long)]
        sort_direction: Option<SortDirection>,

        /// テーマ (automatic/light/dark)
        #[arg(long)]
        theme: Option<ConfiguredTheme>,

        /// 対話的に設定
        #[arg(short, long)]
        interactive: bool,
    },

    /// 設定を表示/編集
    Config {
        /// APIのベースURLを設定
        #[arg(long)]
        set_api_url: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct SearchArgs {
    /// 検索テキスト
    pub text: Option<String>,

    /// フィルタ (例: maturity=graduated, rating=a)。複数指定可
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(FilterKind, String)>,

    /// 受け入れ日の開始 (YYYY-MM-DD)
    #[arg(long)]
    pub accepted_from: Option<String>,

    /// 受け入れ日の終了 (YYYY-MM-DD)
    #[arg(long)]
    pub accepted_to: Option<String>,

    /// ページ番号
    #[arg(short, long, default_value = "1")]
    pub page: u32,

    /// 表示件数（省略時は保存済み設定）
    #[arg(short, long)]
    pub limit: Option<u32>,

    /// 並び替えキー（省略時は保存済み設定）
    #[arg(long)]
    pub sort_by: Option<SortBy>,

    /// 並び順（省略時は保存済み設定）
    #[arg(long)]
    pub sort_direction: Option<SortDirection>,

    /// JSONで出力
    #[arg(long)]
    pub json: bool,
}

/// `key=value` 形式のフィルタを検証する
pub fn parse_filter(value: &str) -> std::result::Result<(FilterKind, String), String> {
    let (key, choice) = value
        .split_once('=')
        .ok_or_else(|| format!("フィルタは key=value 形式で指定してください: {}", value))?;
    let kind = FilterKind::from_key(key.trim()).ok_or_else(|| {
        let keys: Vec<&str> = FilterKind::ALL.iter().map(|k| k.key()).collect();
        format!("不明なフィルタ: {}（使用可能: {}）", key, keys.join(", "))
    })?;
    let choice = choice.trim();
    if !kind.choices().iter().any(|c| c.value == choice) {
        return Err(format!("{} に指定できない値です: {}", kind.key(), choice));
    }
    Ok((kind, choice.to_string()))
}

/// YYYY-MM-DD を検証する
pub fn validate_date(date: &str) -> Result<String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| CloMonitorError::InvalidDate(date.to_string()))
}

impl SearchArgs {
    /// URLと同じ形の検索条件
    pub fn to_filters(&self) -> Result<SearchFilters> {
        let mut filters = FilterMap::new();
        for (kind, value) in &self.filters {
            if !filters.contains(kind.key(), value) {
                filters.push(kind.key(), value.clone());
            }
        }

        let accepted_from = self.accepted_from.as_deref().map(validate_date).transpose()?;
        let accepted_to = self.accepted_to.as_deref().map(validate_date).transpose()?;
        if let (Some(from), Some(to)) = (&accepted_from, &accepted_to) {
            if from > to {
                return Err(CloMonitorError::InvalidArgument(format!(
                    "受け入れ日の範囲が逆です: {} > {}",
                    from, to
                )));
            }
        }

        Ok(SearchFilters {
            text: self.text.clone().filter(|t| !t.trim().is_empty()),
            page_number: self.page.max(DEFAULT_PAGE),
            filters,
            accepted_from,
            accepted_to,
        })
    }

    /// 保存済み設定で不足分を補ったAPI検索条件
    pub fn to_query(&self, prefs: &Prefs) -> Result<SearchQuery> {
        let limit = self.limit.unwrap_or(prefs.search.limit);
        if !is_valid_limit(limit) {
            return Err(CloMonitorError::InvalidArgument(format!(
                "表示件数は 20, 40, 60 のいずれかです: {}",
                limit
            )));
        }
        Ok(SearchQuery {
            filters: self.to_filters()?,
            limit,
            sort_by: self.sort_by.unwrap_or(prefs.search.sort.by),
            sort_direction: self.sort_direction.unwrap_or(prefs.search.sort.direction),
        })
    }
}
