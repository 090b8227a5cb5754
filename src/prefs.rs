//! CLIの表示設定
//!
//! Web版と同じ設定ストア（マイグレーション込み）をJSONファイルに保存する。

use clomonitor_common::prefs::{is_valid_limit, SEARCH_LIMITS};
use clomonitor_common::{
    Action, ConfiguredTheme, FileStorage, LocalPrefs, NoopEffects, Prefs, SortBy, SortDirection,
    Store,
};
use dialoguer::Select;
use std::path::Path;
use tracing::info;

use crate::error::{CloMonitorError, Result};

pub type CliStore = Store<FileStorage, NoopEffects>;

pub fn open_store(path: &Path) -> CliStore {
    Store::new(LocalPrefs::load(FileStorage::new(path)), NoopEffects)
}

/// 変更内容（指定されたものだけ反映）
#[derive(Debug, Clone, Copy, Default)]
pub struct PrefsUpdate {
    pub limit: Option<u32>,
    pub sort_by: Option<SortBy>,
    pub sort_direction: Option<SortDirection>,
    pub theme: Option<ConfiguredTheme>,
}

impl PrefsUpdate {
    pub fn is_empty(&self) -> bool {
        self.limit.is_none()
            && self.sort_by.is_none()
            && self.sort_direction.is_none()
            && self.theme.is_none()
    }
}

/// 変更をアクションとして適用する
///
/// 並び替えはキーと向きの片方だけでも、もう片方は現在値を引き継ぐ。
pub fn apply_update(store: &mut CliStore, update: PrefsUpdate) -> Result<Prefs> {
    if let Some(limit) = update.limit {
        if !is_valid_limit(limit) {
            return Err(CloMonitorError::InvalidArgument(format!(
                "表示件数は 20, 40, 60 のいずれかです: {}",
                limit
            )));
        }
        store.dispatch(Action::UpdateLimit(limit));
    }

    if update.sort_by.is_some() || update.sort_direction.is_some() {
        let current = store.prefs().search.sort;
        store.dispatch(Action::UpdateSort {
            by: update.sort_by.unwrap_or(current.by),
            direction: update.sort_direction.unwrap_or(current.direction),
        });
    }

    if let Some(theme) = update.theme {
        store.dispatch(Action::UpdateTheme(theme));
    }

    info!("preferences updated: {:?}", store.prefs());
    Ok(*store.prefs())
}

fn select<T: Copy + PartialEq>(prompt: &str, items: &[(T, &str)], current: T) -> Result<T> {
    let labels: Vec<&str> = items.iter().map(|(_, label)| *label).collect();
    let default = items.iter().position(|(value, _)| *value == current).unwrap_or(0);
    let index = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()
        .map_err(|e| CloMonitorError::Prompt(e.to_string()))?;
    Ok(items[index].0)
}

/// 対話的に設定を選ぶ
pub fn prompt_update(current: &Prefs) -> Result<PrefsUpdate> {
    let limit_labels: Vec<String> = SEARCH_LIMITS.iter().map(|l| format!("{}件", l)).collect();
    let limits: Vec<(u32, &str)> = SEARCH_LIMITS
        .iter()
        .copied()
        .zip(limit_labels.iter().map(String::as_str))
        .collect();
    let limit = select("表示件数", &limits, current.search.limit)?;

    let sort_by = select(
        "並び替えキー",
        &[(SortBy::Score, "スコア"), (SortBy::Name, "名前")],
        current.search.sort.by,
    )?;
    let sort_direction = select(
        "並び順",
        &[(SortDirection::Desc, "降順"), (SortDirection::Asc, "昇順")],
        current.search.sort.direction,
    )?;
    let theme = select(
        "テーマ",
        &[
            (ConfiguredTheme::Automatic, "自動"),
            (ConfiguredTheme::Light, "ライト"),
            (ConfiguredTheme::Dark, "ダーク"),
        ],
        current.theme.configured,
    )?;

    Ok(PrefsUpdate {
        limit: Some(limit),
        sort_by: Some(sort_by),
        sort_direction: Some(sort_direction),
        theme: Some(theme),
    })
}
