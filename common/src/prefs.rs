//! ユーザー設定の永続化
//!
//! 設定はプロファイル名 → 設定JSON のマップ（PrefsList）として1つのキーに保存し、
//! 適用済みマイグレーション番号を別キーに10進文字列で保存する。
//! ストレージの読み書き失敗は握りつぶし、メモリ上の値でセッションを継続する。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::error::StorageError;
use crate::migrations::{apply_migrations, MIGRATIONS};
use crate::query::{SortBy, SortDirection};

/// 設定リストの保存キー
pub const PREFS_KEY: &str = "clomonitorPrefs";
/// 適用済みマイグレーション番号の保存キー
pub const APPLIED_MIGRATION_KEY: &str = "clomonitorAppliedMigration";
/// 唯一のプロファイル
pub const GUEST_PROFILE: &str = "guest";

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// 選択可能な1ページあたり件数
pub const SEARCH_LIMITS: [u32; 3] = [20, 40, 60];

/// プロファイル名 → 設定（マイグレーション中は型なしJSONとして扱う）
pub type PrefsList = Map<String, Value>;

/// ユーザーが選んだテーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfiguredTheme {
    Automatic,
    #[default]
    Light,
    Dark,
}

impl ConfiguredTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfiguredTheme::Automatic => "automatic",
            ConfiguredTheme::Light => "light",
            ConfiguredTheme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for ConfiguredTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "automatic" | "auto" => Ok(ConfiguredTheme::Automatic),
            "light" => Ok(ConfiguredTheme::Light),
            "dark" => Ok(ConfiguredTheme::Dark),
            _ => Err(format!("Unknown theme: {}. Use automatic, light, or dark", s)),
        }
    }
}

/// 実際に表示に使うテーマ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectiveTheme {
    #[default]
    Light,
    Dark,
}

impl EffectiveTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectiveTheme::Light => "light",
            EffectiveTheme::Dark => "dark",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortPrefs {
    pub by: SortBy,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPrefs {
    pub limit: u32,
    pub sort: SortPrefs,
}

impl Default for SearchPrefs {
    fn default() -> Self {
        Self { limit: DEFAULT_SEARCH_LIMIT, sort: SortPrefs::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePrefs {
    pub configured: ConfiguredTheme,
    pub effective: EffectiveTheme,
}

/// ユーザー設定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Prefs {
    pub search: SearchPrefs,
    pub theme: ThemePrefs,
}

impl Prefs {
    /// 既定値をJSONで返す（マイグレーション・マージ用）
    pub fn default_value() -> Value {
        serde_json::to_value(Prefs::default()).unwrap_or(Value::Null)
    }
}

/// 件数が選択肢に含まれるか
pub fn is_valid_limit(limit: u32) -> bool {
    SEARCH_LIMITS.contains(&limit)
}

/// 設定の保存先
///
/// ブラウザでは localStorage、CLIではJSONファイル、テストではメモリ。
pub trait PrefsStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// メモリ上のストレージ
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
    unavailable: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 初期値つきで作成
    pub fn with_items<K: Into<String>, V: Into<String>>(items: impl IntoIterator<Item = (K, V)>) -> Self {
        let items = items.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self { items: RefCell::new(items), unavailable: false }
    }

    /// すべての操作が失敗するストレージ（シークレットモード相当）
    pub fn unavailable() -> Self {
        Self { items: RefCell::default(), unavailable: true }
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl PrefsStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.unavailable {
            return Err(StorageError::Unavailable("storage disabled".into()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.unavailable {
            return Err(StorageError::Write {
                key: key.to_string(),
                reason: "storage disabled".into(),
            });
        }
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSONファイルに保存するストレージ（非WASM環境のみ）
///
/// ファイルの中身はキー → 文字列値のJSONオブジェクト。
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStorage {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self, key: &str) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        // 壊れたファイルは空として扱う（値側で既定値に戻る）
        Ok(serde_json::from_str(&content).unwrap_or_default())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl PrefsStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all(key)?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write { key: key.to_string(), reason };

        let mut items = self.read_all(key)?;
        items.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_err(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(&items).map_err(|e| write_err(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|e| write_err(e.to_string()))
    }
}

/// 設定ストア（1ストレージにつき1つ）
pub struct LocalPrefs<S: PrefsStorage> {
    storage: S,
    list: PrefsList,
}

impl<S: PrefsStorage> LocalPrefs<S> {
    /// ストレージから読み込み、未適用のマイグレーションを適用する
    ///
    /// - 読み込み失敗: メモリ上の既定値のみ（書き込みはしない）
    /// - 未保存・JSON不正: 既定値で初期化して即保存
    /// - 保存済み: マイグレーション適用後、変化があれば保存
    pub fn load(storage: S) -> Self {
        let raw = match storage.get_item(PREFS_KEY) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("preferences unavailable, using defaults: {}", e);
                return Self { storage, list: default_list() };
            }
        };

        let parsed = raw.as_deref().and_then(parse_list);
        let mut prefs = match parsed {
            Some(list) => Self { storage, list },
            None => {
                debug!("initializing preferences with defaults");
                let prefs = Self { storage, list: default_list() };
                prefs.persist();
                prefs.record_migration(MIGRATIONS.iter().map(|m| m.key).max());
                return prefs;
            }
        };

        let last_applied = prefs.last_applied_migration();
        let outcome = apply_migrations(std::mem::take(&mut prefs.list), last_applied);
        prefs.list = outcome.list;
        if outcome.applied_up_to.is_some() {
            prefs.persist();
            prefs.record_migration(outcome.applied_up_to);
        }
        prefs
    }

    /// ゲストの設定を既定値にマージして返す
    pub fn get_prefs(&self) -> Prefs {
        resolve_prefs(self.list.get(GUEST_PROFILE))
    }

    /// ゲストの設定を上書きして保存（保存失敗は無視）
    pub fn set_prefs(&mut self, prefs: &Prefs) {
        match serde_json::to_value(prefs) {
            Ok(value) => {
                self.list.insert(GUEST_PROFILE.to_string(), value);
                self.persist();
            }
            Err(e) => warn!("failed to serialize preferences: {}", e),
        }
    }

    /// 保存中の生データ（マイグレーション後）
    pub fn list(&self) -> &PrefsList {
        &self.list
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn last_applied_migration(&self) -> Option<u32> {
        match self.storage.get_item(APPLIED_MIGRATION_KEY) {
            Ok(Some(raw)) => raw.trim().parse().ok(),
            Ok(None) => None,
            Err(e) => {
                warn!("failed to read applied migration marker: {}", e);
                None
            }
        }
    }

    fn record_migration(&self, key: Option<u32>) {
        let Some(key) = key else {
            return;
        };
        if let Err(e) = self.storage.set_item(APPLIED_MIGRATION_KEY, &key.to_string()) {
            // Incognito mode
            warn!("failed to record applied migration {}: {}", key, e);
        }
    }

    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.list) {
            Ok(serialized) => serialized,
            Err(e) => {
                warn!("failed to serialize preferences: {}", e);
                return;
            }
        };
        if let Err(e) = self.storage.set_item(PREFS_KEY, &serialized) {
            // Incognito mode
            warn!("preferences not persisted: {}", e);
        }
    }
}

/// 既定値のみを持つ設定リスト
pub fn default_list() -> PrefsList {
    let mut list = PrefsList::new();
    list.insert(GUEST_PROFILE.to_string(), Prefs::default_value());
    list
}

fn parse_list(raw: &str) -> Option<PrefsList> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(list)) => Some(list),
        Ok(_) => {
            warn!("stored preferences are not an object, resetting");
            None
        }
        Err(e) => {
            warn!("stored preferences are not valid JSON, resetting: {}", e);
            None
        }
    }
}

/// 保存値を既定値の上に再帰的にマージして型付きの設定にする
///
/// 型が合わない項目はその項目だけ既定値。件数が選択肢外なら件数だけ既定値に戻す。
pub fn resolve_prefs(stored: Option<&Value>) -> Prefs {
    let mut merged = Prefs::default_value();
    if let Some(stored) = stored {
        merge_value(&mut merged, stored);
    }

    let defaults = Prefs::default();
    let mut prefs = Prefs {
        search: SearchPrefs {
            limit: leaf(&merged, "/search/limit", defaults.search.limit),
            sort: SortPrefs {
                by: leaf(&merged, "/search/sort/by", defaults.search.sort.by),
                direction: leaf(&merged, "/search/sort/direction", defaults.search.sort.direction),
            },
        },
        theme: ThemePrefs {
            configured: leaf(&merged, "/theme/configured", defaults.theme.configured),
            effective: leaf(&merged, "/theme/effective", defaults.theme.effective),
        },
    };
    if !is_valid_limit(prefs.search.limit) {
        prefs.search.limit = DEFAULT_SEARCH_LIMIT;
    }
    prefs
}

/// JSON Pointer の位置の値を読む（なければ・型違いなら既定値）
fn leaf<T: DeserializeOwned>(merged: &Value, pointer: &str, default: T) -> T {
    let Some(value) = merged.pointer(pointer) else {
        return default;
    };
    match T::deserialize(value) {
        Ok(value) => value,
        Err(e) => {
            warn!("stored preference {} has an unexpected value, using default: {}", pointer, e);
            default
        }
    }
}

/// `overlay` を `base` に再帰的にマージする（null は無視）
pub fn merge_value(base: &mut Value, overlay: &Value) {
    match (base, overlay) {
        (Value::Object(base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(key) {
                    Some(existing) => merge_value(existing, value),
                    None => {
                        base.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (_, Value::Null) => {}
        (base, overlay) => *base = overlay.clone(),
    }
}
