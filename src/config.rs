use crate::error::{CloMonitorError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://clomonitor.io";
/// 設定ファイルより優先されるAPIのベースURL
pub const API_URL_ENV: &str = "CLOMONITOR_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_seconds: u64,
    /// 設定（表示件数・並び順・テーマ）の保存先。省略時は設定ディレクトリ
    pub prefs_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            timeout_seconds: 30,
            prefs_path: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（なければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CloMonitorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("clomonitor"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    pub fn prefs_path(&self) -> Result<PathBuf> {
        match &self.prefs_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::config_dir()?.join("prefs.json")),
        }
    }

    /// APIのベースURL（引数 > 環境変数 > 設定ファイル）
    pub fn resolve_api_base_url(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_URL_ENV).ok();
        let url = flag
            .map(str::to_string)
            .or(env)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| self.api_base_url.clone());
        url.trim().trim_end_matches('/').to_string()
    }

    pub fn set_api_base_url(&mut self, url: String) -> Result<()> {
        validate_base_url(&url)?;
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self.save()
    }
}

pub fn validate_base_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(CloMonitorError::Config(format!(
            "URLは http:// または https:// で始めてください: {}",
            url
        )))
    }
}
