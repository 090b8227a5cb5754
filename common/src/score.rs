//! スコア関連ユーティリティ
//!
//! - ScoreType: チェックカテゴリ + 総合スコア
//! - get_category_color: スコア → 表示色
//! - Rating: スコア → A〜D評価
//! - RepositoryKind: プライマリ/セカンダリ（チェックセットから判定）

use serde::{Deserialize, Serialize};

/// スコア種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreType {
    Global,
    Documentation,
    License,
    BestPractices,
    Security,
    Legal,
}

impl ScoreType {
    /// カテゴリのみ（Globalを除く）
    pub const CATEGORIES: [ScoreType; 5] = [
        ScoreType::Documentation,
        ScoreType::License,
        ScoreType::BestPractices,
        ScoreType::Security,
        ScoreType::Legal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreType::Global => "global",
            ScoreType::Documentation => "documentation",
            ScoreType::License => "license",
            ScoreType::BestPractices => "best_practices",
            ScoreType::Security => "security",
            ScoreType::Legal => "legal",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ScoreType::Global => "Global",
            ScoreType::Documentation => "Documentation",
            ScoreType::License => "License",
            ScoreType::BestPractices => "Best Practices",
            ScoreType::Security => "Security",
            ScoreType::Legal => "Legal",
        }
    }
}

/// スコアの表示色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreColor {
    Red,
    Orange,
    Yellow,
    Green,
}

impl ScoreColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreColor::Red => "red",
            ScoreColor::Orange => "orange",
            ScoreColor::Yellow => "yellow",
            ScoreColor::Green => "green",
        }
    }
}

/// スコアから表示色を決める
///
/// [-∞,25) red / [25,50) orange / [50,75) yellow / [75,∞) green
pub fn get_category_color(score: f64) -> ScoreColor {
    if score < 25.0 {
        ScoreColor::Red
    } else if score < 50.0 {
        ScoreColor::Orange
    } else if score < 75.0 {
        ScoreColor::Yellow
    } else {
        ScoreColor::Green
    }
}

/// プロジェクト評価
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    A,
    B,
    C,
    D,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::A => "a",
            Rating::B => "b",
            Rating::C => "c",
            Rating::D => "d",
        }
    }
}

pub fn rating_for_score(score: f64) -> Rating {
    if score >= 75.0 {
        Rating::A
    } else if score >= 50.0 {
        Rating::B
    } else if score >= 25.0 {
        Rating::C
    } else {
        Rating::D
    }
}

/// リポジトリ種別（チェックの重み付けに影響）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryKind {
    Primary,
    Secondary,
}

impl RepositoryKind {
    /// チェックセットから判定する。`code` か `community` を含めばプライマリ。
    pub fn from_check_sets<S: AsRef<str>>(check_sets: &[S]) -> Self {
        let primary = check_sets
            .iter()
            .any(|set| matches!(set.as_ref(), "code" | "community"));
        if primary {
            RepositoryKind::Primary
        } else {
            RepositoryKind::Secondary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RepositoryKind::Primary => "primary",
            RepositoryKind::Secondary => "secondary",
        }
    }
}
