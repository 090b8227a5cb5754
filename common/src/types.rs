//! APIデータ型
//!
//! バックエンドREST APIのレスポンス型。
//! 項目の欠落に強くするため、ほぼすべて `#[serde(default)]`。

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::score::{Rating, RepositoryKind, ScoreType};

/// カテゴリ別スコア
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Score {
    pub global: Option<f64>,
    pub global_weight: Option<f64>,
    pub documentation: Option<f64>,
    pub documentation_weight: Option<f64>,
    pub license: Option<f64>,
    pub license_weight: Option<f64>,
    pub best_practices: Option<f64>,
    pub best_practices_weight: Option<f64>,
    pub security: Option<f64>,
    pub security_weight: Option<f64>,
    pub legal: Option<f64>,
    pub legal_weight: Option<f64>,
}

impl Score {
    pub fn get(&self, score_type: ScoreType) -> Option<f64> {
        match score_type {
            ScoreType::Global => self.global,
            ScoreType::Documentation => self.documentation,
            ScoreType::License => self.license,
            ScoreType::BestPractices => self.best_practices,
            ScoreType::Security => self.security,
            ScoreType::Legal => self.legal,
        }
    }
}

/// プロジェクト共通項目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub id: String,
    pub name: String,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub home_url: Option<String>,
    pub logo_url: Option<String>,
    pub logo_dark_url: Option<String>,
    pub devstats_url: Option<String>,
    pub score: Score,
    pub rating: Option<Rating>,
    /// 受け入れ日時（UNIX秒）
    pub accepted_at: Option<i64>,
    pub maturity: Option<String>,
    pub foundation: String,
    /// 更新日時（UNIX秒）
    pub updated_at: i64,
}

impl ProjectInfo {
    /// 表示名（display_name 優先）
    pub fn title(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

/// 検索結果のリポジトリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaseRepository {
    pub name: String,
    pub url: String,
    pub check_sets: Vec<String>,
}

/// 検索結果のプロジェクト
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    #[serde(flatten)]
    pub info: ProjectInfo,
    #[serde(default)]
    pub repositories: Vec<BaseRepository>,
}

/// 検索APIレスポンス（件数ヘッダをマージ済み）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub items: Vec<Project>,
    #[serde(rename = "Pagination-Total-Count", default)]
    pub total_count: Option<String>,
}

impl SearchResults {
    /// 総件数（ヘッダがなければ取得件数）
    pub fn total(&self) -> u64 {
        self.total_count
            .as_deref()
            .and_then(|count| count.trim().parse().ok())
            .unwrap_or(self.items.len() as u64)
    }
}

/// チェック結果の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Passed,
    NotPassed,
    Exempt,
    Failed,
}

impl CheckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Passed => "passed",
            CheckStatus::NotPassed => "not passed",
            CheckStatus::Exempt => "exempt",
            CheckStatus::Failed => "failed",
        }
    }
}

/// 個別チェックの結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportCheck {
    pub passed: bool,
    pub value: Option<serde_json::Value>,
    pub url: Option<String>,
    pub details: Option<String>,
    pub exempt: bool,
    pub exemption_reason: Option<String>,
    pub failed: bool,
    pub fail_reason: Option<String>,
}

impl ReportCheck {
    pub fn status(&self) -> CheckStatus {
        if self.exempt {
            CheckStatus::Exempt
        } else if self.failed {
            CheckStatus::Failed
        } else if self.passed {
            CheckStatus::Passed
        } else {
            CheckStatus::NotPassed
        }
    }
}

/// リポジトリのレポート
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Report {
    pub report_id: String,
    /// カテゴリ → チェックID → 結果
    pub data: BTreeMap<String, BTreeMap<String, ReportCheck>>,
    pub errors: Option<String>,
    pub updated_at: i64,
}

impl Report {
    pub fn checks(&self, score_type: ScoreType) -> impl Iterator<Item = (&str, &ReportCheck)> {
        self.data
            .get(score_type.as_str())
            .into_iter()
            .flat_map(|checks| checks.iter().map(|(id, check)| (id.as_str(), check)))
    }
}

/// プロジェクト詳細のリポジトリ
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Repository {
    pub repository_id: String,
    pub name: String,
    pub url: String,
    pub check_sets: Vec<String>,
    pub digest: Option<String>,
    pub score: Option<Score>,
    pub report: Option<Report>,
}

impl Repository {
    pub fn kind(&self) -> RepositoryKind {
        RepositoryKind::from_check_sets(&self.check_sets)
    }
}

/// プロジェクト詳細
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub info: ProjectInfo,
    #[serde(default)]
    pub repositories: Vec<Repository>,
    /// スナップショット日付（YYYY-MM-DD）
    #[serde(default)]
    pub snapshots: Vec<String>,
}

impl ProjectDetail {
    /// プライマリリポジトリを先頭に、名前順で並べる
    pub fn sorted_repositories(&self) -> Vec<&Repository> {
        let mut repositories: Vec<&Repository> = self.repositories.iter().collect();
        repositories.sort_by(|a, b| {
            let rank = |r: &Repository| match r.kind() {
                RepositoryKind::Primary => 0,
                RepositoryKind::Secondary => 1,
            };
            rank(a).cmp(&rank(b)).then_with(|| a.name.cmp(&b.name))
        });
        repositories
    }
}

/// 受け入れ数の月次分布
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptedDistribution {
    pub year: i32,
    pub month: u32,
    pub total: u64,
}

/// プロジェクト統計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectsStats {
    /// (UNIXミリ秒, 累計)
    pub running_total: Vec<(i64, u64)>,
    pub accepted_distribution: Vec<AcceptedDistribution>,
    /// 成熟度（"all" 含む）→ [{評価: 件数}]
    pub rating_distribution: BTreeMap<String, Vec<BTreeMap<String, u64>>>,
    /// 成熟度（"all" 含む）→ カテゴリ → 平均スコア
    pub sections_average: BTreeMap<String, BTreeMap<String, f64>>,
}

impl ProjectsStats {
    /// 指定グループの評価別件数（A〜D順）
    pub fn rating_counts(&self, group: &str) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .rating_distribution
            .get(group)
            .into_iter()
            .flatten()
            .flat_map(|entry| entry.iter().map(|(rating, count)| (rating.clone(), *count)))
            .collect();
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    pub fn total(&self) -> u64 {
        self.rating_counts("all").iter().map(|(_, count)| count).sum()
    }
}

/// リポジトリ統計
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoriesStats {
    /// カテゴリ → チェックID → 合格率(%)
    pub passing_check: BTreeMap<String, BTreeMap<String, f64>>,
}

/// 統計APIレスポンス
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    /// 生成日時（UNIX秒）
    pub generated_at: i64,
    pub projects: ProjectsStats,
    pub repositories: RepositoriesStats,
    pub snapshots: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROJECT_JSON: &str = r#"{
        "id": "00000000-0001-0000-0000-000000000000",
        "name": "artifact-hub",
        "display_name": "Artifact Hub",
        "description": "Find, install and publish Kubernetes packages",
        "logo_url": "https://example.com/logo.svg",
        "score": { "global": 91.5, "documentation": 100.0, "security": 80.0 },
        "rating": "a",
        "accepted_at": 1592870400,
        "maturity": "incubating",
        "foundation": "cncf",
        "updated_at": 1667834400,
        "repositories": [
            { "name": "hub", "url": "https://github.com/artifacthub/hub", "check_sets": ["community", "code"] }
        ]
    }"#;

    #[test]
    fn test_project_deserialize() {
        let project: Project = serde_json::from_str(PROJECT_JSON).expect("デシリアライズ失敗");
        assert_eq!(project.info.title(), "Artifact Hub");
        assert_eq!(project.info.rating, Some(Rating::A));
        assert_eq!(project.info.score.get(ScoreType::Global), Some(91.5));
        assert_eq!(project.info.score.get(ScoreType::Legal), None);
        assert_eq!(project.repositories.len(), 1);
    }

    #[test]
    fn test_project_title_fallback() {
        let info = ProjectInfo { name: "envoy".into(), display_name: Some(String::new()), ..Default::default() };
        assert_eq!(info.title(), "envoy");
    }

    #[test]
    fn test_search_results_total() {
        let results: SearchResults = serde_json::from_str(
            r#"{"items": [], "Pagination-Total-Count": "134"}"#,
        )
        .unwrap();
        assert_eq!(results.total(), 134);

        let results: SearchResults = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert_eq!(results.total(), 0);
    }

    #[test]
    fn test_report_checks() {
        let report: Report = serde_json::from_str(
            r#"{
                "report_id": "r1",
                "data": {
                    "documentation": {
                        "readme": { "passed": true },
                        "roadmap": { "passed": false, "exempt": true, "exemption_reason": "n/a" }
                    }
                },
                "updated_at": 0
            }"#,
        )
        .unwrap();
        let statuses: Vec<(&str, CheckStatus)> = report
            .checks(ScoreType::Documentation)
            .map(|(id, check)| (id, check.status()))
            .collect();
        assert_eq!(statuses, vec![("readme", CheckStatus::Passed), ("roadmap", CheckStatus::Exempt)]);
        assert_eq!(report.checks(ScoreType::Security).count(), 0);
    }

    #[test]
    fn test_sorted_repositories_primary_first() {
        let detail = ProjectDetail {
            repositories: vec![
                Repository { name: "a-docs".into(), check_sets: vec!["docs".into()], ..Default::default() },
                Repository { name: "z-core".into(), check_sets: vec!["code".into()], ..Default::default() },
            ],
            ..Default::default()
        };
        let names: Vec<&str> = detail.sorted_repositories().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["z-core", "a-docs"]);
    }

    #[test]
    fn test_stats_rating_counts() {
        let stats: Stats = serde_json::from_str(
            r#"{
                "generated_at": 1667834400,
                "projects": {
                    "rating_distribution": { "all": [ { "b": 3 }, { "a": 5 } ] }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(
            stats.projects.rating_counts("all"),
            vec![("a".to_string(), 5), ("b".to_string(), 3)]
        );
        assert_eq!(stats.projects.total(), 8);
        assert!(stats.projects.rating_counts("graduated").is_empty());
    }
}
