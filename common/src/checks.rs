//! チェック項目カタログ
//!
//! レポートに現れる個々のチェック（README有無など）と、その所属カテゴリ。

use crate::score::ScoreType;

/// チェック項目の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub score_type: ScoreType,
}

const fn check(id: &'static str, name: &'static str, score_type: ScoreType) -> CheckInfo {
    CheckInfo { id, name, score_type }
}

pub const CHECKS: &[CheckInfo] = &[
    // Documentation
    check("adopters", "Adopters", ScoreType::Documentation),
    check("changelog", "Changelog", ScoreType::Documentation),
    check("code_of_conduct", "Code of conduct", ScoreType::Documentation),
    check("contributing", "Contributing", ScoreType::Documentation),
    check("governance", "Governance", ScoreType::Documentation),
    check("maintainers", "Maintainers", ScoreType::Documentation),
    check("readme", "Readme", ScoreType::Documentation),
    check("roadmap", "Roadmap", ScoreType::Documentation),
    check("summary_table", "Summary table", ScoreType::Documentation),
    check("website", "Website", ScoreType::Documentation),
    // License
    check("license_approved", "Approved license", ScoreType::License),
    check("license_scanning", "License scanning", ScoreType::License),
    check("license_spdx_id", "License", ScoreType::License),
    // Best practices
    check("analytics", "Analytics", ScoreType::BestPractices),
    check("artifacthub_badge", "Artifact Hub badge", ScoreType::BestPractices),
    check("cla", "Contributor License Agreement", ScoreType::BestPractices),
    check("community_meeting", "Community meeting", ScoreType::BestPractices),
    check("dco", "Developer Certificate of Origin", ScoreType::BestPractices),
    check("github_discussions", "GitHub discussions", ScoreType::BestPractices),
    check("openssf_badge", "OpenSSF best practices badge", ScoreType::BestPractices),
    check("openssf_scorecard_badge", "OpenSSF Scorecard badge", ScoreType::BestPractices),
    check("recent_release", "Recent release", ScoreType::BestPractices),
    check("slack_presence", "Slack presence", ScoreType::BestPractices),
    // Security
    check("binary_artifacts", "Binary artifacts", ScoreType::Security),
    check("code_review", "Code review", ScoreType::Security),
    check("dangerous_workflow", "Dangerous workflow", ScoreType::Security),
    check("dependency_update_tool", "Dependency update tool", ScoreType::Security),
    check("maintained", "Maintained", ScoreType::Security),
    check("sbom", "Software bill of materials (SBOM)", ScoreType::Security),
    check("security_insights", "Security insights", ScoreType::Security),
    check("security_policy", "Security policy", ScoreType::Security),
    check("signed_releases", "Signed releases", ScoreType::Security),
    check("token_permissions", "Token permissions", ScoreType::Security),
    // Legal
    check("trademark_disclaimer", "Trademark disclaimer", ScoreType::Legal),
];

pub fn find_check(id: &str) -> Option<&'static CheckInfo> {
    CHECKS.iter().find(|c| c.id == id)
}

/// カテゴリに属するチェック一覧
pub fn checks_for(score_type: ScoreType) -> impl Iterator<Item = &'static CheckInfo> {
    CHECKS.iter().filter(move |c| c.score_type == score_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_check_ids_unique() {
        let ids: HashSet<&str> = CHECKS.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CHECKS.len());
    }

    #[test]
    fn test_find_check() {
        assert_eq!(find_check("readme").map(|c| c.score_type), Some(ScoreType::Documentation));
        assert!(find_check("unknown").is_none());
    }

    #[test]
    fn test_global_has_no_checks() {
        assert_eq!(checks_for(ScoreType::Global).count(), 0);
        assert_eq!(checks_for(ScoreType::Legal).count(), 1);
    }
}
