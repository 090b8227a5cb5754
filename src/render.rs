//! ターミナル表示
//!
//! 表示内容は文字列で返し、出力は呼び出し側で行う。

use chrono::DateTime;
use clomonitor_common::checks::find_check;
use clomonitor_common::types::{CheckStatus, ProjectInfo};
use clomonitor_common::{
    get_category_color, Pagination, Prefs, ProjectDetail, ScoreColor, ScoreType, SearchResults,
    Stats,
};
use std::fmt::Write;

const BAR_WIDTH: usize = 10;

/// UNIX秒を日付（UTC）に
pub fn format_timestamp(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{:.0}", s)).unwrap_or_else(|| "n/a".to_string())
}

fn color_mark(color: ScoreColor) -> &'static str {
    match color {
        ScoreColor::Red => "🔴",
        ScoreColor::Orange => "🟠",
        ScoreColor::Yellow => "🟡",
        ScoreColor::Green => "🟢",
    }
}

/// `█████░░░░░  50` 形式のバー
pub fn score_bar(score: Option<f64>) -> String {
    let Some(score) = score else {
        return format!("{}  n/a", "·".repeat(BAR_WIDTH));
    };
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "{}{} {:>3} {}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled),
        format_score(Some(score)),
        color_mark(get_category_color(score))
    )
}

fn status_label(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Passed => "✔",
        CheckStatus::NotPassed => "✘",
        CheckStatus::Exempt => "－",
        CheckStatus::Failed => "！",
    }
}

fn project_meta(info: &ProjectInfo) -> String {
    let mut parts = vec![info.foundation.to_uppercase()];
    if let Some(maturity) = &info.maturity {
        parts.push(maturity.clone());
    }
    if let Some(accepted) = info.accepted_at {
        parts.push(format!("受入 {}", format_timestamp(accepted)));
    }
    parts.join(" / ")
}

pub fn render_search_results(results: &SearchResults, pagination: &Pagination) -> String {
    let mut out = String::new();
    let total = results.total();
    if results.items.is_empty() {
        out.push_str("該当するプロジェクトはありません\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{}件中 {}件を表示（ページ {}/{}）\n",
        total,
        results.items.len(),
        pagination.current,
        pagination.pages()
    );
    for project in &results.items {
        let info = &project.info;
        let rating = info.rating.map(|r| r.as_str().to_uppercase()).unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "[{}] {:>3}  {} ({}/{})",
            rating,
            format_score(info.score.global),
            info.title(),
            info.foundation,
            info.name
        );
        let _ = writeln!(out, "         {}", project_meta(info));
        if let Some(description) = info.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "         {}", description);
        }
    }
    out
}

pub fn render_project(detail: &ProjectDetail) -> String {
    let mut out = String::new();
    let info = &detail.info;

    let _ = writeln!(out, "{}", info.title());
    let _ = writeln!(out, "{}", project_meta(info));
    if let Some(description) = &info.description {
        let _ = writeln!(out, "{}", description);
    }
    let _ = writeln!(
        out,
        "評価: {}  スコア: {}  更新: {}",
        info.rating.map(|r| r.as_str().to_uppercase()).unwrap_or_else(|| "-".into()),
        format_score(info.score.global),
        format_timestamp(info.updated_at)
    );
    if let Some(url) = &info.home_url {
        let _ = writeln!(out, "URL: {}", url);
    }

    out.push('\n');
    for category in ScoreType::CATEGORIES {
        let _ = writeln!(out, "  {:<16}{}", category.title(), score_bar(info.score.get(category)));
    }

    for repository in detail.sorted_repositories() {
        let _ = writeln!(
            out,
            "\n■ {} ({}) {}",
            repository.name,
            repository.kind().as_str(),
            repository.url
        );
        let Some(report) = &repository.report else {
            continue;
        };
        for category in ScoreType::CATEGORIES {
            let checks: Vec<_> = report.checks(category).collect();
            if checks.is_empty() {
                continue;
            }
            let _ = writeln!(out, "  {}", category.title());
            for (id, check) in checks {
                let name = find_check(id).map(|c| c.name).unwrap_or(id);
                let _ = writeln!(out, "    {} {}", status_label(check.status()), name);
            }
        }
    }

    if !detail.snapshots.is_empty() {
        let _ = writeln!(out, "\nスナップショット: {}", detail.snapshots.join(", "));
    }
    out
}

pub fn render_stats(stats: &Stats) -> String {
    let mut out = String::new();
    let projects = &stats.projects;

    let _ = writeln!(out, "生成日: {}", format_timestamp(stats.generated_at));
    let _ = writeln!(out, "プロジェクト数: {}\n", projects.total());

    let _ = writeln!(out, "評価別");
    for (rating, count) in projects.rating_counts("all") {
        let _ = writeln!(out, "  {}: {}", rating.to_uppercase(), count);
    }

    if let Some(averages) = projects.sections_average.get("all") {
        let _ = writeln!(out, "\nカテゴリ別平均スコア");
        for category in ScoreType::CATEGORIES {
            let _ = writeln!(
                out,
                "  {:<16}{}",
                category.title(),
                score_bar(averages.get(category.as_str()).copied())
            );
        }
    }

    for category in ScoreType::CATEGORIES {
        let Some(checks) = stats.repositories.passing_check.get(category.as_str()) else {
            continue;
        };
        let _ = writeln!(out, "\nチェック合格率: {}", category.title());
        for (id, percentage) in checks {
            let name = find_check(id).map(|c| c.name).unwrap_or(id.as_str());
            let _ = writeln!(out, "  {:<36}{:>4.0}%", name, percentage);
        }
    }

    if !stats.snapshots.is_empty() {
        let _ = writeln!(out, "\nスナップショット: {}", stats.snapshots.join(", "));
    }
    out
}

pub fn render_prefs(prefs: &Prefs) -> String {
    format!(
        "表示件数: {}\n並び順: {} {}\nテーマ: {}（表示: {}）\n",
        prefs.search.limit,
        prefs.search.sort.by.as_str(),
        prefs.search.sort.direction.as_str(),
        prefs.theme.configured.as_str(),
        prefs.theme.effective.as_str()
    )
}
