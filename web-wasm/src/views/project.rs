//! プロジェクト詳細画面
//!
//! 表示時に閲覧数を1回記録する。スナップショット日付を選ぶと過去時点を表示する。

use clomonitor_common::checks::find_check;
use clomonitor_common::types::{CheckStatus, Repository};
use clomonitor_common::{get_anchor_value, ApiError, ProjectDetail, ScoreType};
use leptos::prelude::*;

use crate::api;
use crate::components::loading::{Loading, NoData};
use crate::components::modal::Modal;
use crate::components::progress_bar::ProgressBar;
use crate::components::score_badge::{RatingBadge, ScoreBadge};
use crate::components::snapshot_selector::SnapshotSelector;
use crate::format::format_date;
use crate::views::report::ReportContent;

/// 表示中のレポート（リポジトリ名, 取得結果）
type ReportState = Option<(String, Option<Result<String, ApiError>>)>;

/// チェックの表示名（カタログになければID）
pub fn check_name(id: &str) -> &str {
    find_check(id).map(|check| check.name).unwrap_or(id)
}

fn status_icon(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Passed => "✓",
        CheckStatus::NotPassed => "✗",
        CheckStatus::Exempt => "−",
        CheckStatus::Failed => "!",
    }
}

#[component]
pub fn ProjectView(foundation: String, name: String) -> impl IntoView {
    let (snapshot, set_snapshot) = signal(None::<String>);
    let (detail, set_detail) = signal(None::<Result<ProjectDetail, ApiError>>);
    let view_tracked = StoredValue::new(false);
    let report = RwSignal::<ReportState>::new(None);

    {
        let foundation = foundation.clone();
        let name = name.clone();
        Effect::new(move |_| {
            let snapshot = snapshot.get();
            let foundation = foundation.clone();
            let name = name.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::get_project_detail(&foundation, &name, snapshot.as_deref()).await;
                match &result {
                    Ok(detail) if snapshot.is_none() && !view_tracked.get_value() => {
                        view_tracked.set_value(true);
                        api::track_view(detail.info.id.clone());
                    }
                    Err(e) => gloo::console::error!(format!("project detail failed: {}", e)),
                    _ => {}
                }
                set_detail.set(Some(result));
            });
        });
    }

    let open_report = {
        let foundation = foundation.clone();
        let name = name.clone();
        move |repository: String| {
            report.set(Some((repository.clone(), None)));
            let foundation = foundation.clone();
            let name = name.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = api::get_repository_report(&foundation, &name, &repository).await;
                report.set(Some((repository, Some(result))));
            });
        }
    };

    let report_title = Signal::derive(move || {
        report.with(|r| {
            r.as_ref()
                .map(|(repository, _)| format!("{} report", repository))
                .unwrap_or_default()
        })
    });

    view! {
        <div class="project-page">
            {move || match detail.get() {
                None => view! { <Loading /> }.into_any(),
                Some(Err(e)) => view! {
                    <NoData message=format!("An error occurred getting the project details: {}", e) />
                }
                .into_any(),
                Some(Ok(detail)) => {
                    let open_report = open_report.clone();
                    view! {
                        <ProjectHeader
                            detail=detail.clone()
                            snapshot=snapshot
                            on_snapshot=move |date| set_snapshot.set(date)
                        />
                        <div class="repositories">
                            {detail
                                .sorted_repositories()
                                .into_iter()
                                .map(|repository| {
                                    let open_report = open_report.clone();
                                    view! {
                                        <RepositoryCard
                                            repository=repository.clone()
                                            on_report=open_report
                                        />
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                    .into_any()
                }
            }}

            <Modal open=Signal::derive(move || report.with(|r| r.is_some())) title=report_title on_close=move || report.set(None)>
                {move || match report.get() {
                    Some((_, Some(Ok(markdown)))) => view! { <ReportContent markdown=markdown /> }.into_any(),
                    Some((_, Some(Err(e)))) => view! {
                        <NoData message=format!("An error occurred getting the repository report: {}", e) />
                    }
                    .into_any(),
                    _ => view! { <Loading /> }.into_any(),
                }}
            </Modal>
        </div>
    }
}

#[component]
fn ProjectHeader<F>(detail: ProjectDetail, snapshot: ReadSignal<Option<String>>, on_snapshot: F) -> impl IntoView
where
    F: Fn(Option<String>) + 'static,
{
    let info = detail.info;
    let title = info.title().to_string();

    view! {
        <section class="project-header">
            <div class="project-title-row">
                {info.logo_url.clone().map(|logo| view! {
                    <img class="project-logo" src=logo alt=format!("{} logo", title) />
                })}
                <div>
                    <h1 class="project-title">{title.clone()}</h1>
                    <div class="project-meta">
                        <span class="badge">{info.foundation.to_uppercase()}</span>
                        {info.maturity.clone().map(|m| view! { <span class="badge">{m}</span> })}
                        {info.accepted_at.map(|at| view! { <span>"Accepted: " {format_date(at)}</span> })}
                        <span>"Updated: " {format_date(info.updated_at)}</span>
                    </div>
                    <div class="project-links">
                        {info.home_url.clone().map(|url| view! {
                            <a href=url target="_blank" rel="noopener noreferrer">"Homepage"</a>
                        })}
                        {info.devstats_url.clone().map(|url| view! {
                            <a href=url target="_blank" rel="noopener noreferrer">"DevStats"</a>
                        })}
                    </div>
                </div>
                <div class="project-score">
                    <RatingBadge rating=info.rating />
                    <ScoreBadge score=info.score.global large=true />
                </div>
            </div>

            {info.description.clone().map(|d| view! { <p class="project-description">{d}</p> })}

            <div class="project-categories">
                {ScoreType::CATEGORIES
                    .into_iter()
                    .map(|category| view! {
                        <ProgressBar label=category.title() score=info.score.get(category) />
                    })
                    .collect_view()}
            </div>

            <SnapshotSelector snapshots=detail.snapshots selected=snapshot on_change=on_snapshot />
        </section>
    }
}

#[component]
fn RepositoryCard<F>(repository: Repository, on_report: F) -> impl IntoView
where
    F: Fn(String) + 'static,
{
    let anchor = get_anchor_value(&repository.name);
    let score = repository.score.clone().unwrap_or_default();
    let repository_name = repository.name.clone();

    let checks = repository.report.clone().map(|report| {
        ScoreType::CATEGORIES
            .into_iter()
            .filter(|category| report.checks(*category).next().is_some())
            .map(|category| {
                let rows = report
                    .checks(category)
                    .map(|(id, check)| {
                        let status = check.status();
                        let detail = check
                            .exemption_reason
                            .clone()
                            .or_else(|| check.fail_reason.clone())
                            .or_else(|| check.details.clone());
                        view! {
                            <li class=format!("check check-{}", status.as_str().replace(' ', "-"))>
                                <span class="check-status" title=status.as_str()>{status_icon(status)}</span>
                                {match check.url.clone() {
                                    Some(url) => view! {
                                        <a href=url target="_blank" rel="noopener noreferrer">{check_name(id).to_string()}</a>
                                    }
                                    .into_any(),
                                    None => view! { <span>{check_name(id).to_string()}</span> }.into_any(),
                                }}
                                {detail.map(|d| view! { <small class="check-detail">{d}</small> })}
                            </li>
                        }
                    })
                    .collect_view();
                view! {
                    <div class="check-category">
                        <h4>{category.title()}</h4>
                        <ul>{rows}</ul>
                    </div>
                }
            })
            .collect_view()
    });

    view! {
        <article class="repository-card" id=anchor>
            <div class="repository-header">
                <a class="repository-name" href=repository.url.clone() target="_blank" rel="noopener noreferrer">
                    {repository.name.clone()}
                </a>
                <span class="badge">{repository.kind().as_str()}</span>
                <ScoreBadge score=score.global />
                <button
                    class="btn btn-secondary btn-small"
                    on:click=move |_| on_report(repository_name.clone())
                >
                    "Report"
                </button>
            </div>

            <div class="repository-categories">
                {ScoreType::CATEGORIES
                    .into_iter()
                    .map(|category| view! {
                        <ProgressBar label=category.title() score=score.get(category) />
                    })
                    .collect_view()}
            </div>

            {checks}
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_name() {
        assert_eq!(check_name("readme"), "Readme");
        assert_eq!(check_name("unknown_check"), "unknown_check");
    }

    #[test]
    fn test_status_icon() {
        assert_eq!(status_icon(CheckStatus::Passed), "✓");
        assert_eq!(status_icon(CheckStatus::NotPassed), "✗");
    }
}
