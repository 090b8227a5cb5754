//! 統計画面
//!
//! 財団での絞り込み、スナップショット表示、リポジトリ一覧CSVのダウンロード。

use clomonitor_common::types::ProjectsStats;
use clomonitor_common::{ApiError, FilterKind, ScoreType, Stats};
use leptos::prelude::*;

use crate::api;
use crate::components::loading::{Loading, NoData};
use crate::components::snapshot_selector::SnapshotSelector;
use crate::download::{download_text, CSV_FILE_NAME};
use crate::format::{format_date, format_percentage};
use crate::views::project::check_name;

const ALL_GROUP: &str = "all";
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// 成熟度グループの並び（"all" を先頭に）
pub fn stats_groups(stats: &ProjectsStats) -> Vec<String> {
    let mut groups: Vec<String> = stats.rating_distribution.keys().cloned().collect();
    groups.sort_by_key(|group| (group != ALL_GROUP, group.clone()));
    groups
}

pub fn month_label(year: i32, month: u32) -> String {
    let name = month
        .checked_sub(1)
        .and_then(|index| MONTHS.get(index as usize))
        .copied()
        .unwrap_or("?");
    format!("{} {}", name, year)
}

#[component]
pub fn StatsView() -> impl IntoView {
    let (foundation, set_foundation) = signal(None::<String>);
    let (snapshot, set_snapshot) = signal(None::<String>);
    let (stats, set_stats) = signal(None::<Result<Stats, ApiError>>);
    let (csv_error, set_csv_error) = signal(None::<String>);

    Effect::new(move |_| {
        let foundation = foundation.get();
        let snapshot = snapshot.get();
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::get_stats(foundation.as_deref(), snapshot.as_deref()).await;
            if let Err(e) = &result {
                gloo::console::error!(format!("stats failed: {}", e));
            }
            set_stats.set(Some(result));
        });
    });

    let on_download = move |_: leptos::ev::MouseEvent| {
        set_csv_error.set(None);
        wasm_bindgen_futures::spawn_local(async move {
            let result = match api::get_repositories_csv().await {
                Ok(csv) => download_text(&csv, CSV_FILE_NAME, "text/csv").map_err(|e| format!("{:?}", e)),
                Err(e) => Err(e.to_string()),
            };
            if let Err(e) = result {
                gloo::console::error!(format!("CSV download failed: {}", e));
                set_csv_error.set(Some(e));
            }
        });
    };

    view! {
        <div class="stats-page">
            <div class="stats-toolbar">
                <h1>"Statistics"</h1>
                <div class="form-group">
                    <label for="stats-foundation">"Foundation"</label>
                    <select
                        id="stats-foundation"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            set_snapshot.set(None);
                            set_foundation.set(Some(value).filter(|v| !v.is_empty()));
                        }
                    >
                        <option value="">"All"</option>
                        {FilterKind::Foundation
                            .choices()
                            .into_iter()
                            .map(|choice| view! { <option value=choice.value>{choice.name}</option> })
                            .collect_view()}
                    </select>
                </div>
                <button class="btn btn-secondary" on:click=on_download>
                    "Download repositories CSV"
                </button>
                {move || csv_error.get().map(|e| view! { <span class="text-error">{e}</span> })}
            </div>

            {move || match stats.get() {
                None => view! { <Loading /> }.into_any(),
                Some(Err(e)) => view! {
                    <NoData message=format!("An error occurred getting the stats: {}", e) />
                }
                .into_any(),
                Some(Ok(stats)) => view! {
                    <p class="stats-generated">"Report generated at: " {format_date(stats.generated_at)}</p>
                    <SnapshotSelector
                        snapshots=stats.snapshots.clone()
                        selected=snapshot
                        on_change=move |date| set_snapshot.set(date)
                    />
                    <StatsContent stats=stats />
                }
                .into_any(),
            }}
        </div>
    }
}

#[component]
fn StatsContent(stats: Stats) -> impl IntoView {
    let projects = stats.projects;
    let groups = stats_groups(&projects);

    let rating_rows = groups
        .iter()
        .map(|group| {
            let counts = projects.rating_counts(group);
            let total: u64 = counts.iter().map(|(_, count)| count).sum();
            view! {
                <tr>
                    <th>{group.clone()}</th>
                    {["a", "b", "c", "d"]
                        .into_iter()
                        .map(|rating| {
                            let count = counts
                                .iter()
                                .find(|(r, _)| r == rating)
                                .map(|(_, count)| *count)
                                .unwrap_or(0);
                            view! { <td>{count}</td> }
                        })
                        .collect_view()}
                    <td>{total}</td>
                </tr>
            }
        })
        .collect_view();

    let average_rows = projects
        .sections_average
        .iter()
        .map(|(group, averages)| {
            view! {
                <tr>
                    <th>{group.clone()}</th>
                    {ScoreType::CATEGORIES
                        .into_iter()
                        .map(|category| {
                            let value = averages.get(category.as_str()).copied();
                            view! { <td>{value.map(format_percentage).unwrap_or_else(|| "-".to_string())}</td> }
                        })
                        .collect_view()}
                </tr>
            }
        })
        .collect_view();

    let accepted_rows = projects
        .accepted_distribution
        .iter()
        .map(|entry| view! {
            <tr>
                <th>{month_label(entry.year, entry.month)}</th>
                <td>{entry.total}</td>
            </tr>
        })
        .collect_view();

    let passing_sections = ScoreType::CATEGORIES
        .into_iter()
        .filter_map(|category| {
            let checks = stats.repositories.passing_check.get(category.as_str())?.clone();
            Some(view! {
                <div class="passing-checks">
                    <h3>{category.title()}</h3>
                    <table class="table">
                        <tbody>
                            {checks
                                .into_iter()
                                .map(|(id, percentage)| view! {
                                    <tr>
                                        <th>{check_name(&id).to_string()}</th>
                                        <td>{format_percentage(percentage)}</td>
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                </div>
            })
        })
        .collect_view();

    view! {
        <section class="stats-section">
            <h2>"Projects"</h2>
            <p class="stats-total">{format!("{} projects", projects.total())}</p>

            <h3>"Distribution by rating"</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Maturity"</th>
                        <th>"A"</th>
                        <th>"B"</th>
                        <th>"C"</th>
                        <th>"D"</th>
                        <th>"Total"</th>
                    </tr>
                </thead>
                <tbody>{rating_rows}</tbody>
            </table>

            <h3>"Average score per category"</h3>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Maturity"</th>
                        {ScoreType::CATEGORIES
                            .into_iter()
                            .map(|category| view! { <th>{category.title()}</th> })
                            .collect_view()}
                    </tr>
                </thead>
                <tbody>{average_rows}</tbody>
            </table>

            <h3>"Projects accepted"</h3>
            <table class="table">
                <tbody>{accepted_rows}</tbody>
            </table>
        </section>

        <section class="stats-section">
            <h2>"Repositories"</h2>
            <h3>"Percentage of repositories passing each check"</h3>
            {passing_sections}
        </section>
    }
}
