//! 検索結果のプロジェクトカード

use clomonitor_common::routes::project_href;
use clomonitor_common::{Project, ScoreType};
use leptos::prelude::*;

use crate::components::progress_bar::ProgressBar;
use crate::components::score_badge::{RatingBadge, ScoreBadge};
use crate::format::format_date;
use crate::router::Link;

#[component]
pub fn ProjectCard(project: Project) -> impl IntoView {
    let info = project.info;
    let href = project_href(&info.foundation, &info.name);
    let title = info.title().to_string();
    let repositories = project.repositories.len();
    let accepted = info.accepted_at.map(format_date);

    view! {
        <article class="project-card">
            <div class="project-card-header">
                {info.logo_url.clone().map(|logo| view! {
                    <img class="project-logo" src=logo alt=format!("{} logo", title) />
                })}
                <div class="project-card-title">
                    <Link href=href class="project-name">{title.clone()}</Link>
                    <div class="project-meta">
                        <span class="badge">{info.foundation.to_uppercase()}</span>
                        {info.maturity.clone().map(|m| view! { <span class="badge">{m}</span> })}
                        {accepted.map(|date| view! { <span class="accepted">"Accepted: " {date}</span> })}
                    </div>
                </div>
                <div class="project-card-score">
                    <RatingBadge rating=info.rating />
                    <ScoreBadge score=info.score.global large=true />
                </div>
            </div>

            {info.description.clone().map(|d| view! { <p class="project-description">{d}</p> })}

            <div class="project-card-categories">
                {ScoreType::CATEGORIES
                    .into_iter()
                    .map(|category| view! {
                        <ProgressBar label=category.title() score=info.score.get(category) />
                    })
                    .collect_view()}
            </div>

            <div class="project-card-footer">
                {format!("{} {}", repositories, if repositories == 1 { "repository" } else { "repositories" })}
            </div>
        </article>
    }
}
