//! 検索フィルタパネル
//!
//! 変更のたびに新しい `SearchFilters`（ページは1に戻す）を通知する。

use clomonitor_common::query::DEFAULT_PAGE;
use clomonitor_common::{FilterKind, SearchFilters};
use leptos::prelude::*;

/// フィルタ値を切り替えた条件
pub fn toggle_filter(current: &SearchFilters, kind: FilterKind, value: &str) -> SearchFilters {
    let mut next = current.clone();
    next.filters.toggle(kind.key(), value);
    next.page_number = DEFAULT_PAGE;
    next
}

/// 受け入れ日の範囲を変えた条件（空文字は未指定）
pub fn with_accepted_range(current: &SearchFilters, from: Option<String>, to: Option<String>) -> SearchFilters {
    let mut next = current.clone();
    next.accepted_from = from.filter(|d| !d.is_empty());
    next.accepted_to = to.filter(|d| !d.is_empty());
    next.page_number = DEFAULT_PAGE;
    next
}

/// フィルタだけを消す（検索テキストは残す）
pub fn reset_filters(current: &SearchFilters) -> SearchFilters {
    SearchFilters { text: current.text.clone(), ..Default::default() }
}

/// 選択肢の多いチェック系フィルタは折りたたむ
fn is_collapsed(kind: FilterKind) -> bool {
    matches!(kind, FilterKind::PassingCheck | FilterKind::NotPassingCheck)
}

#[component]
pub fn FiltersPanel<F>(#[prop(into)] filters: Signal<SearchFilters>, on_change: F) -> impl IntoView
where
    F: Fn(SearchFilters) + 'static + Clone + Send + Sync,
{
    let sections = FilterKind::ALL
        .into_iter()
        .map(|kind| {
            let options = kind
                .choices()
                .into_iter()
                .map(|choice| {
                    let on_change = on_change.clone();
                    view! {
                        <label class="filter-option">
                            <input
                                type="checkbox"
                                value=choice.value
                                prop:checked=move || filters.with(|f| f.filters.contains(kind.key(), choice.value))
                                on:change=move |_| {
                                    on_change(toggle_filter(&filters.get_untracked(), kind, choice.value))
                                }
                            />
                            {choice.name}
                        </label>
                    }
                })
                .collect_view();

            if is_collapsed(kind) {
                view! {
                    <details class="filter-section">
                        <summary class="filter-title">{kind.title()}</summary>
                        {options}
                    </details>
                }
                .into_any()
            } else {
                view! {
                    <fieldset class="filter-section">
                        <legend class="filter-title">{kind.title()}</legend>
                        {options}
                    </fieldset>
                }
                .into_any()
            }
        })
        .collect_view();

    let on_from = {
        let on_change = on_change.clone();
        move |ev: leptos::ev::Event| {
            let current = filters.get_untracked();
            let to = current.accepted_to.clone();
            on_change(with_accepted_range(&current, Some(event_target_value(&ev)), to));
        }
    };
    let on_to = {
        let on_change = on_change.clone();
        move |ev: leptos::ev::Event| {
            let current = filters.get_untracked();
            let from = current.accepted_from.clone();
            on_change(with_accepted_range(&current, from, Some(event_target_value(&ev))));
        }
    };
    let on_reset = move |_: leptos::ev::MouseEvent| on_change(reset_filters(&filters.get_untracked()));

    view! {
        <aside class="filters-panel">
            <div class="filters-header">
                <h2>"Filters"</h2>
                <button class="btn btn-link" on:click=on_reset>"Reset"</button>
            </div>

            {sections}

            <fieldset class="filter-section">
                <legend class="filter-title">"Accepted"</legend>
                <label for="accepted-from">"From"</label>
                <input
                    type="date"
                    id="accepted-from"
                    prop:value=move || filters.with(|f| f.accepted_from.clone().unwrap_or_default())
                    on:change=on_from
                />
                <label for="accepted-to">"To"</label>
                <input
                    type="date"
                    id="accepted-to"
                    prop:value=move || filters.with(|f| f.accepted_to.clone().unwrap_or_default())
                    on:change=on_to
                />
            </fieldset>
        </aside>
    }
}
