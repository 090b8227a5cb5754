//! 検索画面
//!
//! 条件はURLのクエリ文字列から復元し、件数・並び順は設定から取る。
//! 条件が変わるたびに検索APIを呼ぶ（前の応答は取り消さない）。

use clomonitor_common::routes::search_href;
use clomonitor_common::{
    build_search_params, ApiError, Pagination, SearchFilters, SearchQuery, SearchResults,
};
use leptos::prelude::*;

use crate::api;
use crate::components::filters::FiltersPanel;
use crate::components::loading::{Loading, NoData};
use crate::components::pagination::PaginationNav;
use crate::components::project_card::ProjectCard;
use crate::components::search_settings::SearchSettings;
use crate::router::use_router;
use crate::state::use_app_context;

/// 検索結果の見出し（例: "1 - 20 of 134 results"）
pub fn results_summary(total: u64, limit: u32, page: u32) -> String {
    if total == 0 {
        return "No results".to_string();
    }
    let start = u64::from(page.max(1) - 1) * u64::from(limit) + 1;
    let end = (start + u64::from(limit) - 1).min(total);
    format!("{} - {} of {} results", start.min(total), end, total)
}

#[component]
pub fn SearchView() -> impl IntoView {
    let router = use_router();
    let ctx = use_app_context();

    let filters = Memo::new(move |_| build_search_params(&router.search()));
    let query = Memo::new(move |_| {
        let prefs = ctx.prefs();
        SearchQuery {
            filters: filters.get(),
            limit: prefs.search.limit,
            sort_by: prefs.search.sort.by,
            sort_direction: prefs.search.sort.direction,
        }
    });

    let (results, set_results) = signal(None::<Result<SearchResults, ApiError>>);
    let (loading, set_loading) = signal(false);

    Effect::new(move |_| {
        let query = query.get();
        set_loading.set(true);
        wasm_bindgen_futures::spawn_local(async move {
            let result = api::search_projects(&query).await;
            if let Err(e) = &result {
                gloo::console::error!(format!("search failed: {}", e));
            }
            set_results.set(Some(result));
            set_loading.set(false);
        });
    });

    let go_to = move |next: SearchFilters| router.navigate(&search_href(&next));
    let on_page = move |page: u32| {
        let mut next = filters.get_untracked();
        next.page_number = page;
        go_to(next);
    };
    let on_settings_change = move || on_page(1);

    let total = Memo::new(move |_| {
        results.with(|r| match r {
            Some(Ok(results)) => results.total(),
            _ => 0,
        })
    });
    let pagination = Memo::new(move |_| {
        Pagination::new(total.get(), query.with(|q| q.limit), filters.with(|f| f.page_number))
    });

    view! {
        <div class="search-page">
            <FiltersPanel filters=filters on_change=go_to />

            <section class="search-results">
                <div class="search-toolbar">
                    <div class="search-summary">
                        {move || {
                            let p = pagination.get();
                            results_summary(p.total, p.limit, p.current)
                        }}
                        {move || filters.get().text.map(|text| format!(" for \"{}\"", text))}
                    </div>
                    <SearchSettings on_change=on_settings_change />
                </div>

                {move || match results.get() {
                    None => view! { <Loading /> }.into_any(),
                    Some(Err(e)) => view! {
                        <NoData message=format!("An error occurred searching projects: {}", e) />
                    }
                    .into_any(),
                    Some(Ok(results)) if results.items.is_empty() => view! {
                        <NoData message="We're sorry! We can't seem to find any projects that match your search" />
                    }
                    .into_any(),
                    Some(Ok(results)) => view! {
                        <div class="project-list" class:loading=move || loading.get()>
                            {results
                                .items
                                .into_iter()
                                .map(|project| view! { <ProjectCard project=project /> })
                                .collect_view()}
                        </div>
                    }
                    .into_any(),
                }}

                <PaginationNav pagination=pagination on_change=on_page />
            </section>
        </div>
    }
}
