//! トップページ

use clomonitor_common::routes::{search_href, text_search_href};
use clomonitor_common::{FilterKind, FilterMap, SearchFilters};
use leptos::prelude::*;

use crate::router::{use_router, Link};

/// 1つのフィルタだけを指定した検索URL
pub fn filter_href(kind: FilterKind, value: &str) -> String {
    let mut filters = FilterMap::new();
    filters.push(kind.key(), value);
    search_href(&SearchFilters { filters, ..Default::default() })
}

#[component]
pub fn HomeView() -> impl IntoView {
    let router = use_router();
    let (text, set_text) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        router.navigate(&text_search_href(&text.get_untracked()));
    };

    view! {
        <section class="home">
            <h1 class="home-title">"Open source projects health"</h1>
            <p class="home-subtitle">
                "CLOMonitor checks open source projects repositories to verify they meet certain project health best practices."
            </p>

            <form class="home-search" on:submit=on_submit>
                <input
                    type="text"
                    aria-label="Search projects"
                    placeholder="Search projects"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
                <button type="submit" class="btn btn-primary">"Search"</button>
            </form>

            <div class="home-shortcuts">
                {[FilterKind::Maturity, FilterKind::Rating]
                    .into_iter()
                    .map(|kind| view! {
                        <div class="shortcut-group">
                            <span class="shortcut-title">{kind.title()}</span>
                            {kind
                                .choices()
                                .into_iter()
                                .map(|choice| view! {
                                    <Link href=filter_href(kind, choice.value) class="shortcut">
                                        {choice.name}
                                    </Link>
                                })
                                .collect_view()}
                        </div>
                    })
                    .collect_view()}
            </div>
        </section>
    }
}
