//! ヘッダーコンポーネント

use clomonitor_common::routes::{search_href, stats_href, text_search_href};
use clomonitor_common::SearchFilters;
use leptos::prelude::*;

use crate::components::theme_switcher::ThemeSwitcher;
use crate::router::{use_router, Link};

#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();
    let (text, set_text) = signal(String::new());

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        router.navigate(&text_search_href(&text.get_untracked()));
    };

    view! {
        <header class="navbar">
            <Link href="/" class="navbar-brand">"CLOMonitor"</Link>

            <form class="navbar-search" on:submit=on_submit>
                <input
                    type="text"
                    aria-label="Search projects"
                    placeholder="Search projects"
                    prop:value=move || text.get()
                    on:input=move |ev| set_text.set(event_target_value(&ev))
                />
            </form>

            <nav class="navbar-links">
                <Link href=search_href(&SearchFilters::default())>"Projects"</Link>
                <Link href=stats_href()>"Stats"</Link>
            </nav>

            <ThemeSwitcher />
        </header>
    }
}
