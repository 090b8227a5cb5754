//! ページ送り

use clomonitor_common::Pagination;
use leptos::prelude::*;

const VISIBLE_PAGES: u32 = 5;

#[component]
pub fn PaginationNav<F>(#[prop(into)] pagination: Signal<Pagination>, on_change: F) -> impl IntoView
where
    F: Fn(u32) + 'static + Clone + Send + Sync,
{
    let on_prev = {
        let on_change = on_change.clone();
        move |_: leptos::ev::MouseEvent| on_change(pagination.get_untracked().current - 1)
    };
    let on_next = {
        let on_change = on_change.clone();
        move |_: leptos::ev::MouseEvent| on_change(pagination.get_untracked().current + 1)
    };

    view! {
        <Show when=move || { pagination.get().pages() > 1 }>
            <nav class="pagination" aria-label="Pagination">
                <button
                    class="btn btn-page"
                    disabled=move || !pagination.get().has_prev()
                    on:click=on_prev.clone()
                >
                    "Previous"
                </button>
                {
                    let on_change = on_change.clone();
                    move || {
                        let current = pagination.get().current;
                        pagination
                            .get()
                            .visible_pages(VISIBLE_PAGES)
                            .into_iter()
                            .map(|page| {
                                let on_change = on_change.clone();
                                view! {
                                    <button
                                        class="btn btn-page"
                                        class:active={page == current}
                                        aria-current={if page == current { "page" } else { "false" }}
                                        on:click=move |_| on_change(page)
                                    >
                                        {page}
                                    </button>
                                }
                            })
                            .collect_view()
                    }
                }
                <button
                    class="btn btn-page"
                    disabled=move || !pagination.get().has_next()
                    on:click=on_next.clone()
                >
                    "Next"
                </button>
            </nav>
        </Show>
    }
}
