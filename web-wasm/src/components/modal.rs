//! モーダル

use leptos::prelude::*;

#[component]
pub fn Modal<F>(
    #[prop(into)] open: Signal<bool>,
    #[prop(into)] title: Signal<String>,
    on_close: F,
    children: ChildrenFn,
) -> impl IntoView
where
    F: Fn() + 'static + Clone + Send + Sync,
{
    let close_backdrop = on_close.clone();
    let close_button = on_close;

    view! {
        <Show when=move || open.get()>
            <div
                class="modal-backdrop"
                on:click={
                    let close = close_backdrop.clone();
                    move |_| close()
                }
            />
            <div class="modal" role="dialog" aria-modal="true">
                <div class="modal-header">
                    <h3 class="modal-title">{move || title.get()}</h3>
                    <button
                        class="btn-close"
                        aria-label="Close"
                        on:click={
                            let close = close_button.clone();
                            move |_| close()
                        }
                    >
                        "×"
                    </button>
                </div>
                <div class="modal-body">{children()}</div>
            </div>
        </Show>
    }
}
