//! 読み込み中・データなし表示

use leptos::prelude::*;

#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="loading" role="status">
            <span class="spinner" />
            <span class="visually-hidden">"Loading..."</span>
        </div>
    }
}

#[component]
pub fn NoData(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div class="no-data" role="alert">
            <p>{message}</p>
        </div>
    }
}
