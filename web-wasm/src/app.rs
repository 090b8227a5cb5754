//! メインアプリケーションコンポーネント

use clomonitor_common::Route;
use leptos::prelude::*;

use crate::components::header::Header;
use crate::components::loading::Loading;
use crate::router::Router;
use crate::state::AppContext;
use crate::theme::inject_theme_style;
use crate::views::{
    home::HomeView, not_found::NotFoundView, project::ProjectView, search::SearchView,
    stats::StatsView,
};

#[component]
pub fn App() -> impl IntoView {
    if let Err(e) = inject_theme_style() {
        gloo::console::warn!(format!("theme colors not applied: {:?}", e));
    }

    // ストアの読み込み時に保存済みテーマが反映される
    let context = AppContext::new();
    let router = Router::new();
    provide_context(context);
    provide_context(router);

    let route = Memo::new(move |_| Route::resolve(&router.path()));

    // 旧URLは履歴を置き換えて移動
    Effect::new(move |_| {
        if let Route::Redirect(href) = route.get() {
            router.replace(&href);
        }
    });

    view! {
        <div class="container">
            <Header />

            <main class="main">
                {move || match route.get() {
                    Route::Home => view! { <HomeView /> }.into_any(),
                    Route::Search => view! { <SearchView /> }.into_any(),
                    Route::Project { foundation, name } => {
                        view! { <ProjectView foundation=foundation name=name /> }.into_any()
                    }
                    Route::Stats => view! { <StatsView /> }.into_any(),
                    Route::Redirect(_) => view! { <Loading /> }.into_any(),
                    Route::NotFound => view! { <NotFoundView /> }.into_any(),
                }}
            </main>
        </div>
    }
}
