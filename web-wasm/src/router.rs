//! History API を使ったクライアントサイドルーティング

use gloo::events::EventListener;
use leptos::prelude::*;

/// 現在のURL（パスとクエリ文字列）
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    /// `?` を含む。なければ空文字
    pub search: String,
}

impl Location {
    fn current() -> Self {
        let location = web_sys::window().map(|w| w.location());
        match location {
            Some(location) => Self {
                path: location.pathname().unwrap_or_else(|_| "/".to_string()),
                search: location.search().unwrap_or_default(),
            },
            None => Self { path: "/".to_string(), search: String::new() },
        }
    }
}

/// `/search?text=a` をパスとクエリに分ける
pub fn split_href(href: &str) -> (&str, &str) {
    match href.find('?') {
        Some(index) => href.split_at(index),
        None => (href, ""),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Router {
    location: RwSignal<Location>,
}

impl Router {
    /// 現在のURLで初期化し、戻る/進むを監視する
    pub fn new() -> Self {
        let location = RwSignal::new(Location::current());
        if let Some(window) = web_sys::window() {
            EventListener::new(&window, "popstate", move |_| {
                location.set(Location::current());
            })
            .forget();
        }
        Self { location }
    }

    pub fn location(&self) -> Location {
        self.location.get()
    }

    pub fn path(&self) -> String {
        self.location.with(|l| l.path.clone())
    }

    pub fn search(&self) -> String {
        self.location.with(|l| l.search.clone())
    }

    /// 履歴を追加して遷移
    pub fn navigate(&self, href: &str) {
        self.change(href, false);
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    }

    /// 履歴を置き換えて遷移（リダイレクト用）
    pub fn replace(&self, href: &str) {
        self.change(href, true);
    }

    fn change(&self, href: &str, replace: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let result = if replace {
            history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))
        } else {
            history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(href))
        };
        if let Err(e) = result {
            gloo::console::warn!(format!("navigation failed: {:?}", e));
            return;
        }
        let (path, search) = split_href(href);
        self.location.set(Location { path: path.to_string(), search: search.to_string() });
    }
}

pub fn use_router() -> Router {
    expect_context::<Router>()
}

/// ページ遷移しないリンク
#[component]
pub fn Link(
    #[prop(into)] href: String,
    #[prop(optional)] class: &'static str,
    children: Children,
) -> impl IntoView {
    let router = use_router();
    let target = href.clone();
    view! {
        <a
            href=href
            class=class
            on:click=move |ev| {
                ev.prevent_default();
                router.navigate(&target);
            }
        >
            {children()}
        </a>
    }
}
