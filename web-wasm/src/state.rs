//! アプリケーション状態のコンテキスト
//!
//! 共通の `Store`（設定の保存・テーマ反映）をリアクティブに包む。
//! ストア本体はローカルアリーナに置き、画面はシグナル経由で読む。

use clomonitor_common::{Action, AppState, ConfiguredTheme, LocalPrefs, Prefs, Store};
use leptos::prelude::*;

use crate::storage::BrowserStorage;
use crate::theme::{watch_system_theme, BrowserEffects};

pub type WebStore = Store<BrowserStorage, BrowserEffects>;

#[derive(Clone, Copy)]
pub struct AppContext {
    store: StoredValue<WebStore, LocalStorage>,
    state: RwSignal<AppState>,
}

impl AppContext {
    /// localStorage から設定を読み込んでコンテキストを作る
    pub fn new() -> Self {
        let store = Store::new(LocalPrefs::load(BrowserStorage), BrowserEffects);
        let state = RwSignal::new(*store.state());
        let context = Self { store: StoredValue::new_local(store), state };

        watch_system_theme(move |theme| {
            let configured = context.state.with_untracked(|s| s.prefs.theme.configured);
            if configured == ConfiguredTheme::Automatic {
                context.dispatch(Action::UpdateEffectiveTheme(theme));
            }
        });
        context
    }

    /// 現在の設定（リアクティブ）
    pub fn prefs(&self) -> Prefs {
        self.state.with(|s| s.prefs)
    }

    pub fn dispatch(&self, action: Action) {
        let next = self.store.try_update_value(|store| {
            store.dispatch(action);
            *store.state()
        });
        if let Some(next) = next {
            if next != self.state.get_untracked() {
                self.state.set(next);
            }
        }
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
