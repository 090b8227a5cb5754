//! アプリケーション状態ストア
//!
//! 設定（テーマ・件数・並び順）を保持し、アクションで更新する。
//! 状態遷移は純粋関数 app_reducer、永続化とテーマ反映はストアが行う。

use tracing::debug;

use crate::prefs::{
    is_valid_limit, ConfiguredTheme, EffectiveTheme, LocalPrefs, Prefs, PrefsStorage, SortPrefs,
};
use crate::query::{SortBy, SortDirection};

/// アプリケーション状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppState {
    pub prefs: Prefs,
}

/// 状態更新アクション
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    UpdateTheme(ConfiguredTheme),
    UpdateEffectiveTheme(EffectiveTheme),
    UpdateLimit(u32),
    UpdateSort { by: SortBy, direction: SortDirection },
}

impl Action {
    pub fn is_theme_action(&self) -> bool {
        matches!(self, Action::UpdateTheme(_) | Action::UpdateEffectiveTheme(_))
    }
}

/// 設定されたテーマから表示テーマを決める
///
/// `Automatic` はこの時点のOS/ブラウザ設定で解決する。
pub fn resolve_effective_theme(configured: ConfiguredTheme, system: EffectiveTheme) -> EffectiveTheme {
    match configured {
        ConfiguredTheme::Automatic => system,
        ConfiguredTheme::Light => EffectiveTheme::Light,
        ConfiguredTheme::Dark => EffectiveTheme::Dark,
    }
}

/// 状態遷移（副作用なし）
///
/// # Arguments
/// * `state` - 現在の状態
/// * `action` - アクション
/// * `system_theme` - アクション時点のOSのカラースキーム
pub fn app_reducer(state: &AppState, action: &Action, system_theme: EffectiveTheme) -> AppState {
    let mut prefs = state.prefs;
    match *action {
        Action::UpdateTheme(configured) => {
            prefs.theme.configured = configured;
            prefs.theme.effective = resolve_effective_theme(configured, system_theme);
        }
        Action::UpdateEffectiveTheme(effective) => {
            prefs.theme.effective = effective;
        }
        Action::UpdateLimit(limit) => {
            if is_valid_limit(limit) {
                prefs.search.limit = limit;
            }
        }
        Action::UpdateSort { by, direction } => {
            prefs.search.sort = SortPrefs { by, direction };
        }
    }
    AppState { prefs }
}

/// ストアの副作用（実行環境ごとに実装）
pub trait StoreEffects {
    /// OS/ブラウザのカラースキーム
    fn system_theme(&self) -> EffectiveTheme;
    /// 表示テーマを反映（ブラウザでは `data-theme` 属性）
    fn apply_theme(&self, theme: EffectiveTheme);
}

/// 何もしない副作用（CLI・テスト用）
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEffects;

impl StoreEffects for NoopEffects {
    fn system_theme(&self) -> EffectiveTheme {
        EffectiveTheme::Light
    }

    fn apply_theme(&self, _theme: EffectiveTheme) {}
}

/// 購読ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn Fn(&AppState)>;

/// 設定ストア
pub struct Store<S: PrefsStorage, E: StoreEffects> {
    prefs: LocalPrefs<S>,
    effects: E,
    state: AppState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: PrefsStorage, E: StoreEffects> Store<S, E> {
    /// 保存済み設定から初期状態を作り、テーマを反映する
    pub fn new(prefs: LocalPrefs<S>, effects: E) -> Self {
        let mut initial = prefs.get_prefs();
        initial.theme.effective =
            resolve_effective_theme(initial.theme.configured, effects.system_theme());
        effects.apply_theme(initial.theme.effective);

        Self {
            prefs,
            effects,
            state: AppState { prefs: initial },
            listeners: Vec::new(),
            next_id: 0,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn prefs(&self) -> &Prefs {
        &self.state.prefs
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// アクションを適用し、保存・テーマ反映・購読者通知を行う
    pub fn dispatch(&mut self, action: Action) {
        let next = app_reducer(&self.state, &action, self.effects.system_theme());
        debug!("dispatch {:?}", action);

        self.prefs.set_prefs(&next.prefs);
        if action.is_theme_action() {
            self.effects.apply_theme(next.prefs.theme.effective);
        }

        if next != self.state {
            self.state = next;
            for (_, listener) in &self.listeners {
                listener(&self.state);
            }
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&AppState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{MemoryStorage, PREFS_KEY};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// OS設定を差し替えられる副作用（呼び出しを記録）
    #[derive(Default)]
    struct RecordingEffects {
        system: Cell<EffectiveTheme>,
        applied: RefCell<Vec<EffectiveTheme>>,
    }

    impl StoreEffects for Rc<RecordingEffects> {
        fn system_theme(&self) -> EffectiveTheme {
            self.system.get()
        }

        fn apply_theme(&self, theme: EffectiveTheme) {
            self.applied.borrow_mut().push(theme);
        }
    }

    fn new_store() -> (Store<MemoryStorage, Rc<RecordingEffects>>, Rc<RecordingEffects>) {
        let effects = Rc::new(RecordingEffects::default());
        let store = Store::new(LocalPrefs::load(MemoryStorage::new()), effects.clone());
        (store, effects)
    }

    #[test]
    fn test_reducer_update_theme_dark() {
        let state = app_reducer(
            &AppState::default(),
            &Action::UpdateTheme(ConfiguredTheme::Dark),
            EffectiveTheme::Light,
        );
        assert_eq!(state.prefs.theme.configured, ConfiguredTheme::Dark);
        assert_eq!(state.prefs.theme.effective, EffectiveTheme::Dark);
    }

    #[test]
    fn test_reducer_automatic_uses_system_theme() {
        let state = app_reducer(
            &AppState::default(),
            &Action::UpdateTheme(ConfiguredTheme::Automatic),
            EffectiveTheme::Dark,
        );
        assert_eq!(state.prefs.theme.configured, ConfiguredTheme::Automatic);
        assert_eq!(state.prefs.theme.effective, EffectiveTheme::Dark);
    }

    #[test]
    fn test_reducer_limit_and_sort() {
        let state = app_reducer(&AppState::default(), &Action::UpdateLimit(60), EffectiveTheme::Light);
        assert_eq!(state.prefs.search.limit, 60);

        let unchanged = app_reducer(&state, &Action::UpdateLimit(13), EffectiveTheme::Light);
        assert_eq!(unchanged.prefs.search.limit, 60);

        let sorted = app_reducer(
            &state,
            &Action::UpdateSort { by: SortBy::Score, direction: SortDirection::Desc },
            EffectiveTheme::Light,
        );
        assert_eq!(sorted.prefs.search.sort.by, SortBy::Score);
        assert_eq!(sorted.prefs.search.sort.direction, SortDirection::Desc);
        assert_eq!(sorted.prefs.search.limit, 60);
    }

    #[test]
    fn test_store_applies_theme_on_load() {
        let (store, effects) = new_store();
        assert_eq!(store.prefs().theme.effective, EffectiveTheme::Light);
        assert_eq!(*effects.applied.borrow(), vec![EffectiveTheme::Light]);
    }

    #[test]
    fn test_store_dispatch_persists_and_notifies() {
        let (mut store, effects) = new_store();
        let seen = Rc::new(Cell::new(0u32));
        let counter = seen.clone();
        store.subscribe(move |state| {
            assert_eq!(state.prefs.search.limit, 40);
            counter.set(counter.get() + 1);
        });

        store.dispatch(Action::UpdateLimit(40));

        assert_eq!(seen.get(), 1);
        assert_eq!(store.prefs().search.limit, 40);
        // 件数変更ではテーマは再適用しない
        assert_eq!(effects.applied.borrow().len(), 1);

        let saved = store.prefs.storage().item(PREFS_KEY).unwrap();
        assert!(saved.contains("\"limit\":40"));
    }

    #[test]
    fn test_store_automatic_resolves_at_dispatch_time() {
        let (mut store, effects) = new_store();
        effects.system.set(EffectiveTheme::Dark);
        store.dispatch(Action::UpdateTheme(ConfiguredTheme::Automatic));
        assert_eq!(store.prefs().theme.effective, EffectiveTheme::Dark);

        // 後からOS設定が変わっても自動では変わらない
        effects.system.set(EffectiveTheme::Light);
        assert_eq!(store.prefs().theme.effective, EffectiveTheme::Dark);

        store.dispatch(Action::UpdateEffectiveTheme(EffectiveTheme::Light));
        assert_eq!(store.prefs().theme.effective, EffectiveTheme::Light);
        assert_eq!(
            *effects.applied.borrow(),
            vec![EffectiveTheme::Light, EffectiveTheme::Dark, EffectiveTheme::Light]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let (mut store, _effects) = new_store();
        let seen = Rc::new(Cell::new(0u32));
        let counter = seen.clone();
        let id = store.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.dispatch(Action::UpdateLimit(60));
        assert_eq!(seen.get(), 0);
    }

    #[test]
    fn test_no_notification_when_unchanged() {
        let (mut store, _effects) = new_store();
        let seen = Rc::new(Cell::new(0u32));
        let counter = seen.clone();
        store.subscribe(move |_| counter.set(counter.get() + 1));

        store.dispatch(Action::UpdateLimit(20));
        assert_eq!(seen.get(), 0);
    }
}
