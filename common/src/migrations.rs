//! 設定マイグレーション
//!
//! 保存形式の変更を番号つきの線形チェーンとして管理する。
//! 各マイグレーションは「追加する項目が既にあれば何もしない」ように書くこと。

use serde_json::{json, Map, Value};
use tracing::debug;

use crate::prefs::{default_list, ConfiguredTheme, PrefsList};
use crate::query::{SortBy, SortDirection};

/// マイグレーション定義
pub struct Migration {
    /// 単調増加する番号
    pub key: u32,
    pub description: &'static str,
    pub apply: fn(PrefsList) -> PrefsList,
}

impl std::fmt::Debug for Migration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migration")
            .field("key", &self.key)
            .field("description", &self.description)
            .finish()
    }
}

/// 番号の昇順に並べること
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        key: 1,
        description: "Add sort to search prefs",
        apply: add_search_sort,
    },
    Migration {
        key: 2,
        description: "Add configured theme",
        apply: add_configured_theme,
    },
];

/// マイグレーション適用結果
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationOutcome {
    pub list: PrefsList,
    /// 今回適用した中で最大の番号（何も適用しなければ None）
    pub applied_up_to: Option<u32>,
}

/// 組み込みのマイグレーションを適用する
///
/// 空の設定リストはゲストの既定値だけを持つリストになる。
pub fn apply_migrations(list: PrefsList, last_applied: Option<u32>) -> MigrationOutcome {
    if list.is_empty() {
        return MigrationOutcome { list: default_list(), applied_up_to: None };
    }
    run_migrations(list, last_applied, MIGRATIONS)
}

/// `last_applied` より大きい番号のマイグレーションを昇順に1回ずつ適用する
pub fn run_migrations(
    list: PrefsList,
    last_applied: Option<u32>,
    migrations: &[Migration],
) -> MigrationOutcome {
    let mut pending: Vec<&Migration> = migrations
        .iter()
        .filter(|m| last_applied.map_or(true, |applied| m.key > applied))
        .collect();
    pending.sort_by_key(|m| m.key);

    let mut list = list;
    let mut applied_up_to = None;
    for migration in pending {
        debug!("applying preferences migration {}: {}", migration.key, migration.description);
        list = (migration.apply)(list);
        applied_up_to = Some(migration.key);
    }

    MigrationOutcome { list, applied_up_to }
}

/// 各プロファイルの設定オブジェクトに関数を適用する
fn for_each_profile(mut list: PrefsList, f: impl Fn(&mut Map<String, Value>)) -> PrefsList {
    for prefs in list.values_mut() {
        if let Value::Object(prefs) = prefs {
            f(prefs);
        }
    }
    list
}

/// 子オブジェクトを取得（なければ作成、オブジェクト以外なら置き換え）
fn object_entry<'a>(parent: &'a mut Map<String, Value>, key: &str) -> Option<&'a mut Map<String, Value>> {
    let entry = parent.entry(key.to_string()).or_insert_with(|| json!({}));
    if !entry.is_object() {
        *entry = json!({});
    }
    entry.as_object_mut()
}

fn add_search_sort(list: PrefsList) -> PrefsList {
    for_each_profile(list, |prefs| {
        let Some(search) = object_entry(prefs, "search") else {
            return;
        };
        if search.get("sort").map_or(true, Value::is_null) {
            search.insert(
                "sort".to_string(),
                json!({
                    "by": SortBy::default().as_str(),
                    "direction": SortDirection::default().as_str(),
                }),
            );
        }
    })
}

fn add_configured_theme(list: PrefsList) -> PrefsList {
    for_each_profile(list, |prefs| {
        let Some(theme) = object_entry(prefs, "theme") else {
            return;
        };
        if theme.get("configured").map_or(true, Value::is_null) {
            let configured = theme
                .get("effective")
                .and_then(Value::as_str)
                .filter(|effective| matches!(*effective, "light" | "dark"))
                .unwrap_or(ConfiguredTheme::default().as_str())
                .to_string();
            theme.insert("configured".to_string(), Value::String(configured));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::{resolve_prefs, Prefs, GUEST_PROFILE};
    use serde_json::json;

    fn list_of(value: Value) -> PrefsList {
        match value {
            Value::Object(map) => map,
            _ => panic!("オブジェクトではない"),
        }
    }

    #[test]
    fn test_keys_strictly_increasing() {
        let keys: Vec<u32> = MIGRATIONS.iter().map(|m| m.key).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]), "{:?}", keys);
    }

    #[test]
    fn test_empty_list_gets_guest_defaults() {
        let outcome = apply_migrations(PrefsList::new(), None);
        assert_eq!(Value::Object(outcome.list), json!({ "guest": Prefs::default_value() }));
    }

    #[test]
    fn test_adds_default_sort_and_keeps_effective_theme() {
        let list = list_of(json!({
            "guest": { "search": { "limit": 20 }, "theme": { "effective": "dark" } }
        }));
        let outcome = apply_migrations(list, None);

        let guest = &outcome.list[GUEST_PROFILE];
        assert_eq!(guest["search"]["sort"], json!({ "by": "name", "direction": "asc" }));
        assert_eq!(guest["theme"]["effective"], json!("dark"));
        assert_eq!(outcome.applied_up_to, Some(2));

        let prefs = resolve_prefs(Some(guest));
        assert_eq!(prefs.search.sort.by, SortBy::Name);
        assert_eq!(prefs.search.sort.direction, SortDirection::Asc);
    }

    #[test]
    fn test_existing_sort_untouched() {
        let list = list_of(json!({
            "guest": { "search": { "limit": 40, "sort": { "by": "score", "direction": "desc" } } }
        }));
        let outcome = apply_migrations(list, None);
        assert_eq!(
            outcome.list[GUEST_PROFILE]["search"]["sort"],
            json!({ "by": "score", "direction": "desc" })
        );
    }

    #[test]
    fn test_configured_theme_from_effective() {
        let list = list_of(json!({ "guest": { "theme": { "effective": "dark" } } }));
        let outcome = apply_migrations(list, Some(1));
        assert_eq!(outcome.list[GUEST_PROFILE]["theme"]["configured"], json!("dark"));
        assert_eq!(outcome.applied_up_to, Some(2));
        // 番号1は適用済みなので sort は追加されない
        assert!(outcome.list[GUEST_PROFILE].get("search").is_none());
    }

    #[test]
    fn test_nothing_pending() {
        let list = list_of(json!({ "guest": { "search": { "limit": 20 } } }));
        let outcome = apply_migrations(list.clone(), Some(2));
        assert_eq!(outcome.list, list);
        assert_eq!(outcome.applied_up_to, None);
    }

    #[test]
    fn test_idempotent() {
        let list = list_of(json!({ "guest": { "search": { "limit": 60 } } }));
        let once = apply_migrations(list, None).list;
        let twice = apply_migrations(once.clone(), None).list;
        assert_eq!(once, twice);
    }

    #[test]
    fn test_run_migrations_sorts_by_key() {
        fn mark_a(mut list: PrefsList) -> PrefsList {
            list.insert("order".to_string(), json!("a"));
            list
        }
        fn mark_b(mut list: PrefsList) -> PrefsList {
            let order = list.get("order").and_then(Value::as_str).unwrap_or("").to_string();
            list.insert("order".to_string(), json!(format!("{}b", order)));
            list
        }
        let migrations = [
            Migration { key: 20, description: "b", apply: mark_b },
            Migration { key: 10, description: "a", apply: mark_a },
        ];
        let outcome = run_migrations(PrefsList::new(), None, &migrations);
        assert_eq!(outcome.list["order"], json!("ab"));
        assert_eq!(outcome.applied_up_to, Some(20));
    }

    #[test]
    fn test_applies_to_every_profile() {
        let list = list_of(json!({ "guest": {}, "other": { "search": {} } }));
        let outcome = apply_migrations(list, None);
        for profile in ["guest", "other"] {
            assert!(outcome.list[profile]["search"]["sort"].is_object());
        }
    }
}
