//! 検索設定（表示件数・並び順）
//!
//! 変更は設定ストアに保存され、次回以降の検索にも使われる。

use clomonitor_common::prefs::SEARCH_LIMITS;
use clomonitor_common::{Action, SortBy, SortDirection};
use leptos::prelude::*;

use crate::state::use_app_context;

const SORT_OPTIONS: [(SortBy, SortDirection, &str); 4] = [
    (SortBy::Score, SortDirection::Desc, "Score (high to low)"),
    (SortBy::Score, SortDirection::Asc, "Score (low to high)"),
    (SortBy::Name, SortDirection::Asc, "Name (A-Z)"),
    (SortBy::Name, SortDirection::Desc, "Name (Z-A)"),
];

/// `<select>` の値（例: "score-desc"）
pub fn sort_option_value(by: SortBy, direction: SortDirection) -> String {
    format!("{}-{}", by.as_str(), direction.as_str())
}

pub fn parse_sort_option(value: &str) -> Option<(SortBy, SortDirection)> {
    let (by, direction) = value.split_once('-')?;
    Some((by.parse().ok()?, direction.parse().ok()?))
}

/// 設定変更後に呼ばれる `on_change`（1ページ目に戻す等）
#[component]
pub fn SearchSettings<F>(on_change: F) -> impl IntoView
where
    F: Fn() + 'static + Clone,
{
    let ctx = use_app_context();

    let on_limit = {
        let on_change = on_change.clone();
        move |ev: leptos::ev::Event| {
            if let Ok(limit) = event_target_value(&ev).parse::<u32>() {
                ctx.dispatch(Action::UpdateLimit(limit));
                on_change();
            }
        }
    };
    let on_sort = move |ev: leptos::ev::Event| {
        if let Some((by, direction)) = parse_sort_option(&event_target_value(&ev)) {
            ctx.dispatch(Action::UpdateSort { by, direction });
            on_change();
        }
    };

    view! {
        <div class="search-settings">
            <div class="form-group">
                <label for="sort">"Sort"</label>
                <select id="sort" on:change=on_sort>
                    {SORT_OPTIONS
                        .into_iter()
                        .map(|(by, direction, label)| {
                            view! {
                                <option
                                    value=sort_option_value(by, direction)
                                    selected=move || {
                                        let sort = ctx.prefs().search.sort;
                                        sort.by == by && sort.direction == direction
                                    }
                                >
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="form-group">
                <label for="limit">"Show"</label>
                <select id="limit" on:change=on_limit>
                    {SEARCH_LIMITS
                        .into_iter()
                        .map(|limit| {
                            view! {
                                <option
                                    value=limit.to_string()
                                    selected=move || ctx.prefs().search.limit == limit
                                >
                                    {limit}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_option_round_trip() {
        for (by, direction, _) in SORT_OPTIONS {
            assert_eq!(parse_sort_option(&sort_option_value(by, direction)), Some((by, direction)));
        }
    }

    #[test]
    fn test_parse_sort_option_invalid() {
        assert_eq!(parse_sort_option("score"), None);
        assert_eq!(parse_sort_option("stars-desc"), None);
        assert_eq!(parse_sort_option("name-up"), None);
    }
}
