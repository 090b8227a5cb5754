//! テーマ切り替え

use clomonitor_common::{Action, ConfiguredTheme};
use leptos::prelude::*;

use crate::state::use_app_context;

const THEME_OPTIONS: [(ConfiguredTheme, &str); 3] = [
    (ConfiguredTheme::Automatic, "Automatic"),
    (ConfiguredTheme::Light, "Light"),
    (ConfiguredTheme::Dark, "Dark"),
];

#[component]
pub fn ThemeSwitcher() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="theme-switcher" role="radiogroup" aria-label="Theme">
            {THEME_OPTIONS
                .into_iter()
                .map(|(theme, label)| {
                    view! {
                        <label class="theme-option">
                            <input
                                type="radio"
                                name="theme"
                                value=theme.as_str()
                                prop:checked=move || ctx.prefs().theme.configured == theme
                                on:change=move |_| ctx.dispatch(Action::UpdateTheme(theme))
                            />
                            {label}
                        </label>
                    }
                })
                .collect_view()}
        </div>
    }
}
