//! スナップショット日付の選択

use leptos::prelude::*;

const LATEST: &str = "";

#[component]
pub fn SnapshotSelector<F>(
    snapshots: Vec<String>,
    #[prop(into)] selected: Signal<Option<String>>,
    on_change: F,
) -> impl IntoView
where
    F: Fn(Option<String>) + 'static,
{
    if snapshots.is_empty() {
        return None;
    }

    Some(view! {
        <div class="snapshot-selector">
            <label for="snapshot">"Snapshot"</label>
            <select
                id="snapshot"
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    on_change(Some(value).filter(|v| v != LATEST));
                }
            >
                <option value=LATEST selected=move || selected.get().is_none()>"Latest"</option>
                {snapshots
                    .into_iter()
                    .map(|date| {
                        let current = date.clone();
                        view! {
                            <option
                                value=date.clone()
                                selected=move || selected.get().as_deref() == Some(current.as_str())
                            >
                                {date.clone()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    })
}
