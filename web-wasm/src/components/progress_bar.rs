//! カテゴリ別スコアのバー

use clomonitor_common::get_category_color;
use leptos::prelude::*;

use crate::format::format_score;

/// バーの幅（0〜100%に収める）
pub fn bar_width(score: Option<f64>) -> f64 {
    score.unwrap_or(0.0).clamp(0.0, 100.0)
}

#[component]
pub fn ProgressBar(#[prop(into)] label: String, score: Option<f64>) -> impl IntoView {
    let color = score.map(|s| get_category_color(s).as_str()).unwrap_or("none");

    view! {
        <div class="progress-container">
            <span class="progress-label">{label}</span>
            <div class="progress-bar">
                <div
                    class=format!("progress-fill score-{}", color)
                    style=format!("width: {}%", bar_width(score))
                />
            </div>
            <span class="progress-text">{format_score(score)}</span>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_width_clamped() {
        assert_eq!(bar_width(Some(150.0)), 100.0);
        assert_eq!(bar_width(Some(-3.0)), 0.0);
        assert_eq!(bar_width(Some(42.0)), 42.0);
        assert_eq!(bar_width(None), 0.0);
    }
}
