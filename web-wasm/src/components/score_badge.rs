//! スコア・評価バッジ

use clomonitor_common::{get_category_color, Rating};
use leptos::prelude::*;

use crate::format::format_score;

/// スコア値からバッジのクラス名
pub fn score_class(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("score-badge score-{}", get_category_color(score).as_str()),
        None => "score-badge score-none".to_string(),
    }
}

#[component]
pub fn ScoreBadge(score: Option<f64>, #[prop(optional)] large: bool) -> impl IntoView {
    let mut class = score_class(score);
    if large {
        class.push_str(" score-badge-lg");
    }
    view! { <span class=class title="Score">{format_score(score)}</span> }
}

#[component]
pub fn RatingBadge(rating: Option<Rating>) -> impl IntoView {
    rating.map(|rating| {
        view! {
            <span class=format!("rating-badge rating-{}", rating.as_str()) title="Rating">
                {rating.as_str().to_uppercase()}
            </span>
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_class() {
        assert_eq!(score_class(Some(80.0)), "score-badge score-green");
        assert_eq!(score_class(Some(10.0)), "score-badge score-red");
        assert_eq!(score_class(None), "score-badge score-none");
    }
}
