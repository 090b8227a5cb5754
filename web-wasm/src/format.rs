//! 表示用フォーマット

use wasm_bindgen::JsValue;

/// スコアを整数で表示
pub fn format_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.0}", score),
        None => "n/a".to_string(),
    }
}

pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value)
}

/// UNIX秒をブラウザのロケールで日付表示
pub fn format_date(timestamp: i64) -> String {
    let date = js_sys::Date::new(&JsValue::from_f64(timestamp as f64 * 1000.0));
    String::from(date.to_locale_date_string("en-US", &JsValue::UNDEFINED))
}
