//! ブラウザ側のテーマ処理
//!
//! - `<meta>` のブランドカラーから `<style>` を1回だけ注入
//! - `prefers-color-scheme` の取得と変更監視
//! - `data-theme` 属性の反映

use clomonitor_common::theme::{PRIMARY_COLOR_META, SECONDARY_COLOR_META};
use clomonitor_common::{EffectiveTheme, StoreEffects, ThemeColorSet};
use gloo::events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, MediaQueryList, MediaQueryListEvent};

pub const THEME_STYLE_ID: &str = "clo-theme-colors";
const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn dark_scheme_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_SCHEME_QUERY).ok().flatten()
}

/// メディアクエリの結果から表示テーマを決める
pub fn theme_from_dark_match(matches: bool) -> EffectiveTheme {
    if matches {
        EffectiveTheme::Dark
    } else {
        EffectiveTheme::Light
    }
}

/// `<meta name="...">` の content
pub fn read_meta(name: &str) -> Option<String> {
    document()?
        .query_selector(&format!("meta[name='{}']", name))
        .ok()
        .flatten()?
        .get_attribute("content")
        .filter(|content| !content.trim().is_empty())
}

/// ブランドカラーのCSS変数を `<head>` に注入する
///
/// 既に注入済み、または有効な色がない場合は何もしない。
///
/// # Returns
/// 新しく注入したら `true`
pub fn inject_theme_style() -> Result<bool, JsValue> {
    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
    if document.get_element_by_id(THEME_STYLE_ID).is_some() {
        return Ok(false);
    }

    let primary = read_meta(PRIMARY_COLOR_META);
    let secondary = read_meta(SECONDARY_COLOR_META);
    let rule = ThemeColorSet::build(primary.as_deref(), secondary.as_deref()).css_rule();
    if rule.is_empty() {
        return Ok(false);
    }

    let style = document.create_element("style")?;
    style.set_id(THEME_STYLE_ID);
    style.set_text_content(Some(&rule));
    let head = document.head().ok_or_else(|| JsValue::from_str("no <head>"))?;
    head.append_child(&style)?;
    Ok(true)
}

/// OSのカラースキーム変更を監視する（アプリ終了まで解除しない）
pub fn watch_system_theme(on_change: impl Fn(EffectiveTheme) + 'static) {
    let Some(query) = dark_scheme_query() else {
        return;
    };
    EventListener::new(&query, "change", move |event| {
        let matches = event
            .dyn_ref::<MediaQueryListEvent>()
            .map(MediaQueryListEvent::matches)
            .unwrap_or(false);
        on_change(theme_from_dark_match(matches));
    })
    .forget();
}

/// ブラウザでのストア副作用
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserEffects;

impl StoreEffects for BrowserEffects {
    fn system_theme(&self) -> EffectiveTheme {
        theme_from_dark_match(dark_scheme_query().map(|q| q.matches()).unwrap_or(false))
    }

    fn apply_theme(&self, theme: EffectiveTheme) {
        let root = document().and_then(|d| d.document_element());
        if let Some(root) = root {
            if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
                gloo::console::warn!(format!("failed to apply theme: {:?}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_dark_match() {
        assert_eq!(theme_from_dark_match(true), EffectiveTheme::Dark);
        assert_eq!(theme_from_dark_match(false), EffectiveTheme::Light);
    }
}
