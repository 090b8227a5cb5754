//! 見出しアンカー生成
//!
//! レポート(Markdown)の見出しから `id` 属性に使える値を作る。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r"[^\p{L}\p{N}\s_-]").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// 見出しテキストからアンカー値を作る
///
/// 小文字化 → 記号を空白に → 空白の連続をハイフン1つに。
/// 先頭が数字かハイフンになる場合は `X` を前置する。
///
/// # Examples
/// ```
/// use clomonitor_common::get_anchor_value;
///
/// assert_eq!(get_anchor_value("2. Title."), "X-title");
/// assert_eq!(get_anchor_value("Best practices"), "best-practices");
/// ```
pub fn get_anchor_value(text: &str) -> String {
    let lower = text.to_lowercase();
    let without_punctuation = PUNCTUATION.replace_all(&lower, " ");
    let collapsed = WHITESPACE.replace_all(without_punctuation.trim(), "-");
    let value = collapsed.into_owned();

    match value.chars().next() {
        Some(c) if c.is_ascii_digit() || c == '-' => format!("X{}", strip_leading_number(&value)),
        _ => value,
    }
}

/// 先頭の番号（"2-" など）を落としてハイフンから始める
fn strip_leading_number(value: &str) -> &str {
    let start = value
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(value.len());
    &value[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_heading() {
        assert_eq!(get_anchor_value("2. Title."), "X-title");
    }

    #[test]
    fn test_plain_heading() {
        assert_eq!(get_anchor_value("Security Policy"), "security-policy");
    }

    #[test]
    fn test_collapses_whitespace_and_punctuation() {
        assert_eq!(get_anchor_value("License  (SPDX)   id"), "license-spdx-id");
    }

    #[test]
    fn test_leading_hyphen() {
        assert_eq!(get_anchor_value("-flag"), "X-flag");
    }

    #[test]
    fn test_empty() {
        assert_eq!(get_anchor_value(""), "");
    }
}
