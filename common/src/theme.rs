//! テーマカラー生成
//!
//! 2つのブランドカラー（primary / secondary）からCSSカスタムプロパティ群を作り、
//! `[data-theme='light']` に対する1つのCSSルールとして書き出す。
//! 色が未指定・不正な場合はそのグループ全体を出力しない。

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

use crate::error::{Error, Result};

/// ページの `<meta>` 名
pub const PRIMARY_COLOR_META: &str = "clomonitor:primaryColor";
pub const SECONDARY_COLOR_META: &str = "clomonitor:secondaryColor";

/// 生成したルールを適用するセレクタ
pub const LIGHT_THEME_SELECTOR: &str = "[data-theme='light']";

lazy_static! {
    static ref HEX_COLOR: Regex = Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap();
    static ref RGB_COLOR: Regex =
        Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap();
}

/// RGBカラー
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// `#rgb` / `#rrggbb` / `rgb(r, g, b)` を解析
    pub fn parse(color: &str) -> Result<Self> {
        let color = color.trim();
        let invalid = || Error::InvalidColor(color.to_string());

        if HEX_COLOR.is_match(color) {
            let hex = &color[1..];
            let expanded: String = if hex.len() == 3 {
                hex.chars().flat_map(|c| [c, c]).collect()
            } else {
                hex.to_string()
            };
            let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self { r: channel(0)?, g: channel(2)?, b: channel(4)? });
        }

        if let Some(caps) = RGB_COLOR.captures(color) {
            let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| invalid());
            return Ok(Self { r: channel(1)?, g: channel(2)?, b: channel(3)? });
        }

        Err(invalid())
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `r, g, b`（`rgba(var(--x-rgb), .5)` 用）
    pub fn triplet(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    pub fn rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
    }

    /// 各チャンネルを `amount`（0.0〜1.0）の割合だけ暗くする
    pub fn darken(&self, amount: f32) -> Self {
        let factor = (1.0 - amount).clamp(0.0, 1.0);
        let scale = |c: u8| (f32::from(c) * factor).round() as u8;
        Self { r: scale(self.r), g: scale(self.g), b: scale(self.b) }
    }
}

/// CSS変数1つ分
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeColor {
    pub name: String,
    pub color: String,
}

/// 生成されたCSS変数の集合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeColorSet {
    colors: Vec<ThemeColor>,
}

const PRIMARY_OPACITIES: &[(&str, f32)] = &[("5", 0.05), ("10", 0.1), ("15", 0.15), ("50", 0.5)];
const SECONDARY_OPACITIES: &[(&str, f32)] = &[("15", 0.15), ("50", 0.5), ("75", 0.75)];
const DARKEN_AMOUNT: f32 = 0.15;

impl ThemeColorSet {
    /// ブランドカラーからパレットを作る
    pub fn build(primary: Option<&str>, secondary: Option<&str>) -> Self {
        let mut set = Self::default();
        set.push_group("primary", primary, PRIMARY_OPACITIES);
        set.push_group("secondary", secondary, SECONDARY_OPACITIES);
        set
    }

    fn push_group(&mut self, name: &str, source: Option<&str>, opacities: &[(&str, f32)]) {
        let Some(source) = source.filter(|s| !s.trim().is_empty()) else {
            return;
        };
        let rgb = match Rgb::parse(source) {
            Ok(rgb) => rgb,
            Err(e) => {
                warn!("skipping {} theme colors: {}", name, e);
                return;
            }
        };

        let mut push = |suffix: &str, color: String| {
            self.colors.push(ThemeColor { name: format!("--clo-{}{}", name, suffix), color });
        };
        push("", rgb.to_hex());
        push("-rgb", rgb.triplet());
        for (suffix, alpha) in opacities {
            push(&format!("-{}", suffix), rgb.rgba(*alpha));
        }
        push("-darker", rgb.darken(DARKEN_AMOUNT).to_hex());
    }

    pub fn colors(&self) -> &[ThemeColor] {
        &self.colors
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.colors.iter().find(|c| c.name == name).map(|c| c.color.as_str())
    }

    /// `[data-theme='light'] { --x: y; ... }`（色がなければ空文字）
    pub fn css_rule(&self) -> String {
        if self.colors.is_empty() {
            return String::new();
        }
        let body: Vec<String> = self
            .colors
            .iter()
            .map(|c| format!("{}: {};", c.name, c.color))
            .collect();
        format!("{} {{ {} }}", LIGHT_THEME_SELECTOR, body.join(" "))
    }
}
