//! リポジトリレポート（Markdown）の表示
//!
//! 見出しはアンカー付きの見出し要素に、それ以外は整形済みテキストとして表示する。

use clomonitor_common::get_anchor_value;
use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportBlock {
    Heading { level: u8, text: String, anchor: String },
    Text(String),
}

fn parse_heading(line: &str) -> Option<(u8, &str)> {
    let trimmed = line.trim_start();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let text = trimmed[level..].strip_prefix(' ')?.trim();
    Some((level as u8, text))
}

fn flush(text: &mut Vec<&str>, blocks: &mut Vec<ReportBlock>) {
    let joined = text.join("\n");
    let joined = joined.trim_matches('\n');
    if !joined.trim().is_empty() {
        blocks.push(ReportBlock::Text(joined.to_string()));
    }
    text.clear();
}

/// Markdownを見出しとテキストのブロックに分ける（空のテキストは捨てる）
pub fn report_blocks(markdown: &str) -> Vec<ReportBlock> {
    let mut blocks = Vec::new();
    let mut text: Vec<&str> = Vec::new();

    for line in markdown.lines() {
        match parse_heading(line) {
            Some((level, heading)) => {
                flush(&mut text, &mut blocks);
                blocks.push(ReportBlock::Heading {
                    level,
                    text: heading.to_string(),
                    anchor: get_anchor_value(heading),
                });
            }
            None => text.push(line),
        }
    }
    flush(&mut text, &mut blocks);
    blocks
}

#[component]
pub fn ReportContent(markdown: String) -> impl IntoView {
    let blocks = report_blocks(&markdown)
        .into_iter()
        .map(|block| match block {
            ReportBlock::Heading { level, text, anchor } => {
                let link = view! { <a class="anchor" href=format!("#{}", anchor)>"#"</a> };
                match level {
                    1 => view! { <h1 id=anchor>{text} {link}</h1> }.into_any(),
                    2 => view! { <h2 id=anchor>{text} {link}</h2> }.into_any(),
                    3 => view! { <h3 id=anchor>{text} {link}</h3> }.into_any(),
                    4 => view! { <h4 id=anchor>{text} {link}</h4> }.into_any(),
                    _ => view! { <h5 id=anchor>{text} {link}</h5> }.into_any(),
                }
            }
            ReportBlock::Text(text) => view! { <pre class="report-text">{text}</pre> }.into_any(),
        })
        .collect_view();

    view! { <div class="report-content">{blocks}</div> }
}
