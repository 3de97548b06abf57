//! SVG card renderers.
//!
//! Both cards are 495×195 and share the same layout grid: a gradient
//! background, an 18px grid pattern, a one-pixel border and a monospace
//! header at y=30.

use crate::domain::model::{LanguageShare, ProfileStats};
use crate::render::format::{account_age_label, date_label, format_number, xml_escape};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const FONT: &str = "ui-monospace, SFMono-Regular, Menlo, monospace";
const WIDTH: u32 = 495;
const HEIGHT: u32 = 195;
const BAR_TRACK: u32 = 280;
pub const TOP_LANGUAGES: usize = 6;

struct Theme {
    gradient_id: &'static str,
    grid_id: &'static str,
    gradient_from: &'static str,
    gradient_to: &'static str,
    grid_stroke: &'static str,
    border: &'static str,
}

const STATS_THEME: Theme = Theme {
    gradient_id: "g",
    grid_id: "grid",
    gradient_from: "#08110b",
    gradient_to: "#030604",
    grid_stroke: "#0d1c12",
    border: "#1f4028",
};

const LANGS_THEME: Theme = Theme {
    gradient_id: "g2",
    grid_id: "grid2",
    gradient_from: "#070d10",
    gradient_to: "#040709",
    grid_stroke: "#122028",
    border: "#24414f",
};

fn open_card(out: &mut String, aria_label: &str, theme: &Theme) {
    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}">"#,
        w = WIDTH,
        h = HEIGHT,
        label = xml_escape(aria_label),
    ));
    out.push_str("<defs>");
    out.push_str(&format!(
        r#"<linearGradient id="{}" x1="0" y1="0" x2="1" y2="1">"#,
        theme.gradient_id
    ));
    out.push_str(&format!(
        r#"<stop offset="0%" stop-color="{}"/>"#,
        theme.gradient_from
    ));
    out.push_str(&format!(
        r#"<stop offset="100%" stop-color="{}"/>"#,
        theme.gradient_to
    ));
    out.push_str("</linearGradient>");
    out.push_str(&format!(
        r#"<pattern id="{}" width="18" height="18" patternUnits="userSpaceOnUse">"#,
        theme.grid_id
    ));
    out.push_str(&format!(
        r#"<path d="M18 0H0V18" fill="none" stroke="{}" stroke-width="1"/>"#,
        theme.grid_stroke
    ));
    out.push_str("</pattern>");
    out.push_str("</defs>");
    out.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="url(#{})"/>"#,
        WIDTH, HEIGHT, theme.gradient_id
    ));
    out.push_str(&format!(
        r#"<rect width="{}" height="{}" fill="url(#{})" opacity="0.5"/>"#,
        WIDTH, HEIGHT, theme.grid_id
    ));
    out.push_str(&format!(
        r#"<rect x="0.5" y="0.5" width="{}" height="{}" fill="none" stroke="{}"/>"#,
        WIDTH - 1,
        HEIGHT - 1,
        theme.border
    ));
}

fn text(x: u32, y: u32, fill: &str, size: u32, anchor_end: bool, content: &str) -> String {
    let anchor = if anchor_end { r#" text-anchor="end""# } else { "" };
    format!(
        r#"<text x="{x}" y="{y}"{anchor} fill="{fill}" font-size="{size}" font-family="{FONT}">{content}</text>"#
    )
}

pub fn render_stats_card(stats: &ProfileStats, now: DateTime<Utc>) -> String {
    let username = xml_escape(&stats.username);
    let rows = [
        ("followers", format_number(stats.followers)),
        ("public_repos", format_number(stats.public_repos)),
        ("total_stars", format_number(stats.total_stars)),
        ("account_age", account_age_label(stats.created_at, now)),
    ];

    let mut out = String::new();
    open_card(
        &mut out,
        &format!("{} GitHub stats", stats.username),
        &STATS_THEME,
    );
    out.push_str(&text(30, 30, "#4ff57a", 14, false, "[ SYSTEM :: GITHUB PROFILE ]"));
    out.push_str(&text(30, 50, "#d7ffe0", 15, false, &format!("@{}", username)));
    out.push_str(&text(
        462,
        50,
        "#7fc38f",
        11,
        true,
        &format!("updated {}", date_label(stats.updated_at)),
    ));

    let mut y = 76;
    for (label, value) in rows {
        out.push_str(&text(30, y, "#8af29f", 12, false, &format!("$ {}", label)));
        out.push_str(&text(462, y, "#d7ffe0", 18, true, &value));
        y += 28;
    }

    out.push_str(r##"<rect x="28" y="161" width="439" height="12" fill="#0a120d" stroke="#1a3422"/>"##);
    out.push_str(&text(36, 170, "#7fc38f", 10, false, "status=online"));
    out.push_str(&text(462, 170, "#7fc38f", 10, true, "source=api.github.com"));
    out.push_str("</svg>");
    out
}

/// 依位元組數由大到小排序，同數量時依名稱排序，取前 `limit` 名
pub fn top_languages(languages: &BTreeMap<String, u64>, limit: usize) -> Vec<LanguageShare> {
    let total: u64 = languages.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<(&String, &u64)> = languages.iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(name, &bytes)| {
            let ratio = bytes as f64 / total as f64;
            LanguageShare {
                name: name.clone(),
                bytes,
                percent: ratio * 100.0,
                bar_width: ((ratio * BAR_TRACK as f64) as u32).max(2),
            }
        })
        .collect()
}

pub fn render_languages_card(username: &str, languages: &BTreeMap<String, u64>) -> String {
    let top = top_languages(languages, TOP_LANGUAGES);

    let mut out = String::new();
    open_card(
        &mut out,
        &format!("{} top languages", username),
        &LANGS_THEME,
    );
    out.push_str(&text(30, 30, "#54d6ff", 14, false, "[ STACK :: TOP LANGUAGES ]"));

    if top.is_empty() {
        out.push_str(&text(30, 92, "#8fa7b2", 14, false, "No public language data"));
    } else {
        let mut y = 60;
        for share in &top {
            out.push_str(&text(
                30,
                y,
                "#d9f5ff",
                12,
                false,
                &xml_escape(&share.name.to_lowercase()),
            ));
            out.push_str(&format!(
                r##"<rect x="150" y="{}" width="{}" height="8" fill="#0e151b"/>"##,
                y - 10,
                BAR_TRACK
            ));
            out.push_str(&format!(
                r##"<rect x="150" y="{}" width="{}" height="8" fill="#54d6ff"/>"##,
                y - 10,
                share.bar_width
            ));
            out.push_str(&text(
                462,
                y,
                "#9fc8d8",
                12,
                true,
                &format!("{:.1}%", share.percent),
            ));
            y += 20;
        }
    }

    out.push_str(&text(30, 174, "#6f95a8", 10, false, "scope=owned_non_fork_repos"));
    out.push_str("</svg>");
    out
}
