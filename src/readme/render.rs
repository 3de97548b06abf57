use crate::readme::badges::BadgeKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BioRow {
    pub label: String,
    pub value: String,
}

/// README 的內容描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDocument {
    pub username: String,
    pub name: Option<String>,
    pub tagline: Option<String>,
    #[serde(default)]
    pub bio: Vec<BioRow>,
    #[serde(default)]
    pub stack: Vec<String>,
}

/// 本機產生的 SVG 卡片連結（相對於 README 所在目錄）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalCards {
    pub stats_path: String,
    pub langs_path: String,
}

#[derive(Debug, Clone)]
pub struct BadgeSection {
    pub kinds: Vec<BadgeKind>,
    pub theme: String,
    pub local_cards: Option<LocalCards>,
}

impl Default for BadgeSection {
    fn default() -> Self {
        Self {
            kinds: BadgeKind::ALL.to_vec(),
            theme: String::new(),
            local_cards: None,
        }
    }
}

impl BadgeSection {
    fn image_target(&self, kind: BadgeKind, username: &str) -> String {
        match (&self.local_cards, kind) {
            (Some(cards), BadgeKind::Stats) => cards.stats_path.clone(),
            (Some(cards), BadgeKind::TopLanguages) => cards.langs_path.clone(),
            _ => kind.url(username, &self.theme).to_string(),
        }
    }
}

fn escape_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

fn image(alt: &str, target: &str) -> String {
    if target.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
        format!("![{}](<{}>)", alt, target)
    } else {
        format!("![{}]({})", alt, target)
    }
}

pub fn render_readme(profile: &ProfileDocument, badges: &BadgeSection) -> String {
    let mut sections: Vec<String> = Vec::new();

    let title = match profile.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => format!("# {} (@{})", name, profile.username),
        _ => format!("# @{}", profile.username),
    };
    sections.push(title);

    if let Some(tagline) = profile.tagline.as_deref().map(str::trim) {
        if !tagline.is_empty() {
            sections.push(tagline.to_string());
        }
    }

    if !profile.bio.is_empty() {
        let mut table = vec!["| | |".to_string(), "| --- | --- |".to_string()];
        for row in &profile.bio {
            table.push(format!(
                "| **{}** | {} |",
                escape_cell(&row.label),
                escape_cell(&row.value)
            ));
        }
        sections.push(table.join("\n"));
    }

    if !profile.stack.is_empty() {
        sections.push("## Tech Stack".to_string());
        let items: Vec<String> = profile
            .stack
            .iter()
            .map(|item| format!("- {}", item.trim()))
            .collect();
        sections.push(items.join("\n"));
    }

    if !badges.kinds.is_empty() {
        sections.push("## Stats".to_string());

        let inline: Vec<String> = badges
            .kinds
            .iter()
            .filter(|kind| kind.is_inline())
            .map(|kind| image(kind.alt_text(), &badges.image_target(*kind, &profile.username)))
            .collect();
        if !inline.is_empty() {
            sections.push(inline.join(" "));
        }

        for kind in badges.kinds.iter().filter(|kind| !kind.is_inline()) {
            sections.push(image(
                kind.alt_text(),
                &badges.image_target(*kind, &profile.username),
            ));
        }
    }

    let mut out = sections.join("\n\n");
    out.push('\n');
    out
}
