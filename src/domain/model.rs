use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `GET /users/{username}` 回應中我們需要的欄位
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repository {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fork: Option<bool>,
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub languages_url: Option<String>,
}

impl Repository {
    pub fn is_fork(&self) -> bool {
        self.fork.unwrap_or(false)
    }

    pub fn stars(&self) -> u64 {
        self.stargazers_count.unwrap_or(0)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// 單一 repository 的語言位元組統計
#[derive(Debug, Clone, Default)]
pub struct LanguageBreakdown {
    pub repository: String,
    pub bytes: BTreeMap<String, u64>,
}

/// Extract 階段的輸出
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub username: String,
    pub user: UserProfile,
    pub repositories: Vec<Repository>,
    pub languages: Vec<LanguageBreakdown>,
}

/// 聚合後的統計，fork 不列入計算
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileStats {
    pub username: String,
    pub followers: u64,
    pub public_repos: u64,
    pub total_stars: u64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub languages: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
    pub percent: f64,
    pub bar_width: u32,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub stats: ProfileStats,
    pub stats_svg: String,
    pub languages_svg: String,
}
