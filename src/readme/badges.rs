//! External badge and statistics services embedded in a profile README.
//!
//! The crate never renders these images; it only builds the URLs that point
//! at them and recognises them again when checking a README.

use serde::{Deserialize, Serialize};
use url::Url;

pub const SHIELDS_HOST: &str = "img.shields.io";
pub const README_STATS_HOST: &str = "github-readme-stats.vercel.app";
pub const STREAK_STATS_HOST: &str = "streak-stats.demolab.com";
pub const PROFILE_VIEWS_HOST: &str = "komarev.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Followers,
    ProfileViews,
    Stats,
    TopLanguages,
    Streak,
}

impl BadgeKind {
    pub const ALL: [BadgeKind; 5] = [
        BadgeKind::Followers,
        BadgeKind::ProfileViews,
        BadgeKind::Stats,
        BadgeKind::TopLanguages,
        BadgeKind::Streak,
    ];

    pub fn alt_text(&self) -> &'static str {
        match self {
            BadgeKind::Followers => "GitHub followers",
            BadgeKind::ProfileViews => "Profile views",
            BadgeKind::Stats => "GitHub stats",
            BadgeKind::TopLanguages => "Top languages",
            BadgeKind::Streak => "GitHub streak",
        }
    }

    /// 小型徽章放在同一行，統計卡片各自獨立一行
    pub fn is_inline(&self) -> bool {
        matches!(self, BadgeKind::Followers | BadgeKind::ProfileViews)
    }

    pub fn url(&self, username: &str, theme: &str) -> Url {
        let mut url = match self {
            BadgeKind::Followers => {
                let mut url = service_url(SHIELDS_HOST, &format!("/github/followers/{}", username));
                url.query_pairs_mut()
                    .append_pair("label", "Followers")
                    .append_pair("style", "social");
                url
            }
            BadgeKind::ProfileViews => {
                let mut url = service_url(PROFILE_VIEWS_HOST, "/ghpvc/");
                url.query_pairs_mut()
                    .append_pair("username", username)
                    .append_pair("label", "Profile views")
                    .append_pair("color", "0e75b6")
                    .append_pair("style", "flat");
                url
            }
            BadgeKind::Stats => {
                let mut url = service_url(README_STATS_HOST, "/api");
                url.query_pairs_mut()
                    .append_pair("username", username)
                    .append_pair("show_icons", "true");
                url
            }
            BadgeKind::TopLanguages => {
                let mut url = service_url(README_STATS_HOST, "/api/top-langs/");
                url.query_pairs_mut()
                    .append_pair("username", username)
                    .append_pair("layout", "compact");
                url
            }
            BadgeKind::Streak => {
                let mut url = service_url(STREAK_STATS_HOST, "/");
                url.query_pairs_mut().append_pair("user", username);
                url
            }
        };

        // shields 與 komarev 不支援 readme-stats 的主題名稱
        if self.is_themed() && !theme.is_empty() {
            url.query_pairs_mut().append_pair("theme", theme);
        }
        url
    }

    pub fn is_themed(&self) -> bool {
        matches!(
            self,
            BadgeKind::Stats | BadgeKind::TopLanguages | BadgeKind::Streak
        )
    }
}

fn service_url(host: &str, path: &str) -> Url {
    // 主機名稱皆為常數
    let mut url = Url::parse(&format!("https://{}/", host)).expect("service hosts are valid");
    url.set_path(path);
    url
}

/// 已知的第三方服務，用於檢查 README 中的使用者名稱
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Shields,
    ReadmeStats,
    StreakStats,
    ProfileViews,
}

impl Service {
    pub fn from_url(url: &Url) -> Option<Service> {
        match url.host_str()? {
            SHIELDS_HOST => Some(Service::Shields),
            README_STATS_HOST => Some(Service::ReadmeStats),
            STREAK_STATS_HOST => Some(Service::StreakStats),
            PROFILE_VIEWS_HOST if url.path().starts_with("/ghpvc") => Some(Service::ProfileViews),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Service::Shields => "shields.io",
            Service::ReadmeStats => "github-readme-stats",
            Service::StreakStats => "streak-stats",
            Service::ProfileViews => "komarev profile views",
        }
    }

    /// shields.io 只有已知的 `/github/...` 路徑帶有使用者名稱
    pub fn requires_username(&self, url: &Url) -> bool {
        match self {
            Service::Shields => shields_github_user(url).is_some(),
            _ => true,
        }
    }

    pub fn username(&self, url: &Url) -> Option<String> {
        let found = match self {
            Service::Shields => shields_github_user(url).flatten(),
            Service::ReadmeStats | Service::ProfileViews => query_value(url, "username"),
            Service::StreakStats => query_value(url, "user"),
        };
        found.filter(|name| !name.is_empty())
    }
}

/// shields.io `/github/` 之後、使用者名稱之前的路徑段；`*` 代表任意值
const SHIELDS_GITHUB_ROUTES: &[&[&str]] = &[
    &["followers"],
    &["sponsors"],
    &["stars"],
    &["forks"],
    &["watchers"],
    &["issues"],
    &["issues-raw"],
    &["issues-closed"],
    &["issues-closed-raw"],
    &["issues-pr"],
    &["issues-pr-raw"],
    &["issues-pr-closed"],
    &["issues-pr-closed-raw"],
    &["license"],
    &["last-commit"],
    &["release-date"],
    &["created-at"],
    &["contributors"],
    &["repo-size"],
    &["discussions"],
    &["downloads"],
    &["commits-since"],
    &["deployments"],
    &["directory-file-count"],
    &["check-runs"],
    &["languages", "top"],
    &["languages", "count"],
    &["languages", "code-size"],
    &["commit-activity", "*"],
    &["v", "release"],
    &["v", "tag"],
    &["go-mod", "go-version"],
    &["actions", "workflow", "status"],
];

/// 外層 `None` 表示不是已知路徑，內層為使用者名稱路徑段
fn shields_github_user(url: &Url) -> Option<Option<String>> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    let Some((&"github", rest)) = segments.split_first() else {
        return None;
    };

    let route = SHIELDS_GITHUB_ROUTES.iter().copied().find(|route| {
        rest.len() >= route.len()
            && route
                .iter()
                .zip(rest)
                .all(|(want, got)| *want == "*" || want == got)
    })?;
    Some(rest.get(route.len()).map(|user| user.to_string()))
}

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
