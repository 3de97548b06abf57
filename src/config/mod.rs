#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

pub const DEFAULT_STATS_OUTPUT: &str = "assets/github-stats.svg";
pub const DEFAULT_LANGS_OUTPUT: &str = "assets/top-langs.svg";
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 5;
pub const DEFAULT_PER_PAGE: u32 = 100;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 優先使用 `GITHUB_TOKEN`，其次 `GH_TOKEN`
pub fn token_from_env() -> Option<String> {
    ["GITHUB_TOKEN", "GH_TOKEN"]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .find(|value| !value.trim().is_empty())
}
