use crate::adapters::http::DEFAULT_API_BASE;
use crate::config::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_LANGS_OUTPUT, DEFAULT_PER_PAGE, DEFAULT_STATS_OUTPUT,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_github_username, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "profile-cards")]
#[command(about = "Generate profile SVG cards using GitHub REST API")]
pub struct CliConfig {
    #[arg(long, help = "GitHub username")]
    pub username: String,

    #[arg(long, default_value = DEFAULT_STATS_OUTPUT, help = "Stats SVG output path")]
    pub stats_output: String,

    #[arg(long, default_value = DEFAULT_LANGS_OUTPUT, help = "Top languages SVG output path")]
    pub langs_output: String,

    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[arg(long, default_value_t = DEFAULT_CONCURRENT_REQUESTS)]
    pub concurrent_requests: usize,

    #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: u32,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    /// 從環境變數讀取，不接受命令列參數
    #[arg(skip)]
    pub token: Option<String>,
}

impl ConfigProvider for CliConfig {
    fn username(&self) -> &str {
        &self.username
    }

    fn api_base(&self) -> &str {
        &self.api_base
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn stats_output(&self) -> &str {
        &self.stats_output
    }

    fn langs_output(&self) -> &str {
        &self.langs_output
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
    }

    fn per_page(&self) -> u32 {
        self.per_page
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_github_username("username", &self.username)?;
        validate_url("api_base", &self.api_base)?;
        validate_path("stats_output", &self.stats_output)?;
        validate_path("langs_output", &self.langs_output)?;
        validate_positive_number("concurrent_requests", self.concurrent_requests, 1)?;
        validate_range("per_page", self.per_page, 1, 100)?;
        validate_range("timeout_seconds", self.timeout_seconds, 1, 300)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["profile-cards", "--username", "virgoone"]);

        assert_eq!(config.username, "virgoone");
        assert_eq!(config.stats_output, "assets/github-stats.svg");
        assert_eq!(config.langs_output, "assets/top-langs.svg");
        assert_eq!(config.api_base, "https://api.github.com");
        assert_eq!(config.concurrent_requests, 5);
        assert_eq!(config.per_page, 100);
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.token.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_username_is_required() {
        assert!(CliConfig::try_parse_from(["profile-cards"]).is_err());
    }

    #[test]
    fn test_token_flag_is_not_accepted() {
        assert!(CliConfig::try_parse_from([
            "profile-cards",
            "--username",
            "virgoone",
            "--token",
            "secret"
        ])
        .is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CliConfig::parse_from(["profile-cards", "--username", "virgoone"]);
        config.per_page = 101;
        assert!(config.validate().is_err());

        let mut config = CliConfig::parse_from(["profile-cards", "--username", "virgoone"]);
        config.username = "-bad-".to_string();
        assert!(config.validate().is_err());
        config.username = "virgoone".to_string();
        config.api_base = "file:///etc".to_string();
        assert!(config.validate().is_err());
    }
}
