use crate::adapters::http::DEFAULT_API_BASE;
use crate::config::{
    DEFAULT_CONCURRENT_REQUESTS, DEFAULT_LANGS_OUTPUT, DEFAULT_PER_PAGE, DEFAULT_STATS_OUTPUT,
    DEFAULT_TIMEOUT_SECONDS,
};
use crate::core::ConfigProvider;
use crate::readme::{BadgeKind, BadgeSection, LocalCards, ProfileDocument};
use crate::utils::error::{ProfileError, Result};
use crate::utils::validation::{
    validate_github_username, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub profile: ProfileDocument,
    #[serde(default)]
    pub badges: BadgeConfig,
    #[serde(default)]
    pub cards: CardsConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub readme: ReadmeConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub include: Vec<BadgeKind>,
    pub theme: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            include: BadgeKind::ALL.to_vec(),
            theme: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardsConfig {
    pub stats_output: String,
    pub langs_output: String,
    /// README 改為嵌入本機產生的卡片，而非 github-readme-stats
    pub embed_local: bool,
}

impl Default for CardsConfig {
    fn default() -> Self {
        Self {
            stats_output: DEFAULT_STATS_OUTPUT.to_string(),
            langs_output: DEFAULT_LANGS_OUTPUT.to_string(),
            embed_local: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub api_base: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub per_page: u32,
    pub concurrent_requests: usize,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            per_page: DEFAULT_PER_PAGE,
            concurrent_requests: DEFAULT_CONCURRENT_REQUESTS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadmeConfig {
    pub output: String,
}

impl Default for ReadmeConfig {
    fn default() -> Self {
        Self {
            output: "README.md".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let mut config: TomlConfig =
            toml::from_str(&processed_content).map_err(|e| ProfileError::ConfigValidationError {
                field: "toml_parsing".to_string(),
                message: format!("TOML parsing error: {}", e),
            })?;

        // 未解析的 ${VAR} 視為沒有 token
        if config
            .source
            .token
            .as_deref()
            .is_some_and(|token| token.trim().is_empty() || token.contains("${"))
        {
            config.source.token = None;
        }

        Ok(config)
    }

    /// 替換環境變數 (例如 ${GITHUB_TOKEN})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProfileError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }

    pub fn readme_output(&self) -> &str {
        &self.readme.output
    }

    pub fn badge_section(&self) -> BadgeSection {
        let local_cards = self.cards.embed_local.then(|| LocalCards {
            stats_path: path_from_readme(&self.readme.output, &self.cards.stats_output),
            langs_path: path_from_readme(&self.readme.output, &self.cards.langs_output),
        });

        BadgeSection {
            kinds: self.badges.include.clone(),
            theme: self.badges.theme.clone(),
            local_cards,
        }
    }
}

/// 卡片輸出路徑相對於工作目錄，改寫為相對於 README 所在目錄的連結
fn path_from_readme(readme_output: &str, card: &str) -> String {
    fn normal_parts(path: &Path) -> Option<Vec<&str>> {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .map(|c| match c {
                Component::Normal(part) => part.to_str(),
                _ => None,
            })
            .collect()
    }

    let readme_dir = Path::new(readme_output).parent().unwrap_or(Path::new(""));
    // 絕對路徑或含 `..` 時照原樣輸出
    let (Some(base), Some(target)) = (normal_parts(readme_dir), normal_parts(Path::new(card)))
    else {
        return card.to_string();
    };

    let shared = base
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let mut parts = vec![".."; base.len() - shared];
    parts.extend_from_slice(&target[shared..]);
    parts.join("/")
}

impl ConfigProvider for TomlConfig {
    fn username(&self) -> &str {
        &self.profile.username
    }

    fn api_base(&self) -> &str {
        &self.source.api_base
    }

    fn token(&self) -> Option<&str> {
        self.source.token.as_deref()
    }

    fn stats_output(&self) -> &str {
        &self.cards.stats_output
    }

    fn langs_output(&self) -> &str {
        &self.cards.langs_output
    }

    fn concurrent_requests(&self) -> usize {
        self.source.concurrent_requests
    }

    fn per_page(&self) -> u32 {
        self.source.per_page
    }

    fn timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_github_username("profile.username", &self.profile.username)?;
        for (i, row) in self.profile.bio.iter().enumerate() {
            validate_non_empty_string(&format!("profile.bio[{}].label", i), &row.label)?;
        }

        validate_url("source.api_base", &self.source.api_base)?;
        validate_positive_number(
            "source.concurrent_requests",
            self.source.concurrent_requests,
            1,
        )?;
        validate_range("source.per_page", self.source.per_page, 1, 100)?;
        validate_range("source.timeout_seconds", self.source.timeout_seconds, 1, 300)?;

        validate_path("cards.stats_output", &self.cards.stats_output)?;
        validate_path("cards.langs_output", &self.cards.langs_output)?;
        validate_path("readme.output", &self.readme.output)?;
        Ok(())
    }
}
