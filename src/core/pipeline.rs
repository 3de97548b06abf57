use crate::adapters::http::GitHubClient;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    LanguageBreakdown, ProfileSnapshot, ProfileStats, Repository, TransformResult,
};
use crate::render::format::parse_github_timestamp;
use crate::render::{render_languages_card, render_stats_card};
use crate::utils::error::{ProfileError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

pub struct GitHubPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: GitHubClient,
    reference_time: Option<DateTime<Utc>>,
}

impl<S: Storage, C: ConfigProvider> GitHubPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let client = GitHubClient::new(
            config.api_base(),
            config.token().map(str::to_string),
            Duration::from_secs(config.timeout_seconds()),
        )?;

        Ok(Self {
            storage,
            config,
            client,
            reference_time: None,
        })
    }

    /// 固定帳號年齡的計算基準時間，預設為執行當下
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.reference_time = Some(now);
        self
    }

    async fn fetch_languages(&self, repositories: &[Repository]) -> Result<Vec<LanguageBreakdown>> {
        let semaphore = Arc::new(Semaphore::new(self.config.concurrent_requests().max(1)));
        let mut tasks = JoinSet::new();

        for repo in repositories.iter().filter(|repo| !repo.is_fork()) {
            let Some(url) = repo.languages_url.clone().filter(|url| !url.is_empty()) else {
                tracing::debug!("Repository {} has no languages_url", repo.display_name());
                continue;
            };
            let client = self.client.clone();
            let semaphore = Arc::clone(&semaphore);
            let repository = repo.display_name().to_string();

            tasks.spawn(async move {
                let _permit =
                    semaphore
                        .acquire_owned()
                        .await
                        .map_err(|e| ProfileError::ProcessingError {
                            message: format!("language request limiter closed: {}", e),
                        })?;
                let bytes = client.fetch_languages(&url).await?;
                Ok::<_, ProfileError>(LanguageBreakdown { repository, bytes })
            });
        }

        let mut breakdowns = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let breakdown = joined.map_err(|e| ProfileError::ProcessingError {
                message: format!("language request task failed: {}", e),
            })??;
            breakdowns.push(breakdown);
        }

        breakdowns.sort_by(|a, b| a.repository.cmp(&b.repository));
        Ok(breakdowns)
    }
}

/// 聚合統計：fork 不計入 repository 數、星數與語言
pub fn aggregate_stats(snapshot: &ProfileSnapshot) -> ProfileStats {
    let owned: Vec<&Repository> = snapshot
        .repositories
        .iter()
        .filter(|repo| !repo.is_fork())
        .collect();

    let mut languages: BTreeMap<String, u64> = BTreeMap::new();
    for breakdown in &snapshot.languages {
        for (name, bytes) in &breakdown.bytes {
            *languages.entry(name.clone()).or_insert(0) += bytes;
        }
    }

    ProfileStats {
        username: snapshot.username.clone(),
        followers: snapshot.user.followers.unwrap_or(0),
        public_repos: owned.len() as u64,
        total_stars: owned.iter().map(|repo| repo.stars()).sum(),
        created_at: parse_github_timestamp(snapshot.user.created_at.as_deref()),
        updated_at: parse_github_timestamp(snapshot.user.updated_at.as_deref()),
        languages,
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GitHubPipeline<S, C> {
    async fn extract(&self) -> Result<ProfileSnapshot> {
        let username = self.config.username();

        tracing::debug!("Fetching user {} from {}", username, self.client.api_base());
        if !self.client.has_token() {
            tracing::warn!("No GITHUB_TOKEN or GH_TOKEN set, using unauthenticated rate limits");
        }
        let user = self.client.fetch_user(username).await?;

        let repositories = self
            .client
            .fetch_owned_repos(username, self.config.per_page())
            .await?;
        tracing::debug!("Fetched {} owned repositories", repositories.len());

        let languages = self.fetch_languages(&repositories).await?;
        tracing::debug!("Fetched language data for {} repositories", languages.len());

        Ok(ProfileSnapshot {
            username: username.to_string(),
            user,
            repositories,
            languages,
        })
    }

    async fn transform(&self, snapshot: ProfileSnapshot) -> Result<TransformResult> {
        let stats = aggregate_stats(&snapshot);
        let now = self.reference_time.unwrap_or_else(Utc::now);

        let stats_svg = render_stats_card(&stats, now);
        let languages_svg = render_languages_card(&stats.username, &stats.languages);

        Ok(TransformResult {
            stats,
            stats_svg,
            languages_svg,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<Vec<String>> {
        let stats_path = self.config.stats_output();
        let langs_path = self.config.langs_output();

        tracing::debug!("Writing stats card ({} bytes) to {}", result.stats_svg.len(), stats_path);
        self.storage
            .write_file(stats_path, result.stats_svg.as_bytes())
            .await?;

        tracing::debug!(
            "Writing languages card ({} bytes) to {}",
            result.languages_svg.len(),
            langs_path
        );
        self.storage
            .write_file(langs_path, result.languages_svg.as_bytes())
            .await?;

        Ok(vec![stats_path.to_string(), langs_path.to_string()])
    }
}
