use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::PhaseMonitor;

pub struct CardEngine<P: Pipeline> {
    pipeline: P,
    monitor: PhaseMonitor,
}

impl<P: Pipeline> CardEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: PhaseMonitor::new(monitor_enabled),
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitor.is_enabled()
    }

    /// 依序執行 extract -> transform -> load，回傳寫出的檔案路徑
    pub async fn run(&self) -> Result<Vec<String>> {
        tracing::info!("🚀 Starting profile card generation");

        tracing::info!("📥 Fetching GitHub profile data...");
        let snapshot = self.pipeline.extract().await?;
        tracing::info!(
            "📥 Fetched user '{}' with {} owned repositories",
            snapshot.username,
            snapshot.repositories.len()
        );
        self.monitor.mark("Extract");

        tracing::info!("🔄 Aggregating statistics...");
        let result = self.pipeline.transform(snapshot).await?;
        tracing::info!(
            "🔄 {} non-fork repositories, {} stars, {} languages",
            result.stats.public_repos,
            result.stats.total_stars,
            result.stats.languages.len()
        );
        self.monitor.mark("Transform");

        tracing::info!("💾 Writing cards...");
        let written = self.pipeline.load(result).await?;
        for path in &written {
            tracing::info!("💾 Wrote {}", path);
        }
        self.monitor.mark("Load");
        self.monitor.log_summary();

        Ok(written)
    }
}
