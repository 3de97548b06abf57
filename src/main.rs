use clap::Parser;
use profile_cards::config::token_from_env;
use profile_cards::utils::error::ErrorSeverity;
use profile_cards::utils::{logger, validation::Validate};
use profile_cards::{CardEngine, CliConfig, GitHubPipeline, LocalStorage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = CliConfig::parse();
    config.token = token_from_env();

    logger::init(config.verbose, config.log_json);

    tracing::info!("Starting profile-cards CLI");
    tracing::debug!(
        "CLI config: username={}, api_base={}, token={}",
        config.username,
        config.api_base,
        if config.token.is_some() { "set" } else { "unset" }
    );

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    // 輸出路徑相對於目前工作目錄
    let storage = LocalStorage::new(".".to_string());
    let pipeline = GitHubPipeline::new(storage, config)?;
    let engine = CardEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(written) => {
            println!("Wrote {}", written.join(" and "));
        }
        Err(e) => {
            tracing::error!(
                "❌ Card generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("error: {}", e);

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
