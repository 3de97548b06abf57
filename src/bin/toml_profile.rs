use anyhow::Context;
use clap::Parser;
use profile_cards::config::token_from_env;
use profile_cards::core::ConfigProvider;
use profile_cards::domain::ports::Storage;
use profile_cards::readme::{check_readme, render_readme, CheckOptions};
use profile_cards::utils::{logger, validation::Validate};
use profile_cards::{CardEngine, GitHubPipeline, LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml_profile")]
#[command(about = "Render a profile README and its stats cards from a TOML description")]
struct Args {
    /// Path to TOML profile file
    #[arg(short, long, default_value = "profile.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Only write the README, do not call the GitHub API
    #[arg(long)]
    skip_cards: bool,

    /// Show what would be written without touching the filesystem
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(args.verbose, args.log_json);

    tracing::info!("🚀 Starting TOML-based profile generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.source.token.is_none() {
        config.source.token = token_from_env();
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    let readme = render_readme(&config.profile, &config.badge_section());

    // 產生的 README 必須通過自身的檢查
    let report = check_readme(
        &readme,
        &CheckOptions {
            expected_username: Some(config.username().to_string()),
            allow_relative: true,
        },
    );
    for issue in &report.issues {
        tracing::warn!("⚠️ Rendered README issue: {}", issue);
    }

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be written");
        println!("{}", readme);
        return Ok(());
    }

    let storage = LocalStorage::new(".".to_string());
    storage
        .write_file(config.readme_output(), readme.as_bytes())
        .await
        .with_context(|| format!("writing {}", config.readme_output()))?;
    println!("Wrote {}", config.readme_output());

    if args.skip_cards {
        tracing::info!("⏭️ Skipping card generation");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = GitHubPipeline::new(storage, config)?;
    let engine = CardEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(written) => {
            println!("Wrote {}", written.join(" and "));
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Card generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            Err(e).context("card generation failed")
        }
    }
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    tracing::info!("📋 Profile Summary:");
    tracing::info!("   Username: {}", config.username());
    if let Some(name) = &config.profile.name {
        tracing::info!("   Name: {}", name);
    }
    tracing::info!("   Bio rows: {}", config.profile.bio.len());
    tracing::info!("   Stack entries: {}", config.profile.stack.len());
    tracing::info!("   Badges: {:?}", config.badges.include);
    tracing::info!("   README: {}", config.readme_output());
    if !args.skip_cards {
        tracing::info!(
            "   Cards: {} / {}",
            config.stats_output(),
            config.langs_output()
        );
        tracing::info!("   API: {}", config.api_base());
        tracing::info!(
            "   Token: {}",
            if config.token().is_some() { "set" } else { "unset" }
        );
    }
}
