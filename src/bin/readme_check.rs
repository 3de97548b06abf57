use anyhow::Context;
use clap::Parser;
use profile_cards::domain::ports::Storage;
use profile_cards::readme::{check_readme, CheckOptions};
use profile_cards::utils::logger;
use profile_cards::utils::validation::validate_github_username;
use profile_cards::LocalStorage;

#[derive(Parser)]
#[command(name = "readme_check")]
#[command(about = "Check image URLs and badge usernames in a profile README")]
struct Args {
    /// README to check
    #[arg(short, long, default_value = "README.md")]
    path: String,

    /// Username every badge must reference (defaults to the first one found)
    #[arg(short, long)]
    username: Option<String>,

    /// Reject relative image paths
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    if let Some(username) = &args.username {
        validate_github_username("username", username)?;
    }

    let storage = LocalStorage::new(".".to_string());
    let bytes = storage
        .read_file(&args.path)
        .await
        .with_context(|| format!("reading {}", args.path))?;
    let content = String::from_utf8(bytes).with_context(|| format!("{} is not UTF-8", args.path))?;

    let options = CheckOptions {
        expected_username: args.username.clone(),
        allow_relative: !args.strict,
    };
    let report = check_readme(&content, &options);

    tracing::info!(
        "🔍 {} images checked, username: {}",
        report.images.len(),
        report.username.as_deref().unwrap_or("n/a")
    );

    if report.is_ok() {
        println!("✅ {}: {} images OK", args.path, report.images.len());
        return Ok(());
    }

    for issue in &report.issues {
        eprintln!("❌ {}: {}", args.path, issue);
    }
    eprintln!("{} issue(s) found", report.issues.len());
    std::process::exit(1);
}
