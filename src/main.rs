//! Standup - GitLab contribution reporter
//!
//! A CLI tool that aggregates your commits, issues and merge requests
//! from a GitLab instance over a daily or weekly window and prints a
//! numbered summary report.
//!
//! Exit codes:
//!   0 - Success (including an empty report)
//!   1 - Runtime error (connection, auth, config failure, etc.)

use anyhow::{Context, Result};
use chrono::Local;
use standup::activity::Gatherer;
use standup::cli::Args;
use standup::config::Config;
use standup::gitlab::{CachedClient, GitLabApi, HttpClient};
use standup::report;
use std::time::Duration;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("Standup v{}", env!("CARGO_PKG_VERSION"));

    match run_report(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("Report failed: {}", e);
            eprintln!("\nError: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .standup.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(".standup.toml");

    if path.exists() {
        eprintln!(".standup.toml already exists. Remove it first or edit it manually.");
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content).context("Failed to write .standup.toml")?;

    println!("Created .standup.toml with default settings.");
    println!("Edit it to customize the GitLab URL, timeout and headings.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

/// Run the complete report workflow: aggregate, render, print.
async fn run_report(args: Args) -> Result<()> {
    // Load configuration
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);

    let cutoff = args.mode.cutoff(Local::now().date_naive());
    info!("Reporting {:?} activity since {}", args.mode, cutoff);

    let client = HttpClient::new(
        &config.gitlab.url,
        args.token(),
        Duration::from_secs(config.gitlab.timeout_seconds),
    )
    .context("Failed to create GitLab client")?;
    let client = CachedClient::new(client);

    let identity = client
        .current_user()
        .await
        .with_context(|| format!("Failed to authenticate against {}", config.gitlab.url))?;
    info!("Authenticated as {} <{}>", identity.name, identity.email);

    let gatherer = Gatherer::new(&client);
    let contributions = gatherer
        .aggregate(&identity, cutoff)
        .await
        .context("Failed to aggregate contributions")?;

    let stats = client.cache_stats();
    debug!("API cache: {} hits, {} misses", stats.hits, stats.misses);

    if contributions.is_empty() {
        info!("No contributions found in the window");
    }

    let heading = config.report.heading(args.mode);
    print!("{}", report::render(&contributions, heading));

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from .standup.toml");
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
