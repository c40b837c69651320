//! Docharvest main entry point
//!
//! This is the command-line interface for the docharvest corpus collector.

use anyhow::Context;
use clap::Parser;
use docharvest::config::load_config_with_hash;
use docharvest::Coordinator;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Docharvest: a resumable document-site corpus collector
///
/// Docharvest crawls a prefix-restricted slice of a document website into
/// per-page records, checkpointing its frontier so interrupted runs resume
/// where they left off, and merges the pages into one ordered corpus file
/// per target.
#[derive(Parser, Debug)]
#[command(name = "docharvest")]
#[command(version = "1.0.0")]
#[command(about = "Collects a document website into an ordered text corpus", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Ignore any previous state and start every target from its seed
    #[arg(long)]
    fresh: bool,

    /// Validate config and show what would be crawled without fetching
    #[arg(long, conflicts_with = "merge_only")]
    dry_run: bool,

    /// Rebuild corpus artifacts from persisted state without crawling
    #[arg(long, conflicts_with = "dry_run")]
    merge_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let mut coordinator = Coordinator::new(config)?;

    if cli.merge_only {
        coordinator.merge_all()?;
    } else {
        coordinator.run(cli.fresh).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("docharvest=info,warn"),
            1 => EnvFilter::new("docharvest=debug,info"),
            2 => EnvFilter::new("docharvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the crawl plan
fn handle_dry_run(config: &docharvest::Config) {
    println!("=== Docharvest Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Rate limit: {}ms", config.crawler.rate_limit_ms);
    println!("  Retries: {}", config.crawler.retries);
    println!(
        "  Timeouts: {}s connect / {}s read",
        config.crawler.connect_timeout_secs, config.crawler.read_timeout_secs
    );
    println!(
        "  Checkpoint interval: {} pages",
        config.crawler.checkpoint_interval
    );
    match config.crawler.max_pages {
        Some(cap) => println!("  Max pages per run: {}", cap),
        None => println!("  Max pages per run: unlimited"),
    }
    println!(
        "  Include revisions: {}",
        config.crawler.include_revisions
    );

    println!("\nOutput:");
    println!("  Data directory: {}", config.output.data_dir.display());

    println!("\nTargets ({}):", config.targets.len());
    for target in &config.targets {
        println!("  - {}", target.name);
        println!("    Seed: {}", target.seed_url);
        for prefix in &target.allow_prefixes {
            println!("    Allow: {}", prefix);
        }
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} targets", config.targets.len());
}
