//! RuBot main entry point
//!
//! Command-line interface for the RuBot focused crawler.

use anyhow::Context;
use clap::Parser;
use rubot::config::load_config;
use rubot::output::print_report;
use rubot::Crawler;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// RuBot: a focused topical web crawler
///
/// RuBot starts from seed URLs and crawls toward pages relevant to a
/// configured topic, honoring robots.txt rules and per-site crawl delays,
/// until a global page budget is spent.
#[derive(Parser, Debug)]
#[command(name = "rubot")]
#[command(version = "1.0.0")]
#[command(about = "A focused topical web crawler", long_about = None)]
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

    /// Validate config and show what would be crawled without fetching
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let config = load_config(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    let crawler = Crawler::new(config.crawl)?;
    let report = crawler.run().await?;
    print_report(&report);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("rubot=info,warn"),
            1 => EnvFilter::new("rubot=debug,info"),
            2 => EnvFilter::new("rubot=trace,debug"),
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
fn handle_dry_run(config: &rubot::Config) {
    println!("=== RuBot Dry Run ===\n");

    println!("Topic: {}", config.crawl.topic);
    println!("Query words: {}", config.crawl.query_words);
    println!("User agent: {}", config.crawl.user_agent);
    println!("Max pages: {}", config.crawl.max_pages);
    println!("Max concurrent domains: {}", config.crawl.max_domains);

    let seeds = config.crawl.seeds.as_vec();
    println!("\nSeeds ({}):", seeds.len());
    for seed in &seeds {
        println!("  - {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling from {} seed URLs", seeds.len());
}
