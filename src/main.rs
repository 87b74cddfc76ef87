//! Sitescribe main entry point
//!
//! Command-line interface for the two-phase site-to-JSONL scraper.

use clap::Parser;
use sitescribe::config::CrawlConfig;
use sitescribe::pipeline::run_pipeline;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Scrape a website into AI-ready JSONL documents
///
/// Uses a two-phase approach: phase 1 collects URLs by crawling the site
/// sequentially; phase 2 fetches and processes page content concurrently.
#[derive(Parser, Debug)]
#[command(name = "sitescribe")]
#[command(version)]
#[command(about = "Scrape a website into AI-ready JSONL documents", long_about = None)]
struct Cli {
    /// Starting URL for crawling
    #[arg(long, value_name = "URL")]
    start_url: String,

    /// Maximum number of pages to scrape
    #[arg(long, default_value_t = 100)]
    max_pages: usize,

    /// Maximum crawling depth
    #[arg(long, default_value_t = 3)]
    max_depth: u32,

    /// Output JSONL file path
    #[arg(long, default_value = "output.jsonl")]
    output: PathBuf,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = 0.1)]
    delay: f64,

    /// Optional regex pattern to filter URLs (e.g. '/books/')
    #[arg(long)]
    url_pattern: Option<String>,

    /// Resume mode: skip URLs already in the output file
    #[arg(long)]
    resume: bool,

    /// Maximum concurrent requests in phase 2
    #[arg(long, default_value_t = 10)]
    max_concurrent: usize,

    /// Append a timestamp hash to the output filename
    #[arg(long)]
    timestamp: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = CrawlConfig {
        start_url: cli.start_url,
        max_pages: cli.max_pages,
        max_depth: cli.max_depth,
        output_path: cli.output,
        delay: cli.delay,
        url_pattern: cli.url_pattern,
        resume: cli.resume,
        max_concurrent: cli.max_concurrent,
        timestamp: cli.timestamp,
    };

    tracing::info!("Starting scrape of {}", config.start_url);
    tracing::info!(
        "Max pages: {}, Max depth: {}, Max concurrent: {}",
        config.max_pages,
        config.max_depth,
        config.max_concurrent
    );

    // Interrupt handling: stop issuing new fetches, let in-flight requests
    // finish, and still report whatever was accumulated.
    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("Scraping interrupted by user");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    }

    let report = run_pipeline(&config, shutdown).await?;

    tracing::info!("{}", "=".repeat(60));
    tracing::info!("Scraping completed!");
    tracing::info!("URLs collected: {}", report.collected);
    tracing::info!("Successful: {}", report.successful);
    tracing::info!("Failed: {}", report.failed);
    tracing::info!("Skipped: {}", report.skipped);
    tracing::info!("Total written: {}", report.total_written);
    tracing::info!("Output file: {}", report.output_path.display());
    tracing::info!("{}", "=".repeat(60));

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitescribe=info,warn"),
            1 => EnvFilter::new("sitescribe=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
