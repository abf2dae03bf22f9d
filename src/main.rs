//! Linkmap main entry point
//!
//! This is the command-line interface for the Linkmap link graph mapper.
//! Edges go to stdout; diagnostics go to stderr.

use anyhow::Context;
use clap::Parser;
use linkmap::config::{load_config_with_hash, Config};
use linkmap::crawler::crawl;
use linkmap::url::parse_start_url;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Linkmap: a same-origin link graph mapper
///
/// Crawls every page reachable from START_URL on the same origin, honoring
/// robots.txt, X-Robots-Tag and meta robots noindex, and prints one line per
/// page: "<page>" -> {"<link>"; ...}
#[derive(Parser, Debug)]
#[command(name = "linkmap")]
#[command(version)]
#[command(about = "A same-origin link graph mapper", long_about = None)]
struct Cli {
    /// Absolute http(s) URL to start crawling from
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// Optional TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error diagnostics
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    let start_url = parse_start_url(&cli.start_url).context("invalid starting URL")?;

    tracing::info!(
        "User agent: {}, max concurrent fetches: {}",
        config.user_agent.header_value(),
        config.crawler.max_concurrent_fetches
    );

    let stats = crawl(start_url, &config).await.context("crawl failed")?;
    tracing::info!(
        "Mapped {} pages in {:.2}s",
        stats.pages_dispatched,
        stats.elapsed.as_secs_f64()
    );

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Output goes to stderr so stdout carries only edges.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("linkmap=info,warn"),
            1 => EnvFilter::new("linkmap=debug,info"),
            2 => EnvFilter::new("linkmap=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
