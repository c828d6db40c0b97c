//! Markdown Mirror main entry point
//!
//! This is the command-line interface for the Markdown Mirror documentation crawler.

use anyhow::Context;
use clap::Parser;
use markdown_mirror::config::{load_config_with_hash, validate, Config, FileConfig};
use markdown_mirror::crawler::Coordinator;
use markdown_mirror::CrawlOutcome;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Exit status used by `--strict` when the run produced nothing to process
const EXIT_NOTHING_CRAWLED: i32 = 2;

/// Markdown Mirror: documentation section crawler
///
/// Fetches a start page, follows every link in its navigation element that
/// stays under the start page's directory, and saves each page's main content
/// as Markdown in a directory tree mirroring the site's URL paths.
#[derive(Parser, Debug)]
#[command(name = "markdown-mirror")]
#[command(version)]
#[command(about = "Mirror a documentation section as Markdown files", long_about = None)]
struct Cli {
    /// The URL of the starting page
    #[arg(value_name = "START_URL")]
    start_url: String,

    /// ID or class name of the element containing the navigation links
    #[arg(value_name = "LINK_SOURCE_SELECTOR")]
    link_source_selector: String,

    /// CSS selector for the main content area of each linked page
    #[arg(long, value_name = "SEL")]
    main_content_selector: Option<String>,

    /// Directory to save the Markdown files [default: output_markdowns]
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Timeout for each HTTP request in seconds [default: 10]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Minimum delay between retries in seconds [default: 1.0]
    #[arg(long, value_name = "SECONDS")]
    min_delay: Option<f64>,

    /// Maximum delay between retries in seconds [default: 5.0]
    #[arg(long, value_name = "SECONDS")]
    max_delay: Option<f64>,

    /// Time budget for fetching one URL, retries included, in seconds [default: 15]
    #[arg(long, value_name = "SECONDS")]
    max_retry_duration: Option<f64>,

    /// Path to an optional TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write a Markdown report of the run to this file
    #[arg(long, value_name = "FILE")]
    summary_path: Option<PathBuf>,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Exit with status 2 if the start page fails or no links are found
    #[arg(long)]
    strict: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Cli {
    /// Layers the command-line flags over the file (or default) settings
    fn into_config(self, file: FileConfig) -> Config {
        let mut config = Config::from_file_config(self.start_url, self.link_source_selector, file);

        if let Some(selector) = self.main_content_selector {
            config.crawl.main_content_selector = Some(selector);
        }
        if let Some(timeout) = self.timeout {
            config.crawl.timeout = timeout;
        }
        if let Some(min_delay) = self.min_delay {
            config.crawl.min_delay = min_delay;
        }
        if let Some(max_delay) = self.max_delay {
            config.crawl.max_delay = max_delay;
        }
        if let Some(max_retry_duration) = self.max_retry_duration {
            config.crawl.max_retry_duration = max_retry_duration;
        }
        if let Some(user_agent) = self.user_agent {
            config.crawl.user_agent = user_agent;
        }
        if let Some(output_dir) = self.output_dir {
            config.output.output_dir = output_dir;
        }
        if let Some(summary_path) = self.summary_path {
            config.output.summary_path = Some(summary_path);
        }

        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let (file_config, config_hash) = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (file, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            (file, Some(hash))
        }
        None => (FileConfig::default(), None),
    };

    let strict = cli.strict;
    let config = cli.into_config(file_config);
    validate(&config).context("Invalid configuration")?;

    tracing::info!(
        "Output directory: {}, timeout: {}s, retry budget: {}s, backoff: {}-{}s",
        config.output.output_dir.display(),
        config.crawl.timeout,
        config.crawl.max_retry_duration,
        config.crawl.min_delay,
        config.crawl.max_delay
    );

    let mut coordinator = Coordinator::new(config)?;
    if let Some(hash) = config_hash {
        coordinator = coordinator.with_config_hash(hash);
    }

    let outcome = match coordinator.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            return Err(e.into());
        }
    };

    match &outcome {
        CrawlOutcome::Completed(summary) => {
            tracing::info!(
                "Crawl completed: {} of {} links saved",
                summary.saved_count(),
                summary.links_found
            );
        }
        CrawlOutcome::StartPageFailed(_)
        | CrawlOutcome::NoLinkSource(_)
        | CrawlOutcome::NoInScopeLinks(_) => {
            if strict {
                tracing::error!("Nothing was crawled (phase: {})", outcome.summary().phase);
                std::process::exit(EXIT_NOTHING_CRAWLED);
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("markdown_mirror=info,warn"),
            1 => EnvFilter::new("markdown_mirror=debug,info"),
            2 => EnvFilter::new("markdown_mirror=trace,debug"),
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
