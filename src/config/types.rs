use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default directory the Markdown tree is written under
pub const DEFAULT_OUTPUT_DIR: &str = "output_markdowns";

/// Fully resolved configuration for one crawl
///
/// Built from the positional CLI arguments plus an optional [`FileConfig`]
/// with individual CLI flags layered on top.
#[derive(Debug, Clone)]
pub struct Config {
    /// The page the crawl starts from
    pub start_url: String,

    /// ID or class name of the element holding the navigation links
    pub link_source_selector: String,

    pub crawl: CrawlSettings,
    pub output: OutputSettings,
}

impl Config {
    /// Creates a configuration with default crawl and output settings
    pub fn new(start_url: impl Into<String>, link_source_selector: impl Into<String>) -> Self {
        Self::from_file_config(start_url, link_source_selector, FileConfig::default())
    }

    /// Creates a configuration from the values loaded out of a config file
    pub fn from_file_config(
        start_url: impl Into<String>,
        link_source_selector: impl Into<String>,
        file: FileConfig,
    ) -> Self {
        Self {
            start_url: start_url.into(),
            link_source_selector: link_source_selector.into(),
            crawl: file.crawl,
            output: file.output,
        }
    }

    /// Converts the second-based timing settings into durations for the fetcher
    pub fn retry_settings(&self) -> RetrySettings {
        RetrySettings {
            timeout: Duration::from_secs_f64(self.crawl.timeout),
            min_delay: Duration::from_secs_f64(self.crawl.min_delay),
            max_delay: Duration::from_secs_f64(self.crawl.max_delay),
            max_retry_duration: Duration::from_secs_f64(self.crawl.max_retry_duration),
        }
    }
}

/// Contents of an optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub crawl: CrawlSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Fetching and extraction behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlSettings {
    /// Timeout for a single HTTP request (seconds)
    pub timeout: f64,

    /// Lower bound of the random backoff between attempts (seconds)
    #[serde(rename = "min-delay")]
    pub min_delay: f64,

    /// Upper bound of the random backoff between attempts (seconds)
    #[serde(rename = "max-delay")]
    pub max_delay: f64,

    /// Time budget for fetching one URL, retries included (seconds)
    #[serde(rename = "max-retry-duration")]
    pub max_retry_duration: f64,

    /// CSS selector of the main content area on each linked page
    #[serde(rename = "main-content-selector")]
    pub main_content_selector: Option<String>,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            timeout: 10.0,
            min_delay: 1.0,
            max_delay: 5.0,
            max_retry_duration: 15.0,
            main_content_selector: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Where results are written
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Root directory of the Markdown tree
    #[serde(rename = "output-dir")]
    pub output_dir: PathBuf,

    /// Optional path of a Markdown run report
    #[serde(rename = "summary-path")]
    pub summary_path: Option<PathBuf>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            summary_path: None,
        }
    }
}

/// Timing parameters of the retrying fetcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetrySettings {
    pub timeout: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_retry_duration: Duration,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            min_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(5),
            max_retry_duration: Duration::from_secs(15),
        }
    }
}

fn default_user_agent() -> String {
    format!("markdown-mirror/{}", env!("CARGO_PKG_VERSION"))
}
