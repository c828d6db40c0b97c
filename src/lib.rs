//! Markdown Mirror: documentation section crawler
//!
//! This crate crawls one section of a documentation site. Starting from a single
//! page it discovers sibling pages through a navigation element, fetches each one,
//! strips boilerplate, and writes the main content as Markdown files that mirror
//! the site's URL structure.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Main error type for Markdown Mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Malformed URL: {0}")]
    MalformedUrl(#[from] UrlError),

    #[error("Link source element with ID or Class '{selector}' not found")]
    LinkSourceNotFound { selector: String },

    #[error("No in-scope links remain under {scope}")]
    NoInScopeLinks { scope: String },

    #[error("Failed to fetch {url} after {attempts} attempts in {elapsed:?}")]
    FetchFailed {
        url: String,
        attempts: u32,
        elapsed: Duration,
    },

    #[error("No content (selector, heuristic, or body) found for {url}")]
    NoContent { url: String },

    #[error("Link path {path} is not below base path {base}")]
    OutsideBase { path: String, base: String },

    #[error("Failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for Markdown Mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, Coordinator, CrawlOutcome};
pub use state::{CrawlPhase, LinkOutcome};
pub use crate::url::Scope;
