//! Configuration module for Markdown Mirror
//!
//! Crawl settings come from three layers: built-in defaults, an optional TOML
//! file, and command-line flags. This module handles loading the file,
//! merging it into a [`Config`], and validating the result.
//!
//! # Example
//!
//! ```no_run
//! use markdown_mirror::config::{load_config, validate, Config};
//! use std::path::Path;
//!
//! let file = load_config(Path::new("mirror.toml")).unwrap();
//! let config = Config::from_file_config("https://ex.com/docs/index.html", "nav", file);
//! validate(&config).unwrap();
//! println!("Retry budget: {}s", config.crawl.max_retry_duration);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, CrawlSettings, FileConfig, OutputSettings, RetrySettings, DEFAULT_OUTPUT_DIR,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
