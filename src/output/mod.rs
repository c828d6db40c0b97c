//! Output module
//!
//! This module handles:
//! - Mapping link URLs onto the output directory tree
//! - Generating safe, unique Markdown filenames
//! - Writing page Markdown without overwriting existing files
//! - The per-run crawl summary and its Markdown report

mod markdown;
mod path;
mod sanitize;
mod summary;
mod writer;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use path::{unique_name, PathMapper};
pub use sanitize::{filename_stem, sanitize_filename, UNTITLED_STEM};
pub use summary::{CrawlSummary, LinkRecord};
pub use writer::write_markdown;
