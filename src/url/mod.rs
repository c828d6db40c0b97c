//! URL handling module for Markdown Mirror
//!
//! This module provides start-URL validation, scope derivation, fragment
//! stripping and the path helpers used to relativise link paths.

mod path;
mod scope;

pub use path::{dirname, last_segment, parent_directory, strip_fragment};
pub use scope::Scope;

use crate::UrlError;
use url::Url;

/// Parses and validates a start URL
///
/// The URL must be absolute, use the `http` or `https` scheme and carry a host.
///
/// # Examples
///
/// ```
/// use markdown_mirror::url::parse_start_url;
///
/// let url = parse_start_url("https://example.com/docs/index.html").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
/// assert!(parse_start_url("not a url").is_err());
/// ```
pub fn parse_start_url(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(format!("{}: {}", url_str, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost(url_str.to_string()));
    }

    Ok(url)
}
