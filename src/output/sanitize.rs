//! Filename stem generation

use crate::url::last_segment;
use url::Url;

/// Stem used when neither the anchor text nor the URL yields one
pub const UNTITLED_STEM: &str = "untitled_page";

/// Reduces arbitrary text to a safe filename stem
///
/// Lower-cases, turns spaces into underscores, drops every character outside
/// `[a-z0-9_-]` and trims leading/trailing `_` and `-`. The result may be empty.
///
/// # Examples
///
/// ```
/// use markdown_mirror::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Getting Started!"), "getting_started");
/// assert_eq!(sanitize_filename("--API (v2)--"), "api_v2");
/// assert_eq!(sanitize_filename("???"), "");
/// ```
pub fn sanitize_filename(input: &str) -> String {
    let lowered = input.to_lowercase().replace(' ', "_");
    let filtered: String = lowered
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '_' || *c == '-')
        .collect();

    filtered.trim_matches(|c| c == '_' || c == '-').to_string()
}

/// Picks the filename stem for a link
///
/// Non-empty anchor text wins; otherwise the last URL path segment is used
/// with dots turned into underscores (`a.html` becomes `a_html`).
pub fn filename_stem(anchor_text: &str, url: &Url) -> String {
    let base = if anchor_text.trim().is_empty() {
        last_segment(url.path()).replace('.', "_")
    } else {
        anchor_text.to_string()
    };

    let stem = sanitize_filename(&base);
    if stem.is_empty() {
        UNTITLED_STEM.to_string()
    } else {
        stem
    }
}
