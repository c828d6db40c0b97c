//! Content extraction module
//!
//! Turns a fetched page into Markdown:
//! - Boilerplate (navigation, headers, footers, scripts, ...) is removed
//! - The main content region is chosen by selector, heuristic, or `<body>`
//! - The chosen region is converted with `html2md`

mod content;
mod markdown;

pub use content::{
    extract_main_content, heuristic_main_content, remove_boilerplate, visible_text_len,
    ContentSource, ExtractedContent, BOILERPLATE_SELECTORS, MIN_CONTENT_LENGTH,
};
pub use markdown::html_to_markdown;

use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};

/// Text of an element with all runs of whitespace collapsed to a single space
pub fn collapsed_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A page converted to Markdown
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub markdown: String,
    pub source: ContentSource,
}

/// Parses `body`, strips boilerplate, extracts the main content and converts it
///
/// The parsed document is owned by this call and dropped before it returns.
///
/// # Returns
///
/// * `Ok(RenderedPage)` - Markdown of the main content
/// * `Err(MirrorError::NoContent)` - Not even a `<body>` element was available
pub fn render_page(
    body: &str,
    main_selector: Option<&Selector>,
    url: &str,
) -> Result<RenderedPage, MirrorError> {
    let mut document = Html::parse_document(body);
    let removed = remove_boilerplate(&mut document);
    tracing::debug!("Removed {} boilerplate elements from {}", removed, url);

    let content = extract_main_content(&document, main_selector, url)?;
    Ok(RenderedPage {
        markdown: html_to_markdown(&content.html),
        source: content.source,
    })
}
