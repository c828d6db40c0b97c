use crate::extract::collapsed_text;
use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};

/// Elements removed from every page before the main content is chosen
pub const BOILERPLATE_SELECTORS: &[&str] = &[
    "nav",
    "footer",
    "script",
    "style",
    "header",
    ".header",
    ".footer",
    ".navigation",
    ".sidebar",
    ".menu",
    ".comments",
];

/// A heuristic candidate needs strictly more visible characters than this
pub const MIN_CONTENT_LENGTH: usize = 100;

/// How the main content element was chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    /// The configured main content selector matched
    Selector,

    /// Largest `div`/`article`/`main` by visible text length
    Heuristic { text_length: usize },

    /// Whole `<body>` element
    Body,
}

/// Outer HTML of the chosen main content element
#[derive(Debug, Clone)]
pub struct ExtractedContent {
    pub html: String,
    pub source: ContentSource,
}

/// Detaches every boilerplate element from the document
///
/// Returns the number of elements removed. Nested matches are counted once
/// per match even when their ancestor was removed first.
pub fn remove_boilerplate(document: &mut Html) -> usize {
    let Ok(selector) = Selector::parse(&BOILERPLATE_SELECTORS.join(", ")) else {
        return 0;
    };

    let ids: Vec<_> = document
        .root_element()
        .select(&selector)
        .map(|element| element.id())
        .collect();

    for id in &ids {
        if let Some(mut node) = document.tree.get_mut(*id) {
            node.detach();
        }
    }

    ids.len()
}

/// Chooses the main content of an already cleaned document
///
/// Order of preference:
/// 1. First match of `main_selector`, if given
/// 2. [`heuristic_main_content`]
/// 3. The `<body>` element
///
/// # Returns
///
/// * `Ok(ExtractedContent)` - The chosen element's outer HTML
/// * `Err(MirrorError::NoContent)` - The document has no `<body>` either
pub fn extract_main_content(
    document: &Html,
    main_selector: Option<&Selector>,
    url: &str,
) -> Result<ExtractedContent, MirrorError> {
    let root = document.root_element();

    if let Some(selector) = main_selector {
        if let Some(element) = root.select(selector).next() {
            return Ok(ExtractedContent {
                html: element.html(),
                source: ContentSource::Selector,
            });
        }
        tracing::warn!(
            "Could not find main content selector match for {}. Falling back to heuristic extraction",
            url
        );
    }

    if let Some((element, text_length)) = heuristic_main_content(document) {
        tracing::info!(
            "Heuristic extraction found a main content element with {} characters for {}",
            text_length,
            url
        );
        return Ok(ExtractedContent {
            html: element.html(),
            source: ContentSource::Heuristic { text_length },
        });
    }

    tracing::warn!(
        "Heuristic extraction failed for {}. Falling back to body content",
        url
    );
    let body = Selector::parse("body")
        .ok()
        .and_then(|selector| root.select(&selector).next());

    match body {
        Some(element) => Ok(ExtractedContent {
            html: element.html(),
            source: ContentSource::Body,
        }),
        None => Err(MirrorError::NoContent {
            url: url.to_string(),
        }),
    }
}

/// Finds the `div`, `article` or `main` with the most visible text
///
/// Only elements with more than [`MIN_CONTENT_LENGTH`] characters qualify.
/// Ties go to the element that comes first in document order.
pub fn heuristic_main_content(document: &Html) -> Option<(ElementRef<'_>, usize)> {
    let selector = Selector::parse("div, article, main").ok()?;

    let mut best: Option<(ElementRef<'_>, usize)> = None;
    for element in document.root_element().select(&selector) {
        let length = visible_text_len(element);
        if length <= MIN_CONTENT_LENGTH {
            continue;
        }
        if best.map_or(true, |(_, max)| length > max) {
            best = Some((element, length));
        }
    }
    best
}

/// Number of characters in the element's whitespace-collapsed text
pub fn visible_text_len(element: ElementRef<'_>) -> usize {
    collapsed_text(element).chars().count()
}
