//! Link discovery within the link source element
//!
//! This module locates the navigation element of the start page, extracts its
//! anchors, resolves them against the start URL and keeps the in-scope ones:
//! - Lookup is by exact `id`, then by class name
//! - Fragments are stripped before comparison and storage
//! - Duplicates keep their first occurrence in document order

use crate::extract::collapsed_text;
use crate::url::{strip_fragment, Scope};
use crate::MirrorError;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use url::Url;

/// A link discovered in the link source element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLink {
    /// Absolute URL with the fragment removed
    pub url: Url,

    /// Whitespace-collapsed anchor text (may be empty)
    pub text: String,

    /// The `href` attribute exactly as written in the document
    pub href: String,
}

/// Ordered set of candidate links keyed by fragment-free URL
///
/// Iteration order is insertion order; inserting a URL that is already present
/// is a no-op, so the first occurrence wins.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: Vec<CandidateLink>,
    index: HashMap<String, usize>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link unless its URL is already present
    ///
    /// Returns true if the link was added.
    pub fn insert(&mut self, link: CandidateLink) -> bool {
        let key = link.url.as_str().to_string();
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key, self.links.len());
        self.links.push(link);
        true
    }

    /// Looks up a link by its fragment-free URL
    pub fn get(&self, url: &str) -> Option<&CandidateLink> {
        self.index.get(url).map(|&idx| &self.links[idx])
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains_key(url)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CandidateLink> {
        self.links.iter()
    }

    /// Returns the URLs in order
    pub fn urls(&self) -> Vec<&str> {
        self.links.iter().map(|link| link.url.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a LinkSet {
    type Item = &'a CandidateLink;
    type IntoIter = std::slice::Iter<'a, CandidateLink>;

    fn into_iter(self) -> Self::IntoIter {
        self.links.iter()
    }
}

/// Where the link source element was found
#[derive(Debug, Clone, Copy)]
pub enum LinkSource<'a> {
    FoundById(ElementRef<'a>),
    FoundByClass(ElementRef<'a>),
    NotFound,
}

impl<'a> LinkSource<'a> {
    /// Returns the element, if one was found
    pub fn element(&self) -> Option<ElementRef<'a>> {
        match self {
            Self::FoundById(element) | Self::FoundByClass(element) => Some(*element),
            Self::NotFound => None,
        }
    }

    /// Human-readable lookup method, for logging
    pub fn found_by(&self) -> &'static str {
        match self {
            Self::FoundById(_) => "ID",
            Self::FoundByClass(_) => "Class",
            Self::NotFound => "nothing",
        }
    }
}

/// Finds the first element whose `id` equals `selector`, else the first
/// element carrying `selector` as one of its classes
pub fn locate_link_source<'a>(document: &'a Html, selector: &str) -> LinkSource<'a> {
    let root = document.root_element();

    let by_id = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().id() == Some(selector));
    if let Some(element) = by_id {
        return LinkSource::FoundById(element);
    }

    let by_class = root
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|element| element.value().classes().any(|class| class == selector));
    match by_class {
        Some(element) => LinkSource::FoundByClass(element),
        None => LinkSource::NotFound,
    }
}

/// Collects the in-scope links of the link source element
///
/// # Arguments
///
/// * `document` - The parsed start page
/// * `selector` - ID or class name of the link source element
/// * `base_url` - URL the start page was fetched from, used to resolve hrefs
/// * `scope` - Prefix every kept link must start with
///
/// # Returns
///
/// * `Ok(LinkSet)` - At least one in-scope link, in document order
/// * `Err(MirrorError::LinkSourceNotFound)` - No element matched by id or class
/// * `Err(MirrorError::NoInScopeLinks)` - The element had no usable links
///
/// # Example
///
/// ```
/// use markdown_mirror::crawler::collect_links;
/// use markdown_mirror::url::Scope;
/// use scraper::Html;
/// use url::Url;
///
/// let html = r#"<div id="nav"><a href="a.html">A</a><a href="/x.html">X</a></div>"#;
/// let document = Html::parse_document(html);
/// let base = Url::parse("https://ex.com/docs/index.html").unwrap();
/// let links = collect_links(&document, "nav", &base, &Scope::from_start_url(&base)).unwrap();
/// assert_eq!(links.urls(), vec!["https://ex.com/docs/a.html"]);
/// ```
pub fn collect_links(
    document: &Html,
    selector: &str,
    base_url: &Url,
    scope: &Scope,
) -> Result<LinkSet, MirrorError> {
    let source = locate_link_source(document, selector);
    let element = source
        .element()
        .ok_or_else(|| MirrorError::LinkSourceNotFound {
            selector: selector.to_string(),
        })?;
    tracing::info!(
        "Found link source element by {}: '{}'",
        source.found_by(),
        selector
    );

    let anchors = extract_anchors(element);
    tracing::info!(
        "Found {} potential links in the link source element",
        anchors.len()
    );
    tracing::info!("Filtering links to match parent directory: {}", scope);

    let mut links = LinkSet::new();
    for (href, text) in anchors {
        let resolved = match base_url.join(&href) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!("Skipping unresolvable href '{}': {}", href, e);
                continue;
            }
        };

        let url = strip_fragment(&resolved);
        if !scope.contains(&url) {
            tracing::debug!("Skipping out-of-scope link: {}", url);
            continue;
        }

        links.insert(CandidateLink { url, text, href });
    }

    if links.is_empty() {
        return Err(MirrorError::NoInScopeLinks {
            scope: scope.to_string(),
        });
    }

    tracing::info!(
        "Found {} unique links matching the parent directory (fragments removed)",
        links.len()
    );
    Ok(links)
}

/// Returns `(href, text)` for every anchor with a non-blank href, in document order
fn extract_anchors(element: ElementRef<'_>) -> Vec<(String, String)> {
    let Ok(anchor_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    element
        .select(&anchor_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            // Blank hrefs count as missing rather than resolving to the start page
            if href.trim().is_empty() {
                return None;
            }
            Some((href.to_string(), collapsed_text(anchor)))
        })
        .collect()
}
