use crate::url::{parent_directory, parse_start_url};
use crate::UrlError;
use std::fmt;
use url::Url;

/// Canonical URL prefix defining which links belong to the crawled section
///
/// The prefix is `scheme://authority` followed by the parent directory of the
/// start URL's path. It never carries a query or fragment and always ends
/// with `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    prefix: String,
}

impl Scope {
    /// Derives the scope of an already parsed start URL
    ///
    /// # Examples
    ///
    /// ```
    /// use markdown_mirror::url::Scope;
    /// use url::Url;
    ///
    /// let start = Url::parse("https://ex.com/docs/index.html?v=2#top").unwrap();
    /// assert_eq!(Scope::from_start_url(&start).as_str(), "https://ex.com/docs/");
    /// ```
    pub fn from_start_url(start_url: &Url) -> Self {
        let mut base = start_url.clone();
        base.set_path(&parent_directory(start_url.path()));
        base.set_query(None);
        base.set_fragment(None);

        Self {
            prefix: base.to_string(),
        }
    }

    /// Parses a start URL and derives its scope
    ///
    /// # Returns
    ///
    /// * `Ok(Scope)` - The derived scope
    /// * `Err(UrlError)` - The start URL is malformed
    pub fn parse(start_url: &str) -> Result<Self, UrlError> {
        let url = parse_start_url(start_url)?;
        Ok(Self::from_start_url(&url))
    }

    /// Returns the scope prefix
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Returns true if the URL lies inside this scope (byte-wise prefix match)
    pub fn contains(&self, url: &Url) -> bool {
        url.as_str().starts_with(&self.prefix)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}
