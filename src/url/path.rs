//! Path helpers shared by scope derivation and output path mapping

use url::Url;

/// Returns the directory portion of a URL path
///
/// Everything up to the last `/` is kept; trailing slashes are removed unless
/// the directory is made only of slashes. A path without any `/` has an empty
/// directory.
///
/// # Examples
///
/// ```
/// use markdown_mirror::url::dirname;
///
/// assert_eq!(dirname("/docs/index.html"), "/docs");
/// assert_eq!(dirname("/docs/guide/"), "/docs/guide");
/// assert_eq!(dirname("/index.html"), "/");
/// assert_eq!(dirname("index.html"), "");
/// ```
pub fn dirname(path: &str) -> &str {
    let head = match path.rfind('/') {
        Some(idx) => &path[..=idx],
        None => "",
    };

    if head.is_empty() || head.bytes().all(|b| b == b'/') {
        head
    } else {
        head.trim_end_matches('/')
    }
}

/// Returns the parent directory of a URL path, always ending with `/`
///
/// An empty directory is treated as the root `/`.
pub fn parent_directory(path: &str) -> String {
    let dir = dirname(path);
    if dir.is_empty() {
        return "/".to_string();
    }

    if dir.ends_with('/') {
        dir.to_string()
    } else {
        format!("{}/", dir)
    }
}

/// Returns the last non-empty segment of a path, or an empty string
///
/// `/docs/` has last segment `docs`; `/` has none.
pub fn last_segment(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or("")
}

/// Returns a copy of the URL without its fragment
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirname_file() {
        assert_eq!(dirname("/docs/index.html"), "/docs");
    }

    #[test]
    fn test_dirname_trailing_slash() {
        assert_eq!(dirname("/docs/"), "/docs");
    }

    #[test]
    fn test_dirname_root() {
        assert_eq!(dirname("/"), "/");
        assert_eq!(dirname("/page"), "/");
    }

    #[test]
    fn test_dirname_multiple_slashes() {
        assert_eq!(dirname("//"), "//");
        assert_eq!(dirname("/a//b"), "/a");
    }

    #[test]
    fn test_dirname_empty() {
        assert_eq!(dirname(""), "");
        assert_eq!(dirname("page"), "");
    }

    #[test]
    fn test_parent_directory() {
        assert_eq!(parent_directory("/docs/index.html"), "/docs/");
        assert_eq!(parent_directory("/docs/guide/"), "/docs/guide/");
        assert_eq!(parent_directory("/index.html"), "/");
        assert_eq!(parent_directory(""), "/");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("/docs/"), "docs");
        assert_eq!(last_segment("/docs/guide/"), "guide");
        assert_eq!(last_segment("/docs/a.html"), "a.html");
        assert_eq!(last_segment("/"), "");
    }

    #[test]
    fn test_strip_fragment() {
        let url = Url::parse("https://ex.com/docs/b.html?x=1#sec").unwrap();
        assert_eq!(
            strip_fragment(&url).as_str(),
            "https://ex.com/docs/b.html?x=1"
        );
    }

    #[test]
    fn test_strip_fragment_without_fragment() {
        let url = Url::parse("https://ex.com/docs/a.html").unwrap();
        assert_eq!(strip_fragment(&url), url);
    }
}
