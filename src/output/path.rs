//! Mapping link URLs onto the output directory tree

use crate::output::sanitize::filename_stem;
use crate::url::{last_segment, parent_directory};
use crate::MirrorError;
use std::path::{Path, PathBuf};
use url::Url;

/// Mirrors the start page's directory structure under the output directory
///
/// For a start URL `https://ex.com/docs/index.html` and output directory
/// `out`, the base path is `/docs/` and pages land under `out/docs/`. A link
/// to `/docs/guide/intro.html` goes into `out/docs/guide/`.
#[derive(Debug, Clone)]
pub struct PathMapper {
    output_dir: PathBuf,
    base_path: String,
    root_name: String,
}

impl PathMapper {
    pub fn new(start_url: &Url, output_dir: impl Into<PathBuf>) -> Self {
        let base_path = parent_directory(start_url.path());
        let root_name = last_segment(&base_path).to_string();

        Self {
            output_dir: output_dir.into(),
            base_path,
            root_name,
        }
    }

    /// Directory path of the start page, always ending in `/`
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// `output_dir` joined with the base path's last segment, if any
    pub fn output_root(&self) -> PathBuf {
        if self.root_name.is_empty() {
            self.output_dir.clone()
        } else {
            self.output_dir.join(&self.root_name)
        }
    }

    /// Directory a link's Markdown file belongs in
    ///
    /// The link path relative to the base path, minus its leaf, is appended to
    /// [`output_root`](Self::output_root). A trailing slash does not count as
    /// a leaf, so `/docs/guide/` maps to the root just like `/docs/guide`.
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Target directory (not created)
    /// * `Err(MirrorError::OutsideBase)` - The link path is not under the base path
    pub fn target_dir(&self, link_url: &Url) -> Result<PathBuf, MirrorError> {
        let relative = link_url
            .path()
            .strip_prefix(&self.base_path)
            .ok_or_else(|| MirrorError::OutsideBase {
                path: link_url.path().to_string(),
                base: self.base_path.clone(),
            })?;

        let relative = relative.trim_end_matches('/');
        let directory = relative.rsplit_once('/').map_or("", |(dir, _)| dir);

        let mut target = self.output_root();
        for segment in directory.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                continue;
            }
            target.push(segment);
        }
        Ok(target)
    }

    /// Full path of a fresh Markdown file for a link
    ///
    /// Creates the target directory and picks a name that does not exist yet.
    pub fn resolve_path(&self, link_url: &Url, anchor_text: &str) -> Result<PathBuf, MirrorError> {
        let dir = self.target_dir(link_url)?;
        std::fs::create_dir_all(&dir).map_err(|source| MirrorError::FileWrite {
            path: dir.clone(),
            source,
        })?;

        let stem = filename_stem(anchor_text, link_url);
        Ok(unique_name(&dir, &stem))
    }
}

/// First of `stem.md`, `stem_1.md`, `stem_2.md`, ... that does not exist in `dir`
pub fn unique_name(dir: &Path, stem: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{}.md", stem));
    let mut counter = 1u32;

    while candidate.exists() {
        candidate = dir.join(format!("{}_{}.md", stem, counter));
        counter += 1;
    }

    candidate
}
