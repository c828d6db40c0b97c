//! Phase definitions for a single crawl run
//!
//! A run moves `FetchingStart → CollectingLinks → ProcessingLinks(0..n) → Done`.
//! `Failed` is reachable only from `FetchingStart` and `Empty` only from
//! `CollectingLinks`.
use std::fmt;

/// Represents where a crawl run currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    // ===== Active Phases =====
    /// Fetching the start page (with retries)
    FetchingStart,

    /// Locating the link source element and collecting in-scope links
    CollectingLinks,

    /// Processing the link at this index of the link set
    ProcessingLinks(usize),

    // ===== Terminal Phases =====
    /// Every collected link has been processed
    Done,

    /// The start page could not be fetched within the retry budget
    Failed,

    /// No link source element, or no in-scope links
    Empty,
}

impl CrawlPhase {
    /// Returns true if the run has ended in this phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed | Self::Empty)
    }

    /// Returns true if moving from `self` to `next` is a legal transition
    ///
    /// Links are processed strictly in order, so `ProcessingLinks(i)` may only
    /// advance to `ProcessingLinks(i + 1)` or finish.
    pub fn can_transition_to(&self, next: &Self) -> bool {
        match (self, next) {
            (Self::FetchingStart, Self::CollectingLinks | Self::Failed) => true,
            (Self::CollectingLinks, Self::ProcessingLinks(0) | Self::Empty) => true,
            (Self::ProcessingLinks(i), Self::ProcessingLinks(j)) => *j == i + 1,
            (Self::ProcessingLinks(_), Self::Done) => true,
            _ => false,
        }
    }

    /// Returns the index of the link being processed, if any
    pub fn link_index(&self) -> Option<usize> {
        match self {
            Self::ProcessingLinks(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchingStart => write!(f, "fetching_start"),
            Self::CollectingLinks => write!(f, "collecting_links"),
            Self::ProcessingLinks(i) => write!(f, "processing_links[{}]", i),
            Self::Done => write!(f, "done"),
            Self::Failed => write!(f, "failed"),
            Self::Empty => write!(f, "empty"),
        }
    }
}
