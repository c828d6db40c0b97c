//! Per-run crawl summary

use crate::state::{CrawlPhase, LinkOutcome};
use chrono::{DateTime, Utc};
use std::path::Path;

/// What happened to a single in-scope link
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRecord {
    /// Absolute link URL
    pub url: String,

    /// Anchor display text (may be empty)
    pub text: String,

    pub outcome: LinkOutcome,
}

/// Accumulated results of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    // Run metadata
    pub start_url: String,
    pub scope: Option<String>,
    pub config_hash: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub phase: CrawlPhase,

    /// Unique in-scope links collected from the link source
    pub links_found: usize,

    /// One record per processed link, in processing order
    pub records: Vec<LinkRecord>,
}

impl CrawlSummary {
    /// Creates an empty summary stamped with the current time
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            scope: None,
            config_hash: None,
            started_at: Utc::now(),
            finished_at: None,
            phase: CrawlPhase::FetchingStart,
            links_found: 0,
            records: Vec::new(),
        }
    }

    pub fn record(&mut self, url: impl Into<String>, text: impl Into<String>, outcome: LinkOutcome) {
        self.records.push(LinkRecord {
            url: url.into(),
            text: text.into(),
            outcome,
        });
    }

    /// Stamps the finish time and final phase
    pub fn finish(&mut self, phase: CrawlPhase) {
        self.phase = phase;
        self.finished_at = Some(Utc::now());
    }

    /// Number of links written to disk
    pub fn saved_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_success()).count()
    }

    /// Number of links skipped for any reason
    pub fn skipped_count(&self) -> usize {
        self.records.len() - self.saved_count()
    }

    /// Paths of every file written during the run
    pub fn saved_files(&self) -> Vec<&Path> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                LinkOutcome::Saved { path } => Some(path.as_path()),
                _ => None,
            })
            .collect()
    }

    /// Records that did not produce a file
    pub fn skipped(&self) -> impl Iterator<Item = &LinkRecord> {
        self.records.iter().filter(|r| !r.outcome.is_success())
    }

    /// Wall-clock duration, once finished
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.finished_at.map(|finished| finished - self.started_at)
    }

    /// Percentage of processed links that were saved
    pub fn success_rate(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            (self.saved_count() as f64 / self.records.len() as f64) * 100.0
        }
    }

    /// Single line suitable for the end-of-run log message
    pub fn log_line(&self) -> String {
        format!(
            "Crawl {}: {} links found, {} saved, {} skipped",
            self.phase,
            self.links_found,
            self.saved_count(),
            self.skipped_count()
        )
    }
}
