//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with time-bounded retries
//! - Locating the link source element and collecting in-scope links
//! - Overall crawl coordination

mod coordinator;
mod fetcher;
mod links;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome};
pub use fetcher::{
    backoff_delay, build_http_client, fetch_once, FetchResult, FetchedPage, RetryingFetcher,
    MIN_BACKOFF_FLOOR,
};
pub use links::{collect_links, locate_link_source, CandidateLink, LinkSet, LinkSource};
