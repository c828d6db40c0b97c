//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: where the run is (fetching the start page, collecting links, processing link `i`, ...)
//! - `LinkOutcome`: what happened to each processed link

mod crawl_phase;
mod link_outcome;

// Re-export main types
pub use crawl_phase::CrawlPhase;
pub use link_outcome::LinkOutcome;
