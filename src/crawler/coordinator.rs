//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives a single run through its phases:
//! - Fetching the start page (with retries)
//! - Collecting in-scope links from the link source element
//! - Fetching, extracting and saving each link in order
//! - Producing the run summary
//!
//! Only start-page failures and configuration errors end a run early. Every
//! per-link failure is logged, recorded in the summary, and skipped.

use crate::config::{validate, Config};
use crate::crawler::fetcher::RetryingFetcher;
use crate::crawler::links::{collect_links, CandidateLink, LinkSet};
use crate::extract::render_page;
use crate::output::{generate_markdown_summary, write_markdown, CrawlSummary, PathMapper};
use crate::state::{CrawlPhase, LinkOutcome};
use crate::url::{parse_start_url, Scope};
use crate::{ConfigError, MirrorError};
use scraper::{Html, Selector};
use url::Url;

/// How a run ended
#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    /// Every collected link was processed (some may have been skipped)
    Completed(CrawlSummary),

    /// The start page could not be fetched within the retry budget
    StartPageFailed(CrawlSummary),

    /// No element matched the link source selector by ID or class
    NoLinkSource(CrawlSummary),

    /// The link source held no links under the scope
    NoInScopeLinks(CrawlSummary),
}

impl CrawlOutcome {
    pub fn summary(&self) -> &CrawlSummary {
        match self {
            Self::Completed(summary)
            | Self::StartPageFailed(summary)
            | Self::NoLinkSource(summary)
            | Self::NoInScopeLinks(summary) => summary,
        }
    }

    pub fn into_summary(self) -> CrawlSummary {
        match self {
            Self::Completed(summary)
            | Self::StartPageFailed(summary)
            | Self::NoLinkSource(summary)
            | Self::NoInScopeLinks(summary) => summary,
        }
    }

    /// Returns true if the run reached the link processing loop and finished it
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: Config,
    fetcher: RetryingFetcher,
    start_url: Url,
    scope: Scope,
    paths: PathMapper,
    main_selector: Option<Selector>,
    phase: CrawlPhase,
    summary: CrawlSummary,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The resolved configuration; it is validated here
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to [`run`](Self::run)
    /// * `Err(MirrorError)` - Invalid configuration, malformed start URL, or
    ///   the HTTP client could not be built
    pub fn new(config: Config) -> Result<Self, MirrorError> {
        validate(&config)?;

        let start_url = parse_start_url(&config.start_url)?;
        let scope = Scope::from_start_url(&start_url);
        let paths = PathMapper::new(&start_url, config.output.output_dir.clone());

        let main_selector = match &config.crawl.main_content_selector {
            Some(selector) => Some(Selector::parse(selector).map_err(|e| {
                ConfigError::InvalidSelector {
                    selector: selector.clone(),
                    message: format!("{:?}", e),
                }
            })?),
            None => None,
        };

        let fetcher =
            RetryingFetcher::with_user_agent(&config.crawl.user_agent, config.retry_settings())?;

        let mut summary = CrawlSummary::new(start_url.as_str());
        summary.scope = Some(scope.to_string());

        Ok(Self {
            config,
            fetcher,
            start_url,
            scope,
            paths,
            main_selector,
            phase: CrawlPhase::FetchingStart,
            summary,
        })
    }

    /// Attaches the config file hash to the run summary
    pub fn with_config_hash(mut self, hash: impl Into<String>) -> Self {
        self.summary.config_hash = Some(hash.into());
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn summary(&self) -> &CrawlSummary {
        &self.summary
    }

    /// Moves to `next`, rejecting transitions the phase machine does not allow
    fn advance(&mut self, next: CrawlPhase) -> Result<(), MirrorError> {
        if !self.phase.can_transition_to(&next) {
            return Err(MirrorError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::debug!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Runs the crawl to completion
    ///
    /// Link-level problems never surface as `Err`; they are recorded as
    /// [`LinkOutcome`]s in the summary. `Err` is reserved for invariant
    /// violations and failing to create the output directory. A report that
    /// cannot be written is only logged.
    pub async fn run(&mut self) -> Result<CrawlOutcome, MirrorError> {
        tracing::info!("Fetching starting page: {}", self.start_url);

        let start_page = match self.fetcher.fetch(&self.start_url).await {
            Ok(page) => page,
            Err(e @ MirrorError::FetchFailed { .. }) => {
                tracing::error!("Failed to fetch starting page: {}", e);
                self.advance(CrawlPhase::Failed)?;
                return self.finish(CrawlOutcome::StartPageFailed);
            }
            Err(e) => return Err(e),
        };

        self.advance(CrawlPhase::CollectingLinks)?;
        let links = match self.collect(&start_page.body) {
            Ok(links) => links,
            Err(e @ MirrorError::LinkSourceNotFound { .. }) => {
                tracing::error!("{} on {}", e, self.start_url);
                self.advance(CrawlPhase::Empty)?;
                return self.finish(CrawlOutcome::NoLinkSource);
            }
            Err(e @ MirrorError::NoInScopeLinks { .. }) => {
                tracing::warn!("{}. Skipping further processing", e);
                self.advance(CrawlPhase::Empty)?;
                return self.finish(CrawlOutcome::NoInScopeLinks);
            }
            Err(e) => return Err(e),
        };
        self.summary.links_found = links.len();

        let output_dir = &self.config.output.output_dir;
        std::fs::create_dir_all(output_dir).map_err(|source| MirrorError::FileWrite {
            path: output_dir.clone(),
            source,
        })?;

        let total = links.len();
        for (index, link) in links.iter().enumerate() {
            self.advance(CrawlPhase::ProcessingLinks(index))?;
            tracing::info!("Fetching linked page ({}/{}): {}", index + 1, total, link.url);

            let outcome = self.process_link(link).await;
            self.summary.record(link.url.as_str(), link.text.as_str(), outcome);
        }

        self.advance(CrawlPhase::Done)?;
        self.finish(CrawlOutcome::Completed)
    }

    /// Parses the start page and collects its in-scope links
    ///
    /// Kept synchronous so the parsed document never lives across an await.
    fn collect(&self, body: &str) -> Result<LinkSet, MirrorError> {
        let document = Html::parse_document(body);
        collect_links(
            &document,
            &self.config.link_source_selector,
            &self.start_url,
            &self.scope,
        )
    }

    /// Fetches, converts and saves one link, mapping every failure to an outcome
    async fn process_link(&self, link: &CandidateLink) -> LinkOutcome {
        let page = match self.fetcher.fetch(&link.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Skipping {}: {}", link.url, e);
                return LinkOutcome::FetchFailed;
            }
        };

        let rendered = match render_page(&page.body, self.main_selector.as_ref(), link.url.as_str()) {
            Ok(rendered) => rendered,
            Err(e) => {
                tracing::warn!("{}. Skipping", e);
                return LinkOutcome::NoContent;
            }
        };

        let path = match self.paths.resolve_path(&link.url, &link.text) {
            Ok(path) => path,
            Err(e @ MirrorError::OutsideBase { .. }) => {
                tracing::warn!("{}. Skipping", e);
                return LinkOutcome::OutsideBase;
            }
            Err(e) => {
                tracing::error!("Error preparing output for {}: {}", link.url, e);
                return LinkOutcome::WriteFailed {
                    error: e.to_string(),
                };
            }
        };

        match write_markdown(&path, &rendered.markdown) {
            Ok(()) => {
                tracing::info!("Successfully saved {}", path.display());
                LinkOutcome::Saved { path }
            }
            Err(e) => {
                tracing::error!("Error saving file: {}", e);
                LinkOutcome::WriteFailed {
                    error: e.to_string(),
                }
            }
        }
    }

    /// Stamps the summary, writes the optional report and wraps the outcome
    ///
    /// A report that cannot be written is logged; the outcome still stands.
    fn finish(
        &mut self,
        outcome: fn(CrawlSummary) -> CrawlOutcome,
    ) -> Result<CrawlOutcome, MirrorError> {
        self.summary.finish(self.phase);
        tracing::info!("{}", self.summary.log_line());

        if let Some(summary_path) = &self.config.output.summary_path {
            match generate_markdown_summary(&self.summary, summary_path) {
                Ok(()) => tracing::info!("Summary written to {}", summary_path.display()),
                Err(e) => tracing::error!("Error saving summary report: {}", e),
            }
        }

        Ok(outcome(self.summary.clone()))
    }
}

/// Runs a complete crawl for `config`
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - The run finished, possibly without saving anything
/// * `Err(MirrorError)` - The configuration was rejected or the output
///   directory could not be created
pub async fn run_crawl(config: Config) -> Result<CrawlOutcome, MirrorError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
