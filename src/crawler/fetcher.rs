//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - Classifying a single GET attempt
//! - Time-bounded retry with randomized backoff

use crate::config::RetrySettings;
use crate::MirrorError;
use rand::Rng;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// Backoff sleeps never go below this, whatever `min_delay` says
pub const MIN_BACKOFF_FLOOR: Duration = Duration::from_millis(100);

/// Result of a single fetch attempt
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Decoded page body
        body: String,
    },

    /// Server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Transport failure (connection refused, timeout, body read error, ...)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// A successfully fetched page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: Url,

    /// Decoded body text
    pub body: String,

    /// Number of attempts it took, including the successful one
    pub attempts: u32,
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - User-Agent header value
/// * `timeout` - Timeout applied to every request
///
/// # Example
///
/// ```no_run
/// use markdown_mirror::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("markdown-mirror/1.0", Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs one GET request and classifies the outcome
///
/// The body is decoded with the charset declared by the server, falling back
/// to UTF-8 with replacement of invalid bytes.
pub async fn fetch_once(client: &Client, url: &Url) -> FetchResult {
    match client.get(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text_with_charset("utf-8").await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: format!("Failed to read body: {}", e),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchResult::NetworkError {
                    error: "Request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchResult::NetworkError {
                    error: format!("Connection failed: {}", e),
                }
            } else {
                FetchResult::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Fetches pages with time-bounded retry
///
/// There is no attempt limit: attempts continue until `max_retry_duration`
/// has elapsed since the first one started. A fast-failing server is retried
/// many times, a slow one only once or twice.
#[derive(Debug, Clone)]
pub struct RetryingFetcher {
    client: Client,
    settings: RetrySettings,
}

impl RetryingFetcher {
    /// Creates a fetcher around an existing client
    pub fn new(client: Client, settings: RetrySettings) -> Self {
        Self { client, settings }
    }

    /// Builds a client from the user agent and settings, then wraps it
    pub fn with_user_agent(user_agent: &str, settings: RetrySettings) -> Result<Self, MirrorError> {
        let client = build_http_client(user_agent, settings.timeout)?;
        Ok(Self::new(client, settings))
    }

    /// Returns the retry settings in use
    pub fn settings(&self) -> &RetrySettings {
        &self.settings
    }

    /// Fetches `url`, retrying on any transport error or non-2xx status
    ///
    /// # Returns
    ///
    /// * `Ok(FetchedPage)` - Decoded body of the first successful attempt
    /// * `Err(MirrorError::FetchFailed)` - The retry budget ran out
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, MirrorError> {
        let started = Instant::now();
        let mut attempts = 0u32;

        loop {
            let elapsed = started.elapsed();
            if elapsed >= self.settings.max_retry_duration {
                tracing::error!(
                    "Failed to fetch {} after {:.1}s ({} attempts)",
                    url,
                    elapsed.as_secs_f64(),
                    attempts
                );
                return Err(MirrorError::FetchFailed {
                    url: url.to_string(),
                    attempts,
                    elapsed,
                });
            }

            attempts += 1;
            match fetch_once(&self.client, url).await {
                FetchResult::Success {
                    final_url,
                    status_code,
                    body,
                } => {
                    tracing::debug!(
                        "Fetched {} (status {}, final URL {}, {} bytes, attempt {})",
                        url,
                        status_code,
                        final_url,
                        body.len(),
                        attempts
                    );
                    return Ok(FetchedPage {
                        url: url.clone(),
                        body,
                        attempts,
                    });
                }
                FetchResult::HttpError { status_code } => {
                    tracing::warn!(
                        "Failed to fetch {}: HTTP {}. Retrying...",
                        url,
                        status_code
                    );
                }
                FetchResult::NetworkError { error } => {
                    tracing::warn!("Failed to fetch {}: {}. Retrying...", url, error);
                }
            }

            let delay = self.backoff_delay();
            tracing::debug!("Backing off {:?} before retrying {}", delay, url);
            tokio::time::sleep(delay).await;
        }
    }

    /// Draws a backoff delay uniformly from `[min_delay, max_delay]`
    pub fn backoff_delay(&self) -> Duration {
        backoff_delay(self.settings.min_delay, self.settings.max_delay)
    }
}

/// Draws a delay uniformly from `[min, max]`, never below [`MIN_BACKOFF_FLOOR`]
pub fn backoff_delay(min: Duration, max: Duration) -> Duration {
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    let secs = rand::thread_rng().gen_range(low.as_secs_f64()..=high.as_secs_f64());
    Duration::from_secs_f64(secs).max(MIN_BACKOFF_FLOOR)
}
