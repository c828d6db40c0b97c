use crate::config::types::{Config, CrawlSettings, OutputSettings};
use crate::url::parse_start_url;
use crate::ConfigError;
use scraper::Selector;
use std::time::Duration;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_start_url(&config.start_url)?;
    validate_link_source_selector(&config.link_source_selector)?;
    validate_crawl_settings(&config.crawl)?;
    validate_output_settings(&config.output)?;
    Ok(())
}

fn validate_start_url(start_url: &str) -> Result<(), ConfigError> {
    parse_start_url(start_url)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidUrl(e.to_string()))
}

/// The link source is matched by exact id or class name, never as CSS
fn validate_link_source_selector(selector: &str) -> Result<(), ConfigError> {
    if selector.trim().is_empty() {
        return Err(ConfigError::Validation(
            "link_source_selector cannot be empty".to_string(),
        ));
    }

    if selector.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "link_source_selector must be a single ID or class name, got '{}'",
            selector
        )));
    }

    Ok(())
}

/// Validates fetch timing and the main content selector
fn validate_crawl_settings(settings: &CrawlSettings) -> Result<(), ConfigError> {
    if !settings.timeout.is_finite() || settings.timeout <= 0.0 {
        return Err(ConfigError::Validation(format!(
            "timeout must be > 0 seconds, got {}",
            settings.timeout
        )));
    }

    for (name, value) in [
        ("min_delay", settings.min_delay),
        ("max_delay", settings.max_delay),
        ("max_retry_duration", settings.max_retry_duration),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigError::Validation(format!(
                "{} must be a non-negative number of seconds, got {}",
                name, value
            )));
        }
    }

    // Values must also fit in a Duration once converted for the fetcher
    for (name, value) in [
        ("timeout", settings.timeout),
        ("min_delay", settings.min_delay),
        ("max_delay", settings.max_delay),
        ("max_retry_duration", settings.max_retry_duration),
    ] {
        if Duration::try_from_secs_f64(value).is_err() {
            return Err(ConfigError::Validation(format!(
                "{} is too large to be a duration: {} seconds",
                name, value
            )));
        }
    }

    if settings.min_delay > settings.max_delay {
        return Err(ConfigError::Validation(format!(
            "min_delay ({}) must not exceed max_delay ({})",
            settings.min_delay, settings.max_delay
        )));
    }

    if let Some(selector) = &settings.main_content_selector {
        Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
            selector: selector.clone(),
            message: format!("{:?}", e),
        })?;
    }

    if settings.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_settings(settings: &OutputSettings) -> Result<(), ConfigError> {
    if settings.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output_dir cannot be empty".to_string(),
        ));
    }

    if let Some(summary_path) = &settings.summary_path {
        if summary_path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "summary_path cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}
