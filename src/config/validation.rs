use crate::config::types::{Config, CrawlConfig};
use crate::url::canonicalize;
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.crawl)
}

/// Validates crawl configuration
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    let seeds = config.seeds.as_vec();
    if seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed URL is required".to_string(),
        ));
    }

    for seed in &seeds {
        canonicalize(seed).map_err(|e| ConfigError::InvalidSeed {
            seed: seed.clone(),
            reason: e.to_string(),
        })?;
    }

    if config.topic.trim().is_empty() {
        return Err(ConfigError::Validation("topic cannot be empty".to_string()));
    }

    if config.query_words.trim().is_empty() {
        return Err(ConfigError::Validation(
            "query-words cannot be empty".to_string(),
        ));
    }

    // A zero budget would stop the crawl before its first fetch; reject it
    // outright instead of guessing at an "unbounded" reading.
    if config.max_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-pages must be >= 1, got {}",
            config.max_pages
        )));
    }

    if config.max_domains < 1 {
        return Err(ConfigError::Validation(format!(
            "max-domains must be >= 1, got {}",
            config.max_domains
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
