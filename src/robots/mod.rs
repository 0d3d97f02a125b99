//! Robots.txt handling module
//!
//! Fetches and parses per-site robots.txt files into the policy a domain
//! queue consults before every fetch. A site without a usable robots.txt is
//! not an error: the resolver degrades to a permissive policy and the engine
//! falls back to its default crawl delay.

mod parser;

pub use parser::RobotsRules;

use reqwest::Client;
use std::time::Duration;

/// A domain's robots policy, from the queue's point of view
///
/// `Unloaded` means resolution has not completed yet; the controller must
/// not ask allow/deny questions in that state. `Permissive` stands in for a
/// missing or unfetchable robots.txt.
#[derive(Debug, Clone)]
pub enum RobotsState {
    Unloaded,
    Permissive,
    Restricted(RobotsRules),
}

impl RobotsState {
    /// True once resolution has completed, permissively or otherwise.
    pub fn is_loaded(&self) -> bool {
        !matches!(self, RobotsState::Unloaded)
    }
}

/// Outcome of robots.txt resolution for one host
#[derive(Debug, Clone)]
pub struct ResolvedPolicy {
    /// Parsed rules, or None when the site declares none
    pub rules: Option<RobotsRules>,

    /// Declared crawl delay for our user agent, if any
    pub crawl_delay: Option<Duration>,
}

impl ResolvedPolicy {
    /// The allow-everything policy used when robots.txt is absent or
    /// unfetchable.
    pub fn permissive() -> Self {
        Self {
            rules: None,
            crawl_delay: None,
        }
    }
}

/// Fetches and parses robots.txt for a host.
///
/// Any failure along the way (connection error, non-success status,
/// unreadable body) resolves to the permissive policy; this function never
/// errors.
pub async fn resolve_robots(
    client: &Client,
    scheme: &str,
    host: &str,
    user_agent: &str,
) -> ResolvedPolicy {
    let robots_url = format!("{}://{}/robots.txt", scheme, host);
    tracing::debug!("Fetching robots.txt: {}", robots_url);

    let response = match client.get(&robots_url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!("robots.txt fetch failed for {}: {}", host, e);
            return ResolvedPolicy::permissive();
        }
    };

    if !response.status().is_success() {
        tracing::debug!(
            "No robots.txt for {} (status {}), allowing all",
            host,
            response.status()
        );
        return ResolvedPolicy::permissive();
    }

    let content = match response.text().await {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("robots.txt body unreadable for {}: {}", host, e);
            return ResolvedPolicy::permissive();
        }
    };

    let rules = RobotsRules::from_content(&content);
    let crawl_delay = rules.crawl_delay(user_agent).map(Duration::from_secs_f64);

    ResolvedPolicy {
        rules: Some(rules),
        crawl_delay,
    }
}
