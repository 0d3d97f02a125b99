//! The crawl frontier: discovered-but-not-yet-fetched links, partitioned by
//! host
//!
//! Every link in the system belongs to exactly one domain queue, selected
//! by its canonical URL's host key. The frontier owns those queues, creates
//! them lazily, and answers the controller's "which domain next" question
//! from each queue's O(1) running score.

mod domain;
mod entry;

pub use domain::{DomainQueue, DEFAULT_CRAWL_DELAY};
pub use entry::LinkEntry;

use crate::url::{canonicalize, host_key};
use crate::UrlResult;
use std::collections::HashMap;
use url::Url;

/// Global collection of per-host domain queues
#[derive(Debug, Default)]
pub struct Frontier {
    domains: HashMap<String, DomainQueue>,
    total_links_seen: u64,
    total_unique_links: u64,
}

/// Point-in-time frontier counters for reporting
#[derive(Debug, Clone)]
pub struct FrontierStats {
    /// Pending queue size per host, sorted by host
    pub queued_per_host: Vec<(String, usize)>,

    /// Every add observed, duplicates included
    pub total_links_seen: u64,

    /// Adds that were accepted into a queue
    pub total_unique_links: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a canonical URL to its host's queue, creating the queue on
    /// first sight of the host. Returns whether the link was accepted
    /// (false for duplicates).
    pub fn add(&mut self, url: &Url, score: f64, depth: u32) -> bool {
        self.total_links_seen += 1;

        let Some(key) = host_key(url) else {
            tracing::debug!("Link without host dropped: {}", url);
            return false;
        };

        let scheme = url.scheme().to_string();
        let queue = self
            .domains
            .entry(key.clone())
            .or_insert_with(|| DomainQueue::new(key, scheme));

        let accepted = queue.add_link(url, score, depth);
        if accepted {
            self.total_unique_links += 1;
        }
        accepted
    }

    /// Canonicalizes a raw URL string and adds it.
    pub fn add_raw(&mut self, raw: &str, score: f64, depth: u32) -> UrlResult<bool> {
        let url = canonicalize(raw)?;
        Ok(self.add(&url, score, depth))
    }

    /// Picks the idle, non-empty domain with the highest mean link score.
    ///
    /// Domains currently crawling and empty domains are never returned;
    /// ties break arbitrarily. None means no domain is eligible right now.
    pub fn best_available_domain(&self) -> Option<&str> {
        self.domains
            .values()
            .filter(|d| !d.is_crawling())
            .filter_map(|d| d.score().map(|score| (score, d)))
            .max_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, d)| d.host())
    }

    /// Number of domains currently eligible for activation.
    pub fn available_domain_count(&self) -> usize {
        self.domains
            .values()
            .filter(|d| !d.is_crawling() && !d.is_empty())
            .count()
    }

    pub fn get(&self, host: &str) -> Option<&DomainQueue> {
        self.domains.get(host)
    }

    pub fn get_mut(&mut self, host: &str) -> Option<&mut DomainQueue> {
        self.domains.get_mut(host)
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn total_links_seen(&self) -> u64 {
        self.total_links_seen
    }

    pub fn total_unique_links(&self) -> u64 {
        self.total_unique_links
    }

    /// Snapshot of per-host queue sizes and global counters.
    pub fn stats(&self) -> FrontierStats {
        let mut queued_per_host: Vec<(String, usize)> = self
            .domains
            .values()
            .map(|d| (d.host().to_string(), d.len()))
            .collect();
        queued_per_host.sort();

        FrontierStats {
            queued_per_host,
            total_links_seen: self.total_links_seen,
            total_unique_links: self.total_unique_links,
        }
    }
}
