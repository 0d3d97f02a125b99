use crate::frontier::LinkEntry;
use crate::robots::{ResolvedPolicy, RobotsState};
use std::collections::{BinaryHeap, HashSet};
use std::time::Duration;
use url::Url;

/// Spacing between fetches to a host when robots.txt declares no delay.
pub const DEFAULT_CRAWL_DELAY: Duration = Duration::from_millis(500);

/// One site's pending links and crawl state
///
/// A queue is created lazily the first time a link for its host is added
/// and lives for the rest of the process. It owns the host's priority queue
/// of pending links, the set of every URL ever enqueued here (duplicates
/// are dropped, never re-scored), the robots-derived policy, and the
/// crawl-delay pacing for the host. The running score sum is maintained on
/// add/pop so the domain's selection score is an O(1) read.
#[derive(Debug)]
pub struct DomainQueue {
    host: String,
    scheme: String,
    heap: BinaryHeap<LinkEntry>,
    enqueued: HashSet<String>,
    crawling: bool,
    crawl_delay: Duration,
    policy: RobotsState,
    score_sum: f64,
    next_seq: u64,
}

impl DomainQueue {
    /// Creates an empty queue for a host. The scheme of the first URL seen
    /// for the host is kept for forming its robots.txt URL later.
    pub fn new(host: impl Into<String>, scheme: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            scheme: scheme.into(),
            heap: BinaryHeap::new(),
            enqueued: HashSet::new(),
            crawling: false,
            crawl_delay: DEFAULT_CRAWL_DELAY,
            policy: RobotsState::Unloaded,
            score_sum: 0.0,
            next_seq: 0,
        }
    }

    /// Enqueues a link unless its URL was already enqueued for this host.
    ///
    /// Returns true on acceptance. A duplicate leaves the queue, the dedup
    /// set and the score sum untouched and returns false.
    pub fn add_link(&mut self, url: &Url, score: f64, depth: u32) -> bool {
        if !self.enqueued.insert(url.as_str().to_string()) {
            tracing::trace!("Duplicate link dropped for {}: {}", self.host, url);
            return false;
        }

        let entry = LinkEntry::new(url.clone(), score, depth, self.next_seq);
        self.next_seq += 1;
        self.score_sum += score;
        self.heap.push(entry);
        true
    }

    /// Removes and returns the highest-scoring pending link.
    ///
    /// Returns None on an empty queue; callers check `is_empty` first, so a
    /// None here indicates a sequencing bug upstream.
    pub fn pop_link(&mut self) -> Option<LinkEntry> {
        let entry = self.heap.pop()?;
        self.score_sum -= entry.score;
        Some(entry)
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Mean score of the pending links, or None when the queue is empty.
    /// Empty queues are never eligible for selection.
    pub fn score(&self) -> Option<f64> {
        if self.heap.is_empty() {
            None
        } else {
            Some(self.score_sum / self.heap.len() as f64)
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// At most one fetch cycle runs per domain; the controller flips this
    /// flag when it activates the domain and when the domain yields its
    /// slot.
    pub fn is_crawling(&self) -> bool {
        self.crawling
    }

    pub fn set_crawling(&mut self, crawling: bool) {
        self.crawling = crawling;
    }

    pub fn crawl_delay(&self) -> Duration {
        self.crawl_delay
    }

    /// True once robots resolution has completed for this host.
    pub fn policy_loaded(&self) -> bool {
        self.policy.is_loaded()
    }

    /// Stores the outcome of robots resolution. A site that declares no
    /// rules gets the permissive policy; a declared crawl delay overrides
    /// the engine default.
    pub fn apply_policy(&mut self, policy: ResolvedPolicy) {
        self.policy = match policy.rules {
            Some(rules) => RobotsState::Restricted(rules),
            None => RobotsState::Permissive,
        };
        if let Some(delay) = policy.crawl_delay {
            tracing::debug!("{}: robots crawl delay {:?}", self.host, delay);
            self.crawl_delay = delay;
        }
    }

    /// Checks the robots policy for one path.
    ///
    /// # Panics
    ///
    /// Panics if called before `apply_policy`; the controller must finish
    /// robots resolution before first crawling a domain.
    pub fn can_fetch(&self, user_agent: &str, path: &str) -> bool {
        match &self.policy {
            RobotsState::Unloaded => {
                panic!("robots policy for {} queried before it was loaded", self.host)
            }
            RobotsState::Permissive => true,
            RobotsState::Restricted(rules) => rules.is_allowed(path, user_agent),
        }
    }
}
