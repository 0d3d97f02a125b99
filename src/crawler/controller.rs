//! Crawl controller - the orchestrator driving the whole run
//!
//! The controller seeds the frontier, bounds how many domains crawl
//! simultaneously, drives each activated domain's fetch/analyze/enqueue
//! cycle, tracks the global page budget, and decides when the run is done.
//!
//! All frontier and counter mutation happens inside `run`'s event loop.
//! Concurrency lives entirely in the `JoinSet`: outstanding fetches, robots
//! lookups and crawl-delay timers each resolve to a `CrawlEvent` the loop
//! consumes one at a time, so no locking is needed anywhere.

use crate::config::{validate_crawl_config, CrawlConfig};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::parser::{extract_links, resolve_link};
use crate::frontier::Frontier;
use crate::output::CrawlReport;
use crate::robots::{resolve_robots, ResolvedPolicy};
use crate::score::{collapse_whitespace, is_relevant, score_link};
use crate::url::canonicalize;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::time::Instant;
use tokio::task::JoinSet;
use url::Url;

/// Completion notification from one outstanding suspended operation
enum CrawlEvent {
    /// Robots resolution finished for a newly activated domain
    PolicyLoaded { host: String, policy: ResolvedPolicy },

    /// A page fetch completed (successfully or not)
    FetchDone {
        host: String,
        url: Url,
        depth: u32,
        outcome: FetchOutcome,
    },

    /// A domain's crawl delay elapsed; its loop may take the next entry
    DelayElapsed { host: String },
}

/// The focused crawler
///
/// Construct with a validated configuration, then `run` to completion. The
/// run is entirely in-memory; the returned report is the only artifact.
pub struct Crawler {
    client: Client,
    frontier: Frontier,
    seeds: Vec<Url>,
    topic: String,
    query_string: String,
    query_terms: Vec<String>,
    user_agent: String,
    max_pages: u64,
    max_domains: usize,
    pages_crawled: u64,
    in_flight: u64,
    active_domains: usize,
    relevant_pages: Vec<String>,
    started_at: DateTime<Utc>,
}

impl Crawler {
    /// Creates a crawler from a crawl configuration.
    ///
    /// Configuration problems (no seeds, a non-http(s) seed, an empty
    /// topic or query, a zero budget) are fatal here; no partial crawler
    /// is produced.
    pub fn new(config: CrawlConfig) -> crate::Result<Self> {
        validate_crawl_config(&config)?;

        let topic = config.topic.trim().to_lowercase();
        let query_string = collapse_whitespace(&config.query_words.to_lowercase());
        let query_terms = query_string.split(' ').map(str::to_string).collect();

        let seeds = config
            .seeds
            .as_vec()
            .iter()
            .map(|seed| canonicalize(seed))
            .collect::<Result<Vec<_>, _>>()?;

        let client = build_http_client(&config.user_agent)?;

        Ok(Self {
            client,
            frontier: Frontier::new(),
            seeds,
            topic,
            query_string,
            query_terms,
            user_agent: config.user_agent,
            max_pages: config.max_pages,
            max_domains: config.max_domains,
            pages_crawled: 0,
            in_flight: 0,
            active_domains: 0,
            relevant_pages: Vec::new(),
            started_at: Utc::now(),
        })
    }

    /// Runs the crawl to completion and returns the final report.
    ///
    /// The run ends when the frontier is exhausted or the page budget is
    /// spent; either way every already-issued fetch is drained before this
    /// returns.
    pub async fn run(mut self) -> crate::Result<CrawlReport> {
        let started = Instant::now();

        tracing::info!("Topic: {}", self.topic);
        tracing::info!("Query string: {}", self.query_string);
        tracing::info!(
            "Budget: {} pages, at most {} domains at once",
            self.max_pages,
            self.max_domains
        );

        // Seeding: every seed enters its domain queue at full score.
        let seeds = std::mem::take(&mut self.seeds);
        for seed in &seeds {
            tracing::info!("Seed: {}", seed);
            self.frontier.add(seed, 1.0, 0);
        }

        let mut tasks: JoinSet<CrawlEvent> = JoinSet::new();
        self.activate_domains(&mut tasks);

        while let Some(joined) = tasks.join_next().await {
            let event = match joined {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Crawl task failed: {}", e);
                    continue;
                }
            };

            match event {
                CrawlEvent::PolicyLoaded { host, policy } => {
                    if let Some(queue) = self.frontier.get_mut(&host) {
                        queue.apply_policy(policy);
                    }
                    self.crawl_step(&host, &mut tasks);
                }

                CrawlEvent::DelayElapsed { host } => {
                    self.crawl_step(&host, &mut tasks);
                }

                CrawlEvent::FetchDone {
                    host,
                    url,
                    depth,
                    outcome,
                } => {
                    self.in_flight -= 1;
                    self.pages_crawled += 1;
                    self.process_fetched_page(&url, depth, outcome);

                    if self.should_stop() {
                        tracing::info!(
                            "Page budget reached ({} crawled, {} in flight), draining",
                            self.pages_crawled,
                            self.in_flight
                        );
                        self.release_domain(&host);
                    } else if let Some(queue) = self.frontier.get(&host) {
                        // Politeness: the domain's loop resumes only after
                        // its crawl delay has elapsed in real time.
                        let delay = queue.crawl_delay();
                        tasks.spawn(async move {
                            tokio::time::sleep(delay).await;
                            CrawlEvent::DelayElapsed { host }
                        });
                    }
                }
            }

            // Whatever just happened may have freed a slot or filled a new
            // domain's queue.
            self.activate_domains(&mut tasks);
        }

        let elapsed = started.elapsed();
        tracing::info!(
            "Crawl complete: {} pages, {} relevant, {:.2?}",
            self.pages_crawled,
            self.relevant_pages.len(),
            elapsed
        );

        Ok(CrawlReport {
            started_at: self.started_at,
            elapsed,
            pages_crawled: self.pages_crawled,
            relevant_pages: self.relevant_pages,
            frontier: self.frontier.stats(),
        })
    }

    /// True once the committed fetch count covers the page budget.
    ///
    /// In-flight requests are counted so that fetches already issued can
    /// never push the total past `max_pages`.
    fn should_stop(&self) -> bool {
        self.pages_crawled + self.in_flight >= self.max_pages
    }

    /// Activates the best available domains until the concurrency cap is
    /// reached or no domain is eligible.
    ///
    /// A freshly activated domain whose robots policy is still unloaded
    /// gets a resolution task first; its crawl starts when the policy
    /// arrives.
    fn activate_domains(&mut self, tasks: &mut JoinSet<CrawlEvent>) {
        if self.should_stop() {
            return;
        }

        while self.active_domains < self.max_domains {
            let Some(host) = self.frontier.best_available_domain().map(str::to_string) else {
                break;
            };

            let (policy_loaded, scheme) = {
                let Some(queue) = self.frontier.get_mut(&host) else {
                    break;
                };
                queue.set_crawling(true);
                (queue.policy_loaded(), queue.scheme().to_string())
            };
            self.active_domains += 1;

            if policy_loaded {
                tracing::debug!("Activating domain: {}", host);
                self.crawl_step(&host, tasks);
            } else {
                tracing::debug!("Activating domain: {} (resolving robots.txt)", host);
                let client = self.client.clone();
                let user_agent = self.user_agent.clone();
                tasks.spawn(async move {
                    let policy = resolve_robots(&client, &scheme, &host, &user_agent).await;
                    CrawlEvent::PolicyLoaded { host, policy }
                });
            }
        }
    }

    /// Advances one domain's loop by a single entry.
    ///
    /// Pops pending links until one passes the robots check, then issues
    /// its fetch. Robots-denied entries are discarded without counting
    /// against the budget. An exhausted (or stopping) domain yields its
    /// slot instead.
    fn crawl_step(&mut self, host: &str, tasks: &mut JoinSet<CrawlEvent>) {
        if self.should_stop() {
            self.release_domain(host);
            return;
        }

        let user_agent = self.user_agent.clone();
        let next = {
            let Some(queue) = self.frontier.get_mut(host) else {
                tracing::warn!("Crawl step for unknown domain: {}", host);
                return;
            };

            let mut next = None;
            while let Some(entry) = queue.pop_link() {
                if queue.can_fetch(&user_agent, entry.url.path()) {
                    next = Some(entry);
                    break;
                }
                tracing::debug!("robots.txt disallows {}, dropped", entry.url);
            }
            next
        };

        match next {
            None => {
                tracing::debug!("Domain exhausted: {}", host);
                self.release_domain(host);
            }
            Some(entry) => {
                self.in_flight += 1;
                tracing::debug!(
                    "Fetching {} (score {:.2}, depth {})",
                    entry.url,
                    entry.score,
                    entry.depth
                );
                let client = self.client.clone();
                let host = host.to_string();
                tasks.spawn(async move {
                    let outcome = fetch_page(&client, &entry.url).await;
                    CrawlEvent::FetchDone {
                        host,
                        url: entry.url,
                        depth: entry.depth,
                        outcome,
                    }
                });
            }
        }
    }

    /// Returns a domain's concurrency slot, if it holds one.
    fn release_domain(&mut self, host: &str) {
        if let Some(queue) = self.frontier.get_mut(host) {
            if queue.is_crawling() {
                queue.set_crawling(false);
                self.active_domains -= 1;
            }
        }
    }

    /// Digests one completed fetch: relevance check, link extraction, and
    /// frontier growth. Every per-page failure is absorbed here.
    fn process_fetched_page(&mut self, url: &Url, depth: u32, outcome: FetchOutcome) {
        let (final_url, body) = match outcome {
            FetchOutcome::Html { final_url, body } => (final_url, body),
            FetchOutcome::NotHtml { content_type } => {
                tracing::debug!("Skipping non-HTML page {} ({})", url, content_type);
                return;
            }
            FetchOutcome::Failed { error } => {
                tracing::warn!("Fetch failed for {}: {}", url, error);
                return;
            }
        };

        if is_relevant(&body, &self.query_string) {
            tracing::info!("Relevant page: {}", url);
            self.relevant_pages.push(url.to_string());
        }

        let links = match extract_links(&body) {
            Ok(links) => links,
            Err(e) => {
                tracing::warn!("Link extraction failed for {}: {}", url, e);
                return;
            }
        };

        let found = links.len();
        let mut accepted = 0usize;
        for href in links {
            let Some(resolved) = resolve_link(&final_url, &href) else {
                continue;
            };
            let canonical = match canonicalize(resolved.as_str()) {
                Ok(canonical) => canonical,
                Err(e) => {
                    tracing::debug!("Dropping link {}: {}", resolved, e);
                    continue;
                }
            };
            // The raw href is what gets scored; the canonical form is what
            // gets queued.
            let score = score_link(&href, &self.topic, &self.query_terms);
            if self.frontier.add(&canonical, score, depth + 1) {
                accepted += 1;
            }
        }
        tracing::debug!("{}: {} links found, {} new", url, found, accepted);
    }
}
