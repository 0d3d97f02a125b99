//! End-of-run reporting
//!
//! The controller hands over one read-only snapshot when the crawl
//! finishes; everything here just formats it.

use crate::frontier::FrontierStats;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Final snapshot of a completed crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Wall-clock time the run started
    pub started_at: DateTime<Utc>,

    /// Total run duration, drain included
    pub elapsed: Duration,

    /// Fetches completed (successful or not)
    pub pages_crawled: u64,

    /// URLs whose content matched the query string, in discovery order
    pub relevant_pages: Vec<String>,

    /// Frontier counters at completion
    pub frontier: FrontierStats,
}

/// Prints the report to stdout.
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");
    println!(
        "Started:       {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Elapsed:       {:.2?}", report.elapsed);
    println!("Pages crawled: {}", report.pages_crawled);
    println!();

    println!("Frontier statistics");
    println!("-----------------------------------------");
    for (host, queued) in &report.frontier.queued_per_host {
        println!("  {}: {}", host, queued);
    }
    println!("  Links seen:   {}", report.frontier.total_links_seen);
    println!("  Links queued: {}", report.frontier.total_unique_links);
    println!();

    println!("Relevant pages ({})", report.relevant_pages.len());
    println!("-----------------------------------------");
    for url in &report.relevant_pages {
        println!("  {}", url);
    }
}
