//! Crawler module for page fetching and crawl orchestration
//!
//! This module contains the crawl controller and its collaborators:
//! - HTTP fetching and outcome classification
//! - HTML anchor extraction and link resolution
//! - The event-driven controller bounding concurrency and pacing domains

mod controller;
mod fetcher;
mod parser;

pub use controller::Crawler;
pub use fetcher::{build_http_client, fetch_page, FetchOutcome};
pub use parser::{extract_links, resolve_link};
