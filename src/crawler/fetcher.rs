//! HTTP fetcher
//!
//! One GET per popped frontier entry. Failures and non-HTML responses are
//! ordinary outcomes here, not errors; the controller skips such pages and
//! keeps crawling.

use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of fetching one page
#[derive(Debug)]
pub enum FetchOutcome {
    /// Successful fetch of an HTML body
    Html {
        /// URL after redirects; the base for resolving the page's links
        final_url: Url,
        /// Page body
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    NotHtml {
        /// The Content-Type received
        content_type: String,
    },

    /// Network or HTTP failure
    Failed {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client used for page and robots.txt fetches.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.to_string())
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome.
pub async fn fetch_page(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::Failed { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed {
            error: format!("HTTP {}", status),
        };
    }

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return FetchOutcome::NotHtml { content_type };
    }

    let final_url = response.url().clone();
    match response.text().await {
        Ok(body) => FetchOutcome::Html { final_url, body },
        Err(e) => FetchOutcome::Failed {
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client("RuBot").is_ok());
    }

    // Fetch behavior against live responses is covered by the wiremock
    // integration tests.
}
