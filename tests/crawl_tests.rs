//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up mock HTTP servers and drive full
//! crawl runs end-to-end: seeding, robots resolution, politeness pacing,
//! budget enforcement and the final report.

use rubot::config::{CrawlConfig, Seeds};
use rubot::Crawler;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config(seeds: Vec<String>, max_pages: u64) -> CrawlConfig {
    CrawlConfig {
        seeds: Seeds::Many(seeds),
        topic: "golf".to_string(),
        query_words: "birgir leifur".to_string(),
        max_pages,
        max_domains: 5,
        user_agent: "RuBot".to_string(),
    }
}

fn html_response(body: &str) -> ResponseTemplate {
    // set_body_raw sets the content-type alongside the body. Using
    // set_body_string + insert_header does not work here: wiremock's
    // body helper forces content-type: text/plain and the later
    // insert_header for the same key is dropped, so the page would be
    // seen as non-HTML.
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/html")
}

/// Robots body that allows everything and removes pacing so tests run fast.
const FAST_ROBOTS: &str = "User-agent: *\nCrawl-delay: 0\nAllow: /";

async fn mount_robots(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_budget_of_one_issues_exactly_one_fetch() {
    let server = MockServer::start().await;
    let base = server.uri();

    // No robots.txt mock: the 404 resolves to a permissive policy.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/golf/one">one</a>
            <a href="/golf/two">two</a>
            <a href="/golf/three">three</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    // The discovered links must never be fetched.
    Mock::given(method("GET"))
        .and(path("/golf/one"))
        .respond_with(html_response("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 1)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 1);
    // The seed page's links still entered the frontier.
    assert!(report.frontier.total_unique_links >= 3);
}

#[tokio::test]
async fn test_robots_disallow_is_honored() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, "User-agent: *\nDisallow: /admin\nCrawl-delay: 0").await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/admin/secret">secret</a>
            <a href="/public">public</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/admin/secret"))
        .respond_with(html_response("<html></html>"))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/public"))
        .respond_with(html_response("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 10)).unwrap();
    let report = crawler.run().await.unwrap();

    // The seed and /public; the disallowed entry was discarded unfetched.
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_missing_robots_allows_all_at_default_delay() {
    let server = MockServer::start().await;
    let base = server.uri();

    // robots.txt is a 404 here: every path must be fetchable, paced by the
    // engine's default 500ms delay.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/a">a</a>
            <a href="/b">b</a>
            </body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_response("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_response("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 10)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 3);
    // Two crawl delays elapsed in real time between the three fetches.
    assert!(
        report.elapsed >= Duration::from_millis(900),
        "politeness delay was skipped: {:?}",
        report.elapsed
    );
}

#[tokio::test]
async fn test_relevant_page_is_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, FAST_ROBOTS).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            "<html><body><p>Kylfingurinn Birgir\n   Leifur vann um helgina.</p></body></html>",
        ))
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 5)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.relevant_pages, vec![format!("{}/", base)]);
}

#[tokio::test]
async fn test_irrelevant_page_is_not_recorded() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, FAST_ROBOTS).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            "<html><body><p>Birgir spilaði vel en hinn mætti ekki.</p></body></html>",
        ))
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 5)).unwrap();
    let report = crawler.run().await.unwrap();

    assert!(report.relevant_pages.is_empty());
}

#[tokio::test]
async fn test_budget_drains_with_many_discovered_links() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, FAST_ROBOTS).await;

    let links: String = (0..10)
        .map(|i| format!(r#"<a href="/page{}">page {}</a>"#, i, i))
        .collect();
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(&format!("<html><body>{}</body></html>", links)))
        .mount(&server)
        .await;

    for i in 0..10 {
        Mock::given(method("GET"))
            .and(path(format!("/page{}", i)))
            .respond_with(html_response("<html></html>"))
            .mount(&server)
            .await;
    }

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 2)).unwrap();
    let report = crawler.run().await.unwrap();

    // Exactly the budget, no overshoot, despite ten pending links.
    assert_eq!(report.pages_crawled, 2);
}

#[tokio::test]
async fn test_non_html_page_is_counted_but_not_analyzed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, FAST_ROBOTS).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"links": ["/nowhere"]}"#)
                .insert_header("content-type", "application/json"),
        )
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 5)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 1);
    // Only the seed was ever queued; the JSON body contributed nothing.
    assert_eq!(report.frontier.total_unique_links, 1);
    assert!(report.relevant_pages.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_does_not_abort_the_run() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_robots(&server, FAST_ROBOTS).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(
            r#"<html><body>
            <a href="/gone">gone</a>
            <a href="/alive">alive</a>
            </body></html>"#,
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/alive"))
        .respond_with(html_response("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", base)], 10)).unwrap();
    let report = crawler.run().await.unwrap();

    // The 500 counted as a crawled page and the run continued past it.
    assert_eq!(report.pages_crawled, 3);
}

#[tokio::test]
async fn test_two_domains_crawl_concurrently() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;

    for server in [&server_a, &server_b] {
        mount_robots(server, FAST_ROBOTS).await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(html_response("<html><body>efni</body></html>"))
            .expect(1)
            .mount(server)
            .await;
    }

    let crawler = Crawler::new(test_config(
        vec![format!("{}/", server_a.uri()), format!("{}/", server_b.uri())],
        10,
    ))
    .unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.frontier.queued_per_host.len(), 2);
}

#[tokio::test]
async fn test_cross_domain_links_feed_new_queues() {
    let server_a = MockServer::start().await;
    let server_b = MockServer::start().await;

    mount_robots(&server_a, FAST_ROBOTS).await;
    mount_robots(&server_b, FAST_ROBOTS).await;

    // Domain A links across to domain B.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_response(&format!(
            r#"<html><body><a href="{}/golf">yfir</a></body></html>"#,
            server_b.uri()
        )))
        .mount(&server_a)
        .await;

    Mock::given(method("GET"))
        .and(path("/golf"))
        .respond_with(html_response("<html></html>"))
        .expect(1)
        .mount(&server_b)
        .await;

    let crawler = Crawler::new(test_config(vec![format!("{}/", server_a.uri())], 10)).unwrap();
    let report = crawler.run().await.unwrap();

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.frontier.queued_per_host.len(), 2);
}
