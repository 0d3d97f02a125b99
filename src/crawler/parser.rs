//! HTML link extraction
//!
//! Pulls raw anchor hrefs out of a fetched page and resolves them against
//! the page's URL. Extraction returns hrefs untouched; resolution filters
//! out everything the crawler can never fetch.

use scraper::{Html, Selector};
use url::Url;

/// Extracts the raw `href` values of every anchor on a page.
///
/// Values come back unresolved and unfiltered; the caller resolves them
/// against the fetched URL. Malformed markup is tolerated by the parser,
/// so the only error path is selector construction.
pub fn extract_links(body: &str) -> Result<Vec<String>, String> {
    let document = Html::parse_document(body);
    let selector = Selector::parse("a[href]").map_err(|e| format!("{:?}", e))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::to_string)
        .collect())
}

/// Resolves an href against the page it appeared on.
///
/// Returns None for hrefs the crawler should never follow:
/// - `javascript:`, `mailto:`, `tel:` and `data:` schemes
/// - fragment-only links (same-page anchors)
/// - anything that does not resolve to an absolute http(s) URL
pub fn resolve_link(base: &Url, href: &str) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(resolved) => {
            if resolved.scheme() == "http" || resolved.scheme() == "https" {
                Some(resolved)
            } else {
                None
            }
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://www.mbl.is/frettir/").unwrap()
    }

    #[test]
    fn test_extracts_single_link() {
        let links = extract_links(r#"<a href="http://www.mbl.is">mbl.is</a>"#).unwrap();
        assert_eq!(links, vec!["http://www.mbl.is"]);
    }

    #[test]
    fn test_extracts_multiple_links_in_order() {
        let body = r#"
            <html><body>
            <a href="/sport/golf/">golf</a>
            <p>texti</p>
            <a href="/sport/fotbolti/">fotbolti</a>
            </body></html>
        "#;
        let links = extract_links(body).unwrap();
        assert_eq!(links, vec!["/sport/golf/", "/sport/fotbolti/"]);
    }

    #[test]
    fn test_anchor_without_href_is_skipped() {
        let links = extract_links(r#"<a name="top">top</a><a href="/x">x</a>"#).unwrap();
        assert_eq!(links, vec!["/x"]);
    }

    #[test]
    fn test_tolerates_malformed_markup() {
        let links = extract_links(r#"<a href="/ok"><div><<<broken"#).unwrap();
        assert_eq!(links, vec!["/ok"]);
    }

    #[test]
    fn test_resolves_relative_href() {
        let resolved = resolve_link(&base(), "golf/2013").unwrap();
        assert_eq!(resolved.as_str(), "http://www.mbl.is/frettir/golf/2013");
    }

    #[test]
    fn test_resolves_root_relative_href() {
        let resolved = resolve_link(&base(), "/sport/golf/").unwrap();
        assert_eq!(resolved.as_str(), "http://www.mbl.is/sport/golf/");
    }

    #[test]
    fn test_keeps_absolute_http_href() {
        let resolved = resolve_link(&base(), "https://www.dv.is/ithrottir/").unwrap();
        assert_eq!(resolved.as_str(), "https://www.dv.is/ithrottir/");
    }

    #[test]
    fn test_rejects_special_schemes() {
        assert!(resolve_link(&base(), "javascript:void(0)").is_none());
        assert!(resolve_link(&base(), "mailto:fretta@mbl.is").is_none());
        assert!(resolve_link(&base(), "tel:+3545691100").is_none());
        assert!(resolve_link(&base(), "data:text/plain,hi").is_none());
    }

    #[test]
    fn test_rejects_fragment_only_href() {
        assert!(resolve_link(&base(), "#efst").is_none());
    }

    #[test]
    fn test_rejects_empty_href() {
        assert!(resolve_link(&base(), "   ").is_none());
    }

    #[test]
    fn test_rejects_non_http_resolution() {
        assert!(resolve_link(&base(), "ftp://mirror.example.com/file").is_none());
    }
}
