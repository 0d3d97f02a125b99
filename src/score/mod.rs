//! Relevance heuristics for link prioritization and page matching
//!
//! Two cheap signals live here: a link scorer that ranks discovered hrefs
//! before anything is fetched, and the page-relevance predicate applied to
//! fetched bodies. Both are pure string checks; neither consults the
//! network.

/// Scores a discovered link's text for topical relevance, in [0, 1].
///
/// A case-insensitive substring match of the topic contributes 0.5; each
/// query term found contributes an even share of the remaining 0.5. The raw
/// href/anchor text is scored, not fetched content, so this is only a
/// prioritization hint for the frontier.
pub fn score_link(link: &str, topic: &str, terms: &[String]) -> f64 {
    let text = link.to_lowercase();
    let mut score = 0.0;

    if !topic.is_empty() && text.contains(topic) {
        score += 0.5;
    }

    if !terms.is_empty() {
        let per_term = 0.5 / terms.len() as f64;
        for term in terms {
            if text.contains(term.as_str()) {
                score += per_term;
            }
        }
    }

    score
}

/// Collapses runs of whitespace into single spaces and trims the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Checks whether a fetched page body matches the configured query string.
///
/// The query is expected to be lowercased and whitespace-collapsed already
/// (the controller prepares it once at construction); the body gets the
/// same treatment here before the substring check.
pub fn is_relevant(body: &str, query: &str) -> bool {
    if query.is_empty() {
        return false;
    }
    collapse_whitespace(&body.to_lowercase()).contains(query)
}
