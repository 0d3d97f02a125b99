use crate::UrlError;
use url::Url;

/// Canonicalizes (aka normalizes) a raw URL string.
///
/// The canonical form is used as the dedup/grouping key throughout the
/// frontier, so two raw URLs that denote the same resource should come out
/// identical (best effort, not cryptographically exact).
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Reject any scheme other than `http` or `https`
/// 3. Lowercase scheme and host (done by the parser)
/// 4. Drop an explicitly-given default port (80 for http, 443 for https;
///    done by the parser)
/// 5. Drop the fragment
/// 6. Decode the `%7E` escape in the path to `~`
/// 7. Resolve `.` and `..` path segments (done by the parser); a path-less
///    host gains a trailing `/`
///
/// Canonicalizing an already-canonical URL is a no-op.
///
/// # Examples
///
/// ```
/// use rubot::url::canonicalize;
///
/// let url = canonicalize("http://www.cnn.com:80/TECH/").unwrap();
/// assert_eq!(url.as_str(), "http://www.cnn.com/TECH/");
/// ```
pub fn canonicalize(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);

    // Minimal percent-decoding of one reserved case; not general decoding.
    if url.path().contains("%7E") {
        let decoded = url.path().replace("%7E", "~");
        url.set_path(&decoded);
    }

    Ok(url)
}
