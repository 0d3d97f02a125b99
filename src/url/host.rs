use url::Url;

/// Returns the frontier key for a URL's host.
///
/// The key is the lowercase host, with the port appended when one is
/// explicitly present and non-default (`Url::port` already hides default
/// ports). Two URLs with the same key share one domain queue.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use rubot::url::host_key;
///
/// let url = Url::parse("https://example.com/path").unwrap();
/// assert_eq!(host_key(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(host_key(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn host_key(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host.to_string()),
    }
}
