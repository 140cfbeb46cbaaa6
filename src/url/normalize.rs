use url::Url;

/// Scheme assumed for inputs like `example.com/page`
const DEFAULT_SCHEME: &str = "https";

/// Normalizes an input URL to the domain used for API lookups
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Parse the URL; if it has no host (no scheme given), retry with `https://`
/// 3. Take the host
/// 4. Remove a leading `www.` label
///
/// If no host can be extracted, the trimmed input is returned unchanged.
/// This function never fails.
///
/// # Examples
///
/// ```
/// use spyfu_bulk::url::normalize_domain;
///
/// assert_eq!(normalize_domain("https://www.example.com/path"), "example.com");
/// assert_eq!(normalize_domain("shop.example.org"), "shop.example.org");
/// ```
pub fn normalize_domain(url_str: &str) -> String {
    let trimmed = url_str.trim();

    let host = parse_with_host(trimmed)
        .or_else(|| parse_with_host(&format!("{}://{}", DEFAULT_SCHEME, trimmed)))
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_default();

    let host = host.strip_prefix("www.").unwrap_or(&host);

    if host.is_empty() {
        trimmed.to_string()
    } else {
        host.to_string()
    }
}

/// Parses a URL, keeping it only if it carries a host
///
/// `example.com:8080` parses with `example.com` as its scheme and no host,
/// so host-less results are discarded here and retried with a scheme.
fn parse_with_host(candidate: &str) -> Option<Url> {
    Url::parse(candidate).ok().filter(|url| url.has_host())
}
