use crate::{UrlError, UrlResult};
use url::Url;

/// Strips the query string from a URL
///
/// Returns everything before the first `?`, or the whole string when no
/// query is present. Fragments are retained. Applied at page construction
/// so that page identity is `scheme://host/path`.
///
/// # Examples
///
/// ```
/// use kumo::url::strip_query;
///
/// assert_eq!(strip_query("https://example.com/a?b=c"), "https://example.com/a");
/// assert_eq!(strip_query("https://example.com/a"), "https://example.com/a");
/// ```
pub fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// Resolves a link found in a page against the page's own URL
///
/// A link that already parses with both a scheme and a host is returned
/// verbatim. Anything else is treated as site-relative: one leading `.`
/// and one leading `/` are stripped, and the remainder is appended to the
/// parent's `scheme://host/`. Whitespace inside the resolved value is
/// removed.
///
/// # Arguments
///
/// * `parent_url` - The absolute URL of the page the link appeared on
/// * `link` - The raw href value
///
/// # Returns
///
/// * `Ok(String)` - The absolute URL for the link
/// * `Err(UrlError)` - The parent URL did not parse or has no host
pub fn resolve_link(parent_url: &str, link: &str) -> UrlResult<String> {
    if let Ok(parsed) = Url::parse(link) {
        if parsed.has_host() {
            return Ok(remove_whitespace(link));
        }
    }

    let stripped = link.strip_prefix('.').unwrap_or(link);
    let stripped = stripped.strip_prefix('/').unwrap_or(stripped);

    let parent =
        Url::parse(parent_url).map_err(|_| UrlError::Parse(parent_url.to_string()))?;
    let host = parent
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(parent_url.to_string()))?;
    let authority = match parent.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    Ok(remove_whitespace(&format!(
        "{}://{}/{}",
        parent.scheme(),
        authority,
        stripped
    )))
}

fn remove_whitespace(value: &str) -> String {
    value.chars().filter(|c| !c.is_whitespace()).collect()
}
