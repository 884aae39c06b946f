use crate::{UrlError, UrlResult};
use url::Url;

/// Extracts the host of a URL
///
/// Returns the authority the page will be routed by: the host name, plus
/// `:port` when the URL carries a non-default port. Politeness is enforced
/// per distinct value of this string, so `127.0.0.1:7001` and
/// `127.0.0.1:7002` count as separate hosts.
///
/// # Arguments
///
/// * `url` - The absolute URL to extract the host from
///
/// # Returns
///
/// * `Ok(String)` - The host (with port if present)
/// * `Err(UrlError)` - The URL did not parse or has no host component
///
/// # Examples
///
/// ```
/// use kumo::url::host_of;
///
/// assert_eq!(host_of("https://www.example.com/path").unwrap(), "www.example.com");
/// assert_eq!(host_of("http://localhost:8080/").unwrap(), "localhost:8080");
/// assert!(host_of("/about").is_err());
/// ```
pub fn host_of(url: &str) -> UrlResult<String> {
    let parsed = Url::parse(url).map_err(|_| UrlError::Parse(url.to_string()))?;

    let host = parsed
        .host_str()
        .ok_or_else(|| UrlError::MissingHost(url.to_string()))?;

    Ok(match parsed.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_of_standard() {
        assert_eq!(host_of("https://www.google.com").unwrap(), "www.google.com");
    }

    #[test]
    fn test_host_of_subdomain() {
        assert_eq!(
            host_of("https://images.google.com").unwrap(),
            "images.google.com"
        );
    }

    #[test]
    fn test_host_of_keeps_port() {
        assert_eq!(host_of("http://127.0.0.1:7001/a").unwrap(), "127.0.0.1:7001");
    }

    #[test]
    fn test_host_of_default_port_omitted() {
        assert_eq!(host_of("https://example.com:443/").unwrap(), "example.com");
    }

    #[test]
    fn test_host_of_ignores_path_and_query() {
        assert_eq!(
            host_of("https://example.com/path/to/page?q=1").unwrap(),
            "example.com"
        );
    }

    #[test]
    fn test_host_of_incomplete_url() {
        assert!(matches!(host_of("/about"), Err(UrlError::Parse(_))));
    }

    #[test]
    fn test_host_of_empty_url() {
        assert!(host_of("").is_err());
    }

    #[test]
    fn test_host_of_missing_host() {
        assert!(matches!(
            host_of("mailto:someone@example.com"),
            Err(UrlError::MissingHost(_))
        ));
    }
}
