//! HTTP fetcher
//!
//! One shared client per session. A fetch yields the page body only when
//! the response is 2xx and declares an HTML content type; everything else
//! is a page-granular error that the caller absorbs.

use crate::CrawlError;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by all fetch tasks in a session
///
/// The read timeout is the only timeout the crawler applies; redirects
/// follow the client's default policy, and the final response is what
/// gets inspected.
///
/// # Arguments
///
/// * `read_timeout_secs` - Per-request timeout in seconds
pub fn build_http_client(read_timeout_secs: u64) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(read_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Performs a GET for the given URL and returns the page body
///
/// # Arguments
///
/// * `client` - The session's HTTP client
/// * `url` - Absolute URL to fetch
///
/// # Returns
///
/// * `Ok(String)` - The decoded response body
/// * `Err(CrawlError::Fetch)` - Transport failure, DNS failure, or timeout
/// * `Err(CrawlError::BadStatus)` - Status code outside 200-299
/// * `Err(CrawlError::NotHtml)` - No `Content-Type` containing `text/html`
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    tracing::info!("fetching page [{}]", url);

    let response = client.get(url).send().await.map_err(|source| CrawlError::Fetch {
        url: url.to_string(),
        source,
    })?;

    let status = response.status().as_u16();
    if !(200..=299).contains(&status) {
        return Err(CrawlError::BadStatus {
            url: url.to_string(),
            status,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(CrawlError::NotHtml {
            url: url.to_string(),
            content_type,
        });
    }

    response.text().await.map_err(|source| CrawlError::Fetch {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_build_http_client() {
        assert!(build_http_client(3).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_html_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(
                        "<html><body>hi</body></html>".as_bytes().to_vec(),
                        "text/html; charset=utf-8",
                    ),
            )
            .mount(&server)
            .await;

        let client = build_http_client(3).unwrap();
        let body = fetch_page(&client, &format!("{}/page", server.uri()))
            .await
            .unwrap();
        assert_eq!(body, "<html><body>hi</body></html>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = build_http_client(3).unwrap();
        let result = fetch_page(&client, &format!("{}/missing", server.uri())).await;
        assert!(matches!(
            result,
            Err(CrawlError::BadStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_rejects_non_html() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("{}")
                    .insert_header("content-type", "application/json"),
            )
            .mount(&server)
            .await;

        let client = build_http_client(3).unwrap();
        let result = fetch_page(&client, &format!("{}/data", server.uri())).await;
        assert!(matches!(result, Err(CrawlError::NotHtml { .. })));
    }

    #[tokio::test]
    async fn test_fetch_rejects_missing_content_type() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/bare"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        let client = build_http_client(3).unwrap();
        let result = fetch_page(&client, &format!("{}/bare", server.uri())).await;
        assert!(matches!(result, Err(CrawlError::NotHtml { .. })));
    }

    #[tokio::test]
    async fn test_fetch_transport_error() {
        // Nothing is listening on this port
        let client = build_http_client(1).unwrap();
        let result = fetch_page(&client, "http://127.0.0.1:1/").await;
        assert!(matches!(result, Err(CrawlError::Fetch { .. })));
    }
}
