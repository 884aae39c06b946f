//! Link extraction: turns a fetched HTML body into child pages
//!
//! Anchors are walked in document order, so a page's children preserve
//! the order links appear in the HTML. Candidate links are validated
//! before a child page is constructed; an invalid link is skipped, never
//! an error for the page.

use crate::config::Config;
use crate::crawler::page::Page;
use crate::url::resolve_link;
use crate::CrawlError;
use scraper::{Html, Selector};
use std::sync::Arc;

/// Extracts the child pages of a fetched page
///
/// # Arguments
///
/// * `parent` - The page whose body was fetched
/// * `html` - The fetched body
/// * `depth` - Depth to assign to the children (`parent.depth + 1`)
/// * `config` - Session configuration (for the ignore list)
///
/// # Returns
///
/// * `Ok(Vec<Arc<Page>>)` - Freshly constructed children, in document order
/// * `Err(CrawlError::Parse)` - The anchor selector failed to build
pub fn extract_children(
    parent: &Arc<Page>,
    html: &str,
    depth: u32,
    config: &Config,
) -> Result<Vec<Arc<Page>>, CrawlError> {
    tracing::info!("parsing page at [{}], finding children links", parent.url);

    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").map_err(|e| CrawlError::Parse {
        url: parent.url.clone(),
        message: e.to_string(),
    })?;

    let mut children: Vec<Arc<Page>> = Vec::new();

    for element in document.select(&anchor_selector) {
        let href = match element.value().attr("href") {
            Some(href) => href.trim(),
            None => continue,
        };

        // Anchor text is the concatenated descendant text of the element
        let link_text: String = element.text().collect();

        let link = match resolve_link(&parent.url, href) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!("could not resolve link [{}] in page [{}] - {}", href, parent.url, e);
                continue;
            }
        };

        if is_valid_link(&link, &link_text, &children, config) {
            tracing::info!("link found [{}] in page [{}]", link, parent.url);
            children.push(Page::new(&link, &link_text, depth, Arc::downgrade(parent)));
        }
    }

    Ok(children)
}

/// Decides whether a resolved link may become a child of the current page
///
/// Rejects empty URLs, anchors without text, URLs matching the configured
/// ignore substrings (case-insensitive), and URLs already present in the
/// children collected so far.
fn is_valid_link(url: &str, text: &str, current_children: &[Arc<Page>], config: &Config) -> bool {
    if current_children.iter().any(|child| child.url == url) {
        return false;
    }

    if url.is_empty() || text.is_empty() {
        return false;
    }

    let lowered = url.to_lowercase();
    for ignoreable in &config.ignore_if_contains {
        if lowered.contains(&ignoreable.to_lowercase()) {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Weak;

    fn parent_page() -> Arc<Page> {
        Page::new("https://example.com/index", "seed", 0, Weak::new())
    }

    fn child_urls(children: &[Arc<Page>]) -> Vec<String> {
        children.iter().map(|c| c.url.clone()).collect()
    }

    #[test]
    fn test_extract_preserves_document_order() {
        let parent = parent_page();
        let html = r#"<html><body>
            <a href="/first">First</a>
            <a href="/second">Second</a>
            <a href="https://other.com/third">Third</a>
        </body></html>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(
            child_urls(&children),
            vec![
                "https://example.com/first",
                "https://example.com/second",
                "https://other.com/third"
            ]
        );
    }

    #[test]
    fn test_extract_sets_depth_and_parent() {
        let parent = parent_page();
        let html = r#"<a href="/a">A</a>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].depth, 1);
        assert_eq!(children[0].link_text, "A");
        assert_eq!(children[0].parent.upgrade().unwrap().url, parent.url);
    }

    #[test]
    fn test_extract_skips_duplicate_links() {
        let parent = parent_page();
        let html = r#"
            <a href="/a">A</a>
            <a href="/a">A again</a>
            <a href="/b">B</a>
        "#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(
            child_urls(&children),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }

    #[test]
    fn test_extract_skips_empty_anchor_text() {
        let parent = parent_page();
        let html = r#"<a href="/a"></a><a href="/b">B</a>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(child_urls(&children), vec!["https://example.com/b"]);
    }

    #[test]
    fn test_extract_applies_ignore_filter() {
        let parent = parent_page();
        let html = r#"
            <a href="/logo.png">Logo</a>
            <a href="/photo.JPG">Photo</a>
            <a href="javascript:void(0)">Click</a>
            <a href="/real">Real</a>
        "#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(child_urls(&children), vec!["https://example.com/real"]);
    }

    #[test]
    fn test_extract_ignore_filter_is_case_insensitive() {
        let parent = parent_page();
        let config = Config {
            ignore_if_contains: vec!["/LOGOUT".to_string()],
            ..Config::default()
        };
        let html = r#"<a href="/logout">Bye</a><a href="/home">Home</a>"#;

        let children = extract_children(&parent, html, 1, &config).unwrap();
        assert_eq!(child_urls(&children), vec!["https://example.com/home"]);
    }

    #[test]
    fn test_extract_resolves_relative_links() {
        let parent = parent_page();
        let html = r#"<a href="./about">About</a>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(child_urls(&children), vec!["https://example.com/about"]);
    }

    #[test]
    fn test_extract_uses_nested_text_as_link_text() {
        let parent = parent_page();
        let html = r#"<a href="/a"><span>Nested</span> text</a>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(children[0].link_text, "Nested text");
    }

    #[test]
    fn test_extract_strips_query_on_children() {
        let parent = parent_page();
        let html = r#"<a href="/a?session=1">A</a>"#;

        let children = extract_children(&parent, html, 1, &Config::default()).unwrap();
        assert_eq!(child_urls(&children), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_extract_no_links() {
        let parent = parent_page();
        let children =
            extract_children(&parent, "<html><body>hi</body></html>", 1, &Config::default())
                .unwrap();
        assert!(children.is_empty());
    }
}
