//! Page records: the nodes of a crawl tree
//!
//! A page owns its children and holds a weak back-reference to its parent,
//! so dropping a seed root frees the whole tree (the parent edge never
//! participates in ownership). The identity fields are fixed at
//! construction; the crawl results are filled in once by the fetch task
//! that owns the page.

use crate::config::Config;
use crate::crawler::stores::HashStore;
use crate::digest::digest;
use crate::url::{host_of, strip_query};
use std::collections::HashSet;
use std::sync::{Arc, Mutex, Weak};

/// A node in the crawl tree of one seed URL
#[derive(Debug)]
pub struct Page {
    /// Query-stripped absolute URL
    pub url: String,

    /// Anchor text of the link that led here; the URL itself for seeds
    pub link_text: String,

    /// Digest of `url`, the key into the visited set
    pub url_hash: String,

    /// Distance from the seed; 0 for seeds
    pub depth: u32,

    /// Non-owning back-edge to the parent page; empty for seeds
    pub parent: Weak<Page>,

    crawl: Mutex<CrawlData>,
}

#[derive(Debug, Default)]
struct CrawlData {
    raw_content: String,
    content_hash: String,
    children: Vec<Arc<Page>>,
}

impl Page {
    /// Creates a new page
    ///
    /// The URL is query-stripped before anything else, so page identity is
    /// `scheme://host/path` and the `url_hash` is computed over that form.
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the page
    /// * `link_text` - Anchor text that led to this page
    /// * `depth` - Distance from the seed (0 for seeds)
    /// * `parent` - Weak reference to the parent page (`Weak::new()` for seeds)
    pub fn new(url: &str, link_text: &str, depth: u32, parent: Weak<Page>) -> Arc<Page> {
        let url = strip_query(url).to_string();
        let url_hash = digest(&url);

        Arc::new(Page {
            url,
            link_text: link_text.to_string(),
            url_hash,
            depth,
            parent,
            crawl: Mutex::new(CrawlData::default()),
        })
    }

    /// Decides whether this page is eligible to enter the fetch pipeline
    ///
    /// A page is crawlable iff its depth is below the configured bound, its
    /// host parses and is not blacklisted, its URL has not been visited,
    /// and its content has not been seen. Before a fetch the content hash
    /// is empty and never matches, so content dedup effectively happens in
    /// the fetch stage, where the hash of the real body is checked again.
    pub fn is_crawlable(
        &self,
        config: &Config,
        blacklisted_hosts: &HashSet<String>,
        visited: &HashStore,
        seen_content: &HashStore,
    ) -> bool {
        if self.depth >= config.max_depth {
            tracing::info!("page [{}] not crawlable - max depth reached", self.url);
            return false;
        }

        let host = match host_of(&self.url) {
            Ok(host) => host,
            Err(e) => {
                tracing::info!("page [{}] not crawlable - {}", self.url, e);
                return false;
            }
        };

        if blacklisted_hosts.contains(&host) {
            tracing::info!("page [{}] not crawlable - host blacklisted", self.url);
            return false;
        }

        if visited.contains(&self.url_hash) {
            tracing::info!("page [{}] not crawlable - url already visited", self.url);
            return false;
        }

        if seen_content.contains(&self.content_hash()) {
            tracing::info!("page [{}] not crawlable - content already seen", self.url);
            return false;
        }

        true
    }

    /// Stores the fetched body and its digest
    pub fn record_content(&self, raw_content: String, content_hash: String) {
        let mut crawl = self.crawl.lock().expect("page lock poisoned");
        crawl.raw_content = raw_content;
        crawl.content_hash = content_hash;
    }

    /// Stores the extracted children, preserving discovery order
    pub fn record_children(&self, children: Vec<Arc<Page>>) {
        self.crawl.lock().expect("page lock poisoned").children = children;
    }

    /// Digest of the fetched body; empty before the fetch completes
    pub fn content_hash(&self) -> String {
        self.crawl
            .lock()
            .expect("page lock poisoned")
            .content_hash
            .clone()
    }

    /// The fetched body; empty before the fetch completes
    pub fn raw_content(&self) -> String {
        self.crawl
            .lock()
            .expect("page lock poisoned")
            .raw_content
            .clone()
    }

    /// The child pages discovered under this page, in document order
    pub fn children(&self) -> Vec<Arc<Page>> {
        self.crawl.lock().expect("page lock poisoned").children.clone()
    }
}
