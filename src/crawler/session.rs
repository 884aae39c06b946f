//! Crawl session: queues, workers, and the termination protocol
//!
//! A session is a dataflow pipeline over typed queues:
//!
//! ```text
//! seeds ─> filter ─> router ─> per-host queue ─> fetch-and-extract ─┐
//!   ^                                                               │
//!   └────────────────────── child pages ────────────────────────────┘
//! ```
//!
//! One filter worker admits candidate pages, one router worker partitions
//! accepted pages by host, one worker per host serializes that host's
//! fetches with the politeness delay, and each fetch runs as a detached
//! task. The pending counter tracks every page between enqueue and fetch
//! finalization; when it reaches zero the done signal fires exactly once
//! and the session returns the seed trees.

use crate::config::Config;
use crate::crawler::extractor::extract_children;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::page::Page;
use crate::crawler::stores::{HashStore, PendingCounter};
use crate::digest::digest;
use crate::url::host_of;
use crate::Result;
use reqwest::Client;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// Shared state of one crawl session
///
/// The dedup stores and the pending counter are the only mutable state
/// that crosses workers; everything else here is read-only after
/// construction.
pub struct SessionState {
    config: Config,
    client: Client,
    blacklisted_hosts: HashSet<String>,

    /// Digests of URLs already crawled
    pub visited: HashStore,

    /// Digests of page bodies already crawled, possibly under other URLs
    pub seen_content: HashStore,

    /// Pages admitted into the pipeline but not yet finalized
    pub pending: PendingCounter,

    filter_tx: mpsc::UnboundedSender<Arc<Page>>,
    accepted_tx: mpsc::UnboundedSender<Arc<Page>>,
    done_tx: Mutex<Option<oneshot::Sender<()>>>,
}

impl SessionState {
    /// Counts a page into the pending total and hands it to the filter
    ///
    /// The increment happens before the page is enqueued, so the counter
    /// can never read zero while a candidate is still sitting in a queue.
    /// Every enqueued page is balanced by exactly one decrement: at
    /// rejection, at routing failure, or at fetch finalization.
    pub fn enqueue_candidate(&self, page: Arc<Page>) {
        self.pending.add(1);
        if self.filter_tx.send(page).is_err() {
            self.pending.subtract(1);
            self.check_done();
        }
    }

    /// Fires the done signal when no work remains
    ///
    /// Called after every rejection and every fetch finalization. The
    /// signal is posted at most once per session.
    pub fn check_done(&self) {
        tracing::debug!("checking if done");

        if self.pending.get() == 0 {
            tracing::info!("no more pending urls, ending crawl");
            if let Some(tx) = self.done_tx.lock().expect("done lock poisoned").take() {
                let _ = tx.send(());
            }
            return;
        }

        tracing::debug!("pending url count [{}], crawl continuing", self.pending.get());
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

/// A crawl over one configured set of seed URLs
///
/// Construct with [`CrawlSession::new`], then [`run`](CrawlSession::run)
/// to completion. The session owns the queue receivers; the shared state
/// is available through [`state`](CrawlSession::state) for inspection
/// after the crawl.
pub struct CrawlSession {
    state: Arc<SessionState>,
    filter_rx: mpsc::UnboundedReceiver<Arc<Page>>,
    accepted_rx: mpsc::UnboundedReceiver<Arc<Page>>,
    done_rx: oneshot::Receiver<()>,
}

impl CrawlSession {
    /// Creates a session for the given configuration
    ///
    /// Builds the shared HTTP client and resolves the blacklist to a set
    /// of hosts; an unparseable blacklist entry is logged and skipped.
    pub fn new(config: Config) -> Result<Self> {
        let client = build_http_client(config.read_timeout_secs)?;

        let mut blacklisted_hosts = HashSet::new();
        for url in &config.blacklisted_urls {
            match host_of(url) {
                Ok(host) => {
                    blacklisted_hosts.insert(host);
                }
                Err(e) => tracing::warn!("ignoring unusable blacklist entry [{}] - {}", url, e),
            }
        }

        let (filter_tx, filter_rx) = mpsc::unbounded_channel();
        let (accepted_tx, accepted_rx) = mpsc::unbounded_channel();
        let (done_tx, done_rx) = oneshot::channel();

        Ok(Self {
            state: Arc::new(SessionState {
                config,
                client,
                blacklisted_hosts,
                visited: HashStore::new(),
                seen_content: HashStore::new(),
                pending: PendingCounter::new(),
                filter_tx,
                accepted_tx,
                done_tx: Mutex::new(Some(done_tx)),
            }),
            filter_rx,
            accepted_rx,
            done_rx,
        })
    }

    /// The session's shared state
    pub fn state(&self) -> Arc<SessionState> {
        Arc::clone(&self.state)
    }

    /// Runs the crawl to completion and returns the seed page trees
    ///
    /// Starts the filter and router workers, seeds the pipeline, and
    /// waits for the done signal. With an empty seed list the session
    /// logs an error and completes immediately with no trees.
    pub async fn run(self) -> Result<Vec<Arc<Page>>> {
        let state = self.state;

        if state.config.seeds.is_empty() {
            tracing::error!("no configured seeds, nowhere to crawl");
            return Ok(Vec::new());
        }

        let roots: Vec<Arc<Page>> = state
            .config
            .seeds
            .iter()
            .map(|url| Page::new(url, url, 0, Weak::new()))
            .collect();

        tokio::spawn(filter_worker(self.filter_rx, Arc::clone(&state)));
        tokio::spawn(router_worker(self.accepted_rx, Arc::clone(&state)));

        for root in &roots {
            state.enqueue_candidate(Arc::clone(root));
        }

        let _ = self.done_rx.await;

        Ok(roots)
    }
}

/// Admission filter worker
///
/// Accepted pages move on to the router; rejected pages give their
/// pending slot back, which may be the event that ends the session.
async fn filter_worker(mut rx: mpsc::UnboundedReceiver<Arc<Page>>, state: Arc<SessionState>) {
    while let Some(page) = rx.recv().await {
        tracing::info!("new page to be filtered - {}", page.url);

        let crawlable = page.is_crawlable(
            &state.config,
            &state.blacklisted_hosts,
            &state.visited,
            &state.seen_content,
        );

        if crawlable {
            tracing::info!("new page accepted - {}", page.url);
            if state.accepted_tx.send(page).is_err() {
                state.pending.subtract(1);
                state.check_done();
            }
        } else {
            tracing::info!("new page rejected - {}", page.url);
            state.pending.subtract(1);
            state.check_done();
        }
    }
}

/// Host router worker
///
/// Owns the host routing table. Entries are created lazily, each with a
/// dedicated worker, and live for the rest of the session. A page whose
/// host cannot be derived completes its lifecycle here.
async fn router_worker(mut rx: mpsc::UnboundedReceiver<Arc<Page>>, state: Arc<SessionState>) {
    let mut host_channels: HashMap<String, mpsc::UnboundedSender<Arc<Page>>> = HashMap::new();

    while let Some(page) = rx.recv().await {
        tracing::info!("new page to be routed - {}", page.url);

        let host = match host_of(&page.url) {
            Ok(host) => host,
            Err(e) => {
                tracing::error!(
                    "could not get host to route page [{}] to - {}",
                    page.url,
                    e
                );
                state.pending.subtract(1);
                state.check_done();
                continue;
            }
        };

        let channel = host_channels.entry(host.clone()).or_insert_with(|| {
            let (host_tx, host_rx) = mpsc::unbounded_channel();
            tokio::spawn(host_worker(host.clone(), host_rx, Arc::clone(&state)));
            tracing::info!("host channel created for host [{}]", host);
            host_tx
        });

        if channel.send(page).is_err() {
            // Host workers never exit while the session lives
            tracing::error!("host channel closed for host [{}]", host);
        }
    }
}

/// Per-host worker, serializing fetches against one host
///
/// The politeness delay is taken before every fetch, including the first,
/// so two fetch starts against this host are never closer than the
/// configured gap. The fetch itself runs detached; the delay bounds host
/// hit frequency, not concurrency.
async fn host_worker(
    host: String,
    mut rx: mpsc::UnboundedReceiver<Arc<Page>>,
    state: Arc<SessionState>,
) {
    tracing::info!("now receiving urls to be crawled for host [{}]", host);

    while let Some(page) = rx.recv().await {
        tokio::time::sleep(Duration::from_millis(state.config.domain_delay_ms)).await;

        tracing::info!("dispatching [{}] from host [{}] for crawl", page.url, host);
        tokio::spawn(fetch_and_extract(page, Arc::clone(&state)));
    }
}

/// Fetches one page, extracts its children, and feeds them back
///
/// Finalization (decrement + done check) runs on every exit path; any
/// failure is absorbed at page granularity.
async fn fetch_and_extract(page: Arc<Page>, state: Arc<SessionState>) {
    if let Err(e) = crawl_page(&page, &state).await {
        tracing::warn!("broken link [{}], can't crawl - {}", page.url, e);
    }

    state.pending.subtract(1);
    state.check_done();
}

async fn crawl_page(page: &Arc<Page>, state: &Arc<SessionState>) -> Result<()> {
    match page.parent.upgrade() {
        Some(parent) => tracing::info!(
            "crawling page [{}], child of [{}], depth [{}]",
            page.url,
            parent.url,
            page.depth
        ),
        None => tracing::info!("crawling seed page [{}], depth [{}]", page.url, page.depth),
    }

    let body = fetch_page(&state.client, &page.url).await?;

    let content_hash = digest(&body);
    page.record_content(body.clone(), content_hash.clone());

    // Late content dedup: the same body served under a URL that was
    // admitted before this one finished hashing
    if state.seen_content.contains(&content_hash) {
        tracing::info!("page [{}] not crawlable - content already seen", page.url);
        return Ok(());
    }

    state.visited.add(&page.url_hash);
    state.seen_content.add(&content_hash);

    let children = extract_children(page, &body, page.depth + 1, &state.config)?;
    page.record_children(children.clone());

    for child in children {
        state.enqueue_candidate(child);
    }

    Ok(())
}
