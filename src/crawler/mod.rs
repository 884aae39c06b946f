//! The crawl engine
//!
//! A multi-stage pipeline: an admission filter decides which candidate
//! pages may be fetched, a router partitions accepted pages by host, one
//! worker per host paces that host's fetches, and detached fetch tasks
//! download pages and feed discovered links back into the filter.

mod extractor;
mod fetcher;
mod page;
mod session;
mod stores;

pub use extractor::extract_children;
pub use fetcher::{build_http_client, fetch_page};
pub use page::Page;
pub use session::{CrawlSession, SessionState};
pub use stores::{HashStore, PendingCounter};

use crate::config::Config;
use crate::Result;
use std::sync::Arc;

/// Runs a full crawl for the given configuration
///
/// Convenience wrapper that builds a [`CrawlSession`] and runs it to
/// completion, returning the seed page trees.
///
/// # Example
///
/// ```no_run
/// use kumo::config::Config;
/// use kumo::crawler::crawl;
///
/// # async fn example() -> kumo::Result<()> {
/// let trees = crawl(Config::default()).await?;
/// for tree in &trees {
///     println!("seed {} reached {} pages", tree.url, tree.children().len());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: Config) -> Result<Vec<Arc<Page>>> {
    CrawlSession::new(config)?.run().await
}
