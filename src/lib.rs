//! Kumo: a polite, concurrent web crawler
//!
//! Kumo starts from a configured set of seed URLs and builds, for each seed,
//! a bounded tree of the pages it could reach by following HTML hyperlinks.
//! Fetches are partitioned by host so that no host is hit more often than a
//! configured delay allows, and pages are deduplicated both by URL and by
//! fetched content.

pub mod config;
pub mod crawler;
pub mod digest;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Kumo operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Fetch error for {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Bad status {status} for {url}")]
    BadStatus { url: String, status: u16 },

    #[error("Non-HTML content type {content_type:?} for {url}")]
    NotHtml { url: String, content_type: String },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL '{0}'")]
    Parse(String),

    #[error("Missing host in URL '{0}'")]
    MissingHost(String),
}

/// Result type alias for Kumo operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlSession, Page};
pub use url::{host_of, resolve_link, strip_query};
