use serde::Deserialize;

/// Crawler configuration
///
/// Every field has a default, so a partial YAML file only needs to name
/// the keys it wants to override.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// HTTP read timeout in seconds
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Absolute URLs to start crawling from
    #[serde(default = "default_seeds")]
    pub seeds: Vec<String>,

    /// URLs whose hosts are refused at admission
    #[serde(default)]
    pub blacklisted_urls: Vec<String>,

    /// Minimum gap between fetches to the same host, in milliseconds
    #[serde(default = "default_domain_delay_ms")]
    pub domain_delay_ms: u64,

    /// Strict upper bound on page depth; a page at depth == max_depth is rejected
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    /// Case-insensitive substrings that disqualify a URL
    #[serde(default = "default_ignore_if_contains")]
    pub ignore_if_contains: Vec<String>,

    /// Column width per depth level in the printed tree
    #[serde(default = "default_print_indent")]
    pub print_indent: usize,
}

fn default_read_timeout_secs() -> u64 {
    3
}

fn default_seeds() -> Vec<String> {
    vec!["https://www.wisdomforgoldfish.com".to_string()]
}

fn default_domain_delay_ms() -> u64 {
    2000
}

fn default_max_depth() -> u32 {
    5
}

fn default_ignore_if_contains() -> Vec<String> {
    vec![".png".to_string(), ".jpg".to_string(), "javascript".to_string()]
}

fn default_print_indent() -> usize {
    20
}

impl Default for Config {
    fn default() -> Self {
        Self {
            read_timeout_secs: default_read_timeout_secs(),
            seeds: default_seeds(),
            blacklisted_urls: Vec::new(),
            domain_delay_ms: default_domain_delay_ms(),
            max_depth: default_max_depth(),
            ignore_if_contains: default_ignore_if_contains(),
            print_indent: default_print_indent(),
        }
    }
}
