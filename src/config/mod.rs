//! Configuration module for Kumo
//!
//! Handles loading, parsing, and validating the YAML configuration file.
//! A missing or unreadable file falls back to the built-in defaults so the
//! binary always has a usable configuration.
//!
//! # Example
//!
//! ```no_run
//! use kumo::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config/crawler.yml")).unwrap();
//! println!("Crawler will use max depth: {}", config.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_or_default, load_config_with_hash};
pub use types::Config;
pub use validation::validate;
