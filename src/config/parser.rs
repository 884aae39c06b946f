use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use sha2::{Digest, Sha256};
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use kumo::config::load_config;
///
/// let config = load_config(Path::new("config/crawler.yml")).unwrap();
/// println!("Max depth: {}", config.max_depth);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let config: Config = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Loads a configuration file, falling back to the defaults
///
/// A file that is missing, unreadable, or not valid YAML yields the
/// default configuration with a WARN log. A file that parses but fails
/// validation is a hard error: a deliberately written config that asks
/// for something impossible should stop the process rather than be
/// silently replaced.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    match load_config(path) {
        Ok(config) => Ok(config),
        Err(e @ ConfigError::Validation(_)) => Err(e),
        Err(e) => {
            tracing::warn!(
                "could not get config from file [{}] due to error [{}], using default instead",
                path.display(),
                e
            );
            Ok(Config::default())
        }
    }
}

/// Computes a SHA-256 hash of the configuration file content
///
/// Used to identify which configuration a crawl session ran with.
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash of the file content
/// * `Err(ConfigError)` - Failed to read the file
pub fn compute_config_hash(path: &Path) -> Result<String, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    Ok(hex::encode(result))
}

/// Loads a configuration and returns both the config and its hash
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
///
/// # Returns
///
/// * `Ok((Config, String))` - Successfully loaded configuration and its hash
/// * `Err(ConfigError)` - Failed to load or parse the configuration
pub fn load_config_with_hash(path: &Path) -> Result<(Config, String), ConfigError> {
    let config = load_config(path)?;
    let hash = compute_config_hash(path)?;
    Ok((config, hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
read_timeout_secs: 5
seeds:
  - "https://example.com/"
  - "https://other.example.com/start"
blacklisted_urls:
  - "https://ads.example.com"
domain_delay_ms: 500
max_depth: 3
ignore_if_contains:
  - ".gif"
print_indent: 40
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.read_timeout_secs, 5);
        assert_eq!(config.seeds.len(), 2);
        assert_eq!(config.blacklisted_urls.len(), 1);
        assert_eq!(config.domain_delay_ms, 500);
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.ignore_if_contains, vec![".gif".to_string()]);
        assert_eq!(config.print_indent, 40);
    }

    #[test]
    fn test_load_partial_config_uses_defaults() {
        let config_content = r#"
seeds:
  - "https://example.com/"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.read_timeout_secs, 3);
        assert_eq!(config.domain_delay_ms, 2000);
        assert_eq!(config.max_depth, 5);
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/crawler.yml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_yaml() {
        let config_content = "seeds: [unclosed";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
read_timeout_secs: 0
seeds:
  - "https://example.com/"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = load_config_or_default(Path::new("/nonexistent/crawler.yml")).unwrap();
        assert_eq!(config.max_depth, 5);
        assert_eq!(config.seeds.len(), 1);
    }

    #[test]
    fn test_load_or_default_keeps_validation_error() {
        let config_content = r#"
read_timeout_secs: 0
"#;
        let file = create_temp_config(config_content);
        assert!(load_config_or_default(file.path()).is_err());
    }

    #[test]
    fn test_compute_config_hash() {
        let config_content = "max_depth: 2";
        let file = create_temp_config(config_content);

        let hash1 = compute_config_hash(file.path()).unwrap();
        let hash2 = compute_config_hash(file.path()).unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = create_temp_config("max_depth: 1");
        let file2 = create_temp_config("max_depth: 2");

        let hash1 = compute_config_hash(file1.path()).unwrap();
        let hash2 = compute_config_hash(file2.path()).unwrap();

        assert_ne!(hash1, hash2);
    }
}
