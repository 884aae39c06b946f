use crate::config::types::Config;
use crate::url::host_of;
use crate::ConfigError;

/// Validates the entire configuration
///
/// An empty seed list is allowed here; the session handles it at startup
/// by logging and completing immediately.
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.read_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "read_timeout_secs must be >= 1, got {}",
            config.read_timeout_secs
        )));
    }

    for seed in &config.seeds {
        host_of(seed).map_err(|_| {
            ConfigError::Validation(format!(
                "seed '{}' is not an absolute URL with a host",
                seed
            ))
        })?;
    }

    for url in &config.blacklisted_urls {
        host_of(url).map_err(|_| {
            ConfigError::Validation(format!(
                "blacklisted URL '{}' is not an absolute URL with a host",
                url
            ))
        })?;
    }

    for entry in &config.ignore_if_contains {
        if entry.is_empty() {
            return Err(ConfigError::Validation(
                "ignore_if_contains entries cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}
