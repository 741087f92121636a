use crate::config::types::{BackendConfig, Config, CredentialConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_backend_config(&config.backend)?;

    if config.polling.interval_ms < 100 {
        return Err(ConfigError::Validation(format!(
            "polling interval-ms must be >= 100ms, got {}ms",
            config.polling.interval_ms
        )));
    }

    if config.notifications.ttl_ms == 0 {
        return Err(ConfigError::Validation(
            "notifications ttl-ms must be greater than zero".to_string(),
        ));
    }

    validate_credential_config(&config.credentials)?;

    let max_pages = config.crawl.default_max_pages;
    if !(1..=100).contains(&max_pages) {
        return Err(ConfigError::Validation(format!(
            "default-max-pages must be between 1 and 100, got {}",
            max_pages
        )));
    }

    Ok(())
}

/// Validates the backend address
fn validate_backend_config(config: &BackendConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' cannot be used as a base",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates credential store settings
fn validate_credential_config(config: &CredentialConfig) -> Result<(), ConfigError> {
    if config.store_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "credentials store-path cannot be empty".to_string(),
        ));
    }

    if config.key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "credentials key cannot be empty".to_string(),
        ));
    }

    Ok(())
}
