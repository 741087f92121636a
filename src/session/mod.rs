//! Crawl session module
//!
//! This module contains the session controller and its inputs:
//! - `CrawlRequest`: validated user input for a crawl
//! - `SessionSettings`: timing and storage-key settings
//! - `SessionController`: the submit → poll → report → clear lifecycle

mod controller;
mod request;

pub use controller::SessionController;
pub use request::{CrawlRequest, MAX_MAX_PAGES, MIN_MAX_PAGES};

use crate::config::Config;
use crate::ConfigError;
use crate::notify::DEFAULT_TTL;
use crate::poll::DEFAULT_POLL_INTERVAL;
use std::time::Duration;

/// Settings a session controller runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSettings {
    /// Period between crawl-status requests
    pub poll_interval: Duration,
    /// How long a notification stays visible
    pub notification_ttl: Duration,
    /// Credential store key holding the API key
    pub credential_key: String,
}

impl SessionSettings {
    /// Rejects settings a controller cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval.is_zero() {
            return Err(ConfigError::Validation(
                "poll interval must be greater than zero".to_string(),
            ));
        }
        if self.notification_ttl.is_zero() {
            return Err(ConfigError::Validation(
                "notification ttl must be greater than zero".to_string(),
            ));
        }
        if self.credential_key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "credential key cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            notification_ttl: DEFAULT_TTL,
            credential_key: "openai_api_key".to_string(),
        }
    }
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            poll_interval: Duration::from_millis(config.polling.interval_ms),
            notification_ttl: Duration::from_millis(config.notifications.ttl_ms),
            credential_key: config.credentials.key.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_from_config() {
        let mut config = Config::default();
        config.polling.interval_ms = 250;
        config.notifications.ttl_ms = 1500;
        config.credentials.key = "key".to_string();

        let settings = SessionSettings::from(&config);
        assert_eq!(settings.poll_interval, Duration::from_millis(250));
        assert_eq!(settings.notification_ttl, Duration::from_millis(1500));
        assert_eq!(settings.credential_key, "key");
    }

    #[test]
    fn test_zero_durations_rejected() {
        let settings = SessionSettings {
            poll_interval: Duration::ZERO,
            ..SessionSettings::default()
        };
        assert!(matches!(settings.validate(), Err(ConfigError::Validation(_))));

        let settings = SessionSettings {
            notification_ttl: Duration::ZERO,
            ..SessionSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = SessionSettings {
            credential_key: " ".to_string(),
            ..SessionSettings::default()
        };
        assert!(settings.validate().is_err());
        assert!(SessionSettings::default().validate().is_ok());
    }

    #[test]
    fn test_default_settings_match_default_config() {
        assert_eq!(SessionSettings::default(), SessionSettings::from(&Config::default()));
    }
}
