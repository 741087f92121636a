//! Configuration module for SEO Scout
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, plus the environment override for the backend address.
//!
//! # Example
//!
//! ```no_run
//! use seo_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Some(Path::new("seo-scout.toml"))).unwrap();
//! println!("Polling every {}ms", config.polling.interval_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BackendConfig, Config, CrawlConfig, CredentialConfig, NotificationConfig, PollingConfig,
    BASE_URL_ENV, DEFAULT_BASE_URL,
};

// Re-export parser functions
pub use parser::{
    apply_env_overrides, compute_config_hash, load_config, load_config_with_hash, parse_config,
};
pub use validation::validate;
