//! SEO Scout: client for a remote SEO crawling and reporting service
//!
//! This crate drives a backend that crawls a website, polls the crawl until it
//! finishes, asks the backend for an AI-written report, and then clears the
//! backend's collected data. The [`session::SessionController`] owns that
//! lifecycle and exposes read-only snapshots to whatever renders them.

pub mod api;
pub mod config;
pub mod credentials;
pub mod notify;
pub mod output;
pub mod poll;
pub mod session;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for SEO Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Api(#[from] api::ApiError),

    #[error("Status check for task {task_id} failed: {source}")]
    PollFailure {
        task_id: String,
        source: api::ApiError,
    },

    #[error("Polling for task {task_id} was cancelled")]
    PollCancelled { task_id: String },

    #[error("Crawl task {task_id} failed: {detail}")]
    TaskFailed { task_id: String, detail: String },

    #[error("Credential store error: {0}")]
    Credential(#[from] credentials::CredentialError),

    #[error("Invalid session transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::SessionPhase,
        to: state::SessionPhase,
    },

    #[error("Another operation is in progress ({phase:?})")]
    SessionBusy { phase: state::SessionPhase },

    #[error("No report available")]
    NoReport,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised before any request leaves the client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("An API key is required; save one with `set-key` first")]
    MissingCredential,

    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Max pages must be between 1 and 100, got {0}")]
    MaxPagesOutOfRange(u32),
}

/// Result type alias for SEO Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::{BackendApi, HttpBackend};
pub use config::Config;
pub use credentials::{CredentialStore, MemoryCredentialStore, SqliteCredentialStore};
pub use session::{CrawlRequest, SessionController, SessionSettings};
pub use state::{SessionPhase, SessionSnapshot};
