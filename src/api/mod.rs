//! Backend API module
//!
//! This module contains everything that talks to the remote crawl/report
//! service:
//! - The wire types exchanged with the backend
//! - The `BackendApi` trait the session controller is written against
//! - `HttpBackend`, the `reqwest` implementation of that trait
//! - Error classification (transport, backend, decode)

mod client;
mod types;

pub use client::{build_http_client, extract_detail, HttpBackend};
pub use types::{
    CrawlAccepted, CrawlStatus, GenerateReportBody, ReportBody, SeoResult, StartCrawlBody,
    TaskStatus,
};

use crate::session::CrawlRequest;
use std::future::Future;
use thiserror::Error;

/// Fallback shown when a failed response carries no usable `detail`
pub const UNKNOWN_ERROR_DETAIL: &str = "Unknown error";

/// Message shown for transport failures, which never carry backend detail
pub const NETWORK_ERROR_MESSAGE: &str =
    "Could not reach the backend. Please check your connection and try again.";

/// Errors from a single backend request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("Network error during {operation}: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The backend answered with a non-2xx status
    #[error("Backend returned HTTP {status}: {}", .detail.as_deref().unwrap_or(UNKNOWN_ERROR_DETAIL))]
    Backend { status: u16, detail: Option<String> },

    /// A 2xx response whose body did not match the contract
    #[error("Unexpected response from {operation}: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("Invalid endpoint URL: {0}")]
    Endpoint(String),
}

impl ApiError {
    /// Text suitable for a user-facing notification
    ///
    /// Backend failures show the backend's own detail when it sent one.
    /// Transport failures always show a generic message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { .. } => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Backend { detail, .. } => detail
                .clone()
                .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string()),
            Self::Decode { message, .. } => message.clone(),
            Self::Endpoint(message) => message.clone(),
        }
    }

    /// Returns true if the request failed before reaching the backend
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::Endpoint(err.to_string())
    }
}

/// Result type for backend requests
pub type ApiResult<T> = Result<T, ApiError>;

/// The remote crawl/report service as seen by the session controller
///
/// Every method is one HTTP round trip with no retries.
pub trait BackendApi {
    /// `POST /crawl/`: asks the backend to start crawling
    fn start_crawl(
        &self,
        request: &CrawlRequest,
    ) -> impl Future<Output = ApiResult<CrawlAccepted>> + Send;

    /// `GET /crawl-status/{task_id}`: one status poll
    fn crawl_status(&self, task_id: &str) -> impl Future<Output = ApiResult<CrawlStatus>> + Send;

    /// `POST /generate-report/`: returns the report text
    fn generate_report(&self, api_key: &str) -> impl Future<Output = ApiResult<String>> + Send;

    /// `DELETE /clear-database/`: drops everything the backend collected
    fn clear_database(&self) -> impl Future<Output = ApiResult<()>> + Send;

    /// `GET /results/`: per-page analysis rows
    fn list_results(&self) -> impl Future<Output = ApiResult<Vec<SeoResult>>> + Send;
}
