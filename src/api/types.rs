//! Wire types for the backend REST API
//!
//! Field names follow the backend's snake_case JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body of `POST /crawl/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartCrawlBody<'a> {
    pub url: &'a str,
    pub max_pages: u32,
}

/// Response of `POST /crawl/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlAccepted {
    #[serde(default)]
    pub message: String,
    pub task_id: String,
}

/// Lifecycle of a backend crawl task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl TaskStatus {
    /// Returns true once the backend will not change the task again
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response of `GET /crawl-status/{task_id}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlStatus {
    pub status: TaskStatus,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub crawled_pages: u32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /generate-report/`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateReportBody<'a> {
    pub openai_api_key: &'a str,
}

/// Response of `POST /generate-report/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportBody {
    #[serde(default)]
    pub report: String,
}

/// One analysed page as returned by `GET /results/`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoResult {
    pub id: i64,
    pub url: String,
    pub status_code: u16,
    pub title_tag: String,
    pub meta_description: String,
    pub h1_count: u32,
    pub h2_count: u32,
    pub h3_count: u32,
    pub internal_links: u32,
    pub external_links: u32,
    pub image_count: u32,
    pub images_without_alt: u32,
    pub word_count: u32,
    pub load_time: f64,
    pub mobile_friendly: bool,
    pub has_schema: bool,
    pub canonical_url: String,
    pub created_at: String,
}

/// Error body the backend attaches to non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}
