//! Data the controller holds for one session, and its read-only snapshot

use crate::api::{CrawlStatus, SeoResult, TaskStatus};
use crate::notify::Notification;
use crate::state::SessionPhase;
use chrono::{DateTime, Utc};
use tokio::time::Instant;

/// A backend crawl task as last seen by the poll loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTask {
    pub task_id: String,
    pub status: TaskStatus,
    /// Percent complete, clamped to 0..=100
    pub progress: u8,
    pub total_pages: u32,
    pub crawled_pages: u32,
    pub url: String,
    pub error: Option<String>,
}

impl CrawlTask {
    /// A task the backend has just accepted and not yet reported on
    pub fn accepted(task_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            status: TaskStatus::Pending,
            progress: 0,
            total_pages: 0,
            crawled_pages: 0,
            url: url.into(),
            error: None,
        }
    }

    /// Applies one status poll
    pub fn apply(&mut self, status: &CrawlStatus) {
        self.status = status.status;
        self.progress = status.progress.min(100) as u8;
        self.total_pages = status.total_pages;
        self.crawled_pages = status.crawled_pages;
        if !status.url.is_empty() {
            self.url = status.url.clone();
        }
        self.error = status.error.clone();
    }
}

/// The AI report for the last completed crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResult {
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

impl ReportResult {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Everything a renderer needs, copied out of the controller
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub task: Option<CrawlTask>,
    pub report: Option<ReportResult>,
    pub results: Vec<SeoResult>,
    /// Notification that was visible when the snapshot was taken
    ///
    /// Nothing is published when it expires; renderers should read it
    /// through [`SessionSnapshot::visible_notification`].
    pub notification: Option<Notification>,
    /// When `notification` stops being visible
    pub notification_expires_at: Option<Instant>,
    /// Set when an operation needed an API key and none was stored
    pub credential_prompt: bool,
    pub has_credential: bool,
}

impl SessionSnapshot {
    /// The notification, unless its lifetime has run out since publishing
    pub fn visible_notification(&self) -> Option<&Notification> {
        self.visible_notification_at(Instant::now())
    }

    pub fn visible_notification_at(&self, now: Instant) -> Option<&Notification> {
        match self.notification_expires_at {
            Some(expires_at) if now < expires_at => self.notification.as_ref(),
            _ => None,
        }
    }
}
