//! State module for the crawl session
//!
//! This module provides the state a session controller owns and the read-only
//! view it hands to renderers.
//!
//! # Components
//!
//! - `SessionPhase`: where the controller is in the crawl-and-report lifecycle
//! - `CrawlTask`, `ReportResult`: data gathered along the way
//! - `SessionState`: the single mutable state struct, owned by the controller
//! - `SessionSnapshot`: a copy of that state for rendering

mod phase;
mod snapshot;

// Re-export main types
pub use phase::SessionPhase;
pub use snapshot::{CrawlTask, ReportResult, SessionSnapshot};

use crate::api::SeoResult;
use crate::ScoutError;

/// Mutable session state
///
/// Only the session controller holds one of these; everything else sees
/// `SessionSnapshot` copies.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    phase: SessionPhase,
    task: Option<CrawlTask>,
    report: Option<ReportResult>,
    results: Vec<SeoResult>,
    credential_prompt: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Moves to `to`, rejecting transitions the lifecycle does not allow
    pub fn transition(&mut self, to: SessionPhase) -> Result<(), ScoutError> {
        if !self.phase.can_transition_to(to) {
            return Err(ScoutError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        if self.phase != to {
            tracing::debug!("Session phase: {} -> {}", self.phase, to);
        }
        self.phase = to;
        Ok(())
    }

    pub fn task(&self) -> Option<&CrawlTask> {
        self.task.as_ref()
    }

    pub fn set_task(&mut self, task: CrawlTask) {
        self.task = Some(task);
    }

    pub fn report(&self) -> Option<&ReportResult> {
        self.report.as_ref()
    }

    pub fn set_report(&mut self, report: ReportResult) {
        self.report = Some(report);
    }

    pub fn results(&self) -> &[SeoResult] {
        &self.results
    }

    pub fn set_results(&mut self, results: Vec<SeoResult>) {
        self.results = results;
    }

    pub fn credential_prompt(&self) -> bool {
        self.credential_prompt
    }

    pub fn set_credential_prompt(&mut self, prompt: bool) {
        self.credential_prompt = prompt;
    }

    /// Drops everything left over from the previous crawl
    pub fn begin_new_crawl(&mut self) {
        self.task = None;
        self.report = None;
        self.results.clear();
    }

    /// Drops locally-held result data; the report is kept
    pub fn clear_local_results(&mut self) {
        self.task = None;
        self.results.clear();
    }
}
