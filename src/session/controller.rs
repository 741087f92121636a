//! Session controller - crawl-and-report orchestration
//!
//! This module contains the controller that drives one crawl from submission
//! to report, including:
//! - Client-side validation before any request
//! - Polling the crawl task until it finishes
//! - Chaining report generation and the remote data clear
//! - Publishing snapshots and notifications for the presentation layer

use crate::api::{ApiError, BackendApi, TaskStatus, UNKNOWN_ERROR_DETAIL};
use crate::credentials::CredentialStore;
use crate::notify::NotificationCenter;
use crate::output::write_report;
use crate::poll::{PollHandle, PollTimer};
use crate::session::{CrawlRequest, SessionSettings};
use crate::state::{CrawlTask, ReportResult, SessionPhase, SessionSnapshot, SessionState};
use crate::{ScoutError, ValidationError};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

/// Owns the state of one crawl-and-report session
///
/// All operations take `&mut self`, so a controller never runs two of them
/// at once. Renderers read [`SessionSnapshot`]s via [`snapshot`] or
/// [`subscribe`].
///
/// [`snapshot`]: SessionController::snapshot
/// [`subscribe`]: SessionController::subscribe
pub struct SessionController<A, S> {
    api: A,
    store: S,
    settings: SessionSettings,
    credential: String,
    state: SessionState,
    notifications: NotificationCenter,
    snapshots: watch::Sender<SessionSnapshot>,
    last_poll: Option<PollHandle>,
}

impl<A, S> SessionController<A, S>
where
    A: BackendApi,
    S: CredentialStore,
{
    /// Creates a controller and loads the stored credential
    ///
    /// # Arguments
    ///
    /// * `api` - The backend to talk to
    /// * `store` - Where the API key is persisted
    /// * `settings` - Poll interval, notification TTL and credential key
    ///
    /// # Returns
    ///
    /// * `Ok(SessionController)` - Ready, in `Idle`
    /// * `Err(ScoutError)` - The settings are unusable (e.g. a zero poll
    ///   interval) or the credential store could not be read
    pub fn new(api: A, store: S, settings: SessionSettings) -> Result<Self, ScoutError> {
        settings.validate()?;
        let credential = store.get(&settings.credential_key)?.unwrap_or_default();
        if credential.trim().is_empty() {
            tracing::info!("No stored API key under '{}'", settings.credential_key);
        } else {
            tracing::debug!("Loaded API key from '{}'", settings.credential_key);
        }

        let notifications = NotificationCenter::new(settings.notification_ttl);
        let (snapshots, _) = watch::channel(SessionSnapshot::default());

        let controller = Self {
            api,
            store,
            settings,
            credential,
            state: SessionState::new(),
            notifications,
            snapshots,
            last_poll: None,
        };
        controller.publish();

        Ok(controller)
    }

    /// A copy of the current session state
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.state.phase(),
            task: self.state.task().cloned(),
            report: self.state.report().cloned(),
            results: self.state.results().to_vec(),
            notification: self.notifications.visible().cloned(),
            notification_expires_at: self.notifications.expires_at(),
            credential_prompt: self.state.credential_prompt(),
            has_credential: self.has_credential(),
        }
    }

    /// A receiver that sees a new snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    pub fn notifications(&self) -> &NotificationCenter {
        &self.notifications
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Handle of the most recent poll loop, if one has run
    pub fn last_poll_handle(&self) -> Option<&PollHandle> {
        self.last_poll.as_ref()
    }

    /// Gives back the backend and credential store
    pub fn into_parts(self) -> (A, S) {
        (self.api, self.store)
    }

    /// Forces the session back to `Idle`
    ///
    /// Needed only when an operation's future was dropped before finishing,
    /// e.g. on Ctrl-C, which leaves the phase where it stopped.
    pub fn reset(&mut self) {
        if let Some(handle) = &self.last_poll {
            handle.cancel();
        }
        if self.state.phase().is_busy() {
            tracing::info!("Resetting session from {}", self.state.phase());
        }
        // Every phase may return to Idle
        let _ = self.state.transition(SessionPhase::Idle);
        self.publish();
    }

    /// Hides the visible notification
    pub fn dismiss_notification(&mut self) {
        self.notifications.dismiss();
        self.publish();
    }

    /// Overwrites the stored API key
    ///
    /// The value is stored as given, without format checks.
    pub fn save_credential(&mut self, value: &str) -> Result<(), ScoutError> {
        self.store.set(&self.settings.credential_key, value)?;
        self.credential = value.to_string();
        self.state.set_credential_prompt(false);
        self.notifications.success("API key saved successfully");
        self.publish();
        Ok(())
    }

    /// Validates input and runs the whole crawl → report → clear flow
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL of the site to crawl
    /// * `max_pages` - Page budget, 1 to 100
    ///
    /// # Returns
    ///
    /// * `Ok(ReportResult)` - The generated report. A failed remote clear
    ///   after the report does not make this an error.
    /// * `Err(ScoutError)` - Validation, crawl, poll or report failure. A
    ///   notification describing it has already been pushed.
    pub async fn submit_crawl(
        &mut self,
        url: &str,
        max_pages: u32,
    ) -> Result<ReportResult, ScoutError> {
        self.ensure_idle()?;
        self.require_credential("starting a crawl")?;

        let request = match CrawlRequest::new(url, max_pages) {
            Ok(request) => request,
            Err(e) => {
                self.notifications.error(e.to_string());
                self.publish();
                return Err(e.into());
            }
        };

        self.submit(request).await
    }

    /// Runs the crawl → report → clear flow for an already-validated request
    pub async fn submit(&mut self, request: CrawlRequest) -> Result<ReportResult, ScoutError> {
        self.ensure_idle()?;
        self.require_credential("starting a crawl")?;

        self.state.begin_new_crawl();
        self.state.transition(SessionPhase::Submitting)?;
        self.publish();

        tracing::info!(
            "Submitting crawl of {} (max {} pages)",
            request.url(),
            request.max_pages()
        );

        let accepted = match self.api.start_crawl(&request).await {
            Ok(accepted) => accepted,
            Err(e) => {
                let message = format!("Failed to start crawl: {}", e.user_message());
                return Err(self.fail(message, e.into()));
            }
        };

        tracing::info!("Crawl accepted as task {}", accepted.task_id);
        let task = CrawlTask::accepted(accepted.task_id.clone(), request.url());
        self.state.set_task(task.clone());
        self.state.transition(SessionPhase::Polling)?;
        self.notifications.success(if accepted.message.is_empty() {
            format!("Crawl started (task {})", accepted.task_id)
        } else {
            accepted.message
        });
        self.publish();

        let task = self.poll_until_done(task).await?;

        self.notifications.success(format!(
            "Crawl completed ({} pages). Generating SEO report...",
            task.crawled_pages
        ));
        self.run_report().await
    }

    /// Requests a report for whatever the backend has collected
    ///
    /// Usable on its own as a manual retry. On failure the previous report
    /// and results are left as they were.
    pub async fn generate_report(&mut self) -> Result<ReportResult, ScoutError> {
        self.ensure_idle()?;
        self.require_credential("generating a report")?;
        self.run_report().await
    }

    /// Asks the backend to drop its collected data
    ///
    /// Local results are cleared whatever the backend answers. Callers
    /// driving this from a user action are expected to confirm first.
    pub async fn clear_remote_data(&mut self) -> Result<(), ScoutError> {
        self.ensure_idle()?;
        self.state.transition(SessionPhase::ClearingRemoteData)?;
        self.publish();

        let outcome = self.clear_remote().await;

        self.state.transition(SessionPhase::Idle)?;
        self.publish();
        outcome.map_err(ScoutError::from)
    }

    /// Loads the per-page analysis rows from the backend
    ///
    /// # Returns
    ///
    /// The number of rows now held locally.
    pub async fn fetch_results(&mut self) -> Result<usize, ScoutError> {
        self.ensure_idle()?;

        match self.api.list_results().await {
            Ok(results) => {
                let count = results.len();
                tracing::debug!("Loaded {} result rows", count);
                self.state.set_results(results);
                self.publish();
                Ok(count)
            }
            Err(e) => {
                let message = format!("Failed to load results: {}", e.user_message());
                Err(self.fail(message, e.into()))
            }
        }
    }

    /// Writes the current report to `seo-report-YYYY-MM-DD.txt` in `dir`
    pub fn export_report(&self, dir: &Path) -> Result<PathBuf, ScoutError> {
        let report = self.state.report().ok_or(ScoutError::NoReport)?;
        Ok(write_report(report, dir)?)
    }

    /// Polls until the task completes or fails
    async fn poll_until_done(&mut self, mut task: CrawlTask) -> Result<CrawlTask, ScoutError> {
        let mut timer = PollTimer::start(self.settings.poll_interval);
        let handle = timer.handle();
        self.last_poll = Some(handle.clone());

        while let Some(tick) = timer.tick().await {
            let status = match self.api.crawl_status(&task.task_id).await {
                Ok(status) => status,
                Err(source) => {
                    handle.cancel();
                    let message = format!(
                        "Failed to check crawl status: {}",
                        source.user_message()
                    );
                    let err = ScoutError::PollFailure {
                        task_id: task.task_id.clone(),
                        source,
                    };
                    return Err(self.fail(message, err));
                }
            };

            tracing::debug!(
                "Poll #{} for {}: {} ({}%, {}/{} pages)",
                tick,
                task.task_id,
                status.status,
                status.progress,
                status.crawled_pages,
                status.total_pages
            );

            task.apply(&status);
            self.state.set_task(task.clone());
            self.publish();

            match status.status {
                TaskStatus::Pending | TaskStatus::Running => {}
                TaskStatus::Completed => {
                    handle.cancel();
                    tracing::info!("Crawl task {} completed after {} polls", task.task_id, tick);
                    return Ok(task);
                }
                TaskStatus::Failed => {
                    handle.cancel();
                    let detail = status
                        .error
                        .unwrap_or_else(|| UNKNOWN_ERROR_DETAIL.to_string());
                    let message = format!("Crawl failed: {}", detail);
                    let err = ScoutError::TaskFailed {
                        task_id: task.task_id.clone(),
                        detail,
                    };
                    return Err(self.fail(message, err));
                }
            }
        }

        let err = ScoutError::PollCancelled {
            task_id: task.task_id.clone(),
        };
        Err(self.fail("Crawl status polling was cancelled".to_string(), err))
    }

    /// Report generation followed by the remote clear
    async fn run_report(&mut self) -> Result<ReportResult, ScoutError> {
        self.state.transition(SessionPhase::GeneratingReport)?;
        self.publish();

        let text = match self.api.generate_report(&self.credential).await {
            Ok(text) => text,
            Err(e) => {
                let message = format!("Failed to generate report: {}", e.user_message());
                return Err(self.fail(message, e.into()));
            }
        };

        let report = ReportResult::new(text);
        self.state.set_report(report.clone());
        self.notifications.success("AI SEO report generated successfully");
        self.state.transition(SessionPhase::ClearingRemoteData)?;
        self.publish();

        // The report is already delivered; a failed clear only gets a notification
        if let Err(e) = self.clear_remote().await {
            tracing::warn!("Clearing remote data after report failed: {}", e);
        }

        self.state.transition(SessionPhase::Idle)?;
        self.publish();
        Ok(report)
    }

    async fn clear_remote(&mut self) -> Result<(), ApiError> {
        let outcome = self.api.clear_database().await;
        self.state.clear_local_results();

        match &outcome {
            Ok(()) => self.notifications.success("Remote crawl data cleared"),
            Err(e) => self.notifications.error(format!(
                "Failed to clear remote data: {}",
                e.user_message()
            )),
        }

        outcome
    }

    fn ensure_idle(&mut self) -> Result<(), ScoutError> {
        let phase = self.state.phase();
        if phase.is_busy() {
            self.notifications
                .error(format!("Another operation is in progress ({})", phase));
            self.publish();
            return Err(ScoutError::SessionBusy { phase });
        }
        Ok(())
    }

    fn require_credential(&mut self, action: &str) -> Result<(), ScoutError> {
        if self.has_credential() {
            return Ok(());
        }

        self.state.set_credential_prompt(true);
        self.notifications.error(format!(
            "Please save your OpenAI API key before {}.",
            action
        ));
        self.publish();
        Err(ValidationError::MissingCredential.into())
    }

    /// Ends the current operation: back to `Idle` with an error notification
    fn fail(&mut self, message: String, err: ScoutError) -> ScoutError {
        tracing::error!("{}", err);
        let _ = self.state.transition(SessionPhase::Idle);
        self.notifications.error(message);
        self.publish();
        err
    }

    fn publish(&self) {
        self.snapshots.send_replace(self.snapshot());
    }
}
