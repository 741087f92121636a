//! Auto-expiring user notifications
//!
//! At most one notification is visible at a time; a new one replaces the
//! current one. Every notification is also appended to a history so replaced
//! ones remain observable.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Default time a notification stays visible
pub const DEFAULT_TTL: Duration = Duration::from_secs(4);

/// Whether a notification reports success or failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A single user-facing message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Error)
    }

    fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
            created_at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}

/// Holds the visible notification and everything emitted so far
#[derive(Debug)]
pub struct NotificationCenter {
    ttl: Duration,
    current: Option<(Notification, Instant)>,
    history: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            current: None,
            history: Vec::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Shows `notification`, replacing whatever was visible
    pub fn push(&mut self, notification: Notification) {
        tracing::debug!("Notification ({}): {}", notification.kind, notification.message);
        self.history.push(notification.clone());
        self.current = Some((notification, Instant::now()));
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(Notification::success(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Notification::error(message));
    }

    /// The visible notification, if it has not expired
    pub fn visible(&self) -> Option<&Notification> {
        self.visible_at(Instant::now())
    }

    /// The notification visible at `now`
    pub fn visible_at(&self, now: Instant) -> Option<&Notification> {
        match &self.current {
            Some((notification, shown_at))
                if now.saturating_duration_since(*shown_at) < self.ttl =>
            {
                Some(notification)
            }
            _ => None,
        }
    }

    /// When the visible notification expires, if one is visible
    pub fn expires_at(&self) -> Option<Instant> {
        self.current
            .as_ref()
            .map(|(_, shown_at)| *shown_at + self.ttl)
            .filter(|expires_at| Instant::now() < *expires_at)
    }

    /// Hides the visible notification early
    pub fn dismiss(&mut self) {
        self.current = None;
    }

    /// Every notification pushed, oldest first
    pub fn history(&self) -> &[Notification] {
        &self.history
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
