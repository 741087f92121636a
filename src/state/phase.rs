/// Session phase definitions for the crawl-and-report lifecycle
///
/// This module defines every phase a session controller can be in and which
/// moves between them are legal.
use std::fmt;

/// Represents the current phase of a session controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    /// Nothing in flight
    #[default]
    Idle,

    /// Waiting for the backend to accept a crawl request
    Submitting,

    /// Crawl accepted; status is polled on a fixed interval
    Polling,

    /// Waiting for the backend to produce the report
    GeneratingReport,

    /// Asking the backend to drop its collected data
    ClearingRemoteData,
}

impl SessionPhase {
    /// Returns true if an operation is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Returns true if `to` is a legal next phase
    ///
    /// Returning to `Idle` is always legal. From `Idle` a session can start a
    /// crawl, a manual report, or a manual clear.
    pub fn can_transition_to(&self, to: SessionPhase) -> bool {
        use SessionPhase::*;

        matches!(
            (self, to),
            (_, Idle)
                | (Idle, Submitting)
                | (Idle, GeneratingReport)
                | (Idle, ClearingRemoteData)
                | (Submitting, Polling)
                | (Polling, GeneratingReport)
                | (GeneratingReport, ClearingRemoteData)
        )
    }

    /// Short label for status lines
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Submitting => "submitting",
            Self::Polling => "polling",
            Self::GeneratingReport => "generating report",
            Self::ClearingRemoteData => "clearing remote data",
        }
    }
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
