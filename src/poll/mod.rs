//! Fixed-interval poll timer with an explicit cancel handle
//!
//! This module handles:
//! - Ticking on a fixed period, first tick one period after start
//! - Never bursting: a tick that is late because the caller was busy is
//!   delayed rather than followed by catch-up ticks
//! - Cancellation through a cloneable handle, observed exactly once

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

/// Default period between crawl-status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(3000);

#[derive(Debug, Default)]
struct PollShared {
    cancelled: AtomicBool,
    ticks: AtomicU64,
}

/// Cancels a running `PollTimer` and reports how often it fired
#[derive(Debug, Clone, Default)]
pub struct PollHandle {
    shared: Arc<PollShared>,
}

impl PollHandle {
    /// Stops the timer
    ///
    /// Returns `true` for the call that actually cancelled it and `false` for
    /// every later call.
    pub fn cancel(&self) -> bool {
        !self.shared.cancelled.swap(true, Ordering::SeqCst)
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.cancelled.load(Ordering::SeqCst)
    }

    /// Number of ticks delivered so far
    pub fn ticks(&self) -> u64 {
        self.shared.ticks.load(Ordering::SeqCst)
    }
}

/// A periodic timer driven by `tick().await`
pub struct PollTimer {
    interval: Interval,
    handle: PollHandle,
}

impl PollTimer {
    /// Starts a timer whose first tick fires one `period` from now
    ///
    /// # Panics
    ///
    /// Panics if `period` is zero, as `tokio::time::interval_at` does.
    pub fn start(period: Duration) -> Self {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            interval,
            handle: PollHandle::default(),
        }
    }

    /// A handle sharing this timer's cancel flag
    pub fn handle(&self) -> PollHandle {
        self.handle.clone()
    }

    /// Waits for the next tick
    ///
    /// Returns the 1-based tick number, or `None` once the timer has been
    /// cancelled (including a cancel that lands while waiting).
    pub async fn tick(&mut self) -> Option<u64> {
        if self.handle.is_cancelled() {
            return None;
        }

        self.interval.tick().await;

        if self.handle.is_cancelled() {
            return None;
        }

        Some(self.handle.shared.ticks.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_reports_true_once() {
        let handle = PollHandle::default();
        assert!(!handle.is_cancelled());
        assert!(handle.cancel());
        assert!(!handle.cancel());
        assert!(handle.is_cancelled());
    }

    #[tokio::test]
    async fn test_ticks_are_counted() {
        let mut timer = PollTimer::start(Duration::from_millis(5));
        let handle = timer.handle();

        assert_eq!(timer.tick().await, Some(1));
        assert_eq!(timer.tick().await, Some(2));
        assert_eq!(handle.ticks(), 2);
    }

    #[tokio::test]
    async fn test_no_ticks_after_cancel() {
        let mut timer = PollTimer::start(Duration::from_millis(5));
        let handle = timer.handle();

        assert_eq!(timer.tick().await, Some(1));
        assert!(handle.cancel());

        assert_eq!(timer.tick().await, None);
        assert_eq!(timer.tick().await, None);
        assert_eq!(handle.ticks(), 1);
    }

    #[tokio::test]
    async fn test_first_tick_waits_one_period() {
        let period = Duration::from_millis(30);
        let started = Instant::now();
        let mut timer = PollTimer::start(period);

        timer.tick().await;
        assert!(started.elapsed() >= period);
    }
}
