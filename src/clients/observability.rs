//! Failure recording for authentication and timeout errors.
//!
//! The client records these two kinds whether the caller later propagates
//! the error or swallows it through [`safe`](crate::rest::safe). The
//! recorder keeps in-process counters and a bounded event log; exporting
//! them is left to the host application.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};

use crate::clients::errors::{ApiError, ErrorKind};

/// Number of events kept in the log; older events are dropped first.
pub const MAX_RECORDED_EVENTS: usize = 100;

/// A recorded failure.
#[derive(Clone, Debug, PartialEq)]
pub struct FailureEvent {
    /// Classification of the failure.
    pub kind: ErrorKind,
    /// The endpoint that failed.
    pub endpoint: String,
    /// HTTP status, if a response was received.
    pub status: Option<u16>,
    /// When the failure was observed.
    pub at: DateTime<Utc>,
}

/// Observability sink for authentication failures and timeouts.
///
/// Share one recorder between clients with `Arc`.
///
/// ```rust
/// use storefront_api::clients::{ApiError, ErrorKind, FailureRecorder};
///
/// let recorder = FailureRecorder::new();
/// recorder.record(&ApiError {
///     kind: ErrorKind::Authentication,
///     status: Some(401),
///     message: "Sorry, you cannot list resources.".to_string(),
///     endpoint: "products".to_string(),
///     code: None,
///     details: None,
/// });
/// assert_eq!(recorder.auth_failures(), 1);
/// assert_eq!(recorder.timeouts(), 0);
/// ```
#[derive(Debug, Default)]
pub struct FailureRecorder {
    auth_failures: AtomicU64,
    timeouts: AtomicU64,
    events: Mutex<VecDeque<FailureEvent>>,
}

impl FailureRecorder {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if errors of this kind are recorded.
    #[must_use]
    pub const fn tracks(kind: ErrorKind) -> bool {
        matches!(kind, ErrorKind::Authentication | ErrorKind::Timeout)
    }

    /// Records `error` if its kind is tracked. Other kinds are ignored.
    pub fn record(&self, error: &ApiError) {
        let counter = match error.kind {
            ErrorKind::Authentication => &self.auth_failures,
            ErrorKind::Timeout => &self.timeouts,
            _ => return,
        };
        let count = counter.fetch_add(1, Ordering::Relaxed) + 1;

        tracing::warn!(
            kind = %error.kind,
            endpoint = %error.endpoint,
            status = ?error.status,
            count,
            "Recorded upstream failure"
        );

        let mut events = self.lock_events();
        if events.len() == MAX_RECORDED_EVENTS {
            events.pop_front();
        }
        events.push_back(FailureEvent {
            kind: error.kind,
            endpoint: error.endpoint.clone(),
            status: error.status,
            at: Utc::now(),
        });
    }

    /// Total authentication failures recorded.
    #[must_use]
    pub fn auth_failures(&self) -> u64 {
        self.auth_failures.load(Ordering::Relaxed)
    }

    /// Total timeouts recorded.
    #[must_use]
    pub fn timeouts(&self) -> u64 {
        self.timeouts.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the most recent events, oldest first.
    #[must_use]
    pub fn recent(&self) -> Vec<FailureEvent> {
        self.lock_events().iter().cloned().collect()
    }

    fn lock_events(&self) -> MutexGuard<'_, VecDeque<FailureEvent>> {
        // A panic while holding the lock cannot leave the deque half-written.
        self.events
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
