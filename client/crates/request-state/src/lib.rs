//! Request-lifecycle state container shared by every domain store.
//!
//! A [`RequestState`] tracks the last-known-good payload of one server-backed
//! collection together with the lifecycle of the request currently refreshing
//! it. The state machine is deliberately small:
//!
//! ```text
//! Idle ──begin──▶ Pending ──succeed/merge──▶ Succeeded ──begin──▶ Pending …
//!                    │
//!                    └───────fail──────────▶ Failed ────begin──▶ Pending …
//! ```
//!
//! ## Invariants
//! - `error` is only populated while the status is [`RequestStatus::Failed`];
//!   [`RequestState::begin`] clears it, not the failure itself.
//! - A failure never clears `data`: views keep rendering the last good
//!   snapshot while an inline error is shown.
//! - Every `begin` issues a fresh [`Ticket`]. Resolutions presenting a stale
//!   ticket are ignored, so when two dispatches of the same operation overlap
//!   the *last dispatched* one wins regardless of network ordering.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of the request currently tracked by a [`RequestState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RequestStatus {
    /// No request has been dispatched yet.
    #[default]
    Idle,
    /// A request is in flight; `data` still holds the previous snapshot.
    Pending,
    /// The most recent request resolved successfully.
    Succeeded,
    /// The most recent request failed; `error` carries the message.
    Failed,
}

/// Opaque fencing token returned by [`RequestState::begin`].
///
/// A resolution is only applied when it presents the ticket of the most
/// recently issued dispatch; everything else is treated as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Snapshot of one server-backed collection and its request lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestState<T> {
    data: Option<T>,
    status: RequestStatus,
    error: Option<String>,
    #[serde(skip)]
    epoch: u64,
}

impl<T> Default for RequestState<T> {
    fn default() -> Self {
        Self {
            data: None,
            status: RequestStatus::Idle,
            error: None,
            epoch: 0,
        }
    }
}

impl<T> RequestState<T> {
    /// Create an empty container in the [`RequestStatus::Idle`] state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a new dispatch: transition to `Pending`, clear any previous
    /// error, and issue the fencing ticket the resolution must present.
    ///
    /// Re-entrant from any status; calling `begin` while an earlier dispatch
    /// is still in flight invalidates that dispatch's ticket.
    pub fn begin(&mut self) -> Ticket {
        self.epoch += 1;
        self.status = RequestStatus::Pending;
        self.error = None;
        Ticket(self.epoch)
    }

    /// Resolve the dispatch successfully, replacing the snapshot wholesale.
    ///
    /// Returns `false` (and leaves the state untouched) when `ticket` is
    /// stale.
    pub fn succeed(&mut self, ticket: Ticket, data: T) -> bool {
        self.merge(ticket, |slot| *slot = Some(data))
    }

    /// Resolve the dispatch successfully with a deterministic in-place merge
    /// of the snapshot (append, remove-by-id, truncate, ...).
    ///
    /// Returns `false` (and leaves the state untouched) when `ticket` is
    /// stale.
    pub fn merge(&mut self, ticket: Ticket, apply: impl FnOnce(&mut Option<T>)) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        apply(&mut self.data);
        self.status = RequestStatus::Succeeded;
        self.error = None;
        true
    }

    /// Resolve the dispatch as failed. `data` keeps its last good value.
    ///
    /// Returns `false` (and leaves the state untouched) when `ticket` is
    /// stale.
    pub fn fail(&mut self, ticket: Ticket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.status = RequestStatus::Failed;
        self.error = Some(message.into());
        true
    }

    /// Last-known-good snapshot, if any request has ever succeeded.
    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn status(&self) -> RequestStatus {
        self.status
    }

    /// Failure message of the most recent dispatch, when it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a dispatch is currently in flight.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Clear the error without touching data or issuing a new dispatch.
    ///
    /// A cleared failure reads as `Idle` so views stop rendering the inline
    /// message.
    pub fn clear_error(&mut self) {
        if self.status == RequestStatus::Failed {
            self.status = RequestStatus::Idle;
        }
        self.error = None;
    }

    /// Drop the snapshot and return to `Idle`, invalidating in-flight
    /// tickets.
    pub fn reset(&mut self) {
        self.epoch += 1;
        self.data = None;
        self.status = RequestStatus::Idle;
        self.error = None;
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.epoch
    }
}

#[cfg(test)]
mod tests {
    //! State-machine and fencing coverage.

    use rstest::rstest;

    use super::*;

    #[test]
    fn begins_pending_and_clears_error() {
        let mut state = RequestState::<Vec<u32>>::new();
        let ticket = state.begin();
        state.fail(ticket, "boom");
        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.error(), Some("boom"));

        state.begin();
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.error(), None);
    }

    #[test]
    fn success_replaces_data_and_clears_error() {
        let mut state = RequestState::new();
        let ticket = state.begin();
        assert!(state.succeed(ticket, vec![1, 2, 3]));
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.data(), Some(&vec![1, 2, 3]));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn failure_keeps_last_good_data() {
        let mut state = RequestState::new();
        let ticket = state.begin();
        state.succeed(ticket, vec![7]);

        let ticket = state.begin();
        assert!(state.fail(ticket, "server said no"));
        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.data(), Some(&vec![7]));
        assert_eq!(state.error(), Some("server said no"));
    }

    #[test]
    fn merge_applies_deterministic_update() {
        let mut state = RequestState::new();
        let ticket = state.begin();
        state.succeed(ticket, vec![1]);

        let ticket = state.begin();
        assert!(state.merge(ticket, |data| {
            if let Some(items) = data.as_mut() {
                items.push(2);
            }
        }));
        assert_eq!(state.data(), Some(&vec![1, 2]));
        assert_eq!(state.status(), RequestStatus::Succeeded);
    }

    #[test]
    fn stale_ticket_resolution_is_ignored() {
        let mut state = RequestState::new();
        let first = state.begin();
        let second = state.begin();

        // The first dispatch resolves after the second was issued.
        assert!(!state.succeed(first, vec![1]));
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.data(), None);

        assert!(state.succeed(second, vec![2]));
        assert_eq!(state.data(), Some(&vec![2]));
    }

    #[test]
    fn stale_failure_does_not_clobber_newer_success() {
        let mut state = RequestState::new();
        let first = state.begin();
        let second = state.begin();

        assert!(state.succeed(second, vec![9]));
        assert!(!state.fail(first, "too late"));
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.error(), None);
        assert_eq!(state.data(), Some(&vec![9]));
    }

    #[rstest]
    #[case(RequestStatus::Idle)]
    #[case(RequestStatus::Succeeded)]
    #[case(RequestStatus::Failed)]
    fn begin_is_reentrant_from(#[case] from: RequestStatus) {
        let mut state = RequestState::<u8>::new();
        match from {
            RequestStatus::Idle => {}
            RequestStatus::Succeeded => {
                let ticket = state.begin();
                state.succeed(ticket, 1);
            }
            RequestStatus::Failed => {
                let ticket = state.begin();
                state.fail(ticket, "nope");
            }
            RequestStatus::Pending => unreachable!("not a test case"),
        }
        state.begin();
        assert_eq!(state.status(), RequestStatus::Pending);
    }

    #[test]
    fn clear_error_leaves_data_alone() {
        let mut state = RequestState::new();
        let ticket = state.begin();
        state.succeed(ticket, vec![4]);
        let ticket = state.begin();
        state.fail(ticket, "later");

        state.clear_error();
        assert_eq!(state.error(), None);
        assert_eq!(state.status(), RequestStatus::Idle);
        assert_eq!(state.data(), Some(&vec![4]));
    }

    #[test]
    fn reset_invalidates_inflight_tickets() {
        let mut state = RequestState::new();
        let ticket = state.begin();
        state.reset();
        assert!(!state.succeed(ticket, vec![1]));
        assert_eq!(state.status(), RequestStatus::Idle);
        assert_eq!(state.data(), None);
    }
}
