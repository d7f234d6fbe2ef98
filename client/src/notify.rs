//! Single-slot transient notification channel (the snackbar).
//!
//! Policy: `show` replaces whatever is visible, it never queues; `hide`
//! closes the slot but keeps the last message and severity around so a view
//! can animate out gracefully. Auto-dismissal fires after a fixed delay
//! unless a newer `show` superseded the message. Clicks outside the message
//! are a view concern and never reach this channel.

use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sync::lock;

/// Default delay before an undismissed message hides itself.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(6);

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Confirmation of a completed action.
    Success,
    /// Something needs attention but nothing failed.
    Warning,
    /// An operation failed.
    Error,
}

/// Snapshot of the notification slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snackbar {
    /// Whether a message is currently visible.
    pub open: bool,
    /// Last message shown (kept after `hide`).
    pub message: String,
    /// Severity of the last message.
    pub severity: Severity,
}

impl Default for Snackbar {
    fn default() -> Self {
        Self {
            open: false,
            message: String::new(),
            severity: Severity::Info,
        }
    }
}

#[derive(Debug, Default)]
struct NotifyInner {
    snackbar: Snackbar,
    generation: u64,
}

/// The global notification channel. One visible message at a time.
#[derive(Debug)]
pub struct Notifications {
    inner: Mutex<NotifyInner>,
    dismiss_after: Duration,
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifications {
    /// Create a channel with the default auto-dismiss delay.
    #[must_use]
    pub fn new() -> Self {
        Self::with_dismiss_after(AUTO_DISMISS_AFTER)
    }

    /// Create a channel with a custom auto-dismiss delay.
    #[must_use]
    pub fn with_dismiss_after(dismiss_after: Duration) -> Self {
        Self {
            inner: Mutex::new(NotifyInner::default()),
            dismiss_after,
        }
    }

    /// Show a message, replacing the current one. Returns the generation to
    /// hand to [`Notifications::auto_dismiss`].
    pub fn show(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let mut inner = lock(&self.inner);
        inner.generation += 1;
        inner.snackbar = Snackbar {
            open: true,
            message: message.into(),
            severity,
        };
        inner.generation
    }

    /// Hide the slot, preserving the last message and severity.
    pub fn hide(&self) {
        lock(&self.inner).snackbar.open = false;
    }

    /// Current slot snapshot.
    #[must_use]
    pub fn snackbar(&self) -> Snackbar {
        lock(&self.inner).snackbar.clone()
    }

    /// Generation of the most recent `show`. Lets a consumer drive
    /// [`Notifications::auto_dismiss`] for a message raised elsewhere, such
    /// as the global failures the HTTP adapter announces.
    #[must_use]
    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    /// Hide the message of `generation` after the configured delay, unless
    /// a newer `show` replaced it in the meantime. The caller drives this
    /// future (typically by spawning it next to the `show`).
    pub async fn auto_dismiss(&self, generation: u64) {
        tokio::time::sleep(self.dismiss_after).await;
        let mut inner = lock(&self.inner);
        if inner.generation == generation {
            inner.snackbar.open = false;
        }
    }
}
