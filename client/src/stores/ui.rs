//! UI store: chrome state that is not server-backed.
//!
//! Sidebar, theme, dialog visibility, and the persistent notice list. The
//! theme survives restarts through the credential store; everything else is
//! session-scoped. The transient snackbar lives in
//! [`Notifications`](crate::notify::Notifications), reachable from here.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::CredentialStore;
use crate::notify::{Notifications, Severity};
use crate::sync::lock;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light scheme (the default).
    #[default]
    Light,
    /// Dark scheme.
    Dark,
}

impl Theme {
    /// Persisted representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other scheme.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }
}

/// A persistent notice, unlike the transient snackbar: it stays until
/// removed by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notice {
    /// Client-assigned identifier.
    pub id: Uuid,
    /// Notice text.
    pub message: String,
    /// Visual weight.
    pub severity: Severity,
}

#[derive(Debug, Default)]
struct UiState {
    sidebar_open: bool,
    theme: Theme,
    open_dialog: Option<String>,
    notices: Vec<Notice>,
}

/// Store for client-side chrome state.
pub struct UiStore {
    credentials: Arc<dyn CredentialStore>,
    notifications: Arc<Notifications>,
    state: Mutex<UiState>,
}

impl UiStore {
    /// Create the store, restoring the persisted theme when one exists.
    /// An unreadable or unknown stored value falls back to the default.
    #[must_use]
    pub fn new(credentials: Arc<dyn CredentialStore>, notifications: Arc<Notifications>) -> Self {
        let theme = match credentials.load_theme() {
            Ok(stored) => stored
                .as_deref()
                .and_then(Theme::parse)
                .unwrap_or_default(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to restore theme preference");
                Theme::default()
            }
        };
        Self {
            credentials,
            notifications,
            state: Mutex::new(UiState {
                theme,
                ..UiState::default()
            }),
        }
    }

    /// Flip the sidebar open/closed.
    pub fn toggle_sidebar(&self) {
        let mut state = lock(&self.state);
        state.sidebar_open = !state.sidebar_open;
    }

    /// Whether the sidebar is open.
    #[must_use]
    pub fn is_sidebar_open(&self) -> bool {
        lock(&self.state).sidebar_open
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        lock(&self.state).theme
    }

    /// Set and persist the theme. A persistence failure is logged; the
    /// in-memory theme still changes.
    pub fn set_theme(&self, theme: Theme) {
        lock(&self.state).theme = theme;
        if let Err(err) = self.credentials.save_theme(theme.as_str()) {
            tracing::warn!(error = %err, "failed to persist theme preference");
        }
    }

    /// Switch to the other theme and persist the choice.
    pub fn toggle_theme(&self) {
        let next = self.theme().toggled();
        self.set_theme(next);
    }

    /// Open the named dialog. At most one dialog is open at a time, so this
    /// implicitly closes any dialog already showing.
    pub fn open_dialog(&self, name: impl Into<String>) {
        lock(&self.state).open_dialog = Some(name.into());
    }

    /// Close the open dialog. Closing when none is open is a no-op.
    pub fn close_dialog(&self) {
        lock(&self.state).open_dialog = None;
    }

    /// Name of the open dialog, when one is showing.
    #[must_use]
    pub fn current_dialog(&self) -> Option<String> {
        lock(&self.state).open_dialog.clone()
    }

    /// Whether the named dialog is the one currently open.
    #[must_use]
    pub fn is_dialog_open(&self, name: &str) -> bool {
        lock(&self.state).open_dialog.as_deref() == Some(name)
    }

    /// Add a persistent notice and return its id.
    pub fn add_notice(&self, message: impl Into<String>, severity: Severity) -> Uuid {
        let notice = Notice {
            id: Uuid::new_v4(),
            message: message.into(),
            severity,
        };
        let id = notice.id;
        lock(&self.state).notices.push(notice);
        id
    }

    /// Remove a notice by id. Removing an unknown id is a no-op.
    pub fn remove_notice(&self, id: Uuid) {
        lock(&self.state).notices.retain(|notice| notice.id != id);
    }

    /// Current notices, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        lock(&self.state).notices.clone()
    }

    /// The transient snackbar channel.
    #[must_use]
    pub fn notifications(&self) -> &Arc<Notifications> {
        &self.notifications
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ports::MemoryCredentialStore;

    fn store_with(credentials: Arc<dyn CredentialStore>) -> UiStore {
        UiStore::new(credentials, Arc::new(Notifications::new()))
    }

    #[test]
    fn theme_persists_across_reconstruction() {
        let credentials: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        let store = store_with(credentials.clone());
        assert_eq!(store.theme(), Theme::Light);

        store.toggle_theme();
        assert_eq!(store.theme(), Theme::Dark);

        let rebuilt = store_with(credentials);
        assert_eq!(rebuilt.theme(), Theme::Dark);
    }

    #[test]
    fn an_unknown_stored_theme_falls_back_to_the_default() {
        let credentials = Arc::new(MemoryCredentialStore::new());
        credentials.save_theme("sepia").expect("seed");
        let store = store_with(credentials);
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn opening_a_dialog_replaces_the_one_already_showing() {
        let store = store_with(Arc::new(MemoryCredentialStore::new()));
        store.open_dialog("add-money");
        store.open_dialog("order-meal");

        assert!(!store.is_dialog_open("add-money"));
        assert!(store.is_dialog_open("order-meal"));
        assert_eq!(store.current_dialog(), Some("order-meal".to_owned()));

        store.close_dialog();
        store.close_dialog();
        assert_eq!(store.current_dialog(), None);
    }

    #[test]
    fn notices_are_removed_by_id() {
        let store = store_with(Arc::new(MemoryCredentialStore::new()));
        let first = store.add_notice("fees due", Severity::Warning);
        let second = store.add_notice("event tomorrow", Severity::Info);

        store.remove_notice(first);
        let remaining: Vec<Uuid> = store.notices().into_iter().map(|notice| notice.id).collect();
        assert_eq!(remaining, vec![second]);

        store.remove_notice(first);
        assert_eq!(store.notices().len(), 1);
    }
}
