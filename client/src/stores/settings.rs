//! Settings store: the platform-wide settings document.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::{dispatch, dispatch_with};
use crate::domain::ApiResult;
use crate::domain::models::Settings;
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::sync::lock;

const FETCH_FALLBACK: &str = "Failed to fetch settings";
const UPDATE_FALLBACK: &str = "Failed to update settings";
const UPDATED_MESSAGE: &str = "Settings updated successfully";

#[derive(Debug, Default)]
struct SettingsState {
    settings: RequestState<Settings>,
    success_message: Option<String>,
}

/// Store for the admin-managed platform settings.
pub struct SettingsStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<SettingsState>,
}

impl<T: HttpTransport> SettingsStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(SettingsState::default()),
        }
    }

    /// Replace the settings document from the server.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            settings,
            FETCH_FALLBACK,
            self.client.get::<Settings>("/api/settings")
        )
    }

    /// Save the settings document; the server's copy replaces the snapshot.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn update(&self, settings: &Settings) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            settings,
            UPDATE_FALLBACK,
            self.client.put::<_, Settings>("/api/settings", settings),
            |state: &mut SettingsState, ticket, payload: Settings| {
                if state.settings.succeed(ticket, payload) {
                    state.success_message = Some(UPDATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Snapshot of the settings slot.
    #[must_use]
    pub fn settings(&self) -> RequestState<Settings> {
        lock(&self.state).settings.clone()
    }

    /// Message of the last successful update, until cleared.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        lock(&self.state).success_message.clone()
    }

    /// Clear the inline error.
    pub fn clear_error(&self) {
        lock(&self.state).settings.clear_error();
    }

    /// Clear the last success message.
    pub fn clear_success(&self) {
        lock(&self.state).success_message = None;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use serde_json::json;

    use super::*;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};
    use crate::notify::Notifications;
    use crate::session::SessionProvider;

    fn store_with(transport: StubTransport) -> SettingsStore<StubTransport> {
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryCredentialStore::new())));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(Notifications::new()),
        ));
        SettingsStore::new(client)
    }

    #[tokio::test]
    async fn update_replaces_the_document_and_sets_the_message() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({"schoolName": "Green Valley", "maxDailySpendLimit": 500.0}),
        );
        let store = store_with(transport);

        let settings = Settings {
            school_name: "Green Valley".to_owned(),
            contact_email: None,
            contact_phone: None,
            notification_enabled: false,
            allow_parent_registration: true,
            allow_vendor_registration: false,
            max_daily_spend_limit: 500.0,
        };
        store.update(&settings).await.expect("update succeeds");

        assert_eq!(
            store.settings().data().map(|s| s.school_name.clone()),
            Some("Green Valley".to_owned())
        );
        assert_eq!(store.success_message(), Some(UPDATED_MESSAGE.to_owned()));
    }
}
