//! Dashboard store: the admin dashboard snapshot.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::dispatch;
use crate::domain::ApiResult;
use crate::domain::models::DashboardSnapshot;
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::sync::lock;

const FETCH_FALLBACK: &str = "Failed to fetch dashboard data";

#[derive(Debug, Default)]
struct DashboardState {
    snapshot: RequestState<DashboardSnapshot>,
}

/// Store for the admin dashboard aggregates.
pub struct DashboardStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<DashboardState>,
}

impl<T: HttpTransport> DashboardStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(DashboardState::default()),
        }
    }

    /// Replace the dashboard snapshot from the server.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_stats(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            snapshot,
            FETCH_FALLBACK,
            self.client.get::<DashboardSnapshot>("/api/dashboard/stats")
        )
    }

    /// Snapshot of the dashboard slot.
    #[must_use]
    pub fn snapshot(&self) -> RequestState<DashboardSnapshot> {
        lock(&self.state).snapshot.clone()
    }

    /// Clear the inline error.
    pub fn clear_error(&self) {
        lock(&self.state).snapshot.clear_error();
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use request_state::RequestStatus;
    use serde_json::json;

    use super::*;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};
    use crate::notify::Notifications;
    use crate::session::SessionProvider;

    #[tokio::test]
    async fn load_stats_replaces_the_snapshot() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({
                "stats": {"totalUsers": 42, "totalRevenue": 1234.5, "activeEvents": 3, "activeVendors": 7},
                "recentTransactions": [],
                "upcomingEvents": []
            }),
        );
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryCredentialStore::new())));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(Notifications::new()),
        ));
        let store = DashboardStore::new(client);

        store.load_stats().await.expect("load succeeds");
        let snapshot = store.snapshot();
        assert_eq!(snapshot.status(), RequestStatus::Succeeded);
        assert_eq!(
            snapshot.data().map(|snapshot| snapshot.stats.total_users),
            Some(42)
        );
    }
}
