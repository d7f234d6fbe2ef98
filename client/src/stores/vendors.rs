//! Vendors store: the public vendor list plus the vendor-side console
//! (profile, status, earnings, withdrawals).

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::{dispatch, dispatch_with, ensure_positive_amount};
use crate::domain::ApiResult;
use crate::domain::models::{
    TransactionPage, Vendor, VendorProfileUpdate, VendorStatus, VendorStatusUpdate,
    WithdrawalReceipt, WithdrawalRequest,
};
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::sync::lock;

const FETCH_FALLBACK: &str = "Failed to fetch vendors";
const PROFILE_FALLBACK: &str = "Failed to fetch vendor profile";
const UPDATE_PROFILE_FALLBACK: &str = "Failed to update profile";
const UPDATE_STATUS_FALLBACK: &str = "Failed to update status";
const TRANSACTIONS_FALLBACK: &str = "Failed to fetch vendor transactions";
const WITHDRAW_FALLBACK: &str = "Withdrawal request failed";

const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully";
const WITHDRAWAL_MESSAGE: &str = "Withdrawal requested";

#[derive(Debug, Default)]
struct VendorsState {
    vendors: RequestState<Vec<Vendor>>,
    profile: RequestState<Vendor>,
    transactions: RequestState<TransactionPage>,
    withdrawal: RequestState<WithdrawalReceipt>,
    success_message: Option<String>,
}

/// Store for vendor listings and the vendor console.
pub struct VendorsStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<VendorsState>,
}

impl<T: HttpTransport> VendorsStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(VendorsState::default()),
        }
    }

    /// Replace the public vendor list.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_all(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            vendors,
            FETCH_FALLBACK,
            self.client.get::<Vec<Vendor>>("/api/vendors")
        )
    }

    /// Replace the authenticated vendor's own profile.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_profile(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            profile,
            PROFILE_FALLBACK,
            self.client.get::<Vendor>("/api/vendors/profile")
        )
    }

    /// Update the vendor's profile; the server's copy replaces the snapshot.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn update_profile(&self, update: &VendorProfileUpdate) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            profile,
            UPDATE_PROFILE_FALLBACK,
            self.client.put::<_, Vendor>("/api/vendors/profile", update),
            |state: &mut VendorsState, ticket, payload: Vendor| {
                if state.profile.succeed(ticket, payload) {
                    state.success_message = Some(PROFILE_UPDATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Toggle the vendor's operational status.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn update_status(&self, status: VendorStatus) -> ApiResult<()> {
        let body = VendorStatusUpdate { status };
        dispatch!(
            self.state,
            profile,
            UPDATE_STATUS_FALLBACK,
            self.client
                .patch::<_, Vendor>("/api/vendors/profile/status", &body)
        )
    }

    /// Replace the vendor's paged earnings history.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_transactions(&self, page: u32, limit: u32) -> ApiResult<()> {
        let query = vec![
            ("page".to_owned(), page.to_string()),
            ("limit".to_owned(), limit.to_string()),
        ];
        dispatch!(
            self.state,
            transactions,
            TRANSACTIONS_FALLBACK,
            self.client
                .get_query::<TransactionPage>("/api/vendors/transactions", query)
        )
    }

    /// Request a payout of accumulated earnings.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a
    /// non-positive amount.
    pub async fn request_withdrawal(&self, amount: f64) -> ApiResult<()> {
        ensure_positive_amount(amount)?;
        let body = WithdrawalRequest { amount };
        dispatch_with!(
            self.state,
            withdrawal,
            WITHDRAW_FALLBACK,
            self.client
                .post::<_, WithdrawalReceipt>("/api/vendors/withdraw", &body),
            |state: &mut VendorsState, ticket, payload: WithdrawalReceipt| {
                let message = payload
                    .message
                    .clone()
                    .unwrap_or_else(|| WITHDRAWAL_MESSAGE.to_owned());
                if state.withdrawal.succeed(ticket, payload) {
                    state.success_message = Some(message);
                }
            }
        )
    }

    /// Snapshot of the public vendor list slot.
    #[must_use]
    pub fn vendors(&self) -> RequestState<Vec<Vendor>> {
        lock(&self.state).vendors.clone()
    }

    /// Snapshot of the vendor profile slot.
    #[must_use]
    pub fn profile(&self) -> RequestState<Vendor> {
        lock(&self.state).profile.clone()
    }

    /// Snapshot of the earnings history slot.
    #[must_use]
    pub fn transactions(&self) -> RequestState<TransactionPage> {
        lock(&self.state).transactions.clone()
    }

    /// Snapshot of the last withdrawal receipt slot.
    #[must_use]
    pub fn withdrawal(&self) -> RequestState<WithdrawalReceipt> {
        lock(&self.state).withdrawal.clone()
    }

    /// Message of the last successful mutation, until cleared.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        lock(&self.state).success_message.clone()
    }

    /// Clear inline errors on every slot.
    pub fn clear_error(&self) {
        let mut state = lock(&self.state);
        state.vendors.clear_error();
        state.profile.clear_error();
        state.transactions.clear_error();
        state.withdrawal.clear_error();
    }

    /// Clear the last success message.
    pub fn clear_success(&self) {
        lock(&self.state).success_message = None;
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use request_state::RequestStatus;
    use serde_json::json;

    use super::*;
    use crate::domain::ApiError;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};
    use crate::notify::Notifications;
    use crate::session::SessionProvider;

    fn store_with(transport: StubTransport) -> VendorsStore<StubTransport> {
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryCredentialStore::new())));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(Notifications::new()),
        ));
        VendorsStore::new(client)
    }

    fn vendor_json(status: &str) -> serde_json::Value {
        json!({
            "_id": "v1",
            "businessName": "Chai Point",
            "description": "tea and snacks",
            "rating": 4.5,
            "totalRatings": 120,
            "status": status,
            "categories": ["beverages"]
        })
    }

    #[tokio::test]
    async fn update_status_replaces_the_profile_snapshot() {
        let transport = StubTransport::new();
        transport.push_json(200, &vendor_json("inactive"));
        let store = store_with(transport.clone());

        store
            .update_status(VendorStatus::Inactive)
            .await
            .expect("status update succeeds");
        assert_eq!(
            store.profile().data().map(|vendor| vendor.status),
            Some(VendorStatus::Inactive)
        );

        let request = &transport.requests()[0];
        assert_eq!(request.path, "/api/vendors/profile/status");
        assert_eq!(request.method.as_str(), "PATCH");
    }

    #[tokio::test]
    async fn withdrawal_records_the_receipt_and_message() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({"_id": "w1", "amount": 250.0, "status": "pending"}),
        );
        let store = store_with(transport);

        store
            .request_withdrawal(250.0)
            .await
            .expect("withdrawal succeeds");
        assert_eq!(store.withdrawal().status(), RequestStatus::Succeeded);
        assert_eq!(store.success_message(), Some(WITHDRAWAL_MESSAGE.to_owned()));
    }

    #[tokio::test]
    async fn non_positive_withdrawals_fail_fast() {
        let transport = StubTransport::new();
        let store = store_with(transport.clone());

        let error = store.request_withdrawal(-1.0).await.expect_err("rejected");
        assert!(matches!(error, ApiError::InvalidRequest { .. }));
        assert!(transport.requests().is_empty());
    }
}
