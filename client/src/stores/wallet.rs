//! Wallet store: balance, recent transactions, and paged history.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::{dispatch, dispatch_with, ensure_id, ensure_positive_amount};
use crate::domain::ApiResult;
use crate::domain::models::{
    DepositRequest, PaymentRequest, TransactionPage, WalletMutation, WalletSummary,
    RECENT_TRANSACTION_LIMIT,
};
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::sync::lock;

const BALANCE_FALLBACK: &str = "Failed to fetch wallet balance";
const DEPOSIT_FALLBACK: &str = "Failed to add money";
const PAY_FALLBACK: &str = "Payment failed";
const HISTORY_FALLBACK: &str = "Failed to fetch transactions";

#[derive(Debug, Default)]
struct WalletState {
    summary: RequestState<WalletSummary>,
    history: RequestState<TransactionPage>,
}

/// Store for the user's digital wallet.
pub struct WalletStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<WalletState>,
}

impl<T: HttpTransport> WalletStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(WalletState::default()),
        }
    }

    /// Replace the balance and recent-transactions summary.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_balance(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            summary,
            BALANCE_FALLBACK,
            self.client.get::<WalletSummary>("/api/wallet/balance")
        )
    }

    /// Add money to the wallet. The server's new balance replaces the old
    /// one and the created transaction is prepended to the recent list.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a
    /// non-positive amount.
    pub async fn add_money(&self, amount: f64) -> ApiResult<()> {
        ensure_positive_amount(amount)?;
        let body = DepositRequest { amount };
        dispatch_with!(
            self.state,
            summary,
            DEPOSIT_FALLBACK,
            self.client
                .post::<_, WalletMutation>("/api/wallet/deposit", &body),
            |state: &mut WalletState, ticket, payload: WalletMutation| {
                state
                    .summary
                    .merge(ticket, |slot| apply_mutation(slot, payload));
            }
        )
    }

    /// Pay a vendor from the wallet, with the same merge as a deposit.
    ///
    /// # Errors
    /// Returns the classified failure (insufficient balance arrives as a
    /// rejection carrying the server's message), or
    /// [`ApiError::InvalidRequest`](crate::domain::ApiError) for a
    /// non-positive amount or blank vendor id.
    pub async fn pay(&self, request: &PaymentRequest) -> ApiResult<()> {
        ensure_positive_amount(request.amount)?;
        ensure_id(&request.vendor_id, "vendor id")?;
        dispatch_with!(
            self.state,
            summary,
            PAY_FALLBACK,
            self.client
                .post::<_, WalletMutation>("/api/wallet/pay", request),
            |state: &mut WalletState, ticket, payload: WalletMutation| {
                state
                    .summary
                    .merge(ticket, |slot| apply_mutation(slot, payload));
            }
        )
    }

    /// Replace the paged transaction history.
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
            history,
            HISTORY_FALLBACK,
            self.client
                .get_query::<TransactionPage>("/api/wallet/transactions", query)
        )
    }

    /// Snapshot of the balance summary slot.
    #[must_use]
    pub fn summary(&self) -> RequestState<WalletSummary> {
        lock(&self.state).summary.clone()
    }

    /// Snapshot of the paged history slot.
    #[must_use]
    pub fn history(&self) -> RequestState<TransactionPage> {
        lock(&self.state).history.clone()
    }

    /// Clear inline errors on both slots.
    pub fn clear_error(&self) {
        let mut state = lock(&self.state);
        state.summary.clear_error();
        state.history.clear_error();
    }
}

/// Merge a server mutation into the summary: the balance is authoritative,
/// the new transaction goes first, and the recent list stays capped.
fn apply_mutation(slot: &mut Option<WalletSummary>, mutation: WalletMutation) {
    let summary = slot.get_or_insert_with(WalletSummary::default);
    summary.balance = mutation.balance;
    summary.recent_transactions.insert(0, mutation.transaction);
    summary.recent_transactions.truncate(RECENT_TRANSACTION_LIMIT);
}
