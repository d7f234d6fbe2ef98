//! Meals store: cafeteria menu, the user's ordered meals, and pickup tokens.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::{dispatch, dispatch_with, ensure_id};
use crate::domain::models::{Meal, MealDraft, MealOrderReceipt, MealOrderRequest, MealToken};
use crate::domain::ports::HttpTransport;
use crate::domain::{ApiError, ApiResult};
use crate::http::ApiClient;
use crate::sync::lock;

const FETCH_FALLBACK: &str = "Failed to fetch meals";
const FETCH_USER_FALLBACK: &str = "Failed to fetch your meals";
const FETCH_TOKENS_FALLBACK: &str = "Failed to fetch meal tokens";
const CREATE_FALLBACK: &str = "Failed to create meal";
const UPDATE_FALLBACK: &str = "Failed to update meal";
const ORDER_FALLBACK: &str = "Failed to place the order";
const CANCEL_TOKEN_FALLBACK: &str = "Failed to cancel the token";

const CREATED_MESSAGE: &str = "Meal created successfully";
const UPDATED_MESSAGE: &str = "Meal updated successfully";
const ORDERED_MESSAGE: &str = "Meal ordered successfully";
const TOKEN_CANCELLED_MESSAGE: &str = "Token cancelled";

#[derive(Debug, Default)]
struct MealsState {
    menu: RequestState<Vec<Meal>>,
    user_meals: RequestState<Vec<Meal>>,
    tokens: RequestState<Vec<MealToken>>,
    success_message: Option<String>,
}

/// Store for the cafeteria menu, user orders, and pickup tokens.
pub struct MealsStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<MealsState>,
}

impl<T: HttpTransport> MealsStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(MealsState::default()),
        }
    }

    /// Replace the menu from the server.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_all(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            menu,
            FETCH_FALLBACK,
            self.client.get::<Vec<Meal>>("/api/meals")
        )
    }

    /// Replace the list of meals the user has ordered.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_user_meals(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            user_meals,
            FETCH_USER_FALLBACK,
            self.client.get::<Vec<Meal>>("/api/meals/user")
        )
    }

    /// Replace the menu with one vendor's meals.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`] for a blank id.
    pub async fn load_by_vendor(&self, vendor_id: &str) -> ApiResult<()> {
        ensure_id(vendor_id, "vendor id")?;
        dispatch!(
            self.state,
            menu,
            FETCH_FALLBACK,
            self.client
                .get::<Vec<Meal>>(&format!("/api/vendors/{vendor_id}/meals"))
        )
    }

    /// Create a meal (vendor-side) and append it to the menu.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn create(&self, draft: &MealDraft) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            menu,
            CREATE_FALLBACK,
            self.client.post::<_, Meal>("/api/meals", draft),
            |state: &mut MealsState, ticket, payload: Meal| {
                let applied = state.menu.merge(ticket, |slot| {
                    slot.get_or_insert_with(Vec::new).push(payload);
                });
                if applied {
                    state.success_message = Some(CREATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Update a meal in place. A meal absent from the menu leaves the list
    /// unchanged.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`] for a blank id.
    pub async fn update(&self, meal_id: &str, draft: &MealDraft) -> ApiResult<()> {
        ensure_id(meal_id, "meal id")?;
        dispatch_with!(
            self.state,
            menu,
            UPDATE_FALLBACK,
            self.client
                .put::<_, Meal>(&format!("/api/meals/{meal_id}"), draft),
            |state: &mut MealsState, ticket, payload: Meal| {
                let applied = state.menu.merge(ticket, |slot| {
                    if let Some(meals) = slot.as_mut() {
                        if let Some(existing) =
                            meals.iter_mut().find(|meal| meal.id == payload.id)
                        {
                            *existing = payload;
                        }
                    }
                });
                if applied {
                    state.success_message = Some(UPDATED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Place an order. On success any inline token joins the token list and
    /// the user's meals are re-fetched.
    ///
    /// # Errors
    /// Returns the classified failure (an over-limit or insufficient-balance
    /// rejection carries the server's message), or
    /// [`ApiError::InvalidRequest`] for a blank meal id or zero quantity.
    pub async fn order(&self, request: &MealOrderRequest) -> ApiResult<()> {
        ensure_id(&request.meal_id, "meal id")?;
        if request.quantity == 0 {
            return Err(ApiError::invalid_request("quantity must be at least 1"));
        }
        dispatch_with!(
            self.state,
            tokens,
            ORDER_FALLBACK,
            self.client
                .post::<_, MealOrderReceipt>("/api/meals/order", request),
            |state: &mut MealsState, ticket, payload: MealOrderReceipt| {
                let message = payload
                    .message
                    .clone()
                    .unwrap_or_else(|| ORDERED_MESSAGE.to_owned());
                let applied = state.tokens.merge(ticket, |slot| {
                    if let Some(token) = payload.token {
                        slot.get_or_insert_with(Vec::new).insert(0, token);
                    }
                });
                if applied {
                    state.success_message = Some(message);
                }
            }
        )?;
        self.load_user_meals().await
    }

    /// Replace the pickup-token list from the server.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn load_tokens(&self) -> ApiResult<()> {
        dispatch!(
            self.state,
            tokens,
            FETCH_TOKENS_FALLBACK,
            self.client.get::<Vec<MealToken>>("/api/meals/tokens")
        )
    }

    /// Cancel a pickup token; the server's cancelled token replaces the
    /// matching entry. A token absent from the list leaves it unchanged.
    ///
    /// # Errors
    /// Returns the classified failure, or
    /// [`ApiError::InvalidRequest`] for a blank id.
    pub async fn cancel_token(&self, token_id: &str) -> ApiResult<()> {
        ensure_id(token_id, "token id")?;
        dispatch_with!(
            self.state,
            tokens,
            CANCEL_TOKEN_FALLBACK,
            self.client
                .post_empty::<MealToken>(&format!("/api/meals/tokens/{token_id}/cancel")),
            |state: &mut MealsState, ticket, payload: MealToken| {
                let applied = state.tokens.merge(ticket, |slot| {
                    if let Some(tokens) = slot.as_mut() {
                        if let Some(existing) =
                            tokens.iter_mut().find(|token| token.id == payload.id)
                        {
                            *existing = payload;
                        }
                    }
                });
                if applied {
                    state.success_message = Some(TOKEN_CANCELLED_MESSAGE.to_owned());
                }
            }
        )
    }

    /// Snapshot of the menu slot.
    #[must_use]
    pub fn menu(&self) -> RequestState<Vec<Meal>> {
        lock(&self.state).menu.clone()
    }

    /// Snapshot of the user's meals slot.
    #[must_use]
    pub fn user_meals(&self) -> RequestState<Vec<Meal>> {
        lock(&self.state).user_meals.clone()
    }

    /// Snapshot of the pickup-token slot.
    #[must_use]
    pub fn tokens(&self) -> RequestState<Vec<MealToken>> {
        lock(&self.state).tokens.clone()
    }

    /// Message of the last successful mutation, until cleared.
    #[must_use]
    pub fn success_message(&self) -> Option<String> {
        lock(&self.state).success_message.clone()
    }

    /// Clear inline errors on every slot.
    pub fn clear_error(&self) {
        let mut state = lock(&self.state);
        state.menu.clear_error();
        state.user_meals.clear_error();
        state.tokens.clear_error();
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
    use crate::domain::models::TokenStatus;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};
    use crate::notify::Notifications;
    use crate::session::SessionProvider;

    fn store_with(transport: StubTransport) -> MealsStore<StubTransport> {
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryCredentialStore::new())));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(Notifications::new()),
        ));
        MealsStore::new(client)
    }

    fn token_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "_id": id,
            "tokenNumber": "T-42",
            "meal": {"name": "Thali", "price": 80.0},
            "quantity": 1,
            "pickupTime": "lunch",
            "status": status
        })
    }

    #[tokio::test]
    async fn order_records_the_token_and_refetches_user_meals() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({"token": token_json("t1", "active"), "message": "Order placed"}),
        );
        transport.push_json(200, &json!([]));
        let store = store_with(transport.clone());

        let request = MealOrderRequest {
            meal_id: "m1".to_owned(),
            quantity: 2,
            pickup_time: "lunch".to_owned(),
        };
        store.order(&request).await.expect("order succeeds");

        assert_eq!(store.tokens().data().map(Vec::len), Some(1));
        assert_eq!(store.success_message(), Some("Order placed".to_owned()));
        let paths: Vec<String> = transport
            .requests()
            .into_iter()
            .map(|request| request.path)
            .collect();
        assert_eq!(paths, vec!["/api/meals/order", "/api/meals/user"]);
    }

    #[tokio::test]
    async fn zero_quantity_orders_fail_fast() {
        let transport = StubTransport::new();
        let store = store_with(transport.clone());

        let request = MealOrderRequest {
            meal_id: "m1".to_owned(),
            quantity: 0,
            pickup_time: "lunch".to_owned(),
        };
        let error = store.order(&request).await.expect_err("rejected");
        assert!(matches!(error, ApiError::InvalidRequest { .. }));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn cancel_token_replaces_the_matching_entry() {
        let transport = StubTransport::new();
        transport.push_json(200, &json!([token_json("t1", "active")]));
        transport.push_json(200, &token_json("t1", "cancelled"));
        let store = store_with(transport);
        store.load_tokens().await.expect("seed tokens");

        store.cancel_token("t1").await.expect("cancel succeeds");
        let tokens = store.tokens();
        let statuses: Vec<TokenStatus> = tokens
            .data()
            .map(|tokens| tokens.iter().map(|token| token.status).collect())
            .unwrap_or_default();
        assert_eq!(statuses, vec![TokenStatus::Cancelled]);
    }

    #[tokio::test]
    async fn cancelling_an_unknown_token_leaves_the_list_unchanged() {
        let transport = StubTransport::new();
        transport.push_json(200, &json!([token_json("t1", "active")]));
        transport.push_json(200, &token_json("t9", "cancelled"));
        let store = store_with(transport);
        store.load_tokens().await.expect("seed tokens");

        store.cancel_token("t9").await.expect("cancel succeeds");
        let tokens = store.tokens();
        assert_eq!(tokens.status(), RequestStatus::Succeeded);
        let ids: Vec<&str> = tokens
            .data()
            .map(|tokens| tokens.iter().map(|token| token.id.as_str()).collect())
            .unwrap_or_default();
        assert_eq!(ids, vec!["t1"]);
        assert_eq!(
            tokens.data().and_then(|tokens| tokens.first()).map(MealToken::is_active),
            Some(true)
        );
    }
}
