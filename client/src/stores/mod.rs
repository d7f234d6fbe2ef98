//! Domain stores: one per entity family, each owning its snapshots and the
//! async dispatcher operations that refresh them.
//!
//! Every dispatcher follows the same shape: `begin` exactly one
//! [`RequestState`](request_state::RequestState) slot, perform exactly one
//! HTTP call with the lock released, resolve the same slot exactly once, and
//! hand the classified outcome back to the caller. Stores never raise global
//! notifications; the HTTP adapter owns that policy.

use crate::domain::{ApiError, ApiResult};

pub mod auth;
pub mod dashboard;
pub mod events;
pub mod meals;
mod registry;
pub mod settings;
pub mod ui;
pub mod vendors;
pub mod wallet;

pub use auth::AuthStore;
pub use dashboard::DashboardStore;
pub use events::EventsStore;
pub use meals::MealsStore;
pub use registry::{BootstrapError, StoreRegistry};
pub use settings::SettingsStore;
pub use ui::{Notice, Theme, UiStore};
pub use vendors::VendorsStore;
pub use wallet::WalletStore;

/// Drive one dispatcher operation whose success replaces the slot's
/// snapshot wholesale. `$state` is the store's `Mutex`-wrapped state,
/// `$slot` the `RequestState` field to resolve, `$fallback` the message
/// recorded when the server provides none.
macro_rules! dispatch {
    ($state:expr, $slot:ident, $fallback:expr, $call:expr) => {{
        let ticket = $crate::sync::lock(&$state).$slot.begin();
        match $call.await {
            Ok(payload) => {
                $crate::sync::lock(&$state).$slot.succeed(ticket, payload);
                Ok(())
            }
            Err(err) => {
                let message = err.user_message($fallback);
                $crate::sync::lock(&$state).$slot.fail(ticket, message);
                Err(err)
            }
        }
    }};
}

/// Like [`dispatch!`], but success is applied by `$apply`, a closure taking
/// `(&mut State, Ticket, Payload)`. The closure must resolve `$slot` itself
/// (usually via `merge`), which lets it skip side effects such as success
/// messages when the ticket turned out to be stale.
macro_rules! dispatch_with {
    ($state:expr, $slot:ident, $fallback:expr, $call:expr, $apply:expr) => {{
        let ticket = $crate::sync::lock(&$state).$slot.begin();
        match $call.await {
            Ok(payload) => {
                let mut state = $crate::sync::lock(&$state);
                let apply = $apply;
                apply(&mut *state, ticket, payload);
                drop(state);
                Ok(())
            }
            Err(err) => {
                let message = err.user_message($fallback);
                $crate::sync::lock(&$state).$slot.fail(ticket, message);
                Err(err)
            }
        }
    }};
}

pub(crate) use {dispatch, dispatch_with};

/// Fail-fast guard: monetary amounts must be strictly positive.
pub(crate) fn ensure_positive_amount(amount: f64) -> ApiResult<()> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(ApiError::invalid_request(
            "amount must be greater than zero",
        ))
    }
}

/// Fail-fast guard: identifiers must be non-blank.
pub(crate) fn ensure_id(id: &str, what: &str) -> ApiResult<()> {
    if id.trim().is_empty() {
        Err(ApiError::invalid_request(format!("{what} must not be blank")))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    #[test]
    fn positive_amount_guard_rejects_zero_and_negative() {
        assert!(ensure_positive_amount(0.01).is_ok());
        assert!(matches!(
            ensure_positive_amount(0.0),
            Err(ApiError::InvalidRequest { .. })
        ));
        assert!(matches!(
            ensure_positive_amount(-5.0),
            Err(ApiError::InvalidRequest { .. })
        ));
    }

    #[test]
    fn id_guard_rejects_blank_values() {
        assert!(ensure_id("e1", "event id").is_ok());
        let error = ensure_id("  ", "event id").expect_err("blank id");
        assert_eq!(
            error.user_message("unused"),
            "event id must not be blank"
        );
    }
}
