//! Authentication store: login, registration, profile, logout.

use std::sync::Arc;
use std::sync::Mutex;

use request_state::RequestState;

use super::dispatch_with;
use crate::domain::ApiResult;
use crate::domain::models::{AuthResponse, Credentials, Registration, User};
use crate::domain::ports::HttpTransport;
use crate::http::ApiClient;
use crate::session::{AuthToken, Session};
use crate::sync::lock;

const LOGIN_FALLBACK: &str = "Login failed. Please check your credentials.";
const REGISTER_FALLBACK: &str = "Registration failed. Please try again.";
const PROFILE_FALLBACK: &str = "Failed to load your profile";

#[derive(Debug, Default)]
struct AuthState {
    profile: RequestState<User>,
}

/// Store for the authenticated user's profile and session lifecycle.
pub struct AuthStore<T> {
    client: Arc<ApiClient<T>>,
    state: Mutex<AuthState>,
}

impl<T: HttpTransport> AuthStore<T> {
    /// Create the store.
    pub fn new(client: Arc<ApiClient<T>>) -> Self {
        Self {
            client,
            state: Mutex::new(AuthState::default()),
        }
    }

    /// Exchange credentials for a session. On success the session is
    /// created (token persisted) and the profile snapshot replaced.
    ///
    /// # Errors
    /// Returns the classified failure; a 401 here is a credential rejection,
    /// surfaced inline like any other [`ApiError`].
    pub async fn login(&self, credentials: &Credentials) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            profile,
            LOGIN_FALLBACK,
            self.client
                .post::<_, AuthResponse>("/api/auth/login", credentials),
            |state: &mut AuthState, ticket, payload: AuthResponse| {
                self.install_session(&payload);
                state.profile.succeed(ticket, payload.user);
            }
        )
    }

    /// Register a new account; a successful registration also logs in.
    ///
    /// # Errors
    /// Returns the classified failure for the failed call.
    pub async fn register(&self, registration: &Registration) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            profile,
            REGISTER_FALLBACK,
            self.client
                .post::<_, AuthResponse>("/api/auth/register", registration),
            |state: &mut AuthState, ticket, payload: AuthResponse| {
                self.install_session(&payload);
                state.profile.succeed(ticket, payload.user);
            }
        )
    }

    /// Refresh the profile of an already-authenticated session (used after
    /// restoring a persisted token at startup).
    ///
    /// # Errors
    /// Returns the classified failure; an expired token surfaces as
    /// [`ApiError::Unauthenticated`](crate::domain::ApiError) after the
    /// adapter has torn the session down.
    pub async fn current_user(&self) -> ApiResult<()> {
        dispatch_with!(
            self.state,
            profile,
            PROFILE_FALLBACK,
            self.client.get::<User>("/api/auth/me"),
            |state: &mut AuthState, ticket, payload: User| {
                self.client.session().attach_identity(Session {
                    user_id: payload.id.clone(),
                    role: payload.role,
                });
                state.profile.succeed(ticket, payload);
            }
        )
    }

    /// Destroy the session and drop the profile snapshot. Purely
    /// client-side and idempotent.
    pub fn logout(&self) {
        self.client.session().destroy();
        lock(&self.state).profile.reset();
    }

    /// Route-guard predicate: whether a session token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Snapshot of the profile slot.
    #[must_use]
    pub fn profile(&self) -> RequestState<User> {
        lock(&self.state).profile.clone()
    }

    fn install_session(&self, payload: &AuthResponse) {
        self.client.session().create(
            AuthToken::new(payload.token.clone()),
            Session {
                user_id: payload.user.id.clone(),
                role: payload.user.role,
            },
        );
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use request_state::RequestStatus;
    use serde_json::json;

    use super::*;
    use crate::domain::models::Role;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};
    use crate::notify::Notifications;
    use crate::session::SessionProvider;

    fn store_with(transport: StubTransport) -> AuthStore<StubTransport> {
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryCredentialStore::new())));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::new(Notifications::new()),
        ));
        AuthStore::new(client)
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "amit@school.test".to_owned(),
            password: "hunter2".to_owned(),
        }
    }

    #[tokio::test]
    async fn login_creates_a_session_and_stores_the_profile() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({
                "token": "jwt-1",
                "user": {"_id": "u1", "name": "Amit", "email": "amit@school.test", "role": "student"}
            }),
        );
        let store = store_with(transport.clone());

        store.login(&credentials()).await.expect("login succeeds");
        assert!(store.is_authenticated());

        let profile = store.profile();
        assert_eq!(profile.status(), RequestStatus::Succeeded);
        assert_eq!(profile.data().map(|user| user.role), Some(Role::Student));
        assert_eq!(transport.requests()[0].path, "/api/auth/login");
    }

    #[tokio::test]
    async fn rejected_login_records_the_server_message() {
        let transport = StubTransport::new();
        transport.push_json(400, &json!({"message": "Invalid credentials"}));
        let store = store_with(transport);

        store.login(&credentials()).await.expect_err("login fails");
        assert!(!store.is_authenticated());

        let profile = store.profile();
        assert_eq!(profile.status(), RequestStatus::Failed);
        assert_eq!(profile.error(), Some("Invalid credentials"));
    }

    #[tokio::test]
    async fn logout_is_idempotent_and_clears_the_profile() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({
                "token": "jwt-2",
                "user": {"_id": "u2", "name": "Priya", "email": "p@school.test", "role": "parent"}
            }),
        );
        let store = store_with(transport);
        store.login(&credentials()).await.expect("login succeeds");

        store.logout();
        store.logout();
        assert!(!store.is_authenticated());
        assert_eq!(store.profile().data(), None);
        assert_eq!(store.profile().status(), RequestStatus::Idle);
    }
}
