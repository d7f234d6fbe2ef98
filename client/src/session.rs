//! Session lifecycle: create on login/registration, destroy on logout or
//! server-signalled expiry.
//!
//! The provider is an explicit, injected object rather than ambient global
//! state, so the HTTP adapter and the stores can be tested against it
//! directly. At most one session exists per provider; `destroy` is
//! idempotent.

use std::sync::{Arc, RwLock};

use zeroize::Zeroizing;

use crate::domain::models::Role;
use crate::domain::ports::CredentialStore;
use crate::sync::{read, write};

/// Bearer token wrapper: zeroed on drop and redacted in debug output.
#[derive(Clone)]
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Wrap a raw token string.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(Zeroizing::new(token.into()))
    }

    /// Raw token value, for building the `Authorization` header.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl PartialEq for AuthToken {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

/// Identity of the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Server-assigned user identifier.
    pub user_id: String,
    /// Role of the authenticated user.
    pub role: Role,
}

#[derive(Debug, Default)]
struct SessionInner {
    token: Option<AuthToken>,
    identity: Option<Session>,
}

/// Owner of the client's single authenticated session.
pub struct SessionProvider {
    store: Arc<dyn CredentialStore>,
    inner: RwLock<SessionInner>,
}

impl SessionProvider {
    /// Create a provider, restoring a persisted token when one exists.
    ///
    /// Restored sessions carry the token only; the identity arrives with the
    /// next profile fetch. Storage failures degrade to an unauthenticated
    /// start rather than an error.
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let token = match store.load_token() {
            Ok(token) => token.map(AuthToken::new),
            Err(err) => {
                tracing::warn!(error = %err, "failed to restore persisted token");
                None
            }
        };
        Self {
            store,
            inner: RwLock::new(SessionInner {
                token,
                identity: None,
            }),
        }
    }

    /// Install a new session, replacing any existing one, and persist the
    /// token. A persistence failure is logged; the in-memory session still
    /// takes effect.
    pub fn create(&self, token: AuthToken, identity: Session) {
        if let Err(err) = self.store.save_token(token.as_str()) {
            tracing::warn!(error = %err, "failed to persist session token");
        }
        let mut inner = write(&self.inner);
        inner.token = Some(token);
        inner.identity = Some(identity);
    }

    /// Attach or refresh the identity of an already-authenticated session
    /// (used after restoring a token and fetching the profile).
    pub fn attach_identity(&self, identity: Session) {
        write(&self.inner).identity = Some(identity);
    }

    /// Token value for the `Authorization: Bearer` header, when a session
    /// exists.
    #[must_use]
    pub fn bearer(&self) -> Option<String> {
        read(&self.inner)
            .token
            .as_ref()
            .map(|token| token.as_str().to_owned())
    }

    /// Identity of the authenticated user, when known.
    #[must_use]
    pub fn identity(&self) -> Option<Session> {
        read(&self.inner).identity.clone()
    }

    /// Route-guard predicate: a session exists iff a token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        read(&self.inner).token.is_some()
    }

    /// Destroy the session and the persisted token. Destroying an absent
    /// session is a no-op; the call never fails.
    pub fn destroy(&self) {
        {
            let mut inner = write(&self.inner);
            if inner.token.is_none() && inner.identity.is_none() {
                return;
            }
            inner.token = None;
            inner.identity = None;
        }
        if let Err(err) = self.store.clear_token() {
            tracing::warn!(error = %err, "failed to clear persisted token");
        }
        tracing::debug!("session destroyed");
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use crate::domain::ports::MemoryCredentialStore;

    fn identity() -> Session {
        Session {
            user_id: "u1".to_owned(),
            role: Role::Student,
        }
    }

    #[test]
    fn create_persists_token_and_authenticates() {
        let store = Arc::new(MemoryCredentialStore::new());
        let provider = SessionProvider::new(store.clone());
        assert!(!provider.is_authenticated());

        provider.create(AuthToken::new("tok-1"), identity());
        assert!(provider.is_authenticated());
        assert_eq!(provider.bearer(), Some("tok-1".to_owned()));
        assert_eq!(store.load_token().expect("load"), Some("tok-1".to_owned()));
    }

    #[test]
    fn restores_persisted_token_without_identity() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.save_token("tok-2").expect("seed");

        let provider = SessionProvider::new(store);
        assert!(provider.is_authenticated());
        assert_eq!(provider.identity(), None);
    }

    #[test]
    fn destroy_is_idempotent() {
        let store = Arc::new(MemoryCredentialStore::new());
        let provider = SessionProvider::new(store.clone());
        provider.create(AuthToken::new("tok-3"), identity());

        provider.destroy();
        provider.destroy();
        assert!(!provider.is_authenticated());
        assert_eq!(provider.identity(), None);
        assert_eq!(store.load_token().expect("load"), None);
    }

    #[test]
    fn token_debug_output_is_redacted() {
        let token = AuthToken::new("secret-value");
        assert_eq!(format!("{token:?}"), "AuthToken(<redacted>)");
    }
}
