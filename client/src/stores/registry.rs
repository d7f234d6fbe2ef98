//! Wiring: one registry owning every store plus their shared collaborators.

use std::path::Path;
use std::sync::Arc;

use crate::config::{ClientConfig, ConfigError};
use crate::domain::ports::{
    CredentialStore, CredentialStoreError, DirCredentialStore, HttpTransport, TransportError,
};
use crate::http::{ApiClient, ReqwestTransport};
use crate::notify::Notifications;
use crate::session::SessionProvider;

use super::{
    AuthStore, DashboardStore, EventsStore, MealsStore, SettingsStore, UiStore, VendorsStore,
    WalletStore,
};

/// Failures while assembling a [`StoreRegistry`] from the environment.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
    /// Configuration could not be read.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The HTTP transport could not be built.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The credential directory could not be opened.
    #[error(transparent)]
    Credentials(#[from] CredentialStoreError),
}

/// All stores wired to one shared [`ApiClient`], session, and notification
/// channel. This is the embedder's entry point.
pub struct StoreRegistry<T> {
    client: Arc<ApiClient<T>>,
    /// Authentication and profile.
    pub auth: AuthStore<T>,
    /// Event catalogue and registrations.
    pub events: EventsStore<T>,
    /// Cafeteria menu, orders, and tokens.
    pub meals: MealsStore<T>,
    /// Digital wallet.
    pub wallet: WalletStore<T>,
    /// Vendor listings and console.
    pub vendors: VendorsStore<T>,
    /// Platform settings.
    pub settings: SettingsStore<T>,
    /// Admin dashboard.
    pub dashboard: DashboardStore<T>,
    /// Client-side chrome state.
    pub ui: UiStore,
}

impl<T: HttpTransport> StoreRegistry<T> {
    /// Wire every store to `transport` and `credentials`.
    pub fn new(transport: T, credentials: Arc<dyn CredentialStore>) -> Self {
        let notifications = Arc::new(Notifications::new());
        let session = Arc::new(SessionProvider::new(Arc::clone(&credentials)));
        let client = Arc::new(ApiClient::new(
            transport,
            session,
            Arc::clone(&notifications),
        ));
        Self {
            auth: AuthStore::new(Arc::clone(&client)),
            events: EventsStore::new(Arc::clone(&client)),
            meals: MealsStore::new(Arc::clone(&client)),
            wallet: WalletStore::new(Arc::clone(&client)),
            vendors: VendorsStore::new(Arc::clone(&client)),
            settings: SettingsStore::new(Arc::clone(&client)),
            dashboard: DashboardStore::new(Arc::clone(&client)),
            ui: UiStore::new(credentials, notifications),
            client,
        }
    }

    /// The shared HTTP adapter, for session and notification access.
    #[must_use]
    pub fn client(&self) -> &Arc<ApiClient<T>> {
        &self.client
    }
}

impl StoreRegistry<ReqwestTransport> {
    /// Assemble the production wiring: base URL from the environment,
    /// credentials persisted under `state_dir` (which must exist).
    ///
    /// # Errors
    /// Returns [`BootstrapError`] when the configuration, transport, or
    /// credential directory cannot be set up.
    pub fn from_env(state_dir: &Path) -> Result<Self, BootstrapError> {
        let config = ClientConfig::from_env()?;
        let transport = ReqwestTransport::new(&config)?;
        let credentials: Arc<dyn CredentialStore> = Arc::new(DirCredentialStore::open(state_dir)?);
        tracing::info!(base_url = %config.base_url, "client stores initialised");
        Ok(Self::new(transport, credentials))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use serde_json::json;

    use super::*;
    use crate::domain::ports::{MemoryCredentialStore, StubTransport};

    #[tokio::test]
    async fn stores_share_one_session() {
        let transport = StubTransport::new();
        transport.push_json(
            200,
            &json!({
                "token": "jwt-1",
                "user": {"_id": "u1", "name": "Amit", "email": "a@s.test", "role": "student"}
            }),
        );
        transport.push_json(200, &json!({"balance": 0.0, "recentTransactions": []}));
        let registry = StoreRegistry::new(transport.clone(), Arc::new(MemoryCredentialStore::new()));

        let credentials = crate::domain::models::Credentials {
            email: "a@s.test".to_owned(),
            password: "pw".to_owned(),
        };
        registry.auth.login(&credentials).await.expect("login");
        registry.wallet.load_balance().await.expect("balance");

        // The wallet request reuses the token the auth store installed.
        assert_eq!(transport.requests()[1].bearer, Some("jwt-1".to_owned()));
    }
}
