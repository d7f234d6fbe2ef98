//! Client core for the campus platform: digital wallet, cafeteria meals and
//! pickup tokens, event registration, and the admin console, synchronised
//! against the backend REST API.
//!
//! The crate is a library of stores, not a UI. Each domain has one store
//! owning typed snapshots in [`request_state::RequestState`] slots and
//! exposing async dispatcher operations; all HTTP flows through a single
//! [`http::ApiClient`] that attaches the session token and classifies
//! failures once, globally. [`stores::StoreRegistry`] wires everything
//! together for embedders:
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use campus_client::domain::models::Credentials;
//! use campus_client::domain::ports::MemoryCredentialStore;
//! use campus_client::http::ReqwestTransport;
//! use campus_client::config::ClientConfig;
//! use campus_client::stores::StoreRegistry;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let transport = ReqwestTransport::new(&config)?;
//! let stores = StoreRegistry::new(transport, Arc::new(MemoryCredentialStore::new()));
//!
//! stores
//!     .auth
//!     .login(&Credentials {
//!         email: "amit@school.test".into(),
//!         password: "secret".into(),
//!     })
//!     .await?;
//! stores.wallet.load_balance().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod domain;
pub mod http;
pub mod notify;
pub mod session;
pub mod stores;
mod sync;

pub use domain::{ApiError, ApiResult};
pub use request_state::{RequestState, RequestStatus, Ticket};
pub use stores::StoreRegistry;
