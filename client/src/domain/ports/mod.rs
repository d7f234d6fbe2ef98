//! Ports at the hexagonal boundary of the client core.
//!
//! Driven ports only: raw HTTP execution and local credential persistence.
//! Stores and the HTTP adapter depend on these traits, never on concrete
//! transports.

mod macros;

mod credential_store;
mod http_transport;

pub use credential_store::{
    CredentialStore, CredentialStoreError, DirCredentialStore, MemoryCredentialStore,
};
#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::{
    ApiRequest, ApiResponse, HttpTransport, Method, StubTransport, TransportError,
};
