//! Domain layer: failure taxonomy, wire models, and ports.

pub mod error;
pub mod models;
pub mod ports;

pub use error::ApiError;

/// Convenient result alias for dispatcher operations.
pub type ApiResult<T> = Result<T, ApiError>;
