//! Driven port for raw HTTP execution.
//!
//! The [`ApiClient`](crate::http::ApiClient) owns classification and session
//! handling; this port owns nothing but "send this request, give me status
//! and body". Keeping the seam this low makes every store testable without a
//! network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde::Serialize;

use super::macros::define_port_error;
use crate::sync::lock;

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
}

impl Method {
    /// Canonical upper-case method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// One outgoing request, already carrying the bearer token when a session
/// exists.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the configured base URL (e.g. `/api/events`).
    pub path: String,
    /// Query string pairs.
    pub query: Vec<(String, String)>,
    /// JSON body, when the call has one.
    pub body: Option<serde_json::Value>,
    /// Bearer token attached by the client adapter.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Build a bare request for `method` and `path`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }
}

/// One raw HTTP response: status plus undecoded body bytes.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

define_port_error! {
    /// Failures where no HTTP response was produced at all.
    pub enum TransportError {
        /// The connection could not be established.
        Connect { message: String } =>
            "connection failed: {message}",
        /// The request exceeded the transport timeout.
        Timeout { message: String } =>
            "request timed out: {message}",
        /// Any other transport-level I/O failure.
        Io { message: String } =>
            "transport i/o failed: {message}",
    }
}

/// Port for executing one HTTP request.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Execute the request and return the raw response.
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(Debug, Default)]
struct StubInner {
    responses: VecDeque<Result<ApiResponse, TransportError>>,
    seen: Vec<ApiRequest>,
}

/// Scriptable in-memory transport for tests and examples.
///
/// Responses are served in FIFO order; every executed request is recorded so
/// assertions can inspect paths, bodies, and bearer tokens. Clones share the
/// same script and record.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    inner: Arc<Mutex<StubInner>>,
}

impl StubTransport {
    /// Create an empty stub.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a JSON response with the given status.
    ///
    /// # Panics
    /// Panics when `body` cannot be serialized; stubs are test plumbing.
    pub fn push_json(&self, status: u16, body: &impl Serialize) {
        let body = serde_json::to_vec(body).unwrap_or_else(|err| {
            panic!("stub response must serialize: {err}");
        });
        lock(&self.inner)
            .responses
            .push_back(Ok(ApiResponse { status, body }));
    }

    /// Queue a transport-level failure.
    pub fn push_error(&self, error: TransportError) {
        lock(&self.inner).responses.push_back(Err(error));
    }

    /// Requests executed so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ApiRequest> {
        lock(&self.inner).seen.clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let mut inner = lock(&self.inner);
        inner.seen.push(request);
        inner
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::io("stub transport script exhausted")))
    }
}
