//! HTTP adapter: the single choke point between the stores and the backend.
//!
//! Every request flows through [`ApiClient::send`], which attaches the bearer
//! token, executes the request over the injected transport, and classifies
//! the outcome. The classification policy is handled exactly once here:
//! a 401 destroys the session and announces expiry, a 5xx and a transport
//! failure raise a global notification, and every other 4xx is returned to
//! the calling store untouched so the view can render it inline.

mod reqwest_transport;

pub use reqwest_transport::ReqwestTransport;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::ports::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
use crate::domain::{ApiError, ApiResult};
use crate::notify::{Notifications, Severity};
use crate::session::SessionProvider;

/// Notification raised when the server answers 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
/// Notification raised when the server answers 5xx.
pub const SERVER_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again later.";
/// Notification raised when no HTTP response was produced.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please check your connection.";

/// Typed client over an [`HttpTransport`].
///
/// Generic over the transport so stores can be exercised against a scripted
/// stub; production wiring uses [`ReqwestTransport`].
pub struct ApiClient<T> {
    transport: T,
    session: Arc<SessionProvider>,
    notifications: Arc<Notifications>,
}

impl<T: HttpTransport> ApiClient<T> {
    /// Assemble a client from its collaborators.
    pub fn new(
        transport: T,
        session: Arc<SessionProvider>,
        notifications: Arc<Notifications>,
    ) -> Self {
        Self {
            transport,
            session,
            notifications,
        }
    }

    /// The session provider this client consults for bearer tokens.
    #[must_use]
    pub fn session(&self) -> &Arc<SessionProvider> {
        &self.session
    }

    /// The notification channel this client raises global failures on.
    #[must_use]
    pub fn notifications(&self) -> &Arc<Notifications> {
        &self.notifications
    }

    /// GET `path`, decoding the response body as `R`.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call.
    pub async fn get<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    /// GET `path` with query string pairs.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call.
    pub async fn get_query<R: DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> ApiResult<R> {
        let mut request = ApiRequest::new(Method::Get, path);
        request.query = query;
        self.send(request).await
    }

    /// POST a JSON `body` to `path`.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call, including
    /// [`ApiError::InvalidRequest`] when `body` cannot be serialized.
    pub async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        self.send_with_body(Method::Post, path, body).await
    }

    /// POST to `path` with no body.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call.
    pub async fn post_empty<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.send(ApiRequest::new(Method::Post, path)).await
    }

    /// PUT a JSON `body` to `path`.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call, including
    /// [`ApiError::InvalidRequest`] when `body` cannot be serialized.
    pub async fn put<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        self.send_with_body(Method::Put, path, body).await
    }

    /// PATCH a JSON `body` to `path`.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call, including
    /// [`ApiError::InvalidRequest`] when `body` cannot be serialized.
    pub async fn patch<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        self.send_with_body(Method::Patch, path, body).await
    }

    /// DELETE `path`, decoding the response body as `R`.
    ///
    /// # Errors
    /// Returns the classified [`ApiError`] for the failed call.
    pub async fn delete<R: DeserializeOwned>(&self, path: &str) -> ApiResult<R> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    async fn send_with_body<B: Serialize, R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<R> {
        let body = serde_json::to_value(body)
            .map_err(|err| ApiError::invalid_request(format!("unserializable body: {err}")))?;
        let mut request = ApiRequest::new(method, path);
        request.body = Some(body);
        self.send(request).await
    }

    /// Execute `request` and classify the outcome.
    async fn send<R: DeserializeOwned>(&self, mut request: ApiRequest) -> ApiResult<R> {
        request.bearer = self.session.bearer();
        let method = request.method;
        let path = request.path.clone();

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => return Err(self.classify_transport_failure(method, &path, &err)),
        };

        if response.is_success() {
            return serde_json::from_slice(&response.body).map_err(|err| {
                tracing::error!(method = method.as_str(), path, error = %err, "response decode failed");
                ApiError::decode(err.to_string())
            });
        }
        Err(self.classify_http_failure(method, &path, &response))
    }

    fn classify_transport_failure(
        &self,
        method: Method,
        path: &str,
        error: &TransportError,
    ) -> ApiError {
        tracing::warn!(method = method.as_str(), path, error = %error, "transport failure");
        self.notifications.show(NETWORK_ERROR_MESSAGE, Severity::Error);
        ApiError::network(error.to_string())
    }

    fn classify_http_failure(
        &self,
        method: Method,
        path: &str,
        response: &ApiResponse,
    ) -> ApiError {
        let status = response.status;
        let message = payload_message(&response.body);
        match status {
            401 => {
                tracing::info!(method = method.as_str(), path, "session rejected by server");
                self.session.destroy();
                self.notifications
                    .show(SESSION_EXPIRED_MESSAGE, Severity::Error);
                ApiError::unauthenticated(message)
            }
            500.. => {
                tracing::error!(method = method.as_str(), path, status, "server failure");
                self.notifications.show(SERVER_ERROR_MESSAGE, Severity::Error);
                ApiError::server(status, message)
            }
            _ => {
                tracing::debug!(method = method.as_str(), path, status, "request rejected");
                ApiError::rejected(status, message)
            }
        }
    }
}

/// Extract the conventional `{"message": "..."}` field from an error body.
fn payload_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}
