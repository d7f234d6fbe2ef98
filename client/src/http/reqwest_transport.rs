//! Production transport over `reqwest`.

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::ClientConfig;
use crate::domain::ports::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};

/// [`HttpTransport`] implementation backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    ///
    /// # Errors
    /// Returns [`TransportError::Io`] when the underlying client cannot be
    /// constructed (for example when no TLS backend is available).
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| TransportError::io(err.to_string()))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn request_url(&self, request: &ApiRequest) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(&request.path)
            .map_err(|err| TransportError::io(format!("invalid request path: {err}")))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }
}

fn classify(err: &reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::timeout(err.to_string())
    } else if err.is_connect() {
        TransportError::connect(err.to_string())
    } else {
        TransportError::io(err.to_string())
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.request_url(&request)?;
        let mut builder = match request.method {
            Method::Get => self.client.get(url),
            Method::Post => self.client.post(url),
            Method::Put => self.client.put(url),
            Method::Patch => self.client.patch(url),
            Method::Delete => self.client.delete(url),
        };
        if let Some(bearer) = &request.bearer {
            builder = builder.bearer_auth(bearer);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|err| classify(&err))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|err| classify(&err))?
            .to_vec();
        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;

    fn transport() -> ReqwestTransport {
        let config = ClientConfig::from_base_url("http://localhost:5000").expect("config");
        ReqwestTransport::new(&config).expect("transport")
    }

    #[test]
    fn joins_paths_against_the_base_url() {
        let request = ApiRequest::new(Method::Get, "/api/events");
        let url = transport().request_url(&request).expect("url");
        assert_eq!(url.as_str(), "http://localhost:5000/api/events");
    }

    #[test]
    fn appends_query_pairs() {
        let mut request = ApiRequest::new(Method::Get, "/api/wallet/transactions");
        request.query = vec![("page".to_owned(), "2".to_owned())];
        let url = transport().request_url(&request).expect("url");
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/wallet/transactions?page=2"
        );
    }
}
