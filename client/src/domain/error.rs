//! Client-side failure taxonomy.
//!
//! Every dispatcher resolves to one of these variants. The split follows the
//! propagation policy: `Unauthenticated`, `Server`, and `Network` are handled
//! once, globally, by the HTTP adapter (session teardown, notification);
//! `Rejected` is left for the calling store to surface inline; `Decode` and
//! `InvalidRequest` never leave the client.

/// Classified outcome of a failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server answered 401; the session has been destroyed.
    Unauthenticated {
        /// Server-provided message, when the body carried one.
        message: Option<String>,
    },
    /// The server answered 5xx.
    Server {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, when the body carried one.
        message: Option<String>,
    },
    /// The request never produced an HTTP response.
    Network {
        /// Transport-level description of the failure.
        message: String,
    },
    /// A 4xx other than 401: a domain or validation rejection the calling
    /// view renders inline. Raises no global notification.
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, when the body carried one.
        message: Option<String>,
    },
    /// A 2xx response whose body could not be decoded.
    Decode {
        /// Decoder description of the failure.
        message: String,
    },
    /// The operation failed fast before any network call was made.
    InvalidRequest {
        /// What was wrong with the input.
        message: String,
    },
}

impl ApiError {
    /// Build [`Self::Unauthenticated`].
    pub fn unauthenticated(message: Option<String>) -> Self {
        Self::Unauthenticated { message }
    }

    /// Build [`Self::Server`].
    pub fn server(status: u16, message: Option<String>) -> Self {
        Self::Server { status, message }
    }

    /// Build [`Self::Network`].
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Build [`Self::Rejected`].
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        Self::Rejected { status, message }
    }

    /// Build [`Self::Decode`].
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build [`Self::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Message a store records against its snapshot: the server-provided
    /// message when one exists, else the operation's fallback string.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Unauthenticated { message }
            | Self::Server { message, .. }
            | Self::Rejected { message, .. } => message
                .clone()
                .unwrap_or_else(|| fallback.to_owned()),
            Self::Network { .. } | Self::Decode { .. } => fallback.to_owned(),
            Self::InvalidRequest { message } => message.clone(),
        }
    }

    /// Whether the HTTP adapter already raised a global notification for
    /// this failure.
    #[must_use]
    pub fn is_globally_handled(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated { .. } | Self::Server { .. } | Self::Network { .. }
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated { message } => match message {
                Some(message) => write!(f, "unauthenticated: {message}"),
                None => write!(f, "unauthenticated"),
            },
            Self::Server { status, message } => match message {
                Some(message) => write!(f, "server error ({status}): {message}"),
                None => write!(f, "server error ({status})"),
            },
            Self::Network { message } => write!(f, "network failure: {message}"),
            Self::Rejected { status, message } => match message {
                Some(message) => write!(f, "request rejected ({status}): {message}"),
                None => write!(f, "request rejected ({status})"),
            },
            Self::Decode { message } => write!(f, "response decode failed: {message}"),
            Self::InvalidRequest { message } => write!(f, "invalid request: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ApiError::rejected(400, Some("Amount must be positive".into())), "Amount must be positive")]
    #[case(ApiError::rejected(404, None), "Failed to fetch events")]
    #[case(ApiError::server(500, Some("boom".into())), "boom")]
    #[case(ApiError::network("connection refused"), "Failed to fetch events")]
    #[case(ApiError::decode("bad json"), "Failed to fetch events")]
    fn user_message_prefers_server_payload(#[case] error: ApiError, #[case] expected: &str) {
        assert_eq!(error.user_message("Failed to fetch events"), expected);
    }

    #[test]
    fn invalid_request_keeps_its_own_message() {
        let error = ApiError::invalid_request("amount must be greater than zero");
        assert_eq!(
            error.user_message("fallback"),
            "amount must be greater than zero"
        );
    }

    #[rstest]
    #[case(ApiError::unauthenticated(None), true)]
    #[case(ApiError::server(502, None), true)]
    #[case(ApiError::network("timed out"), true)]
    #[case(ApiError::rejected(422, None), false)]
    #[case(ApiError::decode("eof"), false)]
    fn global_handling_matches_propagation_policy(#[case] error: ApiError, #[case] global: bool) {
        assert_eq!(error.is_globally_handled(), global);
    }
}
