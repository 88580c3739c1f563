/// Errors from the storefront REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status, e.g. an invalid or stale
    /// transition or an authorization failure.
    #[error("Storefront API error ({status}): {body}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx response whose body did not match the expected shape.
    #[error("Failed to decode storefront response: {0}")]
    Decode(String),

    /// The client could not be built from its configuration.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Whether the failure happened before the backend produced an answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Request(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Request(e) if e.is_timeout())
    }
}
