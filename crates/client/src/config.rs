use std::time::Duration;

/// Default HTTP timeout applied to every storefront request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Default base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/v1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected} (got '{value}')")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Storefront client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, without a trailing slash.
    pub base_url: String,
    /// Bearer token for the signed-in user, if any.
    pub api_token: Option<String>,
    /// Client-level request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `STOREFRONT_API_URL`   | `http://localhost:3000/api/v1`   |
    /// | `STOREFRONT_API_TOKEN` | unset                            |
    /// | `REQUEST_TIMEOUT_SECS` | `10`                             |
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            std::env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let api_token = std::env::var("STOREFRONT_API_TOKEN")
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        let request_timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(value) => parse_timeout(&value)?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(base_url, api_token, request_timeout_secs))
    }

    pub fn new(
        base_url: impl Into<String>,
        api_token: Option<String>,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token,
            request_timeout_secs,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_timeout(value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::Invalid {
            var: "REQUEST_TIMEOUT_SECS",
            expected: "a positive integer",
            value: value.to_string(),
        })
}
