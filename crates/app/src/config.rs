use std::path::PathBuf;

use threadline_client::config::{ClientConfig, ConfigError};
use threadline_core::types::DbId;

/// Application configuration: the client settings plus local storage.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Directory holding the per-user bookkeeping files.
    pub bookkeeping_dir: PathBuf,
    /// Signed-in user, needed only by the bookkeeping commands.
    pub user_id: Option<DbId>,
}

impl AppConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// Reads everything [`ClientConfig::from_env`] reads, plus:
    ///
    /// | Env Var              | Default       |
    /// |----------------------|---------------|
    /// | `BOOKKEEPING_DIR`    | `.threadline` |
    /// | `STOREFRONT_USER_ID` | unset         |
    pub fn from_env() -> Result<Self, ConfigError> {
        let client = ClientConfig::from_env()?;

        let bookkeeping_dir = std::env::var("BOOKKEEPING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".threadline"));

        let user_id = match std::env::var("STOREFRONT_USER_ID") {
            Ok(value) => Some(value.trim().parse::<DbId>().map_err(|_| ConfigError::Invalid {
                var: "STOREFRONT_USER_ID",
                expected: "an integer user id",
                value: value.clone(),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            client,
            bookkeeping_dir,
            user_id,
        })
    }
}
