//! HTTP implementation of [`StorefrontBackend`].
//!
//! Reads unwrap the backend's `{ "data": ... }` envelope. Mutations send a
//! fresh `Idempotency-Key` per attempt and accept any 2xx answer. There are
//! no retries: a failed call is reported once and the user re-triggers it.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use threadline_core::design::{CreateDesignRequest, CustomDesign};
use threadline_core::order::Order;
use threadline_core::status::{DesignStatus, LifecycleStatus, OrderStatus};
use threadline_core::types::DbId;

use crate::backend::StorefrontBackend;
use crate::config::ClientConfig;
use crate::error::ApiError;

/// Header carrying the per-attempt de-duplication key on mutations.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: T,
}

#[derive(Debug, Serialize)]
struct StatusUpdate<'a> {
    status: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

/// HTTP client for the storefront REST API.
#[derive(Debug, Clone)]
pub struct StorefrontApi {
    client: reqwest::Client,
    base_url: String,
}

impl StorefrontApi {
    /// Build a client with the configured timeout and bearer token.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = HeaderValue::from_str(&format!("Bearer {token}"))
                .map_err(|e| ApiError::Config(format!("Invalid API token: {e}")))?;
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self::with_client(client, config.base_url.clone()))
    }

    /// Create an API client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ---- private helpers ----

    async fn get_data<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        Self::parse_envelope(response).await
    }

    /// Send a mutation with a fresh idempotency key, discarding the body.
    async fn send_mutation(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        let key = uuid::Uuid::new_v4().to_string();
        let response = request.header(IDEMPOTENCY_KEY_HEADER, key).send().await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Return the response unchanged on success, or [`ApiError::Rejected`]
    /// with the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_envelope<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let envelope: DataEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl StorefrontBackend for StorefrontApi {
    async fn fetch_designs(
        &self,
        status: Option<DesignStatus>,
    ) -> Result<Vec<CustomDesign>, ApiError> {
        let mut request = self.client.get(self.url("/custom-designs"));
        if let Some(status) = status {
            request = request.query(&[("status", status.code())]);
        }
        let designs: Vec<CustomDesign> = self.get_data(request).await?;
        tracing::debug!(count = designs.len(), ?status, "Fetched designs");
        Ok(designs)
    }

    async fn fetch_newest_design(&self) -> Result<Option<CustomDesign>, ApiError> {
        self.get_data(self.client.get(self.url("/custom-designs/newest")))
            .await
    }

    async fn create_design(&self, form: &CreateDesignRequest) -> Result<CustomDesign, ApiError> {
        let key = uuid::Uuid::new_v4().to_string();
        let request = self
            .client
            .post(self.url("/custom-designs"))
            .header(IDEMPOTENCY_KEY_HEADER, key)
            .json(form);
        let design: CustomDesign = self.get_data(request).await?;
        tracing::info!(design_id = design.id, "Created design");
        Ok(design)
    }

    async fn set_design_status(
        &self,
        design_id: DbId,
        status: DesignStatus,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/custom-designs/{design_id}/status")))
            .json(&StatusUpdate {
                status: status.code(),
                reason: None,
            });
        self.send_mutation(request).await
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, ApiError> {
        let orders: Vec<Order> = self.get_data(self.client.get(self.url("/orders"))).await?;
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    async fn set_order_status(
        &self,
        order_id: DbId,
        status: OrderStatus,
        reason: Option<&str>,
    ) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/orders/{order_id}/status")))
            .json(&StatusUpdate {
                status: status.code(),
                reason,
            });
        self.send_mutation(request).await
    }

    async fn confirm_order_delivered(&self, order_id: DbId) -> Result<(), ApiError> {
        let request = self
            .client
            .put(self.url(&format!("/orders/{order_id}/confirm-delivered")));
        self.send_mutation(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_applies_config() {
        let config = ClientConfig::new("http://localhost:9/api/", Some("secret".to_string()), 3);
        let api = StorefrontApi::new(&config).unwrap();
        assert_eq!(api.base_url(), "http://localhost:9/api");
        assert_eq!(api.url("/orders"), "http://localhost:9/api/orders");
    }

    #[test]
    fn token_with_newline_is_rejected() {
        let config = ClientConfig::new("http://localhost:9", Some("bad\ntoken".to_string()), 3);
        assert!(matches!(StorefrontApi::new(&config), Err(ApiError::Config(_))));
    }

    #[test]
    fn status_update_omits_missing_reason() {
        let body = serde_json::to_value(StatusUpdate {
            status: 6,
            reason: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "status": 6 }));
    }
}
