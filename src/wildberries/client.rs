//! HTTP client for the Wildberries common and content APIs.

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{http_client, read_body};
use crate::wildberries::models::{Card, CardsListRequest, CardsListResponse};
use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};
use wreq::Client;

const SERVICE: &str = "Wildberries";

/// Trait for marketplace access - enables mocking for tests.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// Returns true when the API accepts the token.
    async fn ping(&self) -> Result<bool, ApiError>;

    /// Lists the cards of one subject (single page).
    async fn cards(&self, subject_id: u64, limit: u32) -> Result<Vec<Card>, ApiError>;
}

/// Wildberries client authenticated with a static API token.
pub struct WildberriesClient {
    client: Client,
    token: String,
    common_url: String,
    content_url: String,
}

impl WildberriesClient {
    /// Creates a client from configuration. Fails if no token is set.
    pub fn new(config: &Config) -> Result<Self> {
        let token = config.wb_token()?.to_string();

        Ok(Self {
            client: http_client(config)?,
            token,
            common_url: config.wb_common_url.trim_end_matches('/').to_string(),
            content_url: config.wb_content_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl MarketplaceApi for WildberriesClient {
    async fn ping(&self) -> Result<bool, ApiError> {
        let url = format!("{}/ping", self.common_url);
        debug!("GET {}", url);

        // The common API takes the bare token, without a scheme.
        let response = self.client.get(&url).header("Authorization", &self.token).send().await?;

        let status = response.status();
        debug!("Ping status: {}", status);
        Ok(status.is_success())
    }

    async fn cards(&self, subject_id: u64, limit: u32) -> Result<Vec<Card>, ApiError> {
        let url = format!("{}/content/v2/get/cards/list", self.content_url);
        let request = CardsListRequest::for_subject(subject_id, limit);
        let body = serde_json::to_string(&request)
            .map_err(|source| ApiError::Decode { service: SERVICE, source })?;

        debug!("POST {} body={}", url, body);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await?;

        let body = read_body(SERVICE, response).await?;
        let parsed: CardsListResponse = serde_json::from_str(&body)
            .map_err(|source| ApiError::Decode { service: SERVICE, source })?;

        info!(
            "Wildberries returned {} cards for subject {} (total: {})",
            parsed.cards.len(),
            subject_id,
            parsed.cursor.total
        );
        Ok(parsed.cards)
    }
}
