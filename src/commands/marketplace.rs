//! Marketplace export: cards of one subject, one row per barcode.

use crate::commands::PingCommand;
use crate::config::Config;
use crate::records::{flatten_cards, ProductRecord};
use crate::wildberries::{MarketplaceApi, WildberriesClient};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Fetches and flattens marketplace cards.
pub struct MarketplaceCommand {
    config: Config,
}

impl MarketplaceCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<Vec<ProductRecord>> {
        let client = WildberriesClient::new(&self.config).context("Failed to create HTTP client")?;
        self.execute_with_client(&client).await
    }

    /// Health check, then fetch (for testing with a mock client).
    ///
    /// A failed health check is reported but does not stop the fetch.
    pub async fn execute_with_client(&self, client: &impl MarketplaceApi) -> Result<Vec<ProductRecord>> {
        let ok = PingCommand::check(client).await;
        eprintln!("{}", PingCommand::message(ok));
        if !ok {
            warn!("Continuing without a successful health check");
        }

        self.fetch_with_client(client).await
    }

    /// Fetches the configured subject and flattens it into per-barcode rows.
    pub async fn fetch_with_client(&self, client: &impl MarketplaceApi) -> Result<Vec<ProductRecord>> {
        let subject = self.config.subject_id;

        let cards = client
            .cards(subject, self.config.card_limit)
            .await
            .with_context(|| format!("Failed to list cards for subject {}", subject))?;

        let records = flatten_cards(&cards);
        info!("Flattened {} cards into {} rows", cards.len(), records.len());
        Ok(records)
    }
}
