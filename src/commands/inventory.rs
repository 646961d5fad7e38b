//! Inventory export: looks up every marketplace article in the inventory system.

use crate::commands::MarketplaceCommand;
use crate::config::Config;
use crate::moysklad::{InventoryApi, MoySkladClient};
use crate::records::{flatten_products, vendor_codes, InventoryRecord, ProductRecord};
use crate::wildberries::{MarketplaceApi, WildberriesClient};
use anyhow::{Context, Result};
use tracing::{info, warn};

/// Result of looking up a batch of articles.
#[derive(Debug, Default)]
pub struct Lookup {
    pub records: Vec<InventoryRecord>,
    /// Articles whose lookup failed.
    pub failed: Vec<String>,
}

/// Cross-system inventory lookup.
pub struct InventoryCommand {
    config: Config,
}

impl InventoryCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn execute(&self) -> Result<Lookup> {
        let (marketplace, inventory) = self.clients()?;
        self.execute_with_clients(&marketplace, &inventory).await
    }

    /// Builds both production clients from configuration.
    pub fn clients(&self) -> Result<(WildberriesClient, MoySkladClient)> {
        let marketplace =
            WildberriesClient::new(&self.config).context("Failed to create marketplace client")?;
        let inventory =
            MoySkladClient::new(&self.config).context("Failed to create inventory client")?;
        Ok((marketplace, inventory))
    }

    /// Fetches marketplace rows, then looks up each distinct article.
    pub async fn execute_with_clients(
        &self,
        marketplace: &impl MarketplaceApi,
        inventory: &impl InventoryApi,
    ) -> Result<Lookup> {
        let products = self.marketplace_rows(marketplace).await?;
        Ok(self.lookup(inventory, &products).await)
    }

    pub(crate) async fn marketplace_rows(
        &self,
        marketplace: &impl MarketplaceApi,
    ) -> Result<Vec<ProductRecord>> {
        MarketplaceCommand::new(self.config.clone()).fetch_with_client(marketplace).await
    }

    /// Queries the inventory once per distinct vendor code, in first-seen order.
    ///
    /// A failed query is reported with the raw response body and skipped.
    pub async fn lookup(&self, inventory: &impl InventoryApi, products: &[ProductRecord]) -> Lookup {
        let codes = vendor_codes(products);
        let path_name = self.config.ms_path_name.as_deref();
        info!("Looking up {} articles in inventory", codes.len());

        let mut lookup = Lookup::default();
        for code in codes {
            match inventory.products(&code, path_name).await {
                Ok(found) => lookup.records.extend(flatten_products(&found)),
                Err(e) => {
                    warn!("Inventory lookup failed for {}: {}", code, e);
                    eprintln!("{}", e.body().map(str::to_string).unwrap_or_else(|| e.to_string()));
                    lookup.failed.push(code);
                }
            }
        }

        info!("Collected {} inventory rows ({} failed lookups)", lookup.records.len(), lookup.failed.len());
        lookup
    }
}
