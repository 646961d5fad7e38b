//! Merged export: every marketplace row with its inventory match.

use crate::commands::InventoryCommand;
use crate::config::Config;
use crate::moysklad::InventoryApi;
use crate::reconcile::{cross_reference, summarize, MatchedRecord};
use crate::wildberries::MarketplaceApi;
use anyhow::Result;
use tracing::info;

pub struct CompareCommand {
    config: Config,
    ignore_case: bool,
}

impl CompareCommand {
    pub fn new(config: Config, ignore_case: bool) -> Self {
        Self { config, ignore_case }
    }

    pub async fn execute(&self) -> Result<Vec<MatchedRecord>> {
        let inventory_cmd = InventoryCommand::new(self.config.clone());
        let (marketplace, inventory) = inventory_cmd.clients()?;
        self.execute_with_clients(&marketplace, &inventory).await
    }

    pub async fn execute_with_clients(
        &self,
        marketplace: &impl MarketplaceApi,
        inventory: &impl InventoryApi,
    ) -> Result<Vec<MatchedRecord>> {
        let inventory_cmd = InventoryCommand::new(self.config.clone());

        let products = inventory_cmd.marketplace_rows(marketplace).await?;
        let lookup = inventory_cmd.lookup(inventory, &products).await;

        let matched = cross_reference(&products, &lookup.records, self.ignore_case);
        let (by_barcode, by_article, missing) = summarize(&matched);
        info!(
            "Matched {} rows: {} by barcode, {} by article, {} missing",
            matched.len(),
            by_barcode,
            by_article,
            missing
        );
        Ok(matched)
    }
}
