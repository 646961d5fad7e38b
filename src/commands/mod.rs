//! CLI command implementations.

pub mod compare;
pub mod inventory;
pub mod marketplace;
pub mod ping;

pub use compare::CompareCommand;
pub use inventory::{InventoryCommand, Lookup};
pub use marketplace::MarketplaceCommand;
pub use ping::PingCommand;

use crate::clipboard::copy_to_clipboard;
use crate::config::Config;
use crate::format::{to_tsv, Formatter};
use crate::records::Row;
use std::io::Write;
use tracing::warn;

/// Prints rows in the configured format to stdout and copies the TSV block.
pub fn present(config: &Config, rows: &[Row]) -> std::io::Result<()> {
    present_to(&mut std::io::stdout().lock(), config, rows)?;
    Ok(())
}

/// Writes rows in the configured format and, if enabled, copies the TSV block.
///
/// Returns whether the clipboard copy succeeded. A clipboard failure (e.g. no
/// display) is logged and otherwise ignored.
pub fn present_to<W: Write>(out: &mut W, config: &Config, rows: &[Row]) -> std::io::Result<bool> {
    let formatter = Formatter::new(config.format);
    writeln!(out, "{}", formatter.format_rows(rows))?;

    if !config.clipboard {
        return Ok(false);
    }

    match copy_to_clipboard(&to_tsv(rows)) {
        Ok(()) => {
            eprintln!("Copied {} rows to clipboard; paste into the spreadsheet.", rows.len());
            Ok(true)
        }
        Err(e) => {
            warn!("Clipboard unavailable: {:#}", e);
            Ok(false)
        }
    }
}


#[cfg(test)]
pub(crate) mod mocks {
    use crate::error::ApiError;
    use crate::moysklad::{Barcode, InventoryApi, Product};
    use crate::wildberries::{Card, CardSize, MarketplaceApi};
    use async_trait::async_trait;
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Mutex;

    /// In-memory marketplace.
    pub struct MockMarketplace {
        pub cards: Vec<Card>,
        pub ping_ok: bool,
        pub fail_cards: bool,
    }

    impl MockMarketplace {
        pub fn new(cards: Vec<Card>) -> Self {
            Self { cards, ping_ok: true, fail_cards: false }
        }

        pub fn failing() -> Self {
            Self { cards: Vec::new(), ping_ok: false, fail_cards: true }
        }
    }

    #[async_trait]
    impl MarketplaceApi for MockMarketplace {
        async fn ping(&self) -> Result<bool, ApiError> {
            Ok(self.ping_ok)
        }

        async fn cards(&self, _subject_id: u64, _limit: u32) -> Result<Vec<Card>, ApiError> {
            if self.fail_cards {
                Err(ApiError::Status {
                    service: "Wildberries",
                    status: 401,
                    body: "unauthorized".to_string(),
                })
            } else {
                Ok(self.cards.clone())
            }
        }
    }

    /// In-memory inventory keyed by article; records every lookup.
    #[derive(Default)]
    pub struct MockInventory {
        pub products: HashMap<String, Vec<Product>>,
        pub failing: Vec<String>,
        pub calls: Mutex<Vec<(String, Option<String>)>>,
    }

    impl MockInventory {
        pub fn with(mut self, product: Product) -> Self {
            let article = product.article.clone().unwrap_or_default();
            self.products.entry(article).or_default().push(product);
            self
        }

        pub fn failing_on(mut self, article: &str) -> Self {
            self.failing.push(article.to_string());
            self
        }

        pub fn calls(&self) -> Vec<(String, Option<String>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl InventoryApi for MockInventory {
        async fn products(
            &self,
            article: &str,
            path_name: Option<&str>,
        ) -> Result<Vec<Product>, ApiError> {
            self.calls.lock().unwrap().push((article.to_string(), path_name.map(str::to_string)));

            if self.failing.iter().any(|a| a == article) {
                return Err(ApiError::Status {
                    service: "MoySklad",
                    status: 412,
                    body: r#"{"errors":[{"error":"bad filter"}]}"#.to_string(),
                });
            }
            Ok(self.products.get(article).cloned().unwrap_or_default())
        }
    }

    pub fn card(nm_id: i64, vendor_code: &str, skus: &[&str]) -> Card {
        Card {
            nm_id,
            vendor_code: vendor_code.to_string(),
            title: Some(format!("Card {nm_id}")),
            subject_name: Some("Pillows".to_string()),
            sizes: vec![CardSize {
                tech_size: Some("0".to_string()),
                skus: skus.iter().map(|s| s.to_string()).collect(),
            }],
        }
    }

    pub fn product(id: &str, article: &str, codes: &[&str]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Item {id}"),
            article: Some(article.to_string()),
            path_name: Some("Home/Test".to_string()),
            barcodes: codes
                .iter()
                .map(|c| {
                    let mut entries = BTreeMap::new();
                    entries.insert("code128".to_string(), c.to_string());
                    Barcode(entries)
                })
                .collect(),
        }
    }
}
