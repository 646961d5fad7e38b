//! catalog-xref - marketplace catalog to inventory cross-reference CLI
//!
//! Pulls catalog cards from Wildberries, looks their vendor codes up in
//! MoySklad, and exports the flattened rows as TSV ready to paste into a
//! spreadsheet.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod http;
pub mod moysklad;
pub mod records;
pub mod reconcile;
pub mod wildberries;

pub use config::Config;
pub use error::ApiError;
pub use records::{InventoryRecord, ProductRecord, Row, Tabular};
pub use reconcile::{MatchKind, MatchedRecord};
