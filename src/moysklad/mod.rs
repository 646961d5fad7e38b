//! MoySklad inventory API: client and wire models.

pub mod client;
pub mod models;

pub use client::{InventoryApi, MoySkladClient};
pub use models::{Barcode, Product};
