//! Response models for the MoySklad JSON API.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Envelope of `GET /entity/product`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductList {
    #[serde(default)]
    pub rows: Vec<Product>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(rename = "pathName", default)]
    pub path_name: Option<String>,
    #[serde(default)]
    pub barcodes: Vec<Barcode>,
}

/// A single barcode entry, keyed by its kind (`ean13`, `code128`, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(pub BTreeMap<String, String>);

impl Barcode {
    /// Returns the `code128` value, falling back to any other kind.
    pub fn code(&self) -> Option<&str> {
        self.0
            .get("code128")
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }
}
