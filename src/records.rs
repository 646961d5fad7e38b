//! Flat export records and the nested-to-flat expansion of API payloads.

use crate::moysklad::Product;
use crate::wildberries::Card;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashSet;

/// An ordered mapping of column name to cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: Vec<(String, String)>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a column. An existing key keeps its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.fields.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Column names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Row::new();
        for (k, v) in iter {
            row.insert(k, v);
        }
        row
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Records that can be exported as a spreadsheet row.
pub trait Tabular {
    fn to_row(&self) -> Row;
}

/// Converts a slice of records into rows.
pub fn to_rows<T: Tabular>(records: &[T]) -> Vec<Row> {
    records.iter().map(Tabular::to_row).collect()
}

/// One marketplace barcode with its card's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductRecord {
    pub id: i64,
    pub vendor_code: String,
    pub title: String,
    pub category: String,
    pub barcode: String,
}

impl Tabular for ProductRecord {
    fn to_row(&self) -> Row {
        Row::new()
            .with("wb_nm_id", self.id)
            .with("wb_supplier_article", &self.vendor_code)
            .with("wb_name", &self.title)
            .with("wb_category", &self.category)
            .with("wb_barcodes", &self.barcode)
    }
}

/// One inventory barcode with its product's fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub id: String,
    pub article: String,
    pub path_name: String,
    pub name: String,
    pub barcode: String,
}

impl Tabular for InventoryRecord {
    fn to_row(&self) -> Row {
        Row::new()
            .with("ms_id", &self.id)
            .with("ms_article", &self.article)
            .with("ms_path_name", &self.path_name)
            .with("ms_name", &self.name)
            .with("ms_barcodes", &self.barcode)
    }
}

/// Expands cards into one record per (size, barcode), in input order.
pub fn flatten_cards(cards: &[Card]) -> Vec<ProductRecord> {
    cards
        .iter()
        .flat_map(|card| {
            card.sizes.iter().flat_map(|size| size.skus.iter()).map(move |sku| ProductRecord {
                id: card.nm_id,
                vendor_code: card.vendor_code.clone(),
                title: card.title.clone().unwrap_or_default(),
                category: card.subject_name.clone().unwrap_or_default(),
                barcode: sku.clone(),
            })
        })
        .collect()
}

/// Expands inventory products into one record per barcode, in input order.
pub fn flatten_products(products: &[Product]) -> Vec<InventoryRecord> {
    products
        .iter()
        .flat_map(|product| {
            product.barcodes.iter().filter_map(|barcode| barcode.code()).map(move |code| {
                InventoryRecord {
                    id: product.id.clone(),
                    article: product.article.clone().unwrap_or_default(),
                    path_name: product.path_name.clone().unwrap_or_default(),
                    name: product.name.clone(),
                    barcode: code.to_string(),
                }
            })
        })
        .collect()
}

/// Distinct non-blank vendor codes in first-seen order.
pub fn vendor_codes(records: &[ProductRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| r.vendor_code.trim())
        .filter(|code| !code.is_empty() && seen.insert(*code))
        .map(str::to_string)
        .collect()
}
