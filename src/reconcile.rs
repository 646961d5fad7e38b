//! Cross-referencing marketplace rows with inventory rows by article.

use crate::records::{InventoryRecord, ProductRecord, Row, Tabular};
use std::collections::HashMap;
use std::fmt;

/// How a marketplace row was matched to inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Same article and same barcode.
    Barcode,
    /// Same article, barcode not found under it.
    Article,
    Missing,
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchKind::Barcode => write!(f, "barcode"),
            MatchKind::Article => write!(f, "article"),
            MatchKind::Missing => write!(f, "missing"),
        }
    }
}

/// A marketplace row paired with its inventory counterpart, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRecord {
    pub marketplace: ProductRecord,
    pub inventory: Option<InventoryRecord>,
    pub kind: MatchKind,
}

impl Tabular for MatchedRecord {
    fn to_row(&self) -> Row {
        let inv = self.inventory.as_ref();
        Row::new()
            .with("wb_nm_id", self.marketplace.id)
            .with("wb_supplier_article", &self.marketplace.vendor_code)
            .with("wb_name", &self.marketplace.title)
            .with("wb_category", &self.marketplace.category)
            .with("wb_barcodes", &self.marketplace.barcode)
            .with("ms_id", inv.map(|r| r.id.as_str()).unwrap_or_default())
            .with("ms_name", inv.map(|r| r.name.as_str()).unwrap_or_default())
            .with("ms_barcodes", inv.map(|r| r.barcode.as_str()).unwrap_or_default())
            .with("match", self.kind)
    }
}

/// Inventory rows grouped by normalized article.
pub struct ArticleIndex<'a> {
    by_article: HashMap<String, Vec<&'a InventoryRecord>>,
    ignore_case: bool,
}

impl<'a> ArticleIndex<'a> {
    pub fn build(inventory: &'a [InventoryRecord], ignore_case: bool) -> Self {
        let mut by_article: HashMap<String, Vec<&'a InventoryRecord>> = HashMap::new();
        for record in inventory {
            if let Some(key) = normalize(&record.article, ignore_case) {
                by_article.entry(key).or_default().push(record);
            }
        }
        Self { by_article, ignore_case }
    }

    /// Number of distinct articles indexed.
    pub fn len(&self) -> usize {
        self.by_article.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_article.is_empty()
    }

    /// Finds the best inventory row for one marketplace row.
    pub fn lookup(&self, product: &ProductRecord) -> (Option<&'a InventoryRecord>, MatchKind) {
        let candidates = normalize(&product.vendor_code, self.ignore_case)
            .and_then(|key| self.by_article.get(&key));

        let Some(candidates) = candidates else {
            return (None, MatchKind::Missing);
        };

        match candidates.iter().find(|r| r.barcode == product.barcode) {
            Some(record) => (Some(*record), MatchKind::Barcode),
            None => (candidates.first().copied(), MatchKind::Article),
        }
    }
}

fn normalize(article: &str, ignore_case: bool) -> Option<String> {
    let article = article.trim();
    if article.is_empty() {
        None
    } else if ignore_case {
        Some(article.to_lowercase())
    } else {
        Some(article.to_string())
    }
}

/// Produces exactly one matched record per marketplace row.
pub fn cross_reference(
    marketplace: &[ProductRecord],
    inventory: &[InventoryRecord],
    ignore_case: bool,
) -> Vec<MatchedRecord> {
    let index = ArticleIndex::build(inventory, ignore_case);
    tracing::debug!("Built article index: {} unique articles", index.len());

    marketplace
        .iter()
        .map(|product| {
            let (found, kind) = index.lookup(product);
            MatchedRecord { marketplace: product.clone(), inventory: found.cloned(), kind }
        })
        .collect()
}

/// Counts of each match kind, for the summary line.
pub fn summarize(matched: &[MatchedRecord]) -> (usize, usize, usize) {
    matched.iter().fold((0, 0, 0), |(b, a, m), r| match r.kind {
        MatchKind::Barcode => (b + 1, a, m),
        MatchKind::Article => (b, a + 1, m),
        MatchKind::Missing => (b, a, m + 1),
    })
}
