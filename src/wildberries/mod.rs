//! Wildberries marketplace API: client and wire models.

pub mod client;
pub mod models;

pub use client::{MarketplaceApi, WildberriesClient};
pub use models::{Card, CardSize};
