//! HTTP client for the MoySklad JSON API (Basic auth).

use crate::config::Config;
use crate::error::ApiError;
use crate::http::{http_client, read_body};
use crate::moysklad::models::{Product, ProductList};
use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use tracing::{debug, info};
use wreq::Client;

const SERVICE: &str = "MoySklad";

/// Trait for inventory lookups - enables mocking for tests.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Finds products by article, optionally limited to a folder path.
    async fn products(
        &self,
        article: &str,
        path_name: Option<&str>,
    ) -> Result<Vec<Product>, ApiError>;
}

/// MoySklad client. Credentials are encoded once at construction.
pub struct MoySkladClient {
    client: Client,
    authorization: String,
    base_url: String,
}

impl MoySkladClient {
    /// Creates a client from configuration. Fails if login or password is missing.
    pub fn new(config: &Config) -> Result<Self> {
        let (login, password) = config.ms_credentials()?;

        Ok(Self {
            client: http_client(config)?,
            authorization: basic_auth(login, password),
            base_url: config.ms_url.trim_end_matches('/').to_string(),
        })
    }

    fn product_url(&self, article: &str, path_name: Option<&str>) -> String {
        let mut url = format!(
            "{}/entity/product?filter=article={}",
            self.base_url,
            urlencoding::encode(article)
        );
        if let Some(path_name) = path_name {
            url.push_str("&filter=pathName=");
            url.push_str(&urlencoding::encode(path_name));
        }
        url
    }
}

fn basic_auth(login: &str, password: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(format!("{login}:{password}"));
    format!("Basic {encoded}")
}

#[async_trait]
impl InventoryApi for MoySkladClient {
    async fn products(
        &self,
        article: &str,
        path_name: Option<&str>,
    ) -> Result<Vec<Product>, ApiError> {
        let url = self.product_url(article, path_name);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Authorization", &self.authorization)
            .header("Accept", "application/json;charset=utf-8")
            .send()
            .await?;

        let body = read_body(SERVICE, response).await?;
        let list: ProductList = serde_json::from_str(&body)
            .map_err(|source| ApiError::Decode { service: SERVICE, source })?;

        info!("MoySklad returned {} products for article {}", list.rows.len(), article);
        Ok(list.rows)
    }
}
