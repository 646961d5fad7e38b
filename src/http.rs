//! Shared HTTP plumbing for the API clients.

use crate::config::Config;
use crate::error::ApiError;
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;
use wreq::Client;

/// Builds an HTTP client with the configured proxy and timeouts.
pub(crate) fn http_client(config: &Config) -> Result<Client> {
    let mut builder = Client::builder()
        .gzip(true)
        .brotli(true)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10));

    if let Some(proxy_url) = &config.proxy {
        debug!("Configuring proxy: {}", proxy_url);
        let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
        builder = builder.proxy(proxy);
    }

    builder.build().context("Failed to build HTTP client")
}

/// Reads the body, turning a non-success status into [`ApiError::Status`].
pub(crate) async fn read_body(
    service: &'static str,
    response: wreq::Response,
) -> Result<String, ApiError> {
    let status = response.status();
    debug!("{} response status: {}", service, status);

    let body = response.text().await?;
    if !status.is_success() {
        return Err(ApiError::Status { service, status: status.as_u16(), body });
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_http_client_default() {
        assert!(http_client(&Config::default()).is_ok());
    }

    #[tokio::test]
    async fn test_http_client_with_proxy() {
        let config =
            Config { proxy: Some("socks5://127.0.0.1:1080".to_string()), ..Config::default() };
        assert!(http_client(&config).is_ok());
    }
}
