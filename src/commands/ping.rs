//! Marketplace connectivity check.

use crate::config::Config;
use crate::wildberries::{MarketplaceApi, WildberriesClient};
use anyhow::{Context, Result};
use tracing::warn;

/// Checks that the marketplace accepts the configured token.
pub struct PingCommand {
    config: Config,
}

impl PingCommand {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Pings the marketplace and returns a human-readable status line.
    pub async fn execute(&self) -> Result<String> {
        let client = WildberriesClient::new(&self.config).context("Failed to create HTTP client")?;
        Ok(Self::message(Self::check(&client).await))
    }

    /// Returns true when the API answered with success. Transport errors count as failure.
    pub async fn check(client: &impl MarketplaceApi) -> bool {
        match client.ping().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!("Wildberries ping failed: {}", e);
                false
            }
        }
    }

    pub fn message(ok: bool) -> String {
        if ok {
            "Wildberries API connection OK".to_string()
        } else {
            "Wildberries API connection check failed".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mocks::MockMarketplace;

    #[tokio::test]
    async fn test_check_ok() {
        let client = MockMarketplace::new(Vec::new());
        assert!(PingCommand::check(&client).await);
    }

    #[tokio::test]
    async fn test_check_failed() {
        let client = MockMarketplace::failing();
        assert!(!PingCommand::check(&client).await);
    }

    #[test]
    fn test_message() {
        assert!(PingCommand::message(true).contains("OK"));
        assert!(PingCommand::message(false).contains("failed"));
    }

    #[tokio::test]
    async fn test_execute_without_token() {
        let cmd = PingCommand::new(Config::default());
        let err = cmd.execute().await.unwrap_err();
        assert!(format!("{:#}", err).contains("Wildberries credentials"));
    }
}
