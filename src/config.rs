//! Configuration management with TOML, `.env`/environment variables, and CLI overrides.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::ApiError;

pub const DEFAULT_WB_COMMON_URL: &str = "https://common-api.wildberries.ru";
pub const DEFAULT_WB_CONTENT_URL: &str = "https://content-api.wildberries.ru";
pub const DEFAULT_MS_URL: &str = "https://api.moysklad.ru/api/remap/1.2";

/// Application configuration with layered loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Wildberries API token
    #[serde(default)]
    pub wb_token: Option<String>,

    /// MoySklad login
    #[serde(default)]
    pub ms_login: Option<String>,

    /// MoySklad password
    #[serde(default)]
    pub ms_password: Option<String>,

    /// MoySklad folder path used to narrow product lookups
    #[serde(default)]
    pub ms_path_name: Option<String>,

    /// Marketplace subject (category) to list
    #[serde(default = "default_subject_id")]
    pub subject_id: u64,

    /// Number of cards requested from the marketplace
    #[serde(default = "default_card_limit")]
    pub card_limit: u32,

    /// Proxy URL (e.g., socks5://host:port)
    #[serde(default)]
    pub proxy: Option<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,

    /// Copy the TSV block to the system clipboard
    #[serde(default = "default_clipboard")]
    pub clipboard: bool,

    #[serde(default = "default_wb_common_url")]
    pub wb_common_url: String,

    #[serde(default = "default_wb_content_url")]
    pub wb_content_url: String,

    #[serde(default = "default_ms_url")]
    pub ms_url: String,
}

fn default_subject_id() -> u64 {
    435
}

fn default_card_limit() -> u32 {
    100
}

fn default_clipboard() -> bool {
    true
}

fn default_wb_common_url() -> String {
    DEFAULT_WB_COMMON_URL.to_string()
}

fn default_wb_content_url() -> String {
    DEFAULT_WB_CONTENT_URL.to_string()
}

fn default_ms_url() -> String {
    DEFAULT_MS_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wb_token: None,
            ms_login: None,
            ms_password: None,
            ms_path_name: None,
            subject_id: default_subject_id(),
            card_limit: default_card_limit(),
            proxy: None,
            format: OutputFormat::Tsv,
            clipboard: default_clipboard(),
            wb_common_url: default_wb_common_url(),
            wb_content_url: default_wb_content_url(),
            ms_url: default_ms_url(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("catalog-xref").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    ///
    /// A `.env` file in the working directory is read first; variables that
    /// are already set in the process environment win over it.
    pub fn with_env(mut self) -> Self {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
        }

        if let Some(token) = non_empty_var("WB_API_TOKEN") {
            self.wb_token = Some(token);
        }
        if let Some(login) = non_empty_var("MOYSKLAD_API_LOGIN") {
            self.ms_login = Some(login);
        }
        if let Some(password) = non_empty_var("MOYSKLAD_API_PASSWORD") {
            self.ms_password = Some(password);
        }
        if let Some(path_name) = non_empty_var("MOYSKLAD_FILTER_PATH_NAME") {
            self.ms_path_name = Some(path_name);
        }

        if let Some(subject) = non_empty_var("XREF_SUBJECT_ID") {
            if let Ok(s) = subject.parse() {
                self.subject_id = s;
            }
        }

        if let Some(proxy) = non_empty_var("XREF_PROXY") {
            self.proxy = Some(proxy);
        }

        self
    }

    /// Returns the marketplace token or a credentials error.
    pub fn wb_token(&self) -> Result<&str, ApiError> {
        self.wb_token.as_deref().ok_or(ApiError::MissingCredentials("Wildberries"))
    }

    /// Returns the inventory login and password or a credentials error.
    pub fn ms_credentials(&self) -> Result<(&str, &str), ApiError> {
        match (self.ms_login.as_deref(), self.ms_password.as_deref()) {
            (Some(login), Some(password)) => Ok((login, password)),
            _ => Err(ApiError::MissingCredentials("MoySklad")),
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Output format for results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Tsv,
    Json,
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown format: {}. Use: tsv, json, table", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Table => write!(f, "table"),
        }
    }
}
