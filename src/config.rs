use clap::Parser;
use reqwest::Url;

use crate::router::{Route, RouteError};

/// Backend location used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Parser)]
#[command(
    name = "pdf-copilot",
    version,
    about = "Chat with, summarize, classify and compare your PDFs"
)]
pub struct Cli {
    /// Base URL of the document-assistant backend.
    #[arg(long, env = "PDF_COPILOT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Route to open first, e.g. `/summaries` or `/chat?pdf=report.pdf`.
    #[arg(long, default_value = "/")]
    pub route: String,
}

impl Cli {
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        ClientConfig::new(&self.base_url)
    }

    pub fn start_route(&self) -> Result<Route, ConfigError> {
        Route::parse(&self.route).map_err(ConfigError::StartRoute)
    }
}

/// Process-wide client settings. Built once at startup and passed to the
/// HTTP adapter; nothing reads it from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: Url,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        let url = Url::parse(base_url.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if url.cannot_be_a_base() || url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: "expected a plain http(s) location without query or fragment".into(),
            });
        }

        Ok(Self { base_url: url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
    #[error("Invalid start route: {0}")]
    StartRoute(#[source] RouteError),
}
