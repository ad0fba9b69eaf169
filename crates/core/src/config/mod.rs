//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PARTSCOPE_*)
//! 2. TOML config file (if PARTSCOPE_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::selectors::SelectorContract;

mod validation;

pub use validation::ConfigError;

/// Which similar-parts extraction the record assembler runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SimilarPartsStrategy {
    /// One part number per grouping element.
    #[default]
    SerialNumberList,
    /// One record per comparison column with per-row attributes.
    SpecMatrix,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PARTSCOPE_*)
/// 2. TOML config file (if PARTSCOPE_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Similar-parts strategy wired into the record.
    ///
    /// Set via PARTSCOPE_SIMILAR_PARTS_STRATEGY environment variable.
    #[serde(default)]
    pub similar_parts_strategy: SimilarPartsStrategy,

    /// Per-field selector overrides.
    ///
    /// Nested keys use `__`, e.g. PARTSCOPE_SELECTORS__HEADING__TAG=h2.
    #[serde(default)]
    pub selectors: SelectorContract,

    /// API key for the scraping proxy. Pages are fetched directly when unset.
    ///
    /// Set via PARTSCOPE_PROXY_API_KEY environment variable.
    #[serde(default)]
    pub proxy_api_key: Option<String>,

    /// Scraping proxy endpoint.
    ///
    /// Set via PARTSCOPE_PROXY_ENDPOINT environment variable.
    #[serde(default = "default_proxy_endpoint")]
    pub proxy_endpoint: String,

    /// Ask the proxy to execute JavaScript before returning the page.
    ///
    /// Set via PARTSCOPE_RENDER_JS environment variable.
    #[serde(default)]
    pub render_js: bool,

    /// User-Agent string for direct HTTP requests.
    ///
    /// Set via PARTSCOPE_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via PARTSCOPE_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes to fetch per page.
    ///
    /// Set via PARTSCOPE_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_proxy_endpoint() -> String {
    "https://app.scrapingbee.com/api/v1/".into()
}

fn default_user_agent() -> String {
    "partscope/0.1".into()
}

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_max_bytes() -> usize {
    10_485_760 // 10MB
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            similar_parts_strategy: SimilarPartsStrategy::default(),
            selectors: SelectorContract::default(),
            proxy_api_key: None,
            proxy_endpoint: default_proxy_endpoint(),
            render_js: false,
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The provider stack behind [`AppConfig::load`].
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("PARTSCOPE_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment.merge(
            Env::prefixed("PARTSCOPE_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        )
    }

    /// Proxy key, if fetches should go through the scraping proxy.
    pub fn proxy_api_key(&self) -> Option<&str> {
        self.proxy_api_key.as_deref().filter(|k| !k.is_empty())
    }
}
