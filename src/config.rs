//! Startup configuration.
//!
//! Settings are resolved once in `main` from three layers, highest first:
//! command-line flags / environment variables ([`Cli`]), an optional YAML
//! file ([`FileConfig`]), and built-in defaults. The resulting [`Settings`]
//! are owned by the application and handed to the fetcher; nothing reads
//! process-wide configuration at request time.
//!
//! # File Format
//!
//! ```yaml
//! api_key: pub_xxxxxxxx
//! bind: 127.0.0.1:8000
//! base_url: https://newsdata.io/api/1/news
//! ```

use crate::api::NEWSDATA_URL;
use crate::cli::Cli;
use crate::error::ConfigError;
use serde::Deserialize;
use std::net::SocketAddr;
use tracing::{info, instrument};
use url::Url;

pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

/// Optional settings read from the YAML config file.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_key: Option<String>,
    pub bind: Option<String>,
    pub base_url: Option<String>,
}

impl FileConfig {
    pub fn from_yaml_str(yaml: &str, path: &str) -> Result<Self, ConfigError> {
        // An empty file is a valid "no overrides" config.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    #[instrument(level = "info")]
    pub async fn load(path: &str) -> Result<Self, ConfigError> {
        let yaml = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_string(),
                source,
            })?;
        let config = Self::from_yaml_str(&yaml, path)?;
        info!("Loaded config file");
        Ok(config)
    }
}

/// Fully resolved runtime settings.
#[derive(Clone, PartialEq)]
pub struct Settings {
    pub api_key: String,
    pub bind: SocketAddr,
    pub base_url: Url,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("bind", &self.bind)
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

impl Settings {
    /// Load the config file named by `cli` (if any) and resolve settings.
    pub async fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path).await?,
            None => FileConfig::default(),
        };
        Self::resolve(cli, file)
    }

    /// Merge CLI values over file values over defaults.
    ///
    /// # Arguments
    ///
    /// * `cli` - Parsed command-line flags and environment variables
    /// * `file` - Values from the YAML config file, or the default if none was given
    ///
    /// # Returns
    ///
    /// The resolved [`Settings`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - No non-blank API key is configured
    /// - The bind address is not a socket address
    /// - The base URL does not parse
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .clone()
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let bind_value = cli
            .bind
            .clone()
            .or(file.bind)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_value
            .parse::<SocketAddr>()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_value.clone(),
                source,
            })?;

        let base_value = cli
            .base_url
            .clone()
            .or(file.base_url)
            .unwrap_or_else(|| NEWSDATA_URL.to_string());
        let base_url = Url::parse(&base_value).map_err(|source| ConfigError::InvalidBaseUrl {
            value: base_value.clone(),
            source,
        })?;

        Ok(Self {
            api_key,
            bind,
            base_url,
        })
    }
}
