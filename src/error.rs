//! Error types for the news fetcher and startup configuration.

use std::error::Error as StdError;
use thiserror::Error;

/// Anything that prevents a usable JSON response from newsdata.io.
///
/// Both variants end up as a single message in
/// [`FetchResult::error`](crate::models::FetchResult); the split only exists
/// so logs can tell a network problem from a bad body.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be completed or returned a non-2xx status.
    #[error("{0}")]
    Transport(reqwest::Error),

    /// The 2xx body was not JSON of the expected shape.
    #[error("invalid response from news service: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key in its query string.
        FetchError::Transport(err.without_url())
    }
}

impl FetchError {
    /// Render the error and its whole source chain as one line.
    ///
    /// reqwest's top-level message ("error sending request") is rarely
    /// enough to tell a DNS failure from a refused connection.
    pub fn describe(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source_chain_start();
        while let Some(err) = source {
            let text = err.to_string();
            if !message.contains(&text) {
                message.push_str(": ");
                message.push_str(&text);
            }
            source = err.source();
        }
        message
    }

    fn source_chain_start(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            FetchError::Transport(err) => err.source(),
            FetchError::Decode(_) => None,
        }
    }
}

/// Problems resolving settings at startup.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no newsdata.io API key configured (set --api-key, NEWSDATA_API_KEY, or api_key in the config file)")]
    MissingApiKey,

    #[error("invalid bind address {value:?}: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("invalid base URL {value:?}: {source}")]
    InvalidBaseUrl {
        value: String,
        source: url::ParseError,
    },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_yaml::Error,
    },
}
