//! Command-line interface definitions for the news viewer.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option can also be provided via an environment variable, and any
//! option left unset falls back to the YAML config file (see [`crate::config`]).

use clap::Parser;

/// Command-line arguments for the news viewer.
///
/// # Examples
///
/// ```sh
/// # API key from the environment, default bind address
/// NEWSDATA_API_KEY=pub_xxx newsdata_view
///
/// # Everything from a config file, but listen on all interfaces
/// newsdata_view -c ./newsdata.yaml -b 0.0.0.0:8080
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Optional path to a YAML config file
    #[arg(short, long)]
    pub config: Option<String>,

    /// newsdata.io API key
    #[arg(long, env = "NEWSDATA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to serve the page on (default 127.0.0.1:8000)
    #[arg(short, long, env = "NEWS_BIND")]
    pub bind: Option<String>,

    /// newsdata.io news endpoint
    #[arg(long, env = "NEWSDATA_BASE_URL")]
    pub base_url: Option<String>,
}
