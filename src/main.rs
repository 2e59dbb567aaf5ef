//! # newsdata_view
//!
//! A small web service that shows the latest newsdata.io headlines,
//! optionally filtered by country and category.
//!
//! ## Usage
//!
//! ```sh
//! NEWSDATA_API_KEY=pub_xxx newsdata_view -b 127.0.0.1:8000
//! ```
//!
//! ## Architecture
//!
//! Each page request runs the same short pipeline:
//! 1. **Normalize**: Read `country`/`category` from the query string, defaulting to `us`/`all`
//! 2. **Fetch**: One GET against newsdata.io; failures become an error message, not an error page
//! 3. **Output**: Render the result as HTML (`/`) or return it as JSON (`/api/news`)

use clap::Parser;
use std::error::Error;
use tokio::signal;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod utils;
mod web;

#[cfg(test)]
mod test_support;

use api::ArticleFetcher;
use cli::Cli;
use config::Settings;
use web::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "newsdata_view starting up");

    let args = Cli::parse();
    debug!(config = ?args.config, bind = ?args.bind, "Parsed CLI arguments");

    let settings = match Settings::load(&args).await {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };
    info!(?settings, "Configuration resolved");

    let client = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let fetcher = ArticleFetcher::new(client, settings.base_url.clone(), settings.api_key.clone());
    let app = web::router(AppState { fetcher });

    let listener = tokio::net::TcpListener::bind(settings.bind).await?;
    info!(addr = %settings.bind, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully");
        },
        _ = terminate => {
            warn!("Received SIGTERM, shutting down gracefully");
        },
    }
}
