//! newsdata.io client.
//!
//! [`ArticleFetcher`] turns a [`FilterSelection`] into exactly one GET against
//! the `/api/1/news` endpoint and folds the outcome into a [`FetchResult`].
//! Failures never escape [`ArticleFetcher::fetch`]: they are logged and
//! reported through the result's `error` field so the page can still render.
//!
//! # Query Parameters
//!
//! | Key | When |
//! |-----|------|
//! | `apikey` | always |
//! | `language` | always, `en` |
//! | `country` | country is neither empty nor `all` |
//! | `category` | category is neither empty nor `all` |
//!
//! There is no retry, backoff, or cache. Timeouts are whatever the
//! `reqwest::Client` was built with.

use crate::error::FetchError;
use crate::models::{Article, FetchResult, FilterSelection, NewsdataResponse};
use crate::utils::truncate_for_log;
use reqwest::Client;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Default newsdata.io endpoint.
pub const NEWSDATA_URL: &str = "https://newsdata.io/api/1/news";

/// Language requested for every fetch.
pub const LANGUAGE: &str = "en";

/// Fetches articles from newsdata.io for a single filter selection.
///
/// The fetcher holds no per-request state. Cloning it is cheap and every
/// clone shares the same connection pool.
#[derive(Clone)]
pub struct ArticleFetcher {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl fmt::Debug for ArticleFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleFetcher")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl ArticleFetcher {
    /// Create a fetcher bound to one endpoint and API key.
    ///
    /// # Arguments
    ///
    /// * `client` - Shared HTTP client; its timeouts apply to every fetch
    /// * `base_url` - The news endpoint, normally [`NEWSDATA_URL`]
    /// * `api_key` - newsdata.io API key, sent as the `apikey` parameter
    pub fn new(client: Client, base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Build the query string pairs sent upstream for `selection`.
    pub fn query_parameters(&self, selection: &FilterSelection) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("apikey", self.api_key.clone()),
            ("language", LANGUAGE.to_string()),
        ];
        if let Some(country) = selection.country_filter() {
            params.push(("country", country.to_string()));
        }
        if let Some(category) = selection.category_filter() {
            params.push(("category", category.to_string()));
        }
        params
    }

    /// Fetch articles for `selection`.
    ///
    /// # Arguments
    ///
    /// * `selection` - The normalized country/category filters
    ///
    /// # Returns
    ///
    /// Always a fully populated [`FetchResult`] echoing `selection`. On
    /// failure the article list is empty and `error` holds a readable
    /// description with the API key stripped out.
    #[instrument(level = "info", skip_all, fields(country = %selection.country, category = %selection.category))]
    pub async fn fetch(&self, selection: FilterSelection) -> FetchResult {
        let t0 = Instant::now();
        match self.request(&selection).await {
            Ok(articles) => {
                info!(
                    count = articles.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Fetched articles"
                );
                FetchResult::success(selection, articles)
            }
            Err(e) => {
                let message = e.describe();
                warn!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %message,
                    "News fetch failed"
                );
                FetchResult::failure(selection, message)
            }
        }
    }

    async fn request(&self, selection: &FilterSelection) -> Result<Vec<Article>, FetchError> {
        let params = self.query_parameters(selection);
        debug!(
            keys = ?params.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            "Requesting newsdata.io"
        );

        let response = self
            .client
            .get(self.base_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        debug!(%status, "newsdata.io responded");
        let body = response.error_for_status()?.text().await?;

        let parsed: NewsdataResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(
                error = %e,
                body_preview = %truncate_for_log(&body, 300),
                "newsdata.io returned a body that is not a news response"
            );
            FetchError::from(e)
        })?;

        Ok(parsed.results.unwrap_or_default())
    }
}
