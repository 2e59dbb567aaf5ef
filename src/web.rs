//! HTTP front end.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /?country=..&category=..` | HTML news page |
//! | `GET /api/news?country=..&category=..` | `FetchResult` as JSON |
//!
//! Both routes answer `200` even when newsdata.io fails or the query string
//! is odd; the failure is carried in the result's `error` field and shown on
//! the page.

use crate::api::ArticleFetcher;
use crate::models::{FetchResult, FilterSelection};
use crate::outputs::html::NewsPage;
use axum::{
    Json, Router,
    extract::{RawQuery, State},
    response::Html,
    routing::get,
};
use chrono::Local;
use tower_http::trace::TraceLayer;
use tracing::instrument;
use url::form_urlencoded;

/// Shared application state: the fetcher and nothing mutable.
#[derive(Clone, Debug)]
pub struct AppState {
    pub fetcher: ArticleFetcher,
}

/// Filter parameters read from the request's query string.
///
/// Read from the raw query string: the last occurrence of a key wins and
/// undecodable bytes are replaced, so no query string is ever rejected.
#[derive(Debug, Default, PartialEq)]
pub struct FilterQuery {
    pub country: Option<String>,
    pub category: Option<String>,
}

impl FilterQuery {
    /// Pull `country` and `category` out of a raw query string.
    ///
    /// # Arguments
    ///
    /// * `raw` - The query string without the leading `?`, if the request had one
    ///
    /// # Returns
    ///
    /// The last value seen for each key; keys that never appear stay `None`.
    pub fn parse(raw: Option<&str>) -> Self {
        let mut query = Self::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "country" => query.country = Some(value.into_owned()),
                "category" => query.category = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }
}

impl From<FilterQuery> for FilterSelection {
    fn from(query: FilterQuery) -> Self {
        FilterSelection::new(query.country, query.category)
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/news", get(news_json))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - render the news page.
#[instrument(level = "info", skip_all)]
async fn index(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Html<String> {
    let query = FilterQuery::parse(raw.as_deref());
    let result = state.fetcher.fetch(query.into()).await;
    Html(NewsPage::new(&result, Local::now()).to_string())
}

/// GET /api/news - the same result the page is rendered from.
#[instrument(level = "info", skip_all)]
async fn news_json(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<FetchResult> {
    let query = FilterQuery::parse(raw.as_deref());
    Json(state.fetcher.fetch(query.into()).await)
}
