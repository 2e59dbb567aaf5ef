//! Data models for filter selections, upstream responses, and fetch results.
//!
//! This module defines the values that flow through a single page request:
//! - [`FilterSelection`]: The normalized country/category pair a caller asked for
//! - [`Article`]: One article exactly as newsdata.io returned it
//! - [`NewsdataResponse`]: The subset of the upstream body this service reads
//! - [`FetchResult`]: Everything the rendering layer needs for one page

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Country used when the request does not name one.
pub const DEFAULT_COUNTRY: &str = "us";

/// Category used when the request does not name one.
pub const DEFAULT_CATEGORY: &str = "all";

/// Filter value meaning "do not filter on this dimension".
pub const ALL: &str = "all";

/// A news article as returned by newsdata.io.
///
/// The service never interprets or validates these fields; they are passed
/// through to the renderer and the JSON endpoint as-is.
pub type Article = Map<String, Value>;

/// The country/category pair a caller wants articles filtered by.
///
/// Both fields always hold a value. Only an *absent* parameter falls back to
/// the defaults; an explicitly empty value is kept and, like `"all"`,
/// disables that filter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FilterSelection {
    pub country: String,
    pub category: String,
}

impl FilterSelection {
    /// Build a selection from optional request parameters, applying defaults.
    ///
    /// # Arguments
    ///
    /// * `country` - Country code from the request; `None` becomes `"us"`
    /// * `category` - Category from the request; `None` becomes `"all"`
    ///
    /// # Returns
    ///
    /// A selection holding both values. Present values, empty ones included,
    /// are kept verbatim.
    pub fn new(country: Option<String>, category: Option<String>) -> Self {
        Self {
            country: country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            category: category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        }
    }

    /// The country to forward upstream, or `None` when unfiltered.
    pub fn country_filter(&self) -> Option<&str> {
        active_filter(&self.country)
    }

    /// The category to forward upstream, or `None` when unfiltered.
    pub fn category_filter(&self) -> Option<&str> {
        active_filter(&self.category)
    }
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn active_filter(value: &str) -> Option<&str> {
    if value.is_empty() || value == ALL {
        None
    } else {
        Some(value)
    }
}

/// The part of a newsdata.io response body this service reads.
///
/// newsdata.io sends `results: null` on some empty pages, so a null value is
/// treated the same as a missing key.
#[derive(Debug, Deserialize)]
pub struct NewsdataResponse {
    #[serde(default)]
    pub results: Option<Vec<Article>>,
}

/// The outcome of one fetch, handed to the renderer.
///
/// On success `error` is `None` and `articles` holds whatever the upstream
/// returned. On failure `articles` is empty and `error` describes why.
/// The selected filters are echoed back either way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchResult {
    pub articles: Vec<Article>,
    pub selected_country: String,
    pub selected_category: String,
    pub error: Option<String>,
}

impl FetchResult {
    pub fn success(selection: FilterSelection, articles: Vec<Article>) -> Self {
        Self {
            articles,
            selected_country: selection.country,
            selected_category: selection.category,
            error: None,
        }
    }

    pub fn failure(selection: FilterSelection, error: impl Into<String>) -> Self {
        Self {
            articles: Vec::new(),
            selected_country: selection.country,
            selected_category: selection.category,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_selection_defaults() {
        let selection = FilterSelection::default();
        assert_eq!(selection.country, "us");
        assert_eq!(selection.category, "all");
    }

    #[test]
    fn test_selection_keeps_explicit_values() {
        let selection = FilterSelection::new(Some("gb".into()), Some("sports".into()));
        assert_eq!(selection.country_filter(), Some("gb"));
        assert_eq!(selection.category_filter(), Some("sports"));
    }

    #[test]
    fn test_empty_and_all_disable_filters() {
        let selection = FilterSelection::new(Some(String::new()), Some("all".into()));
        assert_eq!(selection.country, "");
        assert_eq!(selection.country_filter(), None);
        assert_eq!(selection.category_filter(), None);
    }

    #[test]
    fn test_response_with_results() {
        let body = r#"{"status":"success","results":[{"title":"A"},{"title":"B"}]}"#;
        let response: NewsdataResponse = serde_json::from_str(body).unwrap();
        let results = response.results.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["title"], json!("A"));
    }

    #[test]
    fn test_response_missing_or_null_results() {
        let missing: NewsdataResponse = serde_json::from_str(r#"{"status":"success"}"#).unwrap();
        assert!(missing.results.is_none());

        let null: NewsdataResponse = serde_json::from_str(r#"{"results":null}"#).unwrap();
        assert!(null.results.is_none());
    }

    #[test]
    fn test_response_rejects_non_object_body() {
        assert!(serde_json::from_str::<NewsdataResponse>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<NewsdataResponse>(r#"{"results":"nope"}"#).is_err());
    }

    #[test]
    fn test_fetch_result_failure_clears_articles() {
        let selection = FilterSelection::new(Some("de".into()), None);
        let result = FetchResult::failure(selection, "connection refused");
        assert!(result.articles.is_empty());
        assert_eq!(result.selected_country, "de");
        assert_eq!(result.selected_category, "all");
        assert_eq!(result.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_fetch_result_serialization() {
        let mut article = Article::new();
        article.insert("title".into(), json!("Headline"));
        let result = FetchResult::success(FilterSelection::default(), vec![article]);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["articles"][0]["title"], "Headline");
        assert_eq!(value["selected_country"], "us");
        assert_eq!(value["selected_category"], "all");
        assert!(value["error"].is_null());
    }
}
