// src/search/types.rs
use serde::Deserialize;

/// Subset of the Google Custom Search JSON API response we read.
/// Every field is optional; the API omits `items` entirely when a query
/// has no hits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub items: Option<Vec<SearchItem>>,
    pub search_information: Option<SearchInformation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub snippet: Option<String>,
    /// Bare host of the result, e.g. `it.linkedin.com`.
    pub display_link: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInformation {
    pub total_results: Option<String>,
    pub search_time: Option<f64>,
}
