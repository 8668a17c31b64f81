// src/search/client.rs
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::{Credentials, SearchConfig};
use crate::extract::{clean_snippet, SignalExtractor};
use crate::search::types::SearchResponse;
use crate::JobPosting;

const SEARCH_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";
const USER_AGENT: &str = "jobscout/0.1 (job search agent)";

/// Fetches job postings through the Google Custom Search JSON API.
///
/// Credentials are optional: without them every search returns an empty
/// listing after a warning, so the rest of the service keeps working.
pub struct GoogleSearchClient {
    client: reqwest::Client,
    credentials: Option<Credentials>,
    config: SearchConfig,
    extractor: SignalExtractor,
}

impl GoogleSearchClient {
    pub fn new(credentials: Option<Credentials>, config: SearchConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            credentials,
            config,
            extractor: SignalExtractor::new(),
        })
    }

    /// Search query restricted to the configured job boards, e.g.
    /// `SAP Consultant Milano lavoro site:linkedin.com OR site:indeed.com`.
    pub fn build_query(&self, role: &str, location: &str) -> String {
        let sites = self
            .config
            .domains
            .iter()
            .map(|domain| format!("site:{}", domain))
            .collect::<Vec<_>>()
            .join(" OR ");
        format!("{} {} lavoro {}", role, location, sites)
    }

    /// Runs one search and maps the hits to job postings. Postings that
    /// carry no recognizable location fall back to the searched one.
    pub async fn fetch_job_listings(
        &self,
        role: &str,
        location: &str,
        limit: usize,
    ) -> Result<Vec<JobPosting>> {
        let credentials = match &self.credentials {
            Some(credentials) => credentials,
            None => {
                warn!("GOOGLE_API_KEY or GOOGLE_CSE_ID not set, returning no results");
                return Ok(Vec::new());
            }
        };

        let query = self.build_query(role, location);
        info!("Searching job listings: {}", query);

        // The API caps num at 10 per request.
        let num = limit.clamp(1, 10).to_string();
        let response = self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[
                ("key", credentials.api_key.as_str()),
                ("cx", credentials.cse_id.as_str()),
                ("q", query.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await
            .context("Custom Search request failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Custom Search returned status {}", response.status());
        }

        let payload: SearchResponse = response
            .json()
            .await
            .context("Failed to decode Custom Search response")?;

        if let Some(info) = &payload.search_information {
            debug!(
                "Custom Search reported {} total results",
                info.total_results.as_deref().unwrap_or("unknown")
            );
        }

        let postings = postings_from_response(payload, &self.extractor, location, limit);
        info!("Mapped {} job postings", postings.len());
        Ok(postings)
    }
}

/// Maps raw search hits to postings, extracting salary, company, location
/// and remote signals from each snippet.
fn postings_from_response(
    response: SearchResponse,
    extractor: &SignalExtractor,
    fallback_location: &str,
    limit: usize,
) -> Vec<JobPosting> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(limit)
        .map(|item| {
            let title = item.title.unwrap_or_else(|| "Senza titolo".to_string());
            let snippet = clean_snippet(&item.snippet.unwrap_or_default());
            let location = extractor
                .location(&snippet)
                .unwrap_or_else(|| fallback_location.to_string());
            let remote = extractor.is_remote(&title)
                || extractor.is_remote(&snippet)
                || extractor.is_remote(&location);

            JobPosting {
                company: extractor.company(&snippet),
                salary: extractor.salary(&snippet),
                remote,
                location,
                apply_url: item.link.unwrap_or_else(|| "#".to_string()),
                source: item.display_link,
                title,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RESPONSE: &str = r#"{
        "searchInformation": { "totalResults": "2", "searchTime": 0.31 },
        "items": [
            {
                "title": "Senior Data Engineer - Acme",
                "link": "https://it.linkedin.com/jobs/view/12345",
                "snippet": "Senior Data Engineer presso Acme Solutions, sede a Milano. RAL € 65.000 annui, possibile smart working.",
                "displayLink": "it.linkedin.com"
            },
            {
                "title": "Impiegato amministrativo",
                "link": "https://www.indeed.com/viewjob?jk=abc",
                "snippet": "Impiegato amministrativo, contratto a tempo determinato.",
                "displayLink": "www.indeed.com"
            },
            {
                "snippet": "Annuncio senza titolo"
            }
        ]
    }"#;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_maps_items_to_postings() {
        let extractor = SignalExtractor::new();
        let postings = postings_from_response(parse(SAMPLE_RESPONSE), &extractor, "Bologna", 10);

        assert_eq!(postings.len(), 3);

        let first = &postings[0];
        assert_eq!(first.title, "Senior Data Engineer - Acme");
        assert_eq!(first.apply_url, "https://it.linkedin.com/jobs/view/12345");
        assert_eq!(first.location, "Milano");
        assert_eq!(first.company.as_deref(), Some("Acme Solutions"));
        assert_eq!(first.salary.as_ref().unwrap().eur, Some(65_000));
        assert!(first.remote);
        assert_eq!(first.source.as_deref(), Some("it.linkedin.com"));
    }

    #[test]
    fn test_missing_fields_get_fallbacks() {
        let extractor = SignalExtractor::new();
        let postings = postings_from_response(parse(SAMPLE_RESPONSE), &extractor, "Bologna", 10);

        let second = &postings[1];
        assert!(!second.remote);
        assert!(second.salary.is_none());
        assert!(second.company.is_none());

        let third = &postings[2];
        assert_eq!(third.title, "Senza titolo");
        assert_eq!(third.apply_url, "#");
        assert_eq!(third.location, "Bologna");
    }

    #[test]
    fn test_respects_result_limit() {
        let extractor = SignalExtractor::new();
        let postings = postings_from_response(parse(SAMPLE_RESPONSE), &extractor, "Bologna", 1);
        assert_eq!(postings.len(), 1);
    }

    #[test]
    fn test_empty_response_maps_to_no_postings() {
        let extractor = SignalExtractor::new();
        let response = parse(r#"{ "searchInformation": { "totalResults": "0" } }"#);
        assert!(postings_from_response(response, &extractor, "Bologna", 10).is_empty());
    }

    #[test]
    fn test_query_includes_site_restrictions() {
        let client = GoogleSearchClient::new(None, SearchConfig::default()).unwrap();
        let query = client.build_query("SAP Consultant", "Milano");
        assert_eq!(
            query,
            "SAP Consultant Milano lavoro site:linkedin.com OR site:glassdoor.com OR site:indeed.com"
        );
    }

    #[tokio::test]
    async fn test_search_without_credentials_returns_empty() {
        let client = GoogleSearchClient::new(None, SearchConfig::default()).unwrap();
        let postings = client
            .fetch_job_listings("Data Engineer", "Milano", 5)
            .await
            .unwrap();
        assert!(postings.is_empty());
    }

    #[tokio::test]
    async fn test_failed_search_call_is_an_error() {
        // A zero timeout fails the request before anything leaves the host.
        let config = SearchConfig {
            timeout_seconds: 0,
            ..SearchConfig::default()
        };
        let credentials = Credentials {
            api_key: "test-key".to_string(),
            cse_id: "test-cx".to_string(),
        };
        let client = GoogleSearchClient::new(Some(credentials), config).unwrap();

        let result = client.fetch_job_listings("Data Engineer", "Milano", 5).await;
        assert!(result.is_err());
    }
}
