// src/lib.rs
use anyhow::Result;
use serde::Serialize;
use tracing::warn;

pub mod benchmark;
pub mod cli;
pub mod config;
pub mod extract;
pub mod ranking;
pub mod search;
pub mod web;

pub use benchmark::{Benchmark, BenchmarkProvider};
pub use config::{AppConfig, Credentials};
pub use extract::PostedSalary;
pub use ranking::{RankedResult, Ranker};
pub use search::GoogleSearchClient;

/// One job posting assembled from a single search hit. The apply URL is
/// the posting's identity; nothing is persisted beyond the request that
/// produced it.
#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: Option<String>,
    pub location: String,
    pub salary: Option<PostedSalary>,
    pub remote: bool,
    pub apply_url: String,
    /// Host the hit came from, e.g. `it.linkedin.com`.
    pub source: Option<String>,
}

/// What the user asked for, from the web form or the CLI.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub role: String,
    pub location: String,
    pub years: u32,
}

/// Everything one search run produced: the raw postings, the benchmark
/// they were judged against and the ranked results (best first).
#[derive(Debug)]
pub struct SearchOutcome {
    pub postings: Vec<JobPosting>,
    pub benchmark: Benchmark,
    pub ranked: Vec<RankedResult>,
}

impl SearchOutcome {
    /// Looks a ranked entry's posting back up by its apply URL.
    pub fn find_posting(&self, apply_url: &str) -> Option<&JobPosting> {
        self.postings.iter().find(|p| p.apply_url == apply_url)
    }
}

/// The search, benchmark and ranking services behind one entry point.
/// Built once at startup and shared by the web handlers and the CLI.
pub struct JobSearchAgent {
    client: GoogleSearchClient,
    benchmarks: BenchmarkProvider,
    ranker: Ranker,
    result_limit: usize,
}

impl JobSearchAgent {
    pub fn from_config(config: &AppConfig, credentials: Option<Credentials>) -> Result<Self> {
        Ok(Self {
            client: GoogleSearchClient::new(credentials, config.search.clone())?,
            benchmarks: BenchmarkProvider::new(config.benchmark.clone()),
            ranker: Ranker::new(&config.reference_city),
            result_limit: config.search.result_limit,
        })
    }

    pub fn with_result_limit(mut self, limit: usize) -> Self {
        self.result_limit = limit;
        self
    }

    /// Runs one request through the full pipeline and ranks the results.
    ///
    /// A failed search degrades to an empty listing after a warning, so
    /// callers always get a page to render.
    pub async fn run(&self, request: &SearchRequest) -> SearchOutcome {
        let postings = match self
            .client
            .fetch_job_listings(&request.role, &request.location, self.result_limit)
            .await
        {
            Ok(postings) => postings,
            Err(e) => {
                warn!("Job search failed, serving empty listing: {:#}", e);
                Vec::new()
            }
        };

        let benchmark = self
            .benchmarks
            .fetch(&request.role, &request.location, request.years);
        let ranked = self.ranker.rank_jobs(&postings, &benchmark);

        SearchOutcome {
            postings,
            benchmark,
            ranked,
        }
    }
}

/// Convenience function for one-shot searches without keeping an agent around.
pub async fn search_and_rank(
    config: &AppConfig,
    credentials: Option<Credentials>,
    request: &SearchRequest,
) -> Result<SearchOutcome> {
    let agent = JobSearchAgent::from_config(config, credentials)?;
    Ok(agent.run(request).await)
}
