// src/web/types.rs

use askama::Template;
use rocket::form::FromForm;
use rocket::serde::Serialize;

use crate::benchmark::Benchmark;
use crate::extract::format_eur;
use crate::{JobPosting, RankedResult, SearchOutcome, SearchRequest};

#[derive(FromForm)]
pub struct SearchForm {
    pub title: String,
    pub location: String,
    /// Optional so an empty form value degrades to 0 instead of erroring.
    pub years: Option<u32>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

/// The single page of the app: search form, and after a run the benchmark
/// box plus the ranked listing.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub searched: bool,
    pub role: String,
    pub location: String,
    pub benchmark: Option<BenchmarkView>,
    pub results: Vec<ResultRow>,
}

pub struct BenchmarkView {
    pub p50: String,
    pub p75: String,
    pub p90: String,
    pub source: String,
    pub date: String,
}

/// One table row, everything preformatted for display.
pub struct ResultRow {
    pub title: String,
    pub company: String,
    pub location: String,
    pub ral: String,
    pub remote: bool,
    pub score: u8,
    pub rationale: String,
    pub apply_url: String,
    pub source: String,
}

impl IndexTemplate {
    pub fn landing() -> Self {
        Self {
            searched: false,
            role: String::new(),
            location: String::new(),
            benchmark: None,
            results: Vec::new(),
        }
    }

    pub fn with_results(request: &SearchRequest, outcome: &SearchOutcome) -> Self {
        let results = outcome
            .ranked
            .iter()
            .filter_map(|result| {
                let posting = outcome.find_posting(&result.apply_url)?;
                Some(ResultRow::new(posting, result))
            })
            .collect();

        Self {
            searched: true,
            role: request.role.clone(),
            location: request.location.clone(),
            benchmark: Some(BenchmarkView::from(&outcome.benchmark)),
            results,
        }
    }
}

impl ResultRow {
    fn new(posting: &JobPosting, result: &RankedResult) -> Self {
        Self {
            title: posting.title.clone(),
            company: posting.company.clone().unwrap_or_else(|| "n.d.".to_string()),
            location: posting.location.clone(),
            ral: posting
                .salary
                .as_ref()
                .map(|salary| salary.display())
                .unwrap_or_else(|| "n.d.".to_string()),
            remote: posting.remote,
            score: result.score,
            rationale: result.rationale.clone(),
            apply_url: result.apply_url.clone(),
            source: posting.source.clone().unwrap_or_default(),
        }
    }
}

impl From<&Benchmark> for BenchmarkView {
    fn from(benchmark: &Benchmark) -> Self {
        Self {
            p50: format_eur(benchmark.p50),
            p75: format_eur(benchmark.p75),
            p90: format_eur(benchmark.p90),
            source: benchmark.source.clone(),
            date: benchmark.date.clone(),
        }
    }
}
