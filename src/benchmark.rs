// src/benchmark.rs
use chrono::Local;
use serde::Serialize;
use tracing::debug;

use crate::config::BenchmarkConfig;

/// Reference salary percentiles a posting is judged against.
#[derive(Debug, Clone, Serialize)]
pub struct Benchmark {
    pub p50: i64,
    pub p75: i64,
    pub p90: i64,
    pub source: String,
    /// Day the benchmark was served, `YYYY-MM-DD`.
    pub date: String,
}

/// Serves the salary benchmark for a role and location.
///
/// Backed by configured percentiles for now; a real compensation API
/// (PayScale, Glassdoor) can replace the lookup without touching callers.
pub struct BenchmarkProvider {
    config: BenchmarkConfig,
}

impl BenchmarkProvider {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn fetch(&self, role: &str, location: &str, years: u32) -> Benchmark {
        debug!(
            "Serving salary benchmark for {} in {} ({} years of experience)",
            role, location, years
        );
        Benchmark {
            p50: self.config.p50,
            p75: self.config.p75,
            p90: self.config.p90,
            source: self.config.source.clone(),
            date: Local::now().format("%Y-%m-%d").to_string(),
        }
    }
}
