// src/config.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

const CONFIG_FILE: &str = "config.yaml";

/// Application configuration, selected per environment from `config.yaml`.
/// When the file is absent the built-in defaults apply, so the service can
/// start from a bare checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// City the distance penalty is measured from.
    pub reference_city: String,
    pub search: SearchConfig,
    pub benchmark: BenchmarkConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Job boards the search is restricted to via `site:` operators.
    pub domains: Vec<String>,
    /// Maximum number of postings kept per search.
    pub result_limit: usize,
    pub timeout_seconds: u64,
}

/// Salary percentiles served while no real compensation API is wired in.
#[derive(Debug, Clone, Deserialize)]
pub struct BenchmarkConfig {
    pub p50: i64,
    pub p75: i64,
    pub p90: i64,
    pub source: String,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: AppConfig,
    production: AppConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            reference_city: "bologna".to_string(),
            search: SearchConfig::default(),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            domains: vec![
                "linkedin.com".to_string(),
                "glassdoor.com".to_string(),
                "indeed.com".to_string(),
            ],
            result_limit: 10,
            timeout_seconds: 10,
        }
    }
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            p50: 52_000,
            p75: 67_400,
            p90: 83_000,
            source: "PayScale/Glassdoor (placeholder)".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration for the current environment.
    pub fn load() -> Result<Self> {
        let environment = environment_name();
        info!("Loading configuration for environment: {}", environment);

        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            warn!("{} not found, using built-in defaults", CONFIG_FILE);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", CONFIG_FILE))?;
        Self::from_yaml(&content, &environment)
    }

    fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let file: ConfigFile =
            serde_yaml::from_str(content).with_context(|| format!("Failed to parse {}", CONFIG_FILE))?;

        let config = match environment {
            "production" => file.production,
            _ => file.local,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_city.trim().is_empty() {
            anyhow::bail!("reference_city must not be empty");
        }
        if self.search.domains.is_empty() {
            anyhow::bail!("search.domains must list at least one job board");
        }
        if self.search.result_limit == 0 {
            anyhow::bail!("search.result_limit must be positive");
        }
        let b = &self.benchmark;
        if !(b.p50 <= b.p75 && b.p75 <= b.p90) {
            anyhow::bail!("benchmark percentiles must satisfy p50 <= p75 <= p90");
        }
        Ok(())
    }
}

fn environment_name() -> String {
    std::env::var("JOBSCOUT_ENV")
        .or_else(|_| std::env::var("ENVIRONMENT"))
        .or_else(|_| std::env::var("ENV"))
        .unwrap_or_else(|_| "local".to_string())
}

/// Google Custom Search credentials, read from the environment only.
/// Both variables must be set; otherwise searches run disabled and
/// return no results.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_key: String,
    pub cse_id: String,
}

impl Credentials {
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("GOOGLE_API_KEY").ok()?;
        let cse_id = std::env::var("GOOGLE_CSE_ID").ok()?;
        if api_key.trim().is_empty() || cse_id.trim().is_empty() {
            return None;
        }
        Some(Self { api_key, cse_id })
    }
}
