// src/cli.rs
use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::benchmark::BenchmarkProvider;
use crate::config::{AppConfig, Credentials};
use crate::extract::format_eur;
use crate::{JobSearchAgent, SearchRequest};

#[derive(Parser)]
#[command(name = "jobscout-cli")]
#[command(about = "Search and rank job postings from the terminal")]
pub struct SearchCli {
    #[command(subcommand)]
    pub command: SearchCommand,
}

#[derive(Subcommand)]
pub enum SearchCommand {
    /// Run a search and print the ranked postings
    Search {
        #[arg(long)]
        role: String,
        #[arg(long)]
        location: String,
        /// Years of experience, forwarded to the benchmark lookup
        #[arg(long, default_value_t = 0)]
        years: u32,
        /// Maximum number of postings to fetch and print
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Print the salary benchmark used for ranking
    Benchmark {
        #[arg(long)]
        role: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value_t = 0)]
        years: u32,
    },
}

pub async fn handle_search_command(cli: SearchCli) -> Result<()> {
    let config = AppConfig::load()?;

    match cli.command {
        SearchCommand::Search {
            role,
            location,
            years,
            limit,
        } => {
            let credentials = Credentials::from_env();
            let agent = JobSearchAgent::from_config(&config, credentials)?.with_result_limit(limit);

            println!("🔍 Ricerca: {} a {}", role, location);
            let request = SearchRequest {
                role,
                location,
                years,
            };
            let outcome = agent.run(&request).await;

            if outcome.postings.is_empty() {
                println!("❌ Nessun annuncio trovato (verifica GOOGLE_API_KEY e GOOGLE_CSE_ID).");
                return Ok(());
            }

            println!("✅ Trovati {} annunci.", outcome.postings.len());
            println!();
            println!("🏆 Classifica:");
            for (i, result) in outcome.ranked.iter().enumerate() {
                let posting = outcome.find_posting(&result.apply_url);
                let title = posting.map(|p| p.title.as_str()).unwrap_or("N/D");
                let ral = posting
                    .and_then(|p| p.salary.as_ref())
                    .map(|s| s.display())
                    .unwrap_or_else(|| "n.d.".to_string());
                let source = posting
                    .and_then(|p| p.source.as_deref())
                    .unwrap_or("n.d.");

                println!("{}. {}", i + 1, title);
                println!("   🔗 {}", result.apply_url);
                println!("   💰 RAL: {}", ral);
                println!("   📍 Fonte: {}", source);
                println!("   🧠 Punteggio: {} / 100", result.score);
                println!("   📊 {}", result.rationale);
                println!();
            }
        }

        SearchCommand::Benchmark {
            role,
            location,
            years,
        } => {
            let provider = BenchmarkProvider::new(config.benchmark.clone());
            let benchmark = provider.fetch(&role, &location, years);

            println!("Benchmark retributivo per {} a {}:", role, location);
            println!("  p50: {}€", format_eur(benchmark.p50));
            println!("  p75: {}€", format_eur(benchmark.p75));
            println!("  p90: {}€", format_eur(benchmark.p90));
            println!("  Fonte: {} ({})", benchmark.source, benchmark.date);
        }
    }

    Ok(())
}
