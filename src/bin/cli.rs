use anyhow::Result;
use clap::Parser;
use job_scout::cli::{handle_search_command, SearchCli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_scout=warn")),
        )
        .init();

    let cli = SearchCli::parse();
    handle_search_command(cli).await
}
