use anyhow::Result;
use job_scout::config::{AppConfig, Credentials};
use job_scout::web::start_web_server;
use job_scout::JobSearchAgent;
use tracing::{info, warn};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("job_scout=info,rocket::server=off")),
        )
        .init();

    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .map_err(|_| anyhow::anyhow!("PORT must be a valid port number"))?;

    let config = AppConfig::load()?;

    let credentials = Credentials::from_env();
    if credentials.is_none() {
        warn!("GOOGLE_API_KEY / GOOGLE_CSE_ID not set: searches will return no results");
    }

    info!("Starting jobscout job search agent");
    info!(
        "Environment: {}",
        std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string())
    );
    info!("Reference city: {}", config.reference_city);
    info!("Search domains: {}", config.search.domains.join(", "));
    info!("Server: http://0.0.0.0:{}", port);

    let agent = JobSearchAgent::from_config(&config, credentials)?;
    start_web_server(agent, port).await
}
