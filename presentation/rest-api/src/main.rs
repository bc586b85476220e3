use dotenvy::dotenv;

mod api;
mod config;
mod setup;

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// Toll lookup and payment intake over HTTP.
///
/// - config/: environment driven settings (server, CORS, database, queues)
/// - setup/: dependency wiring and the poem server
/// - api/: routes, DTOs and error mapping
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    dotenv().ok();

    let config = AppConfig::from_env();
    let pool = database_config::init_database().await?;
    let container = DependencyContainer::new(pool, &config.queues);

    Server::run(config, container).await?;

    Ok(())
}
