use dotenvy::dotenv;
use tokio::sync::watch;

mod config;
mod consumer;
mod setup;

use config::{
    database_config, detection_config::DetectionConfig, pricing_config::PricingConfig,
    worker_config::WorkerConfig,
};
use setup::dependency_injection::DependencyContainer;

/// Background worker draining the images and payments queues.
///
/// Each queue gets its own consumer task; Ctrl-C lets in-flight batches
/// finish before the process exits.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    dotenv().ok();

    let worker = WorkerConfig::from_env();
    let detection = DetectionConfig::from_env()?;
    let pricing = PricingConfig::from_env();
    let pool = database_config::init_database().await?;
    let container = DependencyContainer::new(pool, worker, detection, pricing);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let ingestion = tokio::spawn(container.ingestion.run(shutdown_rx.clone()));
    let reconciliation = tokio::spawn(container.reconciliation.run(shutdown_rx));

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown requested, waiting for consumers");
    shutdown_tx.send(true)?;

    ingestion.await?;
    reconciliation.await?;

    Ok(())
}
