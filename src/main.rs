mod config;
mod consumer;
mod error;
mod models;
mod pipeline;
mod protocol;
mod store;
mod transport;
mod utils;

use log::{error, info};

use config::IngestConfig;
use consumer::run_consumer;
use pipeline::Pipeline;
use store::snapshot_queue;
use transport::run_ingest;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match IngestConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let (publisher, receiver) = snapshot_queue();
    let mut pipeline = Pipeline::new(config.window_capacity, publisher);

    // Consumption side runs on its own task; the pipeline stays on this one
    let consumer = tokio::spawn(run_consumer(receiver, config.poll_interval));

    info!(
        "Starting UART telemetry ingestion, {} samples per stream",
        pipeline.store().capacity()
    );

    tokio::select! {
        result = run_ingest(&config, &mut pipeline) => {
            match result {
                Ok(_) => info!("Ingestion completed"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    // Queued snapshots are abandoned on shutdown
    consumer.abort();

    Ok(())
}
