//! Activity Analytics Server binary.

use activity_analytics_server::{init_tracing, load_config, AnalyticsServer, Config, CONFIG_ENV};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration: first argument, then environment, then defaults
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(CONFIG_ENV).ok());
    let config = match &path {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    // Initialize tracing
    init_tracing(&config.server);
    match &path {
        Some(path) => tracing::info!("Loaded configuration from {}", path),
        None => tracing::info!("No configuration file given, using defaults"),
    }

    // Create and run server
    let server = AnalyticsServer::new(config);
    server.run().await?;

    Ok(())
}
