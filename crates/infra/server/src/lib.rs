//! # Activity Analytics Server
//!
//! Standalone HTTP service that registers users, records login/logout
//! sessions and answers activity queries. All state is held in memory.

mod config;
mod error;
mod routes;

pub use config::{load_config, parse_config, Config, ConfigError, ServerConfig, CONFIG_ENV};
pub use error::ApiError;
pub use routes::{analytics_routes, AppState, LastSessionDateResponse, MonthlyActivityResponse};

use activity_analytics_adapter_memory::MemoryAdapter;
use activity_analytics_core::{AnalyticsService, StatusService};
use axum::Router;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The analytics server: configuration plus the wired-up services.
pub struct AnalyticsServer {
    /// Server configuration.
    pub config: Config,
    state: AppState,
}

impl AnalyticsServer {
    /// Creates a server backed by a fresh in-memory store.
    pub fn new(config: Config) -> Self {
        let analytics = Arc::new(AnalyticsService::new(Arc::new(MemoryAdapter::new())));
        let status = StatusService::with_thresholds(analytics.clone(), config.analytics);

        Self {
            config,
            state: AppState::new(analytics, status),
        }
    }

    /// Builds the HTTP router.
    pub fn router(&self) -> Router {
        analytics_routes(self.state.clone())
    }

    /// Binds the configured address and serves until Ctrl-C.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let addr = self.config.server.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;

        tracing::info!("Starting Activity Analytics Server on {}", addr);
        tracing::info!(
            active_minutes = self.config.analytics.active_minutes,
            highly_active_minutes = self.config.analytics.highly_active_minutes,
            "status thresholds"
        );

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}

impl Default for AnalyticsServer {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

/// Installs the global tracing subscriber. `RUST_LOG` wins over the
/// configured level.
pub fn init_tracing(config: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
