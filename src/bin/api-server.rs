//! SignalScope API Server
//!
//! Serves dashboard and analysis views over HTTP and triggers the external
//! analysis pipeline. Stateless apart from the view cache.

use dotenvy::dotenv;
use signalscope::config::DashboardConfig;
use signalscope::core::http::start_server;
use signalscope::logging;
use tokio::signal;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env if present
    dotenv().ok();

    logging::init_logging();

    let config = DashboardConfig::from_env();
    let port = config.port;
    info!("Starting SignalScope API Server");
    info!(environment = %config.environment, "Environment");
    info!(port = port, "HTTP Server: http://0.0.0.0:{}", port);
    info!(
        cache_ttl_secs = config.view_cache_ttl.as_secs(),
        pipeline = config.pipeline.is_some(),
        revalidation = config.revalidation_secret.is_some(),
        "Configuration loaded"
    );

    let server_handle = tokio::spawn(async move {
        if let Err(e) = start_server(config).await {
            error!(error = %e, "HTTP server error");
        }
    });

    info!("API server started, waiting for shutdown signal...");
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Shutting down API server...");
            info!("API server stopped");
        }
        _ = server_handle => {
            error!("HTTP server stopped");
        }
    }

    Ok(())
}
