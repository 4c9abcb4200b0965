//! SMS relay server entry point.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use sms_relay_rust::config::AppConfig;
use sms_relay_rust::gateway::TwilioGateway;
use sms_relay_rust::handlers::{create_router, AppState};
use sms_relay_rust::logging::init_logging;
use sms_relay_rust::service::RelayService;
use sms_relay_rust::store::SupabaseStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Store and gateway credentials are required; startup fails fast without them
    let config = AppConfig::load()?;

    let log_level = config.get_log_level();
    let _log_guard = init_logging(
        Some(&log_level),
        &config.logging.format,
        config.logging.file_path.as_deref().map(Path::new),
    )?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting SMS relay server"
    );

    let gateway = Arc::new(TwilioGateway::new(&config.gateway));
    let store = Arc::new(SupabaseStore::new(&config.store));
    let service = Arc::new(RelayService::new(gateway, store));

    let app = create_router(AppState { service });

    let listener = tokio::net::TcpListener::bind(&config.server.bind_address).await?;
    info!(address = %config.server.bind_address, "Server listening");

    // Graceful shutdown handler
    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C signal handler: {e}");
        }
        info!("Received shutdown signal, cleaning up...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");

    Ok(())
}
