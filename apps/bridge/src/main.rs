//! grantlink webhook bridge server.

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use grantlink_bridge::{bridge_router, BridgeConfig, BridgeState};
use grantlink_connector_github::GithubDirectory;
use grantlink_core::OrgDirectory;

#[tokio::main]
async fn main() {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,grantlink_bridge=debug")),
        )
        .init();

    // Load configuration
    let config = BridgeConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        std::process::exit(1);
    });

    tracing::info!(
        listen_addr = %config.listen_addr,
        org = %config.org,
        "starting webhook bridge"
    );

    // Build the GitHub directory connector
    let directory: Arc<dyn OrgDirectory> = Arc::new(
        GithubDirectory::new(config.github).unwrap_or_else(|e| {
            eprintln!("Connector error: {e}");
            std::process::exit(1);
        }),
    );

    let state = BridgeState::new(directory, config.org, config.webhook_secret);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("Bind error: {e}");
            std::process::exit(1);
        });

    tracing::info!(listen_addr = %config.listen_addr, "webhook bridge listening");

    axum::serve(listener, bridge_router(state))
        .await
        .unwrap_or_else(|e| {
            eprintln!("Server error: {e}");
            std::process::exit(1);
        });
}
