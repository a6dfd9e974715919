//! API Gateway Library
//!
//! This crate provides the HTTP REST API that translates requests into
//! repo-service gRPC calls. It holds no business logic of its own.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use crate::clients::RepoClient;
use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component.
pub async fn run_embedded(
    host: &str,
    port: u16,
    repo_port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GatewayConfig::from_env();
    config.repo_service.endpoint = format!("http://{}:{}", host, repo_port);

    run_server_with_config(host, port, config).await
}

/// Run the HTTP server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: GatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create gRPC client
    let repo_client = Arc::new(RepoClient::connect(&config.repo_service).await?);

    // Create app state
    let state = AppState::new(repo_client);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
