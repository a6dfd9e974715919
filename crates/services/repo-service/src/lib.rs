//! Repo Service Library
//!
//! This crate provides repository metadata management via gRPC.
//! It can be run as a standalone service or embedded in another binary.

pub mod config;
pub mod grpc;
pub mod infra;
pub mod repository;
pub mod service;

use std::net::SocketAddr;
use std::sync::Arc;

use tonic::transport::Server;
use tracing::info;

use crate::config::RepoServiceConfig;
use crate::grpc::RepoGrpcService;
use crate::infra::Database;
use crate::repository::MongoRepoStore;
use crate::service::RepoManager;

/// Run the repo service as an embedded component.
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let config = RepoServiceConfig::from_env();
    run_server_with_config(host, port, config).await
}

/// Run the gRPC server with the given configuration.
async fn run_server_with_config(
    host: &str,
    port: u16,
    config: RepoServiceConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize store connection
    let db = Database::connect(&config.database.url, &config.database.database).await?;

    // Create store adapter and service
    let repo_store = Arc::new(MongoRepoStore::new(db.get_database()));
    let repo_service = Arc::new(RepoManager::new(repo_store));

    // Create gRPC service
    let grpc_service = RepoGrpcService::new(repo_service);

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Repo service listening on {}", addr);

    // Run server
    Server::builder()
        .add_service(proto::RepoServiceServer::new(grpc_service))
        .serve(addr)
        .await?;

    Ok(())
}
