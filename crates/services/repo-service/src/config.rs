//! Repo service configuration.

use std::env;

use common::DatabaseConfig;

/// Repo service configuration.
#[derive(Debug, Clone)]
pub struct RepoServiceConfig {
    /// Document store connection
    pub database: DatabaseConfig,
    /// Host to bind
    pub host: String,
    /// gRPC port
    pub port: u16,
}

impl RepoServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            database: DatabaseConfig {
                url: env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
                database: env::var("DATABASE_NAME").unwrap_or_else(|_| "repo_db".to_string()),
            },
            host: env::var("REPO_SERVICE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("REPO_SERVICE_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(50051),
        }
    }
}

impl Default for RepoServiceConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 50051,
        }
    }
}
