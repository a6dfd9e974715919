//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Document store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Connection URI (pool sizing and timeouts live in the URI options)
    pub url: String,
    /// Database name
    pub database: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "repo_db".to_string(),
        }
    }
}

/// gRPC client connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GrpcClientConfig {
    /// Service endpoint URL (e.g., "http://localhost:50051")
    pub endpoint: String,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: u64,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for GrpcClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:50051".to_string(),
            connect_timeout_ms: 5000,
            request_timeout_ms: 30000,
        }
    }
}
