//! Gateway configuration.

use std::env;

use common::GrpcClientConfig;

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Repo service gRPC connection
    pub repo_service: GrpcClientConfig,
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            repo_service: GrpcClientConfig {
                endpoint: env::var("REPO_SERVICE_URL")
                    .unwrap_or_else(|_| "http://localhost:50051".to_string()),
                connect_timeout_ms: env::var("REPO_SERVICE_CONNECT_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(5000),
                request_timeout_ms: env::var("REPO_SERVICE_REQUEST_TIMEOUT_MS")
                    .ok()
                    .and_then(|t| t.parse().ok())
                    .unwrap_or(30000),
            },
            host: env::var("GATEWAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("GATEWAY_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }

    /// Extract the repo service port from its URL.
    pub fn repo_port(&self) -> u16 {
        self.repo_service
            .endpoint
            .rsplit(':')
            .next()
            .and_then(|p| p.parse().ok())
            .unwrap_or(50051)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            repo_service: GrpcClientConfig::default(),
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
