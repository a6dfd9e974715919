//! Application state shared across handlers.

use std::sync::Arc;

use crate::clients::RepoClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// gRPC client for repo-service
    pub repo_client: Arc<RepoClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(repo_client: Arc<RepoClient>) -> Self {
        Self { repo_client }
    }
}
