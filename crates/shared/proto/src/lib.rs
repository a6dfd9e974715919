//! gRPC protocol buffer definitions.
//!
//! This crate contains the generated gRPC service definitions for
//! RepoService: repository metadata management (CRUD, projections).

/// Repo service definitions.
pub mod repo {
    tonic::include_proto!("repo");
}

// Re-export commonly used items
pub use repo::repo_service_client::RepoServiceClient;
pub use repo::repo_service_server::{RepoService, RepoServiceServer};
