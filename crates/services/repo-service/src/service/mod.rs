//! Business logic layer.

mod repo_service;

pub use repo_service::{normalize_repo_name, RepoManager, RepoService};
