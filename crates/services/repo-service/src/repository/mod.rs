//! Repository layer for data access.

pub mod documents;
mod repo_repository;

pub use repo_repository::{MongoRepoStore, RepoRepository};
