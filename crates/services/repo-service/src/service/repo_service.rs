//! Repo service - business rules and store orchestration.
//!
//! The sole holder of domain logic: name normalization at creation and the
//! id-vs-name disambiguation applied to caller-supplied identifier strings.

use std::sync::Arc;

use async_trait::async_trait;
use bson::oid::ObjectId;
use chrono::Utc;
use once_cell::sync::Lazy;
use regex::Regex;

use common::{AppResult, OptionExt};
use domain::{CreateRepo, Repo};

use crate::repository::RepoRepository;

static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new("-{2,}").expect("valid pattern"));

/// Repo service trait for dependency injection.
#[async_trait]
pub trait RepoService: Send + Sync {
    /// Create a repo: assigns a fresh id, normalizes the name and stamps
    /// both timestamps with the current time.
    async fn create(&self, repo: CreateRepo) -> AppResult<Repo>;

    /// Get a repo by synthetic id
    async fn find_by_id(&self, id: &str) -> AppResult<Repo>;

    /// Get a repo by exact name
    async fn find_by_name(&self, name: &str) -> AppResult<Repo>;

    /// Get a repo by an ambiguous identifier: a string that decodes as a
    /// 24-hex synthetic id is looked up by id, anything else by name. A
    /// repo whose name happens to be 24 hex characters is therefore
    /// unreachable through the name path.
    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Repo>;

    /// List repos by an ambiguous identifier: an id-shaped string is
    /// interpreted as an owner id, anything else as a name filter.
    async fn find_all_by_identifier(
        &self,
        identifier: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>>;

    /// Replace a repo's mutable fields; refreshes `updated_at`
    async fn update(&self, repo: Repo) -> AppResult<Repo>;

    /// Delete a repo
    async fn delete(&self, repo: &Repo) -> AppResult<()>;
}

/// Concrete implementation of RepoService using the store adapter.
pub struct RepoManager {
    repo: Arc<dyn RepoRepository>,
}

impl RepoManager {
    /// Create new service instance with a store adapter
    pub fn new(repo: Arc<dyn RepoRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl RepoService for RepoManager {
    async fn create(&self, repo: CreateRepo) -> AppResult<Repo> {
        let now = Utc::now();
        let record = Repo {
            id: ObjectId::new().to_hex(),
            name: normalize_repo_name(&repo.name),
            description: repo.description,
            owner_id: repo.owner_id,
            created_at: now,
            updated_at: now,
        };

        self.repo.create(record).await
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Repo> {
        self.repo.find_by_id(id).await?.ok_or_not_found()
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Repo> {
        self.repo.find_by_name(name).await?.ok_or_not_found()
    }

    async fn find_by_identifier(&self, identifier: &str) -> AppResult<Repo> {
        if ObjectId::parse_str(identifier).is_ok() {
            self.find_by_id(identifier).await
        } else {
            self.find_by_name(identifier).await
        }
    }

    async fn find_all_by_identifier(
        &self,
        identifier: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>> {
        if ObjectId::parse_str(identifier).is_ok() {
            self.repo
                .find_all_by_owner(identifier, page, page_size)
                .await
        } else {
            self.repo.find_all_by_name(identifier, page, page_size).await
        }
    }

    async fn update(&self, mut repo: Repo) -> AppResult<Repo> {
        repo.updated_at = Utc::now();
        self.repo.update(repo).await
    }

    async fn delete(&self, repo: &Repo) -> AppResult<()> {
        self.repo.delete(&repo.id).await
    }
}

/// Normalize a repo name: spaces become hyphens, everything lowercased,
/// runs of hyphens collapsed to one. Only literal spaces are replaced;
/// tabs and other whitespace pass through untouched.
pub fn normalize_repo_name(name: &str) -> String {
    let name = name.replace(' ', "-").to_lowercase();
    HYPHEN_RUNS.replace_all(&name, "-").into_owned()
}

#[cfg(test)]
mod tests {
    use super::normalize_repo_name;

    #[test]
    fn normalizes_spaces_and_case() {
        assert_eq!(normalize_repo_name("My Repo"), "my-repo");
    }

    #[test]
    fn collapses_space_runs() {
        assert_eq!(normalize_repo_name("a   b"), "a-b");
    }

    #[test]
    fn collapses_existing_hyphen_runs() {
        assert_eq!(normalize_repo_name("Foo--Bar"), "foo-bar");
    }

    #[test]
    fn leaves_tabs_alone() {
        assert_eq!(normalize_repo_name("a\tb"), "a\tb");
    }

    #[test]
    fn is_idempotent() {
        let inputs = ["My Repo", "a   b", "Foo--Bar", "already-normal", "UP  -  down"];
        for input in inputs {
            let once = normalize_repo_name(input);
            assert_eq!(normalize_repo_name(&once), once, "input: {:?}", input);
        }
    }
}
