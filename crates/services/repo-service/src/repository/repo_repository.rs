//! Store adapter over the repo document collection.

use async_trait::async_trait;
use bson::doc;
use futures::TryStreamExt;
use mongodb::{Collection, Database as MongoDatabase};

use common::{AppError, AppResult};
use domain::Repo;

use super::documents::{parse_object_id, RepoDocument};

/// Name of the backing collection.
const COLLECTION: &str = "repos";

/// Store adapter trait for dependency injection.
///
/// Every operation issues exactly one store call; there are no retries and
/// no multi-document transactions. `find_*` lookups return `None` rather
/// than an error when nothing matches, while `update`/`delete` report a
/// missing record as `NotFound`.
#[async_trait]
pub trait RepoRepository: Send + Sync {
    /// Find a repo by its synthetic id. Fails with a validation error when
    /// the id is not syntactically valid (24 hex characters).
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Repo>>;

    /// Find a repo by exact name match
    async fn find_by_name(&self, name: &str) -> AppResult<Option<Repo>>;

    /// List repos owned by a principal. `page` is a raw skip offset,
    /// `page_size` a limit; order follows the natural store order.
    async fn find_all_by_owner(
        &self,
        owner_id: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>>;

    /// List repos by exact name match, same pagination contract
    async fn find_all_by_name(&self, name: &str, page: i64, page_size: i64)
        -> AppResult<Vec<Repo>>;

    /// Insert a fully populated record
    async fn create(&self, repo: Repo) -> AppResult<Repo>;

    /// Full replace of the mutable fields, keyed by id
    async fn update(&self, repo: Repo) -> AppResult<Repo>;

    /// Remove a record by its synthetic id
    async fn delete(&self, id: &str) -> AppResult<()>;
}

/// Concrete implementation of RepoRepository over a Mongo collection.
pub struct MongoRepoStore {
    collection: Collection<RepoDocument>,
}

impl MongoRepoStore {
    /// Create new store adapter instance
    pub fn new(database: MongoDatabase) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl RepoRepository for MongoRepoStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Repo>> {
        let object_id = parse_object_id(id)?;

        let result = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Repo::from))
    }

    async fn find_by_name(&self, name: &str) -> AppResult<Option<Repo>> {
        let result = self
            .collection
            .find_one(doc! { "name": name })
            .await
            .map_err(AppError::from)?;

        Ok(result.map(Repo::from))
    }

    async fn find_all_by_owner(
        &self,
        owner_id: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>> {
        let cursor = self
            .collection
            .find(doc! { "owner_id": owner_id })
            .skip(page.max(0) as u64)
            .limit(page_size)
            .await
            .map_err(AppError::from)?;

        let documents: Vec<RepoDocument> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents.into_iter().map(Repo::from).collect())
    }

    async fn find_all_by_name(
        &self,
        name: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>> {
        let cursor = self
            .collection
            .find(doc! { "name": name })
            .skip(page.max(0) as u64)
            .limit(page_size)
            .await
            .map_err(AppError::from)?;

        let documents: Vec<RepoDocument> = cursor.try_collect().await.map_err(AppError::from)?;
        Ok(documents.into_iter().map(Repo::from).collect())
    }

    async fn create(&self, repo: Repo) -> AppResult<Repo> {
        let document = RepoDocument::try_from(&repo)?;

        self.collection
            .insert_one(&document)
            .await
            .map_err(AppError::from)?;

        Ok(repo)
    }

    async fn update(&self, repo: Repo) -> AppResult<Repo> {
        let object_id = parse_object_id(&repo.id)?;
        // $set everything except the immutable _id
        let update = doc! { "$set": {
            "name": repo.name.as_str(),
            "owner_id": repo.owner_id.as_str(),
            "description": repo.description.as_str(),
            "created_at": bson::DateTime::from_chrono(repo.created_at),
            "updated_at": bson::DateTime::from_chrono(repo.updated_at),
        }};

        let result = self
            .collection
            .update_one(doc! { "_id": object_id }, update)
            .await
            .map_err(AppError::from)?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound);
        }

        Ok(repo)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let object_id = parse_object_id(id)?;

        let result = self
            .collection
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(AppError::from)?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound);
        }

        Ok(())
    }
}
