//! Repo service unit tests against a mocked store adapter.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use mockall::mock;

use common::{AppError, AppResult};
use domain::{CreateRepo, Repo};
use repo_service_lib::repository::RepoRepository;
use repo_service_lib::service::{RepoManager, RepoService};

mock! {
    RepoStore {}

    #[async_trait]
    impl RepoRepository for RepoStore {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<Repo>>;
        async fn find_by_name(&self, name: &str) -> AppResult<Option<Repo>>;
        async fn find_all_by_owner(
            &self,
            owner_id: &str,
            page: i64,
            page_size: i64,
        ) -> AppResult<Vec<Repo>>;
        async fn find_all_by_name(
            &self,
            name: &str,
            page: i64,
            page_size: i64,
        ) -> AppResult<Vec<Repo>>;
        async fn create(&self, repo: Repo) -> AppResult<Repo>;
        async fn update(&self, repo: Repo) -> AppResult<Repo>;
        async fn delete(&self, id: &str) -> AppResult<()>;
    }
}

const REPO_ID: &str = "507f1f77bcf86cd799439011";
const OWNER_ID: &str = "507f191e810c19729de860ea";

fn create_test_repo(id: &str) -> Repo {
    Repo {
        id: id.to_string(),
        name: "test-repo".to_string(),
        description: "a test repo".to_string(),
        owner_id: OWNER_ID.to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn service_with(store: MockRepoStore) -> RepoManager {
    RepoManager::new(Arc::new(store))
}

#[tokio::test]
async fn test_create_normalizes_name_and_assigns_id() {
    let mut store = MockRepoStore::new();
    store.expect_create().returning(|repo| Ok(repo));

    let service = service_with(store);
    let created = service
        .create(CreateRepo {
            name: "Test  Repo".to_string(),
            description: "d".to_string(),
            owner_id: OWNER_ID.to_string(),
        })
        .await
        .expect("create succeeds");

    assert_eq!(created.name, "test-repo");
    assert_eq!(created.description, "d");
    assert_eq!(created.owner_id, OWNER_ID);
    assert_eq!(created.id.len(), 24);
    assert!(created.id.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(created.created_at, created.updated_at);
}

#[tokio::test]
async fn test_create_propagates_conflict() {
    let mut store = MockRepoStore::new();
    store
        .expect_create()
        .returning(|_| Err(AppError::conflict("Repo")));

    let service = service_with(store);
    let result = service
        .create(CreateRepo {
            name: "Test".to_string(),
            description: "d".to_string(),
            owner_id: OWNER_ID.to_string(),
        })
        .await;

    assert!(matches!(result.unwrap_err(), AppError::Conflict(_)));
}

#[tokio::test]
async fn test_find_by_identifier_routes_hex_id_to_id_lookup() {
    let mut store = MockRepoStore::new();
    store
        .expect_find_by_id()
        .withf(|id| id == REPO_ID)
        .returning(|id| Ok(Some(create_test_repo(id))));

    let service = service_with(store);
    let repo = service
        .find_by_identifier(REPO_ID)
        .await
        .expect("lookup succeeds");

    assert_eq!(repo.id, REPO_ID);
}

#[tokio::test]
async fn test_find_by_identifier_routes_other_strings_to_name_lookup() {
    let mut store = MockRepoStore::new();
    store
        .expect_find_by_name()
        .withf(|name| name == "test-repo")
        .returning(|_| Ok(Some(create_test_repo(REPO_ID))));

    let service = service_with(store);
    let repo = service
        .find_by_identifier("test-repo")
        .await
        .expect("lookup succeeds");

    assert_eq!(repo.name, "test-repo");
}

#[tokio::test]
async fn test_find_by_identifier_missing_is_not_found() {
    let mut store = MockRepoStore::new();
    store.expect_find_by_name().returning(|_| Ok(None));

    let service = service_with(store);
    let result = service.find_by_identifier("no-such-repo").await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_find_all_by_identifier_hex_id_means_owner() {
    let mut store = MockRepoStore::new();
    store
        .expect_find_all_by_owner()
        .withf(|owner_id, page, page_size| owner_id == OWNER_ID && *page == 2 && *page_size == 10)
        .returning(|_, _, _| Ok(vec![create_test_repo(REPO_ID)]));

    let service = service_with(store);
    let repos = service
        .find_all_by_identifier(OWNER_ID, 2, 10)
        .await
        .expect("list succeeds");

    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_find_all_by_identifier_other_strings_mean_name_filter() {
    let mut store = MockRepoStore::new();
    store
        .expect_find_all_by_name()
        .withf(|name, page, page_size| name == "test-repo" && *page == 0 && *page_size == 20)
        .returning(|_, _, _| Ok(vec![create_test_repo(REPO_ID)]));

    let service = service_with(store);
    let repos = service
        .find_all_by_identifier("test-repo", 0, 20)
        .await
        .expect("list succeeds");

    assert_eq!(repos.len(), 1);
}

#[tokio::test]
async fn test_update_refreshes_updated_at_and_keeps_created_at() {
    let mut store = MockRepoStore::new();
    store.expect_update().returning(|repo| Ok(repo));

    let mut repo = create_test_repo(REPO_ID);
    let old_timestamp = Utc::now() - Duration::hours(1);
    repo.created_at = old_timestamp;
    repo.updated_at = old_timestamp;

    let service = service_with(store);
    let updated = service.update(repo).await.expect("update succeeds");

    assert_eq!(updated.created_at, old_timestamp);
    assert!(updated.updated_at > old_timestamp);
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    let mut store = MockRepoStore::new();
    store.expect_update().returning(|_| Err(AppError::NotFound));

    let service = service_with(store);
    let result = service.update(create_test_repo(REPO_ID)).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}

#[tokio::test]
async fn test_delete_passes_the_repo_id() {
    let mut store = MockRepoStore::new();
    store
        .expect_delete()
        .withf(|id| id == REPO_ID)
        .returning(|_| Ok(()));

    let service = service_with(store);
    let repo = create_test_repo(REPO_ID);

    assert!(service.delete(&repo).await.is_ok());
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    let mut store = MockRepoStore::new();
    store.expect_delete().returning(|_| Err(AppError::NotFound));

    let service = service_with(store);
    let repo = create_test_repo(REPO_ID);
    let result = service.delete(&repo).await;

    assert!(matches!(result.unwrap_err(), AppError::NotFound));
}
