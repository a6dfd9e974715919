//! Repo handlers - thin pass-through to the repo service.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use validator::Validate;

use common::AppResult;
use domain::{CreateRepo, PublicRepo, Repo};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// Repo creation request with validation
#[derive(Debug, Deserialize, Validate)]
pub struct CreateRepoBody {
    /// Repo name
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,
    /// Repo description
    #[serde(default)]
    pub description: String,
    /// Owner's identifier
    #[validate(length(min = 1, message = "Owner id cannot be empty"))]
    pub owner_id: String,
}

/// Offset/limit pagination query parameters. `page` is a raw skip offset.
#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page_size() -> i64 {
    20
}

/// Create repo routes
pub fn repo_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_repo).put(update_repo))
        .route("/:identifier", get(get_public_repo).delete(delete_repo))
        .route("/:identifier/private", get(get_private_repo))
        .route("/:identifier/all", get(list_public_repos))
        .route("/:identifier/all/private", get(list_private_repos))
}

/// Create a repo; responds with the private projection.
pub async fn create_repo(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateRepoBody>,
) -> AppResult<(StatusCode, Json<Repo>)> {
    let repo = state
        .repo_client
        .create_repo(CreateRepo {
            name: payload.name,
            description: payload.description,
            owner_id: payload.owner_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(repo)))
}

/// Get a repo by id or name (public projection).
pub async fn get_public_repo(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<PublicRepo>> {
    let repo = state.repo_client.get_public_repo(&identifier).await?;
    Ok(Json(repo))
}

/// Get a repo by id or name (private projection).
pub async fn get_private_repo(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<Json<Repo>> {
    let repo = state.repo_client.get_private_repo(&identifier).await?;
    Ok(Json(repo))
}

/// List repos by owner id or name filter (public projections).
pub async fn list_public_repos(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<PublicRepo>>> {
    let repos = state
        .repo_client
        .list_public_repos(&identifier, pagination.page, pagination.page_size)
        .await?;
    Ok(Json(repos))
}

/// List repos by owner id or name filter (private projections).
pub async fn list_private_repos(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<Vec<Repo>>> {
    let repos = state
        .repo_client
        .list_private_repos(&identifier, pagination.page, pagination.page_size)
        .await?;
    Ok(Json(repos))
}

/// Replace a repo's mutable fields.
pub async fn update_repo(
    State(state): State<AppState>,
    Json(payload): Json<Repo>,
) -> AppResult<Json<Repo>> {
    let repo = state.repo_client.update_repo(payload).await?;
    Ok(Json(repo))
}

/// Delete a repo by id or name.
pub async fn delete_repo(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> AppResult<StatusCode> {
    state.repo_client.delete_repo(&identifier).await?;
    Ok(StatusCode::NO_CONTENT)
}
