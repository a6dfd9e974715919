//! gRPC implementation for RepoService.

use std::sync::Arc;

use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use tonic::{Request, Response, Status};

use crate::service::RepoService;
use domain::{CreateRepo, Repo};
use proto::repo::{
    repo_service_server::RepoService as RepoServiceProto, CreateRepoRequest, IdentifierRequest,
    PrivateRepoRequest, PrivateRepoResponse, PrivateReposResponse, PublicRepoResponse,
    PublicReposResponse,
};

/// gRPC service wrapper for RepoService.
pub struct RepoGrpcService {
    service: Arc<dyn RepoService>,
}

impl RepoGrpcService {
    /// Create a new gRPC service wrapper.
    pub fn new(service: Arc<dyn RepoService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl RepoServiceProto for RepoGrpcService {
    async fn create_repo(
        &self,
        request: Request<CreateRepoRequest>,
    ) -> Result<Response<PrivateRepoResponse>, Status> {
        let req = request.into_inner();

        let repo = self
            .service
            .create(CreateRepo {
                name: req.name,
                description: req.description,
                owner_id: req.owner_id,
            })
            .await
            .map_err(Status::from)?;
        Ok(Response::new(private_repo_to_proto(&repo)))
    }

    async fn get_private_repo(
        &self,
        request: Request<IdentifierRequest>,
    ) -> Result<Response<PrivateRepoResponse>, Status> {
        let req = request.into_inner();

        let repo = self
            .service
            .find_by_identifier(&req.repo_identifier)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(private_repo_to_proto(&repo)))
    }

    async fn get_public_repo(
        &self,
        request: Request<IdentifierRequest>,
    ) -> Result<Response<PublicRepoResponse>, Status> {
        let req = request.into_inner();

        let repo = self
            .service
            .find_by_identifier(&req.repo_identifier)
            .await
            .map_err(Status::from)?;
        Ok(Response::new(public_repo_to_proto(&repo)))
    }

    async fn get_private_repos(
        &self,
        request: Request<IdentifierRequest>,
    ) -> Result<Response<PrivateReposResponse>, Status> {
        let req = request.into_inner();

        let repos = self
            .service
            .find_all_by_identifier(&req.repo_identifier, req.page, req.page_size)
            .await
            .map_err(Status::from)?;
        let repos = repos.iter().map(private_repo_to_proto).collect();

        Ok(Response::new(PrivateReposResponse { repos }))
    }

    async fn get_public_repos(
        &self,
        request: Request<IdentifierRequest>,
    ) -> Result<Response<PublicReposResponse>, Status> {
        let req = request.into_inner();

        let repos = self
            .service
            .find_all_by_identifier(&req.repo_identifier, req.page, req.page_size)
            .await
            .map_err(Status::from)?;
        let repos = repos.iter().map(public_repo_to_proto).collect();

        Ok(Response::new(PublicReposResponse { repos }))
    }

    async fn update_repo(
        &self,
        request: Request<PrivateRepoRequest>,
    ) -> Result<Response<PrivateRepoResponse>, Status> {
        let repo = proto_to_repo(request.into_inner())?;

        let repo = self.service.update(repo).await.map_err(Status::from)?;
        Ok(Response::new(private_repo_to_proto(&repo)))
    }

    async fn delete_repo(
        &self,
        request: Request<IdentifierRequest>,
    ) -> Result<Response<()>, Status> {
        let req = request.into_inner();

        // Resolve first so a missing record is NotFound, never silent success
        let repo = self
            .service
            .find_by_identifier(&req.repo_identifier)
            .await
            .map_err(Status::from)?;
        self.service.delete(&repo).await.map_err(Status::from)?;

        Ok(Response::new(()))
    }
}

/// Convert domain Repo to the private wire shape (includes owner).
fn private_repo_to_proto(repo: &Repo) -> PrivateRepoResponse {
    PrivateRepoResponse {
        id: repo.id.clone(),
        name: repo.name.clone(),
        description: repo.description.clone(),
        created_at: repo.created_at.to_rfc3339(),
        updated_at: repo.updated_at.to_rfc3339(),
        owner_id: repo.owner_id.clone(),
    }
}

/// Convert domain Repo to the public wire shape (owner redacted).
fn public_repo_to_proto(repo: &Repo) -> PublicRepoResponse {
    PublicRepoResponse {
        id: repo.id.clone(),
        name: repo.name.clone(),
        description: repo.description.clone(),
        created_at: repo.created_at.to_rfc3339(),
        updated_at: repo.updated_at.to_rfc3339(),
    }
}

/// Parse a full record out of an update request.
fn proto_to_repo(req: PrivateRepoRequest) -> Result<Repo, Status> {
    if ObjectId::parse_str(&req.id).is_err() {
        return Err(Status::invalid_argument("Invalid repo id format"));
    }

    Ok(Repo {
        id: req.id,
        name: req.name,
        description: req.description,
        owner_id: req.owner_id,
        created_at: parse_timestamp(&req.created_at, "created_at")?,
        updated_at: parse_timestamp(&req.updated_at, "updated_at")?,
    })
}

/// Timestamps cross the wire as RFC 3339 strings.
fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, Status> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| Status::invalid_argument(format!("Invalid {} timestamp", field)))
}
