//! gRPC client for repo-service.

use std::time::Duration;

use tonic::transport::{Channel, Endpoint};
use tracing::debug;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{CreateRepo, PublicRepo, Repo};
use proto::repo::repo_service_client::RepoServiceClient as ProtoRepoServiceClient;
use proto::repo::{
    CreateRepoRequest, IdentifierRequest, PrivateRepoRequest, PrivateRepoResponse,
    PublicRepoResponse,
};

/// gRPC client wrapper for repo-service.
pub struct RepoClient {
    client: ProtoRepoServiceClient<Channel>,
}

impl RepoClient {
    /// Connect to repo-service.
    pub async fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to repo-service at {}", config.endpoint);
        let channel = Endpoint::from_shared(config.endpoint.clone())?
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect()
            .await?;

        Ok(Self {
            client: ProtoRepoServiceClient::new(channel),
        })
    }

    /// Create a repo.
    pub async fn create_repo(&self, repo: CreateRepo) -> AppResult<Repo> {
        let request = tonic::Request::new(CreateRepoRequest {
            owner_id: repo.owner_id,
            name: repo.name,
            description: repo.description,
        });

        let mut client = self.client.clone();
        let response = client.create_repo(request).await.map_err(AppError::from)?;
        proto_to_repo(response.into_inner())
    }

    /// Get the private projection by id or name.
    pub async fn get_private_repo(&self, identifier: &str) -> AppResult<Repo> {
        let request = tonic::Request::new(identifier_request(identifier, 0, 0));

        let mut client = self.client.clone();
        let response = client
            .get_private_repo(request)
            .await
            .map_err(AppError::from)?;
        proto_to_repo(response.into_inner())
    }

    /// Get the public projection by id or name.
    pub async fn get_public_repo(&self, identifier: &str) -> AppResult<PublicRepo> {
        let request = tonic::Request::new(identifier_request(identifier, 0, 0));

        let mut client = self.client.clone();
        let response = client
            .get_public_repo(request)
            .await
            .map_err(AppError::from)?;
        proto_to_public_repo(response.into_inner())
    }

    /// List private projections by owner id or name filter.
    pub async fn list_private_repos(
        &self,
        identifier: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<Repo>> {
        let request = tonic::Request::new(identifier_request(identifier, page, page_size));

        let mut client = self.client.clone();
        let response = client
            .get_private_repos(request)
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .repos
            .into_iter()
            .map(proto_to_repo)
            .collect()
    }

    /// List public projections by owner id or name filter.
    pub async fn list_public_repos(
        &self,
        identifier: &str,
        page: i64,
        page_size: i64,
    ) -> AppResult<Vec<PublicRepo>> {
        let request = tonic::Request::new(identifier_request(identifier, page, page_size));

        let mut client = self.client.clone();
        let response = client
            .get_public_repos(request)
            .await
            .map_err(AppError::from)?;

        response
            .into_inner()
            .repos
            .into_iter()
            .map(proto_to_public_repo)
            .collect()
    }

    /// Replace a repo's mutable fields.
    pub async fn update_repo(&self, repo: Repo) -> AppResult<Repo> {
        let request = tonic::Request::new(PrivateRepoRequest {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            created_at: repo.created_at.to_rfc3339(),
            updated_at: repo.updated_at.to_rfc3339(),
            owner_id: repo.owner_id,
        });

        let mut client = self.client.clone();
        let response = client.update_repo(request).await.map_err(AppError::from)?;
        proto_to_repo(response.into_inner())
    }

    /// Delete a repo by id or name.
    pub async fn delete_repo(&self, identifier: &str) -> AppResult<()> {
        let request = tonic::Request::new(identifier_request(identifier, 0, 0));

        let mut client = self.client.clone();
        client.delete_repo(request).await.map_err(AppError::from)?;
        Ok(())
    }
}

fn identifier_request(identifier: &str, page: i64, page_size: i64) -> IdentifierRequest {
    IdentifierRequest {
        repo_identifier: identifier.to_string(),
        page,
        page_size,
    }
}

/// Convert the private wire shape to the domain entity.
fn proto_to_repo(proto: PrivateRepoResponse) -> AppResult<Repo> {
    Ok(Repo {
        id: proto.id,
        name: proto.name,
        description: proto.description,
        owner_id: proto.owner_id,
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
    })
}

/// Convert the public wire shape to the redacted domain projection.
fn proto_to_public_repo(proto: PublicRepoResponse) -> AppResult<PublicRepo> {
    Ok(PublicRepo {
        id: proto.id,
        name: proto.name,
        description: proto.description,
        created_at: parse_timestamp(&proto.created_at, "created_at")?,
        updated_at: parse_timestamp(&proto.updated_at, "updated_at")?,
    })
}

fn parse_timestamp(value: &str, field: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|_| AppError::internal(format!("Invalid {} from repo-service", field)))
}
