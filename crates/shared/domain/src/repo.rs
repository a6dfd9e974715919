//! Repo domain entity and its external projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository metadata record - the private (full) projection.
///
/// The `id` is the store-assigned synthetic identifier, 24 hex characters.
/// It is assigned once at creation and never changes, as is `owner_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    /// Synthetic identifier (24 hex characters)
    pub id: String,
    /// Human-readable label, normalized at creation
    pub name: String,
    /// Free-text description
    pub description: String,
    /// Identifier of the owning principal
    pub owner_id: String,
    /// Creation timestamp, set once
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation
    pub updated_at: DateTime<Utc>,
}

impl Repo {
    /// Public projection of this record.
    pub fn to_public(&self) -> PublicRepo {
        PublicRepo::from(self)
    }
}

/// Public projection: everything except the owner identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicRepo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Repo> for PublicRepo {
    fn from(repo: &Repo) -> Self {
        Self {
            id: repo.id.clone(),
            name: repo.name.clone(),
            description: repo.description.clone(),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
        }
    }
}

impl From<Repo> for PublicRepo {
    fn from(repo: Repo) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            description: repo.description,
            created_at: repo.created_at,
            updated_at: repo.updated_at,
        }
    }
}

/// Repo creation data transfer object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRepo {
    /// Repo name (normalized by the service before it is stored)
    pub name: String,
    /// Repo description
    pub description: String,
    /// Owner's identifier
    pub owner_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_repo() -> Repo {
        Repo {
            id: "507f1f77bcf86cd799439011".to_string(),
            name: "my-repo".to_string(),
            description: "a test repo".to_string(),
            owner_id: "507f191e810c19729de860ea".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn public_projection_omits_owner() {
        let repo = sample_repo();
        let public = repo.to_public();

        let json = serde_json::to_value(&public).expect("serializable");
        assert!(json.get("owner_id").is_none());
        assert_eq!(json["id"], repo.id);
        assert_eq!(json["name"], repo.name);
    }

    #[test]
    fn private_projection_keeps_owner() {
        let repo = sample_repo();
        let json = serde_json::to_value(&repo).expect("serializable");
        assert_eq!(json["owner_id"], repo.owner_id);
    }
}
