//! Persisted repo document for the store collection.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};
use domain::Repo;

/// One document per repo. Field names are part of the storage contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepoDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub owner_id: String,
    pub description: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

/// Convert stored document to domain entity
impl From<RepoDocument> for Repo {
    fn from(document: RepoDocument) -> Self {
        Repo {
            id: document.id.to_hex(),
            name: document.name,
            description: document.description,
            owner_id: document.owner_id,
            created_at: document.created_at,
            updated_at: document.updated_at,
        }
    }
}

impl TryFrom<&Repo> for RepoDocument {
    type Error = AppError;

    fn try_from(repo: &Repo) -> AppResult<Self> {
        let id = parse_object_id(&repo.id)?;
        Ok(RepoDocument {
            id,
            name: repo.name.clone(),
            owner_id: repo.owner_id.clone(),
            description: repo.description.clone(),
            created_at: repo.created_at,
            updated_at: repo.updated_at,
        })
    }
}

/// Decode a synthetic identifier (24 hex characters).
pub fn parse_object_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::validation("Invalid repo id format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_document() -> RepoDocument {
        RepoDocument {
            id: ObjectId::new(),
            name: "my-repo".to_string(),
            owner_id: "507f191e810c19729de860ea".to_string(),
            description: "a test repo".to_string(),
            // BSON datetimes carry millisecond precision
            created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap(),
            updated_at: Utc.timestamp_millis_opt(1_700_000_100_000).unwrap(),
        }
    }

    #[test]
    fn document_uses_storage_field_names() {
        let document = sample_document();
        let raw = bson::to_document(&document).expect("serializable");

        assert!(raw.contains_key("_id"));
        assert!(raw.contains_key("name"));
        assert!(raw.contains_key("owner_id"));
        assert!(raw.contains_key("description"));
        assert!(raw.contains_key("created_at"));
        assert!(raw.contains_key("updated_at"));
        assert!(!raw.contains_key("id"));
    }

    #[test]
    fn bson_round_trip_preserves_fields() {
        let document = sample_document();
        let raw = bson::to_document(&document).expect("serializable");
        let decoded: RepoDocument = bson::from_document(raw).expect("deserializable");
        assert_eq!(decoded, document);
    }

    #[test]
    fn domain_round_trip_preserves_fields() {
        let document = sample_document();
        let repo = Repo::from(document.clone());

        assert_eq!(repo.id, document.id.to_hex());
        assert_eq!(RepoDocument::try_from(&repo).expect("valid id"), document);
    }

    #[test]
    fn try_from_rejects_malformed_id() {
        let mut repo = Repo::from(sample_document());
        repo.id = "not-a-hex-id".to_string();

        assert!(RepoDocument::try_from(&repo).is_err());
    }
}
