//! Album models for the gateway

use serde::{Deserialize, Serialize, de::IgnoredAny};
use uuid::Uuid;

/// Album as known to the client
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "AlbumRecord")]
pub struct Album {
    /// Backend-assigned identifier
    pub id: String,
    pub name: String,
    pub description: String,
    /// Owner address, absent when the backend did not populate the owner
    pub owner_email: Option<String>,
    /// Addresses the album is shared with, as the backend stores them
    pub shared_users: Vec<String>,
}

/// Album exactly as the backend serializes it
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AlbumRecord {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    owner_id: Option<OwnerRef>,
    #[serde(default)]
    shared_users: Vec<String>,
}

/// Owner reference, either populated with the user document or a bare id
#[derive(Deserialize)]
#[serde(untagged)]
enum OwnerRef {
    Populated { email: Option<String> },
    Reference(IgnoredAny),
}

impl From<AlbumRecord> for Album {
    fn from(record: AlbumRecord) -> Self {
        let owner_email = match record.owner_id {
            Some(OwnerRef::Populated { email }) => email,
            Some(OwnerRef::Reference(_)) | None => None,
        };

        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            owner_email,
            shared_users: record.shared_users,
        }
    }
}

/// Request for album creation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAlbumRequest {
    /// Client-generated idempotency identifier, not the eventual album id
    pub album_id: Uuid,
    pub name: String,
    pub description: String,
}

/// Full-record replacement of an album
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAlbumRequest {
    pub name: String,
    pub description: String,
    pub shared_users: Vec<String>,
}

impl From<&Album> for UpdateAlbumRequest {
    fn from(album: &Album) -> Self {
        Self {
            name: album.name.clone(),
            description: album.description.clone(),
            shared_users: album.shared_users.clone(),
        }
    }
}

/// Request for sharing an album
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareAlbumRequest {
    pub shared_users: Vec<String>,
}

/// Response for album listing
#[derive(Debug, Deserialize)]
pub(crate) struct AlbumListResponse {
    pub albums: Vec<Album>,
}

/// Response for album create and update
#[derive(Debug, Deserialize)]
pub(crate) struct AlbumResponse {
    pub album: Album,
}
