//! Image models for the gateway

use serde::{Deserialize, Serialize};

/// Image inside an album
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Identifier, unique within its album
    #[serde(rename = "imageId")]
    pub id: String,
    /// Location of the image bytes, resolved by the backend
    #[serde(rename = "imageUrl")]
    pub url: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Tags in upload order; duplicates are kept
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_favorite: bool,
    /// Comments in server order
    #[serde(default)]
    pub comments: Vec<String>,
}

/// File and tags for an image upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
    pub tags: Vec<String>,
}

impl ImageUpload {
    /// Create an upload for `bytes`, guessing nothing about the content type
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, tags: Vec<String>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: "application/octet-stream".to_string(),
            bytes,
            tags,
        }
    }

    /// Set the MIME type sent with the file part
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}

/// Request for setting the favorite flag
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRequest {
    pub is_favorite: bool,
}

/// Request for appending a comment
#[derive(Debug, Clone, Serialize)]
pub struct AddCommentRequest {
    pub comment: String,
}

/// Response for the all-images and tag-filtered listings
#[derive(Debug, Deserialize)]
pub(crate) struct ImageDataResponse {
    #[serde(default)]
    pub data: Vec<Image>,
}

/// Response for the favorites listing
#[derive(Debug, Deserialize)]
pub(crate) struct FavoriteImagesResponse {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Response for an upload
#[derive(Debug, Deserialize)]
pub(crate) struct ImageResponse {
    pub image: Image,
}

/// Response for a new comment, carrying the full comment list
#[derive(Debug, Deserialize)]
pub(crate) struct CommentsResponse {
    pub comments: Vec<String>,
}
