//! Remote gateway for the photo-album backend
//!
//! This crate is the single point where store intents become authenticated
//! HTTPS calls and raw responses become typed results. Every call is one
//! best-effort attempt: nothing here retries, caches or rate-limits.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod models;

pub use client::HttpGateway;
pub use error::{GatewayError, GatewayResult};
pub use models::{Album, CreateAlbumRequest, Image, ImageUpload, UpdateAlbumRequest};

/// Supplies the bearer token attached to each request
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Current token, or `None` when the user is not signed in
    async fn bearer_token(&self) -> Option<String>;
}

/// Fixed token, mostly useful for tools and tests
#[derive(Debug, Clone, Default)]
pub struct StaticToken(pub Option<String>);

#[async_trait]
impl TokenSource for StaticToken {
    async fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Typed operations of the album backend
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// GET /albums
    async fn list_albums(&self) -> GatewayResult<Vec<Album>>;

    /// POST /albums
    async fn create_album(&self, request: &CreateAlbumRequest) -> GatewayResult<Album>;

    /// PUT /albums/{id}
    async fn update_album(
        &self,
        album_id: &str,
        request: &UpdateAlbumRequest,
    ) -> GatewayResult<Album>;

    /// DELETE /albums/{id}
    async fn delete_album(&self, album_id: &str) -> GatewayResult<()>;

    /// POST /albums/{id}/share
    async fn share_album(&self, album_id: &str, shared_users: &[String]) -> GatewayResult<()>;

    /// GET /albums/{id}/images/all
    async fn list_images(&self, album_id: &str) -> GatewayResult<Vec<Image>>;

    /// GET /albums/{id}/images/favorites
    async fn list_favorite_images(&self, album_id: &str) -> GatewayResult<Vec<Image>>;

    /// GET /albums/{id}/images?tags=TAG
    async fn list_images_by_tag(&self, album_id: &str, tag: &str) -> GatewayResult<Vec<Image>>;

    /// POST /albums/{id}/images (multipart)
    async fn upload_image(&self, album_id: &str, upload: ImageUpload) -> GatewayResult<Image>;

    /// PUT /albums/{id}/images/{imgId}/favorite
    async fn set_favorite(
        &self,
        album_id: &str,
        image_id: &str,
        is_favorite: bool,
    ) -> GatewayResult<()>;

    /// POST /albums/{id}/images/{imgId}/comments, returning the full comment list
    async fn add_comment(
        &self,
        album_id: &str,
        image_id: &str,
        comment: &str,
    ) -> GatewayResult<Vec<String>>;

    /// DELETE /albums/{id}/images/{imgId}
    async fn delete_image(&self, album_id: &str, image_id: &str) -> GatewayResult<()>;
}
