//! HTTPS implementation of the remote gateway

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, multipart};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use crate::{
    RemoteGateway, TokenSource,
    error::{GatewayError, GatewayResult},
    models::{
        AddCommentRequest, Album, CreateAlbumRequest, FavoriteRequest, Image, ImageUpload,
        ShareAlbumRequest, UpdateAlbumRequest,
        album::{AlbumListResponse, AlbumResponse},
        image::{CommentsResponse, FavoriteImagesResponse, ImageDataResponse, ImageResponse},
    },
};

/// Gateway speaking JSON over HTTPS to the album backend
#[derive(Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: Url,
    tokens: Arc<dyn TokenSource>,
}

impl HttpGateway {
    /// Create a new gateway against `base_url`
    pub fn new(base_url: Url, tokens: Arc<dyn TokenSource>) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("album-client/", env!("CARGO_PKG_VERSION")))
            .build()?;
        info!("Remote gateway initialized with base URL: {}", base_url);

        Ok(Self {
            client,
            base_url,
            tokens,
        })
    }

    /// Base URL every endpoint is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build an endpoint URL from percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidEndpoint(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Attach the bearer token when one is available and send the request
    async fn send(&self, label: &str, request: RequestBuilder) -> GatewayResult<Response> {
        let request = match self.tokens.bearer_token().await {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        debug!("Sending {} request", label);
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!("{} failed with status {}: {:?}", label, status, message);

        Err(GatewayError::Status {
            status: status.as_u16(),
            message,
        })
    }

    /// Decode a success body against its strict schema
    async fn read_json<T: DeserializeOwned>(label: &str, response: Response) -> GatewayResult<T> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            warn!("{} returned a malformed body: {}", label, e);
            GatewayError::MalformedResponse {
                endpoint: label.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Server explanation of a failure: the `error` field, else `message`
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["error", "message"]
        .iter()
        .find_map(|field| value.get(*field).and_then(|v| v.as_str()))
        .map(str::to_string)
}

#[async_trait]
impl RemoteGateway for HttpGateway {
    async fn list_albums(&self) -> GatewayResult<Vec<Album>> {
        let url = self.endpoint(&["albums"])?;
        let response = self.send("list albums", self.client.get(url)).await?;
        let body: AlbumListResponse = Self::read_json("list albums", response).await?;
        Ok(body.albums)
    }

    async fn create_album(&self, request: &CreateAlbumRequest) -> GatewayResult<Album> {
        let url = self.endpoint(&["albums"])?;
        let response = self
            .send("create album", self.client.post(url).json(request))
            .await?;
        let body: AlbumResponse = Self::read_json("create album", response).await?;
        Ok(body.album)
    }

    async fn update_album(
        &self,
        album_id: &str,
        request: &UpdateAlbumRequest,
    ) -> GatewayResult<Album> {
        let url = self.endpoint(&["albums", album_id])?;
        let response = self
            .send("update album", self.client.put(url).json(request))
            .await?;
        let body: AlbumResponse = Self::read_json("update album", response).await?;
        Ok(body.album)
    }

    async fn delete_album(&self, album_id: &str) -> GatewayResult<()> {
        let url = self.endpoint(&["albums", album_id])?;
        self.send("delete album", self.client.delete(url)).await?;
        Ok(())
    }

    async fn share_album(&self, album_id: &str, shared_users: &[String]) -> GatewayResult<()> {
        let url = self.endpoint(&["albums", album_id, "share"])?;
        let request = ShareAlbumRequest {
            shared_users: shared_users.to_vec(),
        };
        self.send("share album", self.client.post(url).json(&request))
            .await?;
        Ok(())
    }

    async fn list_images(&self, album_id: &str) -> GatewayResult<Vec<Image>> {
        let url = self.endpoint(&["albums", album_id, "images", "all"])?;
        let response = self.send("list images", self.client.get(url)).await?;
        let body: ImageDataResponse = Self::read_json("list images", response).await?;
        Ok(body.data)
    }

    async fn list_favorite_images(&self, album_id: &str) -> GatewayResult<Vec<Image>> {
        let url = self.endpoint(&["albums", album_id, "images", "favorites"])?;
        let response = self
            .send("list favorite images", self.client.get(url))
            .await?;
        let body: FavoriteImagesResponse =
            Self::read_json("list favorite images", response).await?;
        Ok(body.images)
    }

    async fn list_images_by_tag(&self, album_id: &str, tag: &str) -> GatewayResult<Vec<Image>> {
        let url = self.endpoint(&["albums", album_id, "images"])?;
        let request = self.client.get(url).query(&[("tags", tag.trim())]);
        let response = self.send("list images by tag", request).await?;
        let body: ImageDataResponse = Self::read_json("list images by tag", response).await?;
        Ok(body.data)
    }

    async fn upload_image(&self, album_id: &str, upload: ImageUpload) -> GatewayResult<Image> {
        let url = self.endpoint(&["albums", album_id, "images"])?;
        let tags = serde_json::Value::from(upload.tags).to_string();
        let file = multipart::Part::bytes(upload.bytes)
            .file_name(upload.file_name)
            .mime_str(&upload.content_type)?;
        let form = multipart::Form::new().part("file", file).text("tags", tags);

        let response = self
            .send("upload image", self.client.post(url).multipart(form))
            .await?;
        let body: ImageResponse = Self::read_json("upload image", response).await?;
        Ok(body.image)
    }

    async fn set_favorite(
        &self,
        album_id: &str,
        image_id: &str,
        is_favorite: bool,
    ) -> GatewayResult<()> {
        let url = self.endpoint(&["albums", album_id, "images", image_id, "favorite"])?;
        let request = FavoriteRequest { is_favorite };
        self.send("set favorite", self.client.put(url).json(&request))
            .await?;
        Ok(())
    }

    async fn add_comment(
        &self,
        album_id: &str,
        image_id: &str,
        comment: &str,
    ) -> GatewayResult<Vec<String>> {
        let url = self.endpoint(&["albums", album_id, "images", image_id, "comments"])?;
        let request = AddCommentRequest {
            comment: comment.to_string(),
        };
        let response = self
            .send("add comment", self.client.post(url).json(&request))
            .await?;
        let body: CommentsResponse = Self::read_json("add comment", response).await?;
        Ok(body.comments)
    }

    async fn delete_image(&self, album_id: &str, image_id: &str) -> GatewayResult<()> {
        let url = self.endpoint(&["albums", album_id, "images", image_id])?;
        self.send("delete image", self.client.delete(url)).await?;
        Ok(())
    }
}
