//! Image store
//!
//! Holds the working set: the images of one album under exactly one view
//! mode. Changing the mode or the tag filter always refetches and replaces
//! the working set; a failed fetch leaves the previous one visible.

use std::sync::Arc;

use gateway::{GatewayResult, Image, ImageUpload, RemoteGateway};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{StoreError, StoreResult},
    sequence::{InFlight, Sequencer},
};

/// Which images the working set holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Every image of the album
    All,
    /// Images marked favorite
    Favorites,
    /// Images carrying the given (trimmed) tag
    Tag(String),
}

impl ViewMode {
    /// Resolve the filter inputs into a mode; a non-empty tag filter wins
    /// over the favorites toggle
    pub fn resolve(tag_filter: &str, favorites_view: bool) -> Self {
        let tag = tag_filter.trim();
        if !tag.is_empty() {
            ViewMode::Tag(tag.to_string())
        } else if favorites_view {
            ViewMode::Favorites
        } else {
            ViewMode::All
        }
    }

    fn fallback_message(&self) -> &'static str {
        match self {
            ViewMode::All => "Failed to fetch images",
            ViewMode::Favorites => "Failed to fetch favorite images",
            ViewMode::Tag(_) => "Failed to fetch images by tag",
        }
    }
}

#[derive(Debug, Default)]
struct ImageState {
    album_id: Option<String>,
    images: Vec<Image>,
    favorites_view: bool,
    tag_filter: String,
    error: Option<StoreError>,
}

impl ImageState {
    fn is_active(&self, album_id: &str) -> bool {
        self.album_id.as_deref() == Some(album_id)
    }
}

/// Image store
pub struct ImageStore<G: RemoteGateway + ?Sized> {
    gateway: Arc<G>,
    state: Mutex<ImageState>,
    view_sequence: Sequencer,
    in_flight: InFlight,
}

impl<G: RemoteGateway + ?Sized> ImageStore<G> {
    /// Create a store with no album open
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(ImageState::default()),
            view_sequence: Sequencer::default(),
            in_flight: InFlight::default(),
        }
    }

    /// Snapshot of the working set
    pub async fn images(&self) -> Vec<Image> {
        self.state.lock().await.images.clone()
    }

    /// Look up one image in the working set
    pub async fn image(&self, image_id: &str) -> Option<Image> {
        let state = self.state.lock().await;
        state.images.iter().find(|i| i.id == image_id).cloned()
    }

    /// Album the working set belongs to
    pub async fn album_id(&self) -> Option<String> {
        self.state.lock().await.album_id.clone()
    }

    /// Whether the favorites toggle is on
    pub async fn favorites_view(&self) -> bool {
        self.state.lock().await.favorites_view
    }

    /// Raw tag filter value
    pub async fn tag_filter(&self) -> String {
        self.state.lock().await.tag_filter.clone()
    }

    /// Mode the next refresh will fetch with
    pub async fn view_mode(&self) -> ViewMode {
        let state = self.state.lock().await;
        ViewMode::resolve(&state.tag_filter, state.favorites_view)
    }

    /// Current error, if any
    pub async fn error(&self) -> Option<StoreError> {
        self.state.lock().await.error.clone()
    }

    /// Dismiss the current error
    pub async fn clear_error(&self) {
        self.state.lock().await.error = None;
    }

    /// Whether an operation is awaiting the backend
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_active()
    }

    /// Switch to another album, resetting the view to all images
    pub async fn open_album(&self, album_id: &str) -> StoreResult<Vec<Image>> {
        {
            let mut state = self.state.lock().await;
            info!("Opening album {}", album_id);
            state.album_id = Some(album_id.to_string());
            state.images.clear();
        }
        self.fetch_all(album_id).await
    }

    /// Replace the working set with every image of the album
    pub async fn fetch_all(&self, album_id: &str) -> StoreResult<Vec<Image>> {
        {
            let mut state = self.state.lock().await;
            state.favorites_view = false;
            state.tag_filter.clear();
        }
        self.replace_view(album_id, ViewMode::All).await
    }

    /// Replace the working set with the album's favorites
    pub async fn fetch_favorites(&self, album_id: &str) -> StoreResult<Vec<Image>> {
        {
            let mut state = self.state.lock().await;
            state.favorites_view = true;
            state.tag_filter.clear();
        }
        self.replace_view(album_id, ViewMode::Favorites).await
    }

    /// Replace the working set with the images carrying `tag`
    ///
    /// The favorites toggle is left as is, so clearing the tag later returns
    /// to whichever of the two other views was selected.
    pub async fn fetch_by_tag(&self, album_id: &str, tag: &str) -> StoreResult<Vec<Image>> {
        let tag = tag.trim();
        if tag.is_empty() {
            return self.fetch_all(album_id).await;
        }
        self.state.lock().await.tag_filter = tag.to_string();
        self.replace_view(album_id, ViewMode::Tag(tag.to_string()))
            .await
    }

    /// Flip between the all-images and favorites views
    pub async fn toggle_favorites_view(&self) -> StoreResult<Vec<Image>> {
        {
            let mut state = self.state.lock().await;
            state.favorites_view = !state.favorites_view;
            debug!("Favorites view {}", state.favorites_view);
        }
        self.refresh().await
    }

    /// Set the tag filter and refetch
    pub async fn set_tag_filter(&self, tag: &str) -> StoreResult<Vec<Image>> {
        {
            let mut state = self.state.lock().await;
            state.tag_filter = tag.to_string();
            debug!("Tag filter set to {:?}", state.tag_filter);
        }
        self.refresh().await
    }

    /// Clear the tag filter, returning to the all or favorites view
    pub async fn clear_tag_filter(&self) -> StoreResult<Vec<Image>> {
        self.set_tag_filter("").await
    }

    /// Filter by a tag shown on an image
    pub async fn select_tag(&self, tag: &str) -> StoreResult<Vec<Image>> {
        self.set_tag_filter(tag.trim()).await
    }

    /// Refetch the working set for the current album and filters
    pub async fn refresh(&self) -> StoreResult<Vec<Image>> {
        let (album_id, mode) = {
            let state = self.state.lock().await;
            let mode = ViewMode::resolve(&state.tag_filter, state.favorites_view);
            match state.album_id.clone() {
                Some(album_id) => (album_id, mode),
                None => return Ok(state.images.clone()),
            }
        };
        self.replace_view(&album_id, mode).await
    }

    /// Upload an image and show it at once, whatever the active filter
    pub async fn upload(&self, album_id: &str, upload: ImageUpload) -> StoreResult<Vec<Image>> {
        let _busy = self.in_flight.enter();
        info!(
            "Uploading {} ({} bytes) to album {}",
            upload.file_name,
            upload.bytes.len(),
            album_id
        );

        match self.gateway.upload_image(album_id, upload).await {
            Ok(image) => {
                let mut state = self.state.lock().await;
                info!("Image {} uploaded", image.id);
                if state.is_active(album_id) {
                    state.images.push(image);
                }
                Ok(state.images.clone())
            }
            Err(e) => Err(self.fail(e, "Failed to upload image").await),
        }
    }

    /// Invert an image's favorite flag
    pub async fn toggle_favorite(&self, album_id: &str, image_id: &str) -> StoreResult<Vec<Image>> {
        let requested = {
            let state = self.state.lock().await;
            let current = state
                .images
                .iter()
                .find(|i| i.id == image_id)
                .filter(|_| state.is_active(album_id))
                .map(|i| i.is_favorite);
            match current {
                Some(is_favorite) => !is_favorite,
                None => return Err(not_in_view(image_id)),
            }
        };

        let _busy = self.in_flight.enter();
        match self
            .gateway
            .set_favorite(album_id, image_id, requested)
            .await
        {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if state.is_active(album_id) {
                    if let Some(image) = state.images.iter_mut().find(|i| i.id == image_id) {
                        image.is_favorite = requested;
                    }
                }
                Ok(state.images.clone())
            }
            Err(e) => Err(self.fail(e, "Failed to update favorite status").await),
        }
    }

    /// Add a comment; the image's comments become the backend's full list
    pub async fn add_comment(
        &self,
        album_id: &str,
        image_id: &str,
        text: &str,
    ) -> StoreResult<Vec<Image>> {
        if text.trim().is_empty() {
            return Err(StoreError::Validation(
                "Comment cannot be empty".to_string(),
            ));
        }
        {
            let state = self.state.lock().await;
            if !state.is_active(album_id) || !state.images.iter().any(|i| i.id == image_id) {
                return Err(not_in_view(image_id));
            }
        }

        let _busy = self.in_flight.enter();
        match self.gateway.add_comment(album_id, image_id, text).await {
            Ok(comments) => {
                let mut state = self.state.lock().await;
                if state.is_active(album_id) {
                    if let Some(image) = state.images.iter_mut().find(|i| i.id == image_id) {
                        image.comments = comments;
                    }
                }
                Ok(state.images.clone())
            }
            Err(e) => Err(self.fail(e, "Failed to add comment").await),
        }
    }

    /// Delete an image; it stays in the working set unless the backend confirms
    pub async fn delete(&self, album_id: &str, image_id: &str) -> StoreResult<Vec<Image>> {
        let _busy = self.in_flight.enter();
        info!("Deleting image {} from album {}", image_id, album_id);

        match self.gateway.delete_image(album_id, image_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                if state.is_active(album_id) {
                    state.images.retain(|i| i.id != image_id);
                }
                Ok(state.images.clone())
            }
            Err(e) => Err(self.fail(e, "Failed to delete image").await),
        }
    }

    async fn fetch(&self, album_id: &str, mode: &ViewMode) -> GatewayResult<Vec<Image>> {
        match mode {
            ViewMode::All => self.gateway.list_images(album_id).await,
            ViewMode::Favorites => self.gateway.list_favorite_images(album_id).await,
            ViewMode::Tag(tag) => self.gateway.list_images_by_tag(album_id, tag).await,
        }
    }

    async fn replace_view(&self, album_id: &str, mode: ViewMode) -> StoreResult<Vec<Image>> {
        let _busy = self.in_flight.enter();
        let ticket = self.view_sequence.issue();
        debug!("Fetching {:?} for album {} (ticket {})", mode, album_id, ticket);
        let result = self.fetch(album_id, &mode).await;

        let mut state = self.state.lock().await;
        let latest = self.view_sequence.is_latest(ticket);
        match result {
            Ok(images) if latest => {
                info!("Album {} shows {} images ({:?})", album_id, images.len(), mode);
                state.album_id = Some(album_id.to_string());
                state.images = images;
                Ok(state.images.clone())
            }
            Ok(_) => {
                debug!("Discarding stale {:?} fetch {}", mode, ticket);
                Ok(state.images.clone())
            }
            Err(e) => {
                let err = StoreError::classify(e, mode.fallback_message());
                warn!("Fetching {:?} failed: {}", mode, err);
                if latest {
                    state.error = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    async fn fail(&self, e: gateway::GatewayError, fallback: &str) -> StoreError {
        let err = StoreError::classify(e, fallback);
        warn!("Image operation failed: {}", err);
        self.state.lock().await.error = Some(err.clone());
        err
    }
}

fn not_in_view(image_id: &str) -> StoreError {
    StoreError::Validation(format!("Image {} is not in the current view", image_id))
}
