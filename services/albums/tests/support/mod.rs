//! In-memory backend for the store tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gateway::{
    Album, CreateAlbumRequest, GatewayError, GatewayResult, Image, ImageUpload, RemoteGateway,
    UpdateAlbumRequest,
};
use tokio::sync::Notify;

pub const OWNER: &str = "owner@example.com";

#[derive(Default)]
struct FakeState {
    albums: Vec<Album>,
    images: HashMap<String, Vec<Image>>,
    calls: Vec<String>,
    failures: HashMap<String, (u16, Option<String>)>,
    gates: HashMap<String, Arc<Notify>>,
    next_id: usize,
}

/// Backend double with configurable failures and gated responses
///
/// Every call is recorded before it is answered. Calls are keyed as
/// `operation:album[:image][:extra]`, e.g. `list_by_tag:a1:vacation`.
#[derive(Default)]
pub struct FakeGateway {
    state: Mutex<FakeState>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_album(self, id: &str, name: &str) -> Self {
        self.state.lock().unwrap().albums.push(album(id, name));
        self
    }

    pub fn with_image(self, album_id: &str, image: Image) -> Self {
        self.state
            .lock()
            .unwrap()
            .images
            .entry(album_id.to_string())
            .or_default()
            .push(image);
        self
    }

    /// Make every call of `operation` fail with `status`
    pub fn fail(&self, operation: &str, status: u16, message: Option<&str>) {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert(operation.to_string(), (status, message.map(str::to_string)));
    }

    pub fn recover(&self, operation: &str) {
        self.state.lock().unwrap().failures.remove(operation);
    }

    /// Hold the next response of `call` until the returned handle is notified
    ///
    /// Listings are read before the hold, so a held listing answers with the
    /// data as it was when the call arrived.
    pub fn hold(&self, call: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.state
            .lock()
            .unwrap()
            .gates
            .insert(call.to_string(), gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Wait until `call` has reached the backend
    pub async fn reached(&self, call: &str) {
        for _ in 0..200 {
            if self.calls().iter().any(|c| c == call) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("{} never reached the backend", call);
    }

    pub fn backend_album(&self, id: &str) -> Option<Album> {
        let state = self.state.lock().unwrap();
        state.albums.iter().find(|a| a.id == id).cloned()
    }

    async fn enter(&self, operation: &str, call: String) -> GatewayResult<()> {
        let (gate, failure) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(call.clone());
            (
                state.gates.remove(&call),
                state.failures.get(operation).cloned(),
            )
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }
        match failure {
            Some((status, message)) => Err(GatewayError::Status { status, message }),
            None => Ok(()),
        }
    }

    fn images_where(&self, album_id: &str, keep: impl Fn(&Image) -> bool) -> Vec<Image> {
        let state = self.state.lock().unwrap();
        state
            .images
            .get(album_id)
            .map(|images| images.iter().filter(|i| keep(i)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl RemoteGateway for FakeGateway {
    async fn list_albums(&self) -> GatewayResult<Vec<Album>> {
        let albums = self.state.lock().unwrap().albums.clone();
        self.enter("list_albums", "list_albums".to_string()).await?;
        Ok(albums)
    }

    async fn create_album(&self, request: &CreateAlbumRequest) -> GatewayResult<Album> {
        self.enter("create_album", "create_album".to_string())
            .await?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut created = album(&format!("album-{}", state.next_id), &request.name);
        created.description = request.description.clone();
        state.albums.push(created.clone());
        Ok(created)
    }

    async fn update_album(
        &self,
        album_id: &str,
        request: &UpdateAlbumRequest,
    ) -> GatewayResult<Album> {
        self.enter("update_album", format!("update_album:{}", album_id))
            .await?;
        let mut state = self.state.lock().unwrap();
        let entry = state
            .albums
            .iter_mut()
            .find(|a| a.id == album_id)
            .ok_or(GatewayError::Status {
                status: 404,
                message: Some("Album not found".to_string()),
            })?;
        entry.name = request.name.clone();
        entry.description = request.description.clone();
        entry.shared_users = normalize(&request.shared_users);
        Ok(entry.clone())
    }

    async fn delete_album(&self, album_id: &str) -> GatewayResult<()> {
        self.enter("delete_album", format!("delete_album:{}", album_id))
            .await?;
        self.state
            .lock()
            .unwrap()
            .albums
            .retain(|a| a.id != album_id);
        Ok(())
    }

    async fn share_album(&self, album_id: &str, shared_users: &[String]) -> GatewayResult<()> {
        self.enter("share_album", format!("share_album:{}", album_id))
            .await?;
        let mut state = self.state.lock().unwrap();
        if let Some(entry) = state.albums.iter_mut().find(|a| a.id == album_id) {
            let mut merged = entry.shared_users.clone();
            merged.extend_from_slice(shared_users);
            entry.shared_users = normalize(&merged);
        }
        Ok(())
    }

    async fn list_images(&self, album_id: &str) -> GatewayResult<Vec<Image>> {
        let images = self.images_where(album_id, |_| true);
        self.enter("list_images", format!("list_images:{}", album_id))
            .await?;
        Ok(images)
    }

    async fn list_favorite_images(&self, album_id: &str) -> GatewayResult<Vec<Image>> {
        let images = self.images_where(album_id, |i| i.is_favorite);
        self.enter("list_favorites", format!("list_favorites:{}", album_id))
            .await?;
        Ok(images)
    }

    async fn list_images_by_tag(&self, album_id: &str, tag: &str) -> GatewayResult<Vec<Image>> {
        let images = self.images_where(album_id, |i| i.tags.iter().any(|t| t == tag));
        self.enter("list_by_tag", format!("list_by_tag:{}:{}", album_id, tag))
            .await?;
        Ok(images)
    }

    async fn upload_image(&self, album_id: &str, upload: ImageUpload) -> GatewayResult<Image> {
        self.enter("upload_image", format!("upload_image:{}", album_id))
            .await?;
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let mut uploaded = image(&format!("img-{}", state.next_id), &upload.tags);
        uploaded.name = Some(upload.file_name);
        state
            .images
            .entry(album_id.to_string())
            .or_default()
            .push(uploaded.clone());
        Ok(uploaded)
    }

    async fn set_favorite(
        &self,
        album_id: &str,
        image_id: &str,
        is_favorite: bool,
    ) -> GatewayResult<()> {
        let call = format!("set_favorite:{}:{}:{}", album_id, image_id, is_favorite);
        self.enter("set_favorite", call).await?;
        let mut state = self.state.lock().unwrap();
        if let Some(target) = state
            .images
            .get_mut(album_id)
            .and_then(|images| images.iter_mut().find(|i| i.id == image_id))
        {
            target.is_favorite = is_favorite;
        }
        Ok(())
    }

    async fn add_comment(
        &self,
        album_id: &str,
        image_id: &str,
        comment: &str,
    ) -> GatewayResult<Vec<String>> {
        self.enter("add_comment", format!("add_comment:{}:{}", album_id, image_id))
            .await?;
        let mut state = self.state.lock().unwrap();
        let target = state
            .images
            .get_mut(album_id)
            .and_then(|images| images.iter_mut().find(|i| i.id == image_id))
            .ok_or(GatewayError::Status {
                status: 404,
                message: Some("Image not found".to_string()),
            })?;
        target.comments.push(comment.trim().to_string());
        Ok(target.comments.clone())
    }

    async fn delete_image(&self, album_id: &str, image_id: &str) -> GatewayResult<()> {
        self.enter("delete_image", format!("delete_image:{}:{}", album_id, image_id))
            .await?;
        if let Some(images) = self.state.lock().unwrap().images.get_mut(album_id) {
            images.retain(|i| i.id != image_id);
        }
        Ok(())
    }
}

/// Lowercase and dedupe, the way the backend stores shared users
fn normalize(emails: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for email in emails.iter().map(|e| e.to_lowercase()) {
        if !out.contains(&email) {
            out.push(email);
        }
    }
    out
}

pub fn album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        owner_email: Some(OWNER.to_string()),
        shared_users: Vec::new(),
    }
}

pub fn image(id: &str, tags: &[String]) -> Image {
    Image {
        id: id.to_string(),
        url: format!("https://cdn.example.com/{}.jpg", id),
        name: None,
        tags: tags.to_vec(),
        is_favorite: false,
        comments: Vec::new(),
    }
}

pub fn tagged(id: &str, tags: &[&str]) -> Image {
    let tags: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
    image(id, &tags)
}

pub fn favorite(id: &str, tags: &[&str]) -> Image {
    Image {
        is_favorite: true,
        ..tagged(id, tags)
    }
}
