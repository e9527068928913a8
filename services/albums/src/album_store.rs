//! Album store
//!
//! Owns the local collection of albums visible to the signed-in user and
//! reconciles it with the backend. Listing is a total replacement: the remote
//! order and contents are authoritative.

use std::sync::Arc;

use gateway::{Album, CreateAlbumRequest, RemoteGateway, UpdateAlbumRequest};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    sequence::{InFlight, Sequencer},
    session::SessionContext,
    validation::validate_share_list,
};

/// Full-record replacement sent on update
pub type AlbumUpdate = UpdateAlbumRequest;

/// Values of the create form
///
/// Held by the caller, so they are still there for a retry after a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewAlbum {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Default)]
struct AlbumState {
    albums: Vec<Album>,
    error: Option<StoreError>,
}

/// Album store
pub struct AlbumStore<G: RemoteGateway + ?Sized> {
    gateway: Arc<G>,
    state: Mutex<AlbumState>,
    list_sequence: Sequencer,
    in_flight: InFlight,
}

impl<G: RemoteGateway + ?Sized> AlbumStore<G> {
    /// Create an empty album store
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            state: Mutex::new(AlbumState::default()),
            list_sequence: Sequencer::default(),
            in_flight: InFlight::default(),
        }
    }

    /// Snapshot of the local collection
    pub async fn albums(&self) -> Vec<Album> {
        self.state.lock().await.albums.clone()
    }

    /// Look up one album in the local collection
    pub async fn album(&self, album_id: &str) -> Option<Album> {
        let state = self.state.lock().await;
        state.albums.iter().find(|a| a.id == album_id).cloned()
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

    /// Initial load: list when signed in, otherwise flag that a login is needed
    pub async fn mount(&self, session: &SessionContext) -> StoreResult<Vec<Album>> {
        if !session.is_authenticated().await {
            info!("Skipping album listing: no session");
            return Err(self.fail(StoreError::Unauthenticated).await);
        }
        self.list().await
    }

    /// Replace the local collection with the backend's
    pub async fn list(&self) -> StoreResult<Vec<Album>> {
        let _busy = self.in_flight.enter();
        let ticket = self.list_sequence.issue();
        let result = self.gateway.list_albums().await;

        let mut state = self.state.lock().await;
        let latest = self.list_sequence.is_latest(ticket);
        match result {
            Ok(albums) if latest => {
                info!("Listed {} albums", albums.len());
                state.albums = albums;
                state.error = None;
                Ok(state.albums.clone())
            }
            Ok(_) => {
                debug!("Discarding stale album listing {}", ticket);
                Ok(state.albums.clone())
            }
            Err(e) => {
                let err = StoreError::classify(e, "Failed to fetch albums");
                warn!("Album listing failed: {}", err);
                if latest {
                    state.error = Some(err.clone());
                }
                Err(err)
            }
        }
    }

    /// Create an album; it is added locally only once the backend confirms it
    pub async fn create(&self, draft: &NewAlbum) -> StoreResult<Vec<Album>> {
        let _busy = self.in_flight.enter();
        let request = CreateAlbumRequest {
            album_id: Uuid::new_v4(),
            name: draft.name.clone(),
            description: draft.description.clone(),
        };
        info!("Creating album {} (request {})", request.name, request.album_id);

        match self.gateway.create_album(&request).await {
            Ok(album) => {
                let mut state = self.state.lock().await;
                info!("Album {} created", album.id);
                state.albums.push(album);
                state.error = None;
                Ok(state.albums.clone())
            }
            Err(e) => {
                let err = StoreError::classify(e, "Failed to create album");
                warn!("Album creation failed: {}", err);
                Err(self.fail(err).await)
            }
        }
    }

    /// Replace an album's name, description and shared users
    ///
    /// The local entry becomes whatever the backend returns. Every failure is
    /// reported as `Unauthorized`.
    pub async fn update(&self, album_id: &str, changes: &AlbumUpdate) -> StoreResult<Vec<Album>> {
        let _busy = self.in_flight.enter();
        info!("Updating album {}", album_id);

        match self.gateway.update_album(album_id, changes).await {
            Ok(album) => {
                let mut state = self.state.lock().await;
                if let Some(entry) = state.albums.iter_mut().find(|a| a.id == album_id) {
                    *entry = album;
                }
                state.error = None;
                Ok(state.albums.clone())
            }
            Err(e) => {
                warn!("Album update failed: {}", e);
                Err(self.fail(StoreError::Unauthorized).await)
            }
        }
    }

    /// Delete an album; it stays local unless the backend confirms
    pub async fn delete(&self, album_id: &str) -> StoreResult<Vec<Album>> {
        let _busy = self.in_flight.enter();
        info!("Deleting album {}", album_id);

        match self.gateway.delete_album(album_id).await {
            Ok(()) => {
                let mut state = self.state.lock().await;
                state.albums.retain(|a| a.id != album_id);
                state.error = None;
                Ok(state.albums.clone())
            }
            Err(e) => {
                warn!("Album deletion failed: {}", e);
                Err(self.fail(StoreError::Unauthorized).await)
            }
        }
    }

    /// Share an album with a comma-separated list of addresses
    ///
    /// Nothing is sent when any address is malformed. On success the whole
    /// collection is listed again so shared users reflect the backend. The
    /// share is reported as done even when that listing fails; the listing
    /// failure is then only kept as the store error and the previous
    /// collection is returned.
    pub async fn share(&self, album_id: &str, raw_emails: &str) -> StoreResult<Vec<Album>> {
        let emails = validate_share_list(raw_emails).inspect_err(|err| {
            info!("Share of album {} rejected: {}", album_id, err);
        })?;

        {
            let _busy = self.in_flight.enter();
            info!("Sharing album {} with {} users", album_id, emails.len());
            if let Err(e) = self.gateway.share_album(album_id, &emails).await {
                let err = StoreError::classify(e, "Something went wrong while sharing the album");
                warn!("Album share failed: {}", err);
                return Err(self.fail(err).await);
            }
        }

        match self.list().await {
            Ok(albums) => Ok(albums),
            Err(err) => {
                warn!("Album {} shared but the refresh failed: {}", album_id, err);
                Ok(self.albums().await)
            }
        }
    }

    async fn fail(&self, err: StoreError) -> StoreError {
        self.state.lock().await.error = Some(err.clone());
        err
    }
}
