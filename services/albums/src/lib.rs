//! Album client state layer
//!
//! Two stores keep a local working set consistent with the photo-album
//! backend: [`AlbumStore`] for the albums visible to the signed-in user and
//! [`ImageStore`] for the images of the album being viewed. Both talk to the
//! backend only through a [`gateway::RemoteGateway`], authenticated by the
//! [`SessionContext`].

pub mod album_store;
pub mod error;
pub mod image_store;
mod sequence;
pub mod session;
pub mod validation;

pub use album_store::{AlbumStore, AlbumUpdate, NewAlbum};
pub use error::{StoreError, StoreResult};
pub use image_store::{ImageStore, ViewMode};
pub use session::SessionContext;

/// Example usage of the stores
///
/// ```rust,no_run
/// use std::sync::Arc;
///
/// use albums::{AlbumStore, ImageStore, SessionContext};
/// use common::{ClientConfig, FileStorage};
/// use gateway::HttpGateway;
///
/// async fn run() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::from_env()?;
///     let storage = Arc::new(FileStorage::new(&config.session_file));
///     let (session, _) = SessionContext::initialize(storage, None);
///     let session = Arc::new(session);
///
///     let gateway = Arc::new(HttpGateway::new(config.base_url()?, session.clone())?);
///     let albums = AlbumStore::new(gateway.clone());
///     for album in albums.mount(&session).await? {
///         let images = ImageStore::new(gateway.clone());
///         println!("{}: {} images", album.name, images.open_album(&album.id).await?.len());
///     }
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
