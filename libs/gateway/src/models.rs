//! Data model and wire schemas for the album backend
//!
//! Every success shape the backend returns has its own envelope type so a
//! payload that does not match is rejected at the gateway boundary.

pub mod album;
pub mod image;

pub use album::{Album, CreateAlbumRequest, ShareAlbumRequest, UpdateAlbumRequest};
pub use image::{AddCommentRequest, FavoriteRequest, Image, ImageUpload};
