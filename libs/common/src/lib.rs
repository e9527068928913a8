//! Common library for the album client
//!
//! This crate provides shared functionality used across the album client
//! crates, including configuration loading, durable local storage and the
//! errors both of them raise.

pub mod config;
pub mod error;
pub mod storage;

pub use config::ClientConfig;
pub use storage::{AUTH_TOKEN_KEY, FileStorage, LocalStorage, MemoryStorage};

/// Example usage of the storage module
///
/// ```rust,no_run
/// use common::{ClientConfig, FileStorage, LocalStorage, AUTH_TOKEN_KEY};
///
/// fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = ClientConfig::from_env()?;
///     let storage = FileStorage::new(&config.session_file);
///     let token = storage.get(AUTH_TOKEN_KEY)?;
///     println!("Signed in: {}", token.is_some());
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
