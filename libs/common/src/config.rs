//! Client configuration
//!
//! Defaults are layered under `ALBUM_`-prefixed environment variables.

use std::path::PathBuf;

use serde::Deserialize;
use url::Url;

use crate::error::{ConfigError, ConfigResult};

/// Default origin of the photo-album backend
pub const DEFAULT_API_BASE_URL: &str = "https://zeitkammerblick.vercel.app";

/// Default path of the backend-hosted OAuth entry point
pub const DEFAULT_LOGIN_PATH: &str = "/auth/google";

/// Client configuration struct
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Origin every REST call is made against
    pub api_base_url: String,
    /// File backing the durable session storage
    pub session_file: PathBuf,
    /// Path on the backend that starts the login redirect flow
    pub login_path: String,
}

impl ClientConfig {
    /// Create a new ClientConfig from environment variables
    ///
    /// # Environment Variables
    /// - `ALBUM_API_BASE_URL`: backend origin (default: "https://zeitkammerblick.vercel.app")
    /// - `ALBUM_SESSION_FILE`: session storage file (default: `<local data dir>/album-client/session.json`)
    /// - `ALBUM_LOGIN_PATH`: OAuth entry point (default: "/auth/google")
    pub fn from_env() -> ConfigResult<Self> {
        let settings = config::Config::builder()
            .set_default("api_base_url", DEFAULT_API_BASE_URL)?
            .set_default("login_path", DEFAULT_LOGIN_PATH)?
            .set_default(
                "session_file",
                default_session_file().to_string_lossy().into_owned(),
            )?
            .add_source(config::Environment::with_prefix("ALBUM"))
            .build()?;

        let config: ClientConfig = settings.try_deserialize()?;
        config.base_url()?;

        Ok(config)
    }

    /// Parsed backend origin
    pub fn base_url(&self) -> ConfigResult<Url> {
        Url::parse(&self.api_base_url).map_err(|e| ConfigError::Invalid {
            key: "api_base_url",
            reason: e.to_string(),
        })
    }

    /// URL the user is sent to in order to sign in
    pub fn login_url(&self) -> ConfigResult<Url> {
        self.base_url()?
            .join(&self.login_path)
            .map_err(|e| ConfigError::Invalid {
                key: "login_path",
                reason: e.to_string(),
            })
    }
}

fn default_session_file() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("album-client")
        .join("session.json")
}
