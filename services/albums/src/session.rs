//! Session context holding the bearer token
//!
//! The token is taken once at startup, either from the one-time `token`
//! parameter of the redirect URL or from durable storage, and is only
//! cleared by an explicit logout.

use std::sync::Arc;

use async_trait::async_trait;
use common::{AUTH_TOKEN_KEY, LocalStorage, error::StorageResult};
use gateway::TokenSource;
use tokio::sync::RwLock;
use tracing::{info, warn};
use url::Url;

/// Query parameter the backend uses to hand over a fresh token
pub const TOKEN_QUERY_PARAM: &str = "token";

/// Session context shared by the gateway and the stores
pub struct SessionContext {
    token: RwLock<Option<String>>,
    storage: Arc<dyn LocalStorage>,
}

impl SessionContext {
    /// Initialize the session for this client run
    ///
    /// Returns the context and, when a token was consumed from `current_url`,
    /// the URL with its query and fragment removed so the token is not kept
    /// in history or bookmarks.
    pub fn initialize(
        storage: Arc<dyn LocalStorage>,
        current_url: Option<&Url>,
    ) -> (Self, Option<Url>) {
        let url_token = current_url.and_then(token_from_url);
        let cleaned_url = match (current_url, &url_token) {
            (Some(url), Some(_)) => Some(strip_query(url)),
            _ => None,
        };

        if let Some(token) = url_token.as_deref() {
            info!("Session token received from redirect");
            if let Err(e) = storage.set(AUTH_TOKEN_KEY, token) {
                warn!("Failed to persist session token: {}", e);
            }
        }

        let token = url_token.or_else(|| match storage.get(AUTH_TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!("Failed to read persisted session token: {}", e);
                None
            }
        });

        if token.is_some() {
            info!("Session initialized");
        } else {
            info!("No session token available");
        }

        let context = Self {
            token: RwLock::new(token),
            storage,
        };
        (context, cleaned_url)
    }

    /// Current bearer token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    /// Whether a token is available
    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }

    /// Forget the token, in memory and in durable storage
    pub async fn clear(&self) -> StorageResult<()> {
        info!("Clearing session");
        *self.token.write().await = None;
        self.storage.remove(AUTH_TOKEN_KEY)
    }
}

#[async_trait]
impl TokenSource for SessionContext {
    async fn bearer_token(&self) -> Option<String> {
        self.token().await
    }
}

fn token_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == TOKEN_QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

fn strip_query(url: &Url) -> Url {
    let mut cleaned = url.clone();
    cleaned.set_query(None);
    cleaned.set_fragment(None);
    cleaned
}
