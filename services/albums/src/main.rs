use std::sync::Arc;

use albums::{AlbumStore, SessionContext, StoreError};
use anyhow::Result;
use common::{ClientConfig, FileStorage};
use gateway::HttpGateway;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use url::Url;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting album client");

    let config = ClientConfig::from_env()?;
    let storage = Arc::new(FileStorage::new(&config.session_file));
    info!("Session storage at {}", storage.path().display());

    // The login redirect lands here with a one-time token in the query
    let callback = std::env::args().nth(1).map(|raw| Url::parse(&raw)).transpose()?;
    let (session, cleaned) = SessionContext::initialize(storage, callback.as_ref());
    if let Some(url) = cleaned {
        info!("Continue at {}", url);
    }
    let session = Arc::new(session);

    let gateway = Arc::new(HttpGateway::new(config.base_url()?, session.clone())?);
    info!("Syncing albums from {}", gateway.base_url());
    let store = AlbumStore::new(gateway);

    match store.mount(&session).await {
        Ok(albums) => {
            info!("Synced {} albums", albums.len());
            for album in albums {
                info!(
                    "{} ({}) shared with {} users",
                    album.name,
                    album.id,
                    album.shared_users.len()
                );
            }
        }
        Err(StoreError::Unauthenticated) => {
            info!("Not signed in, log in at {}", config.login_url()?);
        }
        Err(e) => warn!("Album sync failed: {}", e),
    }

    Ok(())
}
