//! Shared application state

use std::sync::Arc;

use crate::config::Config;
use crate::store::{PgStore, Store};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Dependencies every resolver needs, injected at construction time.
///
/// The store and the signing secret are deliberately not process-wide
/// globals: tests construct a state over [`crate::store::MemStore`] and a
/// throwaway secret.
#[derive(Clone)]
pub struct AppState {
    /// Entity store adapter
    pub store: Arc<dyn Store>,
    /// Secret used to sign login tokens
    pub jwt_secret: String,
}

impl AppState {
    /// Connect the PostgreSQL store and build the production state
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store = PgStore::connect(&config.database_url).await?;
        tracing::info!("store connected and migrated");
        Ok(Self {
            store: Arc::new(store),
            jwt_secret: config.jwt_secret.clone(),
        })
    }

    /// Build a state over an arbitrary store backend
    pub fn with_store(store: Arc<dyn Store>, jwt_secret: impl Into<String>) -> Self {
        Self {
            store,
            jwt_secret: jwt_secret.into(),
        }
    }
}
