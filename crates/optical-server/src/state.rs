//! Shared application state handed to every handler.

use std::sync::Arc;

use optical_core::Store;
use tracing::info;

use crate::{
    auth::TokenDigest,
    config::{Config, StoreBackend},
};

pub struct AppState {
    pub store: Store,
    pub config: Config,
    pub(crate) token: Option<TokenDigest>,
}

impl AppState {
    /// Open the configured store, seed it if asked to, and wrap it up.
    pub fn new(config: Config) -> anyhow::Result<Arc<Self>> {
        let store = match config.store {
            StoreBackend::Memory => Store::in_memory(),
            StoreBackend::Sqlite => Store::open_sqlite(&config.db_path)?,
        };

        if config.seed {
            let added = store.seed()?;
            info!("Seeded {added} fixture records");
        }

        Ok(Self::with_store(store, config))
    }

    pub fn with_store(store: Store, config: Config) -> Arc<Self> {
        let token = TokenDigest::from_config(&config.api_token);
        Arc::new(Self {
            store,
            config,
            token,
        })
    }
}
