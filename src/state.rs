//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the one `TicketStore` behind an `RwLock`: reads (lists, stats,
//! dashboard) share the lock, mutations take it exclusively, so every store
//! operation runs to completion before the next one starts.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{AppConfig, StorageBackend};
use crate::error::StoreError;
use crate::storage::{FileStorage, MemoryStorage, Storage};
use crate::store::TicketStore;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; the store is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<TicketStore>>,
}

impl AppState {
    #[must_use]
    pub fn new(store: TicketStore) -> Self {
        Self { store: Arc::new(RwLock::new(store)) }
    }

    /// Open the store on the backend selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if the data directory or persisted records cannot
    /// be read.
    pub fn from_config(config: &AppConfig) -> Result<Self, StoreError> {
        let storage: Box<dyn Storage> = match config.storage {
            StorageBackend::File => {
                let files = FileStorage::open(&config.data_dir)?;
                tracing::info!(dir = %files.dir().display(), "using file storage");
                Box::new(files)
            }
            StorageBackend::Memory => {
                tracing::warn!("using memory storage; tickets will not survive a restart");
                Box::new(MemoryStorage::new())
            }
        };
        Ok(Self::new(TicketStore::open(storage)?))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
