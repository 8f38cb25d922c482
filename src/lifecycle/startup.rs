//! Startup orchestration.
//!
//! # Responsibilities
//! - Open and populate the store before anything reads it
//! - Build the first chain snapshot
//!
//! # Design Decisions
//! - Fail fast: any startup error is returned to the binary
//! - Steps run sequentially, before the listener accepts traffic

use std::sync::Arc;

use crate::config::{AppConfig, StoreConfig};
use crate::routing::{ChainBuilder, ConstructionError, RedirectChain};
use crate::store::{RedirectStore, StoreResult};

/// Open the configured store and make sure its partition exists.
///
/// Returns `None` when the store layer is disabled.
pub fn open_store(config: &StoreConfig) -> StoreResult<Option<Arc<RedirectStore>>> {
    if !config.enabled {
        tracing::info!("Store layer disabled");
        return Ok(None);
    }

    let store = RedirectStore::open(&config.path)?;
    let seeded = store.populate()?;
    tracing::info!(path = ?store.path(), seeded, "Store ready");
    Ok(Some(Arc::new(store)))
}

/// Everything the server needs to start resolving paths.
pub struct Prepared {
    pub builder: Arc<ChainBuilder>,
    pub chain: RedirectChain,
}

/// Open the store, populate it and build the initial chain.
pub fn prepare(config: &AppConfig) -> Result<Prepared, ConstructionError> {
    let store = open_store(&config.store)?;
    let builder = Arc::new(ChainBuilder::new(config, store));
    let chain = builder.build()?;

    tracing::info!(layers = ?chain.layers(), "Redirect chain ready");
    Ok(Prepared { builder, chain })
}
