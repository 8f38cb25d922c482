//! Handler construction from each source kind.
//!
//! Every fallible step (decode, store read) happens here, before a handler
//! exists. Once constructed, a handler cannot fail.

use std::path::PathBuf;

use thiserror::Error;

use crate::routing::decode::{decode_json, decode_yaml, DecodeError};
use crate::routing::handler::{MapHandler, SharedHandler};
use crate::routing::table::{build_table, RedirectTable};
use crate::store::{RedirectStore, StoreError};

/// Errors raised while building a handler layer.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("store failed: {0}")]
    Store(#[from] StoreError),

    /// A configured source file could not be read.
    #[error("failed to read source {path:?}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Static table in front of `fallback`.
pub fn map_handler(table: RedirectTable, fallback: SharedHandler) -> MapHandler {
    MapHandler::new("static", table, fallback)
}

/// Decode a YAML record list and put it in front of `fallback`.
pub fn yaml_handler(yaml: &[u8], fallback: SharedHandler) -> Result<MapHandler, ConstructionError> {
    let records = decode_yaml(yaml)?;
    Ok(MapHandler::new("yaml", build_table(records), fallback))
}

/// Decode a JSON record list and put it in front of `fallback`.
pub fn json_handler(json: &[u8], fallback: SharedHandler) -> Result<MapHandler, ConstructionError> {
    let records = decode_json(json)?;
    Ok(MapHandler::new("json", build_table(records), fallback))
}

/// Snapshot the store's partition and put it in front of `fallback`.
pub fn store_handler(store: &RedirectStore, fallback: SharedHandler) -> Result<MapHandler, ConstructionError> {
    let table = store.read_all()?;
    Ok(MapHandler::new("store", table, fallback))
}
