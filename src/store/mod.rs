//! Persistent path storage subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     open(db file) → populate (create + seed once) → read_all → store layer
//!
//! Admin mutation:
//!     add_path / add_paths (one write txn) → chain rebuild → read_all
//! ```
//!
//! # Design Decisions
//! - The store owns its partition; callers never see redb handles
//! - Reads happen at chain construction, never per request

pub mod error;
pub mod redb_store;

pub use error::{StoreError, StoreResult};
pub use redb_store::{RedirectStore, PARTITION, SEED_PATHS};
