//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Open + populate store → Build chain → Start listeners
//!
//! Shutdown (shutdown.rs):
//!     Ctrl+C → broadcast → servers stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Ordered startup: store first, then chain, then listeners
//! - Listeners start last (traffic only when the chain exists)

pub mod shutdown;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::{open_store, prepare, Prepared};
