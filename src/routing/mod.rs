//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path
//!     → chain.rs (current RedirectChain snapshot)
//!     → handler.rs (table lookup, fallback on miss)
//!     → Return: Redirect (303) or Default page
//!
//! Chain Construction (at startup and on rebuild):
//!     YAML/JSON bytes → decode.rs → PathRecord[]
//!     static config / store → table.rs → RedirectTable
//!     builder.rs wraps each table in front of the previous layer
//!     → Freeze as immutable RedirectChain
//! ```
//!
//! # Design Decisions
//! - Tables compiled at construction, immutable at runtime
//! - Exact match only, no wildcards or regex
//! - Deterministic: first layer that knows the path wins
//! - All errors surface at construction; dispatch cannot fail

pub mod builder;
pub mod chain;
pub mod decode;
pub mod handler;
pub mod table;

pub use builder::{json_handler, map_handler, store_handler, yaml_handler, ConstructionError};
pub use chain::{ChainBuilder, RedirectChain};
pub use decode::{decode_json, decode_yaml, DecodeError};
pub use handler::{DefaultHandler, Handler, MapHandler, RedirectOutcome, SharedHandler};
pub use table::{build_table, PathRecord, RedirectTable};
