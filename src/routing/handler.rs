//! Redirect handlers and fallback composition.
//!
//! # Responsibilities
//! - Resolve a path against a table snapshot
//! - Delegate misses to the fallback handler, unchanged
//! - Terminate every chain with a fixed default outcome
//!
//! # Design Decisions
//! - Handlers are immutable once built (thread-safe without locks)
//! - Fallbacks are shared via Arc, so a chain is a singly-linked list
//! - Dispatch is total: no error channel at request time

use std::fmt;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::routing::table::RedirectTable;

/// Result of resolving a path through a chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectOutcome {
    /// Redirect the client to `location` with 303 See Other.
    Redirect { location: String },

    /// Fixed page served when no layer knows the path.
    Default { status: StatusCode, body: Arc<str> },
}

impl RedirectOutcome {
    /// HTTP status this outcome is served with.
    pub fn status(&self) -> StatusCode {
        match self {
            RedirectOutcome::Redirect { .. } => StatusCode::SEE_OTHER,
            RedirectOutcome::Default { status, .. } => *status,
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            RedirectOutcome::Redirect { location } => Some(location),
            RedirectOutcome::Default { .. } => None,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, RedirectOutcome::Redirect { .. })
    }
}

/// Anything that can resolve a request path.
pub trait Handler: Send + Sync + fmt::Debug {
    /// Resolve `path`. Never fails.
    fn handle(&self, path: &str) -> RedirectOutcome;
}

/// Shared, type-erased handler used as a fallback link.
pub type SharedHandler = Arc<dyn Handler>;

/// Resolves paths from a table, delegating misses to `fallback`.
#[derive(Debug)]
pub struct MapHandler {
    layer: &'static str,
    table: RedirectTable,
    fallback: SharedHandler,
}

impl MapHandler {
    /// Wrap `table` in front of `fallback`. Performs no I/O.
    pub fn new(layer: &'static str, table: RedirectTable, fallback: SharedHandler) -> Self {
        Self {
            layer,
            table,
            fallback,
        }
    }

    /// Layer name used in logs ("store", "json", ...).
    pub fn layer(&self) -> &'static str {
        self.layer
    }

    pub fn table(&self) -> &RedirectTable {
        &self.table
    }
}

impl Handler for MapHandler {
    fn handle(&self, path: &str) -> RedirectOutcome {
        match self.table.get(path) {
            Some(destination) => {
                tracing::debug!(layer = self.layer, path = %path, location = %destination, "Path resolved");
                RedirectOutcome::Redirect {
                    location: destination.to_string(),
                }
            }
            None => self.fallback.handle(path),
        }
    }
}

/// Terminal handler. Always returns the same page.
#[derive(Debug, Clone)]
pub struct DefaultHandler {
    status: StatusCode,
    body: Arc<str>,
}

impl DefaultHandler {
    pub fn new(status: StatusCode, body: impl Into<Arc<str>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl Default for DefaultHandler {
    fn default() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found")
    }
}

impl Handler for DefaultHandler {
    fn handle(&self, path: &str) -> RedirectOutcome {
        tracing::debug!(path = %path, "No layer matched, serving default page");
        RedirectOutcome::Default {
            status: self.status,
            body: self.body.clone(),
        }
    }
}
