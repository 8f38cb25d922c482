//! Path-to-destination redirect service library.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Handler, RedirectChain, RedirectOutcome};
pub use store::RedirectStore;
