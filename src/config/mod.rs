//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → command-line overrides (main.rs)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!
//! On source file change:
//!     watcher.rs detects change
//!     → chain rebuilt from the same AppConfig
//!     → atomic swap of the live chain
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; only source contents are reloaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::ConfigError;
pub use schema::AdminConfig;
pub use schema::AppConfig;
pub use schema::FallbackConfig;
pub use schema::SourcesConfig;
pub use schema::StoreConfig;
