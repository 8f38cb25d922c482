//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Path sources feeding the redirect chain.
    pub sources: SourcesConfig,

    /// Persistent store settings.
    pub store: StoreConfig,

    /// Page served when no source knows a path.
    pub fallback: FallbackConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Sources for the static, YAML and JSON layers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// In-memory path -> URL entries (innermost layer before the default).
    pub static_paths: BTreeMap<String, String>,

    /// YAML record list. Built-in sample list when unset.
    pub yaml_file: Option<PathBuf>,

    /// JSON record list. Built-in sample list when unset.
    pub json_file: Option<PathBuf>,

    /// Abort on the first broken layer. When false, broken layers are skipped.
    pub strict: bool,

    /// Rebuild the chain when a source file changes.
    pub watch: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        let mut static_paths = BTreeMap::new();
        static_paths.insert(
            "/urlshort-godoc".to_string(),
            "https://godoc.org/github.com/gophercises/urlshort".to_string(),
        );
        static_paths.insert(
            "/yaml-godoc".to_string(),
            "https://godoc.org/gopkg.in/yaml.v2".to_string(),
        );

        Self {
            static_paths,
            yaml_file: None,
            json_file: None,
            strict: true,
            watch: false,
        }
    }
}

/// Persistent store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Put the store layer at the head of the chain.
    pub enabled: bool,

    /// Database file path.
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: PathBuf::from("pathMap.db"),
        }
    }
}

/// Default page configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FallbackConfig {
    /// HTTP status of the default page.
    pub status: u16,

    /// Body of the default page.
    pub body: String,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            status: 404,
            body: "Not Found".to_string(),
        }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable admin API.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,

    /// Admin API bind address.
    pub bind_address: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
            bind_address: "127.0.0.1:8081".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.store.enabled);
        assert!(config.sources.strict);
        assert!(!config.admin.enabled);
        assert_eq!(config.fallback.status, 404);
        assert_eq!(config.sources.static_paths.len(), 2);
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [sources]
            yaml_file = "paths.yaml"
            strict = false

            [sources.static_paths]
            "/home" = "https://example.com"

            [store]
            path = "/var/lib/urlshort/paths.db"
            "#,
        )
        .unwrap();

        assert_eq!(config.sources.yaml_file, Some(PathBuf::from("paths.yaml")));
        assert!(config.sources.json_file.is_none());
        assert!(!config.sources.strict);
        assert_eq!(config.sources.static_paths.len(), 1);
        assert_eq!(config.store.path, PathBuf::from("/var/lib/urlshort/paths.db"));
        // untouched sections keep their defaults
        assert!(config.store.enabled);
        assert_eq!(config.timeouts.request_secs, 30);
    }
}
