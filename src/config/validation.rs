//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, status codes and static entries
//! - Check cross-section requirements (admin needs the store)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;
use url::Url;

use crate::config::schema::AppConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than 0")]
    ZeroTimeout,

    #[error("fallback.status {0} is not a valid non-redirect HTTP status")]
    InvalidFallbackStatus(u16),

    #[error("static path '{0}' must start with '/'")]
    InvalidPath(String),

    #[error("static path '{path}' has invalid URL '{url}'")]
    InvalidUrl { path: String, url: String },

    #[error("admin.api_key must not be empty when admin is enabled")]
    EmptyApiKey,

    #[error("admin API requires store.enabled = true")]
    AdminWithoutStore,
}

/// Check that `path` can be used as a redirect key.
pub fn validate_path(path: &str) -> Result<(), ValidationError> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ValidationError::InvalidPath(path.to_string()))
    }
}

/// Check that `url` is an absolute URL usable as a redirect target.
pub fn validate_destination(path: &str, url: &str) -> Result<(), ValidationError> {
    Url::parse(url).map(|_| ()).map_err(|_| ValidationError::InvalidUrl {
        path: path.to_string(),
        url: url.to_string(),
    })
}

pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    match StatusCode::from_u16(config.fallback.status) {
        Ok(status) if !status.is_redirection() => {}
        _ => errors.push(ValidationError::InvalidFallbackStatus(config.fallback.status)),
    }

    for (path, url) in &config.sources.static_paths {
        if let Err(e) = validate_path(path) {
            errors.push(e);
        }
        if let Err(e) = validate_destination(path, url) {
            errors.push(e);
        }
    }

    if config.admin.enabled {
        check_address(&mut errors, "admin.bind_address", &config.admin.bind_address);
        if config.admin.api_key.trim().is_empty() {
            errors.push(ValidationError::EmptyApiKey);
        }
        if !config.store.enabled {
            errors.push(ValidationError::AdminWithoutStore);
        }
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
