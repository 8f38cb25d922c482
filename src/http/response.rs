//! Outcome to HTTP response mapping.
//!
//! # Design Decisions
//! - Redirects are always 303 See Other with a `Location` header
//! - A destination that cannot be encoded as a header value is served as
//!   500 instead of panicking

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::routing::RedirectOutcome;

impl IntoResponse for RedirectOutcome {
    fn into_response(self) -> Response {
        match self {
            RedirectOutcome::Redirect { location } => match HeaderValue::try_from(location.as_str()) {
                Ok(value) => (StatusCode::SEE_OTHER, [(header::LOCATION, value)]).into_response(),
                Err(_) => {
                    tracing::error!(location = ?location, "Destination is not a valid Location header");
                    (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect destination").into_response()
                }
            },
            RedirectOutcome::Default { status, body } => (status, body.to_string()).into_response(),
        }
    }
}
