use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::config::validation::{validate_destination, validate_path, ValidationError};
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::routing::{ConstructionError, PathRecord, RedirectTable};
use crate::store::StoreError;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub layers: Vec<&'static str>,
    pub store_entries: Option<usize>,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct WriteSummary {
    pub written: usize,
}

/// Errors returned by admin endpoints.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{0}")]
    Invalid(#[from] ValidationError),

    #[error("store layer is disabled")]
    NoStore,

    #[error("{0}")]
    Store(#[from] StoreError),

    /// The write committed but the new chain could not be built.
    #[error("rebuild failed: {0}")]
    Rebuild(#[from] ConstructionError),

    #[error("background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = match self {
            AdminError::Invalid(_) => StatusCode::BAD_REQUEST,
            AdminError::NoStore => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    let store_entries = match state.store() {
        Some(store) => {
            let store = store.clone();
            tokio::task::spawn_blocking(move || store.read_all())
                .await
                .ok()
                .and_then(Result::ok)
                .map(|table| table.len())
        }
        None => None,
    };

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        layers: state.chain().layers().to_vec(),
        store_entries,
    })
}

pub async fn list_paths(State(state): State<AppState>) -> Result<Json<RedirectTable>, AdminError> {
    let store = state.store().ok_or(AdminError::NoStore)?.clone();
    let table = tokio::task::spawn_blocking(move || store.read_all()).await??;
    Ok(Json(table))
}

pub async fn add_path(
    State(state): State<AppState>,
    Json(record): Json<PathRecord>,
) -> Result<(StatusCode, Json<WriteSummary>), AdminError> {
    write_records(state, vec![record]).await
}

pub async fn add_paths(
    State(state): State<AppState>,
    Json(records): Json<Vec<PathRecord>>,
) -> Result<(StatusCode, Json<WriteSummary>), AdminError> {
    write_records(state, records).await
}

pub async fn reload(State(state): State<AppState>) -> Result<Json<SystemStatus>, AdminError> {
    let rebuild_state = state.clone();
    tokio::task::spawn_blocking(move || rebuild_state.rebuild("admin")).await??;
    Ok(get_status(State(state)).await)
}

/// Validate, upsert in one transaction, then publish a rebuilt chain.
async fn write_records(
    state: AppState,
    records: Vec<PathRecord>,
) -> Result<(StatusCode, Json<WriteSummary>), AdminError> {
    for record in &records {
        validate_path(&record.path)?;
        validate_destination(&record.path, &record.destination)?;
    }
    let store = state.store().ok_or(AdminError::NoStore)?.clone();

    let written = tokio::task::spawn_blocking(move || -> Result<usize, AdminError> {
        let written = store.add_paths(records.iter().map(|r| (&r.path, &r.destination)))?;
        metrics::record_store_writes(written);
        tracing::info!(entries = written, "Admin wrote store entries");
        state.rebuild("admin")?;
        Ok(written)
    })
    .await??;

    Ok((StatusCode::CREATED, Json(WriteSummary { written })))
}
