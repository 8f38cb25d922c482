//! Admin API for the persistent store.
//!
//! ```text
//! GET  /admin/status       version, live layers, store size
//! GET  /admin/paths        every store entry
//! POST /admin/paths        { "path", "url" } upsert + rebuild
//! POST /admin/paths/bulk   [{ "path", "url" }] upsert + rebuild
//! POST /admin/reload       rebuild from current sources
//! ```

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;
use crate::lifecycle::shutdown;

pub fn setup_admin_router(state: AppState) -> Router {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/paths", get(list_paths).post(add_path))
        .route("/admin/paths/bulk", post(add_paths))
        .route("/admin/reload", post(reload))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state)
}

/// Serve the admin router until `shutdown` fires.
pub async fn serve_admin(
    router: Router,
    listener: TcpListener,
    shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin API starting");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown::wait(shutdown))
        .await?;

    tracing::info!("Admin API stopped");
    Ok(())
}
