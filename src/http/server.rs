//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Hold the live chain and publish rebuilt snapshots
//! - Bind server to listener with graceful shutdown

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, Uri},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::admin::setup_admin_router;
use crate::config::{AdminConfig, AppConfig};
use crate::http::request::{lookup_path, request_id, MakeRequestUuidV4};
use crate::lifecycle::shutdown;
use crate::lifecycle::startup::{prepare, Prepared};
use crate::observability::metrics;
use crate::routing::{ChainBuilder, ConstructionError, RedirectChain, RedirectOutcome};
use crate::store::RedirectStore;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    chain: Arc<ArcSwap<RedirectChain>>,
    builder: Arc<ChainBuilder>,
    pub admin: AdminConfig,
}

impl AppState {
    pub fn new(builder: Arc<ChainBuilder>, chain: RedirectChain, admin: AdminConfig) -> Self {
        metrics::record_chain_layers(chain.layers().len());
        Self {
            chain: Arc::new(ArcSwap::from_pointee(chain)),
            builder,
            admin,
        }
    }

    /// Resolve `path` against the current chain snapshot.
    pub fn resolve(&self, path: &str) -> RedirectOutcome {
        self.chain.load().resolve(path)
    }

    /// Current chain snapshot.
    pub fn chain(&self) -> Arc<RedirectChain> {
        self.chain.load_full()
    }

    pub fn store(&self) -> Option<&Arc<RedirectStore>> {
        self.builder.store()
    }

    /// Source files feeding the chain, for change watching.
    pub fn source_files(&self) -> Vec<PathBuf> {
        self.builder.source_files()
    }

    /// Build a fresh chain and swap it in. On failure the current chain
    /// keeps serving.
    pub fn rebuild(&self, trigger: &'static str) -> Result<(), ConstructionError> {
        match self.builder.build() {
            Ok(chain) => {
                tracing::info!(trigger, layers = ?chain.layers(), "Redirect chain rebuilt");
                metrics::record_chain_layers(chain.layers().len());
                metrics::record_rebuild(trigger, true);
                self.chain.store(Arc::new(chain));
                Ok(())
            }
            Err(e) => {
                tracing::error!(trigger, error = %e, "Chain rebuild failed, keeping current chain");
                metrics::record_rebuild(trigger, false);
                Err(e)
            }
        }
    }
}

/// HTTP server for the redirect service.
pub struct HttpServer {
    router: Router,
    config: AppConfig,
    state: AppState,
}

impl HttpServer {
    /// Open the store, build the chain and set up the router.
    pub fn new(config: AppConfig) -> Result<Self, ConstructionError> {
        let Prepared { builder, chain } = prepare(&config)?;
        let state = AppState::new(builder, chain, config.admin.clone());
        let router = Self::build_router(&config, state.clone());

        Ok(Self {
            router,
            config,
            state,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(redirect_handler))
            .route("/{*path}", any(redirect_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %request_id(request.headers()),
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
    }

    /// Router serving redirects, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Admin router, when enabled and a store is available.
    pub fn admin_router(&self) -> Option<Router> {
        if !self.config.admin.enabled {
            return None;
        }
        if self.state.store().is_none() {
            tracing::warn!("Admin API enabled but store layer is disabled; admin not started");
            return None;
        }
        Some(setup_admin_router(self.state.clone()))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(self, listener: TcpListener, shutdown: broadcast::Receiver<()>) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown::wait(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Resolve the request path through the live chain.
async fn redirect_handler(State(state): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let start = Instant::now();
    let path = lookup_path(&uri);

    let outcome = state.resolve(&path);
    let label = if outcome.is_redirect() { "redirect" } else { "default" };

    tracing::debug!(
        request_id = %request_id(&headers),
        path = %path,
        outcome = label,
        location = outcome.location().unwrap_or("-"),
        "Request resolved"
    );
    metrics::record_request(label, outcome.status().as_u16(), start);

    outcome.into_response()
}
