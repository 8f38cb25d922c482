//! urlshort: path-to-destination redirect service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request          ┌──────────────────────────────────────────────────────┐
//!     ────────────────────────┼─▶ http server ──▶ live RedirectChain (ArcSwap)        │
//!                             │                     │                                │
//!                             │                     ▼                                │
//!                             │    store ─▶ json ─▶ yaml ─▶ static ─▶ default          │
//!                             │   (redb)   (file)  (file)  (config)  (fixed page)     │
//!     303 See Other / default │                     │                                │
//!     ◀───────────────────────┼─────────────────────┘                                │
//!                             │                                                      │
//!     Admin API ──────────────┼─▶ store writes ──▶ rebuild ──▶ swap chain             │
//!     Source file change ─────┼─▶ watcher ───────▶ rebuild ──▶ swap chain             │
//!                             └──────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use urlshort::admin::serve_admin;
use urlshort::config::loader::{finalize_config, load_config};
use urlshort::config::watcher::SourceWatcher;
use urlshort::config::AppConfig;
use urlshort::observability::{logging, metrics};
use urlshort::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "urlshort")]
#[command(about = "Redirect request paths to destination URLs", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// YAML file containing path to URL mappings.
    #[arg(long)]
    yaml: Option<PathBuf>,

    /// JSON file containing path to URL mappings.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Database file for the persistent store.
    #[arg(long)]
    db: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8080.
    #[arg(long)]
    bind: Option<String>,
}

impl Cli {
    fn apply(self, config: &mut AppConfig) {
        if let Some(yaml) = self.yaml {
            config.sources.yaml_file = Some(yaml);
        }
        if let Some(json) = self.json {
            config.sources.json_file = Some(json);
        }
        if let Some(db) = self.db {
            config.store.path = db;
        }
        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    cli.apply(&mut config);
    let config = finalize_config(config)?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!("urlshort v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        yaml_file = ?config.sources.yaml_file,
        json_file = ?config.sources.json_file,
        store_enabled = config.store.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let server = HttpServer::new(config.clone())?;
    let shutdown = Shutdown::new();
    shutdown.trigger_on_ctrl_c();

    // Dropping the watcher stops it, so it lives until main returns.
    let _watcher = if config.sources.watch {
        let state = server.state().clone();
        let paths = state.source_files();
        if paths.is_empty() {
            tracing::warn!("sources.watch is set but no source files are configured");
            None
        } else {
            let watcher = SourceWatcher::new(paths, move || {
                let _ = state.rebuild("watcher");
            });
            Some(watcher.run()?)
        }
    } else {
        None
    };

    let admin_task = match server.admin_router() {
        Some(router) => {
            let listener = TcpListener::bind(&config.admin.bind_address).await?;
            Some(tokio::spawn(serve_admin(router, listener, shutdown.subscribe())))
        }
        None => None,
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    server.run(listener, shutdown.subscribe()).await?;

    if let Some(task) = admin_task {
        task.await??;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
