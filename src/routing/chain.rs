//! Redirect chain assembly.
//!
//! Layers are linked inside out, so the first layer consulted is the last one
//! built:
//!
//! ```text
//! store → json → yaml → static → default
//! ```

use std::path::Path;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::config::{AppConfig, FallbackConfig, SourcesConfig};
use crate::routing::builder::{json_handler, map_handler, store_handler, yaml_handler, ConstructionError};
use crate::routing::handler::{DefaultHandler, MapHandler, RedirectOutcome, SharedHandler};
use crate::routing::table::{build_table, PathRecord};
use crate::store::RedirectStore;

/// YAML list used when no `sources.yaml_file` is configured.
pub const SAMPLE_YAML: &str = "
- path: /urlshort
  url: https://github.com/gophercises/urlshort
- path: /urlshort-final
  url: https://github.com/gophercises/urlshort/tree/solution
";

/// JSON list used when no `sources.json_file` is configured.
pub const SAMPLE_JSON: &str =
    r#"[{"path": "/g", "url": "https://google.com"}, {"path": "/yt", "url": "https://youtube.com"}]"#;

/// An assembled, immutable chain of handlers.
#[derive(Debug, Clone)]
pub struct RedirectChain {
    head: SharedHandler,
    layers: Vec<&'static str>,
}

impl RedirectChain {
    /// Resolve `path` through every layer in order.
    pub fn resolve(&self, path: &str) -> RedirectOutcome {
        self.head.handle(path)
    }

    /// Active layer names, outermost first.
    pub fn layers(&self) -> &[&'static str] {
        &self.layers
    }
}

/// Builds `RedirectChain` snapshots from configuration and the store.
#[derive(Debug)]
pub struct ChainBuilder {
    sources: SourcesConfig,
    fallback: FallbackConfig,
    store: Option<Arc<RedirectStore>>,
}

impl ChainBuilder {
    pub fn new(config: &AppConfig, store: Option<Arc<RedirectStore>>) -> Self {
        Self {
            sources: config.sources.clone(),
            fallback: config.fallback.clone(),
            store,
        }
    }

    pub fn store(&self) -> Option<&Arc<RedirectStore>> {
        self.store.as_ref()
    }

    /// Source files that feed this chain, for the watcher.
    pub fn source_files(&self) -> Vec<std::path::PathBuf> {
        self.sources
            .yaml_file
            .iter()
            .chain(self.sources.json_file.iter())
            .cloned()
            .collect()
    }

    /// Build a fresh chain from the current contents of every source.
    pub fn build(&self) -> Result<RedirectChain, ConstructionError> {
        let status = StatusCode::from_u16(self.fallback.status).unwrap_or(StatusCode::NOT_FOUND);
        let mut layers = vec!["default"];
        let mut head: SharedHandler = Arc::new(DefaultHandler::new(status, self.fallback.body.as_str()));

        let records = self
            .sources
            .static_paths
            .iter()
            .map(|(path, url)| PathRecord::new(path.as_str(), url.as_str()));
        head = Arc::new(map_handler(build_table(records), head));
        layers.push("static");

        head = self.link(head, &mut layers, |fallback| {
            let yaml = read_source(self.sources.yaml_file.as_deref(), SAMPLE_YAML)?;
            yaml_handler(&yaml, fallback)
        })?;

        head = self.link(head, &mut layers, |fallback| {
            let json = read_source(self.sources.json_file.as_deref(), SAMPLE_JSON)?;
            json_handler(&json, fallback)
        })?;

        if let Some(store) = &self.store {
            head = self.link(head, &mut layers, |fallback| store_handler(store, fallback))?;
        }

        layers.reverse();
        tracing::debug!(layers = ?layers, "Redirect chain built");
        Ok(RedirectChain { head, layers })
    }

    /// Put one more layer in front of `fallback`, applying the strict/skip
    /// policy on failure.
    fn link<F>(
        &self,
        fallback: SharedHandler,
        layers: &mut Vec<&'static str>,
        build: F,
    ) -> Result<SharedHandler, ConstructionError>
    where
        F: FnOnce(SharedHandler) -> Result<MapHandler, ConstructionError>,
    {
        match build(fallback.clone()) {
            Ok(handler) => {
                tracing::debug!(layer = handler.layer(), entries = handler.table().len(), "Layer built");
                layers.push(handler.layer());
                Ok(Arc::new(handler))
            }
            Err(e) if !self.sources.strict => {
                tracing::warn!(error = %e, "Skipping broken redirect layer");
                Ok(fallback)
            }
            Err(e) => Err(e),
        }
    }
}

fn read_source(path: Option<&Path>, sample: &'static str) -> Result<Vec<u8>, ConstructionError> {
    match path {
        Some(path) => std::fs::read(path).map_err(|source| ConstructionError::Source {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(sample.as_bytes().to_vec()),
    }
}
