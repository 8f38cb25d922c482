//! Source file watcher for hot rebuilds.

use std::path::PathBuf;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the YAML/JSON source files and runs a callback on change.
pub struct SourceWatcher<F> {
    paths: Vec<PathBuf>,
    on_change: F,
}

impl<F> SourceWatcher<F>
where
    F: Fn() + Send + 'static,
{
    /// Create a watcher over `paths`. `on_change` runs on the watcher thread.
    pub fn new(paths: Vec<PathBuf>, on_change: F) -> Self {
        Self { paths, on_change }
    }

    /// Start watching. The returned watcher must be kept alive.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let on_change = self.on_change;

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!(paths = ?event.paths, "Source file change detected, rebuilding chain");
                        on_change();
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        for path in &self.paths {
            watcher.watch(path, RecursiveMode::NonRecursive)?;
        }

        tracing::info!(paths = ?self.paths, "Source watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn test_change_triggers_callback() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("paths.yaml");
        std::fs::write(&file, "[]").unwrap();

        let (tx, rx) = mpsc::channel();
        let _watcher = SourceWatcher::new(vec![file.clone()], move || {
            let _ = tx.send(());
        })
        .run()
        .unwrap();

        std::fs::write(&file, "- path: /w\n  url: https://w.example\n").unwrap();
        assert!(rx.recv_timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_missing_file_fails_to_start() {
        let dir = tempfile::TempDir::new().unwrap();
        let watcher = SourceWatcher::new(vec![dir.path().join("gone.json")], || {});
        assert!(watcher.run().is_err());
    }
}
