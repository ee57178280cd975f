//! Route table watcher for hot reload.
//!
//! # Responsibilities
//! - Watch the directory holding the route table
//! - Reload and validate the table when an event names it
//! - Forward only tables that differ from the last one forwarded
//!
//! # Design Decisions
//! - The parent directory is watched, not the file: editors that save by
//!   rename would otherwise detach the watch after the first save
//! - A save usually fires several events; unchanged tables are dropped so
//!   the consumer re-registers once per real change
//! - A table that fails to load is logged and dropped

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::RouterConfig;

/// A watcher that monitors the route table file for changes.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<RouterConfig>,
}

impl ConfigWatcher {
    /// Create a new ConfigWatcher.
    ///
    /// Returns the watcher and a receiver for validated route tables.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<RouterConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching in a background thread.
    ///
    /// The returned handle must be kept alive for as long as reloads are
    /// wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let dir = watch_dir(&self.path).to_path_buf();
        let mut reloader = Reloader::new(self.path.clone(), self.update_tx);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => reloader.handle(&event),
                Err(e) => tracing::error!(error = %e, "Route table watch error"),
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, dir = ?dir, "Route table watcher started");
        Ok(watcher)
    }
}

/// Directory to watch for `path`.
fn watch_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Turns file system events into route table updates.
struct Reloader {
    path: PathBuf,
    file_name: Option<OsString>,
    last: Option<RouterConfig>,
    tx: mpsc::UnboundedSender<RouterConfig>,
}

impl Reloader {
    /// The table currently on disk counts as already forwarded.
    fn new(path: PathBuf, tx: mpsc::UnboundedSender<RouterConfig>) -> Self {
        let last = load_config(&path).ok();
        Self {
            file_name: path.file_name().map(OsString::from),
            path,
            last,
            tx,
        }
    }

    /// Returns true if `event` creates or modifies the route table.
    fn touches(&self, event: &Event) -> bool {
        if !(event.kind.is_modify() || event.kind.is_create()) {
            return false;
        }
        let Some(name) = self.file_name.as_deref() else {
            return false;
        };
        event.paths.iter().any(|p| p.file_name() == Some(name))
    }

    fn handle(&mut self, event: &Event) {
        if !self.touches(event) {
            return;
        }

        match load_config(&self.path) {
            Ok(config) if self.last.as_ref() == Some(&config) => {
                tracing::debug!(path = ?self.path, "Route table unchanged");
            }
            Ok(config) => {
                tracing::info!(
                    path = ?self.path,
                    routes = config.routes.len(),
                    "Route table changed, reloading"
                );
                if self.tx.send(config.clone()).is_err() {
                    tracing::debug!("Reload receiver dropped");
                }
                self.last = Some(config);
            }
            Err(e) => {
                tracing::error!(
                    path = ?self.path,
                    error = %e,
                    "Failed to reload route table; keeping current routes"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    use notify::event::{CreateKind, ModifyKind};
    use notify::EventKind;

    const ONE_ROUTE: &str = r#"
        [[routes]]
        action = "patient.create"
        handler = "PatientController.create"
    "#;

    const TWO_ROUTES: &str = r#"
        [[routes]]
        action = "patient.create"
        handler = "PatientController.create"

        [[routes]]
        action = "invoice.pay"
        handler = "InvoiceController.pay"
    "#;

    fn modified(path: &Path) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Any)).add_path(path.to_path_buf())
    }

    #[test]
    fn test_watch_dir() {
        assert_eq!(watch_dir(Path::new("routes.toml")), Path::new("."));
        assert_eq!(watch_dir(Path::new("/etc/app/routes.toml")), Path::new("/etc/app"));
    }

    #[test]
    fn test_ignores_other_files_and_kinds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        fs::write(&path, ONE_ROUTE).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut reloader = Reloader::new(path.clone(), tx);
        fs::write(&path, TWO_ROUTES).unwrap();

        reloader.handle(&modified(&dir.path().join("other.toml")));
        reloader.handle(&Event::new(EventKind::Access(notify::event::AccessKind::Any)).add_path(path));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forwards_only_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        fs::write(&path, ONE_ROUTE).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut reloader = Reloader::new(path.clone(), tx);

        // Touch without a content change
        reloader.handle(&modified(&path));
        assert!(rx.try_recv().is_err());

        fs::write(&path, TWO_ROUTES).unwrap();
        reloader.handle(&modified(&path));
        reloader.handle(&Event::new(EventKind::Create(CreateKind::File)).add_path(path.clone()));

        assert_eq!(rx.try_recv().unwrap().routes.len(), 2);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_invalid_table_is_not_forwarded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        fs::write(&path, ONE_ROUTE).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut reloader = Reloader::new(path.clone(), tx);

        fs::write(&path, "[[routes]]\naction = 1\nhandler = \"A.b\"\n").unwrap();
        reloader.handle(&modified(&path));
        assert!(rx.try_recv().is_err());

        // Restoring a valid, different table resumes reloads
        fs::write(&path, TWO_ROUTES).unwrap();
        reloader.handle(&modified(&path));
        assert_eq!(rx.try_recv().unwrap().routes.len(), 2);
    }

    #[tokio::test]
    async fn test_run_delivers_rewritten_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("routes.toml");
        fs::write(&path, ONE_ROUTE).unwrap();

        let (watcher, mut rx) = ConfigWatcher::new(&path);
        let _handle = watcher.run().unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Replace by rename so no half-written table is ever observed
        let staged = dir.path().join("routes.toml.tmp");
        fs::write(&staged, TWO_ROUTES).unwrap();
        fs::rename(&staged, &path).unwrap();

        let config = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match rx.recv().await {
                    Some(config) if config.routes.len() == 2 => break config,
                    Some(_) => continue,
                    None => panic!("watcher closed the channel"),
                }
            }
        })
        .await
        .expect("no reload received");

        assert_eq!(config.routes[1].definition().unwrap(), ("invoice.pay", "InvoiceController.pay"));
    }
}
