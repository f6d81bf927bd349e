//! Directory watcher
//!
//! Observes the watch directory (non-recursively) and runs every newly
//! created csv file through the configured handler, one file at a time. Each
//! handled file ends up in `processed` or `failed` beneath the watch root.
//!
//! Filesystem notifications arrive on a `notify` thread and are forwarded into
//! an unbounded tokio channel; a single task drains the channel, so handlers
//! never overlap.

use crate::config::WatchConfig;
use crate::handler::FileHandler;
use crate::io::archive::{archive, Disposition};
use crate::io::filename::display_name;
use crate::types::WatcherError;
use notify::event::{CreateKind, ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::future::Future;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, error, info, warn};

/// What a creation event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Detection {
    Directory,
    NotCsv,
    Csv,
}

/// Classify a created path; the extension check ignores case
pub fn classify_event(path: &Path, is_dir: bool) -> Detection {
    if is_dir {
        return Detection::Directory;
    }

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => Detection::Csv,
        _ => Detection::NotCsv,
    }
}

/// Whether an event means a new entry appeared in the directory
///
/// Files renamed into the directory are reported as the target half of a
/// rename rather than as a creation, and count as new.
fn is_appearance(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(ModifyKind::Name(RenameMode::To))
    )
}

/// Upper bound on size checks for a file that keeps growing
const MAX_SETTLE_CHECKS: u32 = 120;

/// Wait until the file size stays the same across one `interval`
///
/// Returns `false` if the file disappears meanwhile. A file still growing
/// after [`MAX_SETTLE_CHECKS`] checks is handed over as it is.
async fn wait_until_settled(path: &Path, interval: Duration) -> bool {
    let mut last = match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(_) => return false,
    };

    for _ in 0..MAX_SETTLE_CHECKS {
        tokio::time::sleep(interval).await;
        let size = match tokio::fs::metadata(path).await {
            Ok(meta) => meta.len(),
            Err(_) => return false,
        };
        if size == last {
            return true;
        }
        debug!("{} is still being written ({} bytes)", path.display(), size);
        last = size;
    }

    warn!("{} did not stop growing, handling it anyway", path.display());
    true
}

/// Live subscription to the watch directory
///
/// Dropping it stops the underlying `notify` watcher and joins its thread.
pub struct EventStream {
    _watcher: RecommendedWatcher,
    events: UnboundedReceiver<notify::Result<Event>>,
}

pub struct DirectoryWatcher {
    config: Arc<WatchConfig>,
    handler: Box<dyn FileHandler>,
}

impl DirectoryWatcher {
    pub fn new(config: Arc<WatchConfig>, handler: Box<dyn FileHandler>) -> Self {
        Self { config, handler }
    }

    pub fn watch_directory(&self) -> &Path {
        &self.config.watch_directory
    }

    /// Start observing the watch directory
    ///
    /// Events that occur after this returns are buffered until
    /// [`DirectoryWatcher::run_until`] drains them.
    pub fn subscribe(&self) -> Result<EventStream, WatcherError> {
        let dir = self.watch_directory();
        if !dir.is_dir() {
            return Err(WatcherError::config(format!(
                "Watch directory {} does not exist",
                dir.display()
            )));
        }

        let (tx, events) = unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // The receiver is gone only during shutdown
            let _ = tx.send(res);
        })
        .map_err(|e| WatcherError::Io {
            message: format!("Failed to create file watcher: {}", e),
        })?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| WatcherError::Io {
                message: format!("Failed to watch {}: {}", dir.display(), e),
            })?;

        Ok(EventStream {
            _watcher: watcher,
            events,
        })
    }

    /// Watch until Ctrl-C
    pub async fn run(&self) -> Result<(), WatcherError> {
        let stream = self.subscribe()?;
        self.run_until(stream, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
            }
        })
        .await;
        Ok(())
    }

    /// Drain events until `shutdown` completes or the stream closes
    ///
    /// A file already being handled when `shutdown` fires is finished first.
    pub async fn run_until<F>(&self, mut stream: EventStream, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            "Watching {} for {} files",
            self.watch_directory().display(),
            self.handler.kind().system_name()
        );
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown requested, stopping watcher");
                    break;
                }
                received = stream.events.recv() => match received {
                    Some(Ok(event)) => self.handle_event(event).await,
                    Some(Err(e)) => error!("File watcher error: {}", e),
                    None => break,
                },
            }
        }

        drop(stream);
        info!("Watcher on {} stopped", self.watch_directory().display());
    }

    async fn handle_event(&self, event: Event) {
        if !is_appearance(&event.kind) {
            return;
        }

        let folder_event = matches!(event.kind, EventKind::Create(CreateKind::Folder));
        for path in &event.paths {
            self.handle_created(path, folder_event || path.is_dir())
                .await;
        }
    }

    /// Handle one created path and archive it
    ///
    /// Returns where the file went, or `None` if it was ignored or could not
    /// be moved.
    pub async fn handle_created(&self, path: &Path, is_dir: bool) -> Option<Disposition> {
        match classify_event(path, is_dir) {
            Detection::Directory => {
                debug!("Ignoring directory: {}", path.display());
                return None;
            }
            Detection::NotCsv => {
                debug!("Ignoring non-csv file: {}", path.display());
                return None;
            }
            Detection::Csv => {}
        }

        if !path.exists() {
            debug!("{} is already gone", path.display());
            return None;
        }

        let file_name = display_name(path);
        info!("Detected new file: {}", file_name);

        let settle = self.config.settle_interval();
        if !settle.is_zero() && !wait_until_settled(path, settle).await {
            debug!("{} disappeared before it was complete", path.display());
            return None;
        }

        let disposition = match self.handler.handle(path).await {
            Ok(()) => Disposition::Processed,
            Err(e) => {
                warn!("Handling {} failed: {}", file_name, e);
                Disposition::Failed
            }
        };

        match archive(
            self.watch_directory(),
            path,
            disposition,
            self.config.cleanup_threshold(),
        ) {
            Ok(_) => Some(disposition),
            Err(e) => {
                error!("Could not archive {}: {}", file_name, e);
                None
            }
        }
    }
}
