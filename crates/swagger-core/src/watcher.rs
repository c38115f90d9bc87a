//! Config file change notifications.
//!
//! The watcher registers on the config file's parent directory (so the file
//! may be created, replaced or renamed into place after registration) and
//! filters events down to the config file name. Events are forwarded from
//! `notify`'s own thread to a Tokio task, which re-reads the file and hands
//! the new configuration to the caller's callback.
//!
//! There is no debouncing: every create or modify event triggers a re-read,
//! and the last one wins.

use crate::config::{SwaggerConfig, read_config};
use crate::{Error, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Live subscription to config file changes.
///
/// Dropping the handle stops the OS watcher and the forwarding task;
/// [`ConfigWatcher::close`] does the same and waits for the task to exit.
pub struct ConfigWatcher {
    path: PathBuf,
    watcher: Option<RecommendedWatcher>,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ConfigWatcher {
    /// Starts watching `path`.
    ///
    /// `on_change` runs on the Tokio runtime each time the file changes and
    /// still holds a config with a non-empty `swaggerUrl`. Calls are
    /// sequential: the next event is not processed until the previous
    /// callback completes.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if `path` has no file name, and
    /// [`Error::WatchError`] if the OS watcher cannot be registered (for
    /// example because the parent directory does not exist).
    pub fn watch<F, Fut>(path: impl Into<PathBuf>, on_change: F) -> Result<Self>
    where
        F: Fn(SwaggerConfig) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(ToOwned::to_owned)
            .ok_or_else(|| Error::ConfigError {
                message: format!("Config path has no file name: {}", path.display()),
            })?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |event: notify::Result<Event>| {
            // Receiver gone means the subscription is closing
            let _ = tx.send(event);
        })
        .map_err(|e| watch_error(&dir, e))?;

        watcher
            .watch(&dir, RecursiveMode::NonRecursive)
            .map_err(|e| watch_error(&dir, e))?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(forward_events(
            path.clone(),
            file_name,
            rx,
            cancel.clone(),
            on_change,
        ));

        tracing::info!("Watching swagger config at {}", path.display());

        Ok(Self {
            path,
            watcher: Some(watcher),
            cancel,
            task: Some(task),
        })
    }

    /// Path of the watched config file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stops watching and waits for the forwarding task to finish.
    pub async fn close(mut self) {
        self.stop();
        if let Some(task) = self.task.take()
            && let Err(e) = task.await
        {
            tracing::warn!("Config watcher task failed: {e}");
        }
    }

    fn stop(&mut self) {
        self.cancel.cancel();
        if self.watcher.take().is_some() {
            tracing::debug!("Stopped watching {}", self.path.display());
        }
    }
}

impl Drop for ConfigWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ConfigWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigWatcher")
            .field("path", &self.path)
            .field("active", &!self.cancel.is_cancelled())
            .finish_non_exhaustive()
    }
}

fn watch_error(dir: &Path, source: notify::Error) -> Error {
    Error::WatchError {
        path: dir.display().to_string(),
        source,
    }
}

async fn forward_events<F, Fut>(
    path: PathBuf,
    file_name: OsString,
    mut rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
    cancel: CancellationToken,
    on_change: F,
) where
    F: Fn(SwaggerConfig) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            event = rx.recv() => event,
        };

        match event {
            Some(Ok(event)) if is_config_change(&event, &file_name) => {
                tracing::debug!("Swagger config changed: {:?}", event.kind);
                match read_config(&path).await {
                    Some(config) if config.swagger_url().is_some() => on_change(config).await,
                    Some(_) => tracing::debug!("Changed config has no swaggerUrl, ignoring"),
                    None => {}
                }
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => tracing::warn!("Config watcher error: {e}"),
            None => break,
        }
    }
}

fn is_config_change(event: &Event, file_name: &OsStr) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name))
}
