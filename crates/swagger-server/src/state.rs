//! Owned state of one swagger viewer instance.
//!
//! Holds the cached document, serializes initialization, and owns the
//! config watcher subscription. Independent instances do not share
//! anything.
//!
//! The cache is a single slot replaced wholesale: readers clone the `Arc`
//! and drop the lock, so a search running alongside a re-fetch sees either
//! the old or the new document.

use crate::error::ToolError;
use crate::settings::ServerSettings;
use crate::types::InitializeResult;
use std::sync::{Arc, Weak};
use swagger_viewer_core::{ApiDocument, ConfigWatcher, DocumentFetcher, SwaggerConfig, read_config};
use tokio::sync::{Mutex, RwLock};

/// Document cache and watcher for one instance.
#[derive(Debug)]
pub struct SwaggerState {
    settings: ServerSettings,
    fetcher: DocumentFetcher,
    document: RwLock<Option<Arc<ApiDocument>>>,
    init_lock: Mutex<()>,
    watcher: Mutex<Option<ConfigWatcher>>,
}

impl SwaggerState {
    /// Creates an empty state.
    #[must_use]
    pub fn new(settings: ServerSettings) -> Arc<Self> {
        let fetcher = DocumentFetcher::with_timeout(settings.http_timeout);
        Arc::new(Self {
            settings,
            fetcher,
            document: RwLock::new(None),
            init_lock: Mutex::new(()),
            watcher: Mutex::new(None),
        })
    }

    /// Settings this state was created with.
    #[must_use]
    pub const fn settings(&self) -> &ServerSettings {
        &self.settings
    }

    /// Currently cached document, if any.
    pub async fn document(&self) -> Option<Arc<ApiDocument>> {
        self.document.read().await.clone()
    }

    /// Returns `true` while a config watcher subscription is active.
    pub async fn is_watching(&self) -> bool {
        self.watcher.lock().await.is_some()
    }

    /// Fetches and caches a document.
    ///
    /// The URL is `swagger_url` when given and non-blank, otherwise the
    /// config file's `swaggerUrl`. When the URL came from the config file
    /// and watching is enabled, the config watcher is (re)started; a
    /// successful load from an explicit URL stops it.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingSwaggerUrl`] if no URL is available and
    /// [`ToolError::FetchFailed`] if the document cannot be loaded; the
    /// previously cached document is kept in that case.
    pub async fn initialize(
        self: &Arc<Self>,
        swagger_url: Option<&str>,
    ) -> Result<InitializeResult, ToolError> {
        let _guard = self.init_lock.lock().await;
        self.initialize_locked(swagger_url).await
    }

    /// Returns the cached document, initializing from the config file first
    /// if nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotInitialized`] if no document is cached and
    /// none could be loaded from the config file.
    pub async fn ensure_document(self: &Arc<Self>) -> Result<Arc<ApiDocument>, ToolError> {
        if let Some(document) = self.document().await {
            return Ok(document);
        }

        let _guard = self.init_lock.lock().await;
        // Another caller may have finished initializing while we waited
        if let Some(document) = self.document().await {
            return Ok(document);
        }

        tracing::info!("No swagger document cached, initializing from config");
        if let Err(e) = self.initialize_locked(None).await {
            tracing::debug!("Lazy initialization failed: {e}");
        }

        self.document().await.ok_or(ToolError::NotInitialized)
    }

    /// Stops the config watcher, if running.
    pub async fn shutdown(&self) {
        let watcher = self.watcher.lock().await.take();
        if let Some(watcher) = watcher {
            watcher.close().await;
        }
    }

    async fn initialize_locked(
        self: &Arc<Self>,
        swagger_url: Option<&str>,
    ) -> Result<InitializeResult, ToolError> {
        let explicit = swagger_url.map(str::trim).filter(|url| !url.is_empty());

        let (url, from_config) = match explicit {
            Some(url) => (url.to_string(), false),
            None => {
                let url = self
                    .read_config()
                    .await
                    .and_then(|config| config.swagger_url().map(str::to_string))
                    .ok_or(ToolError::MissingSwaggerUrl)?;
                (url, true)
            }
        };

        let endpoint_count = self.load(&url).await?;

        if from_config && self.settings.watch_config {
            self.start_watcher().await;
        } else if !from_config {
            self.stop_watcher().await;
        }

        Ok(InitializeResult::loaded(url, endpoint_count))
    }

    async fn load(&self, url: &str) -> Result<usize, ToolError> {
        let document = self
            .fetcher
            .fetch(url)
            .await
            .ok_or_else(|| ToolError::FetchFailed {
                url: url.to_string(),
            })?;

        let endpoint_count = document.endpoint_count();
        *self.document.write().await = Some(Arc::new(document));

        tracing::info!("Cached swagger document from {url} ({endpoint_count} endpoints)");
        Ok(endpoint_count)
    }

    async fn read_config(&self) -> Option<SwaggerConfig> {
        match &self.settings.config_path {
            Some(path) => read_config(path).await,
            None => {
                tracing::warn!("Home directory unknown, no swagger config to read");
                None
            }
        }
    }

    /// Drops the subscription so config edits no longer replace an
    /// explicitly chosen document.
    async fn stop_watcher(&self) {
        let previous = self.watcher.lock().await.take();
        if previous.is_some() {
            tracing::info!("Explicit swagger URL given, no longer watching config");
        }
    }

    async fn start_watcher(self: &Arc<Self>) {
        let Some(path) = self.settings.config_path.clone() else {
            return;
        };

        let state = Arc::downgrade(self);
        let watcher = ConfigWatcher::watch(path.clone(), move |config| {
            let state = state.clone();
            async move { reload(state, config).await }
        });

        match watcher {
            Ok(watcher) => {
                // Dropping the previous subscription cancels it without
                // waiting on a callback that may be blocked on `init_lock`
                let previous = self.watcher.lock().await.replace(watcher);
                drop(previous);
            }
            Err(e) => tracing::warn!("Could not watch {}: {e}", path.display()),
        }
    }
}

async fn reload(state: Weak<SwaggerState>, config: SwaggerConfig) {
    let Some(state) = state.upgrade() else {
        return;
    };
    let Some(url) = config.swagger_url() else {
        return;
    };

    tracing::info!("Swagger config changed, reloading from {url}");
    let _guard = state.init_lock.lock().await;
    // An explicit initialization may have ended the subscription meanwhile
    if !state.is_watching().await {
        return;
    }
    if let Err(e) = state.load(url).await {
        tracing::warn!("Reload after config change failed: {e}");
    }
}
