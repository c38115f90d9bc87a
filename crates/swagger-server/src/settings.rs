//! Runtime settings for the swagger viewer.
//!
//! # Examples
//!
//! ```
//! use swagger_viewer_server::ServerSettings;
//! use std::time::Duration;
//!
//! let settings = ServerSettings::builder()
//!     .config_path("/etc/swagger-viewer/swagger.json")
//!     .watch_config(false)
//!     .http_timeout(Duration::from_secs(5))
//!     .build();
//!
//! assert!(!settings.watch_config);
//! assert_eq!(settings.http_timeout.as_secs(), 5);
//! ```

use std::path::PathBuf;
use std::time::Duration;
use swagger_viewer_codegen::DEFAULT_LANGUAGE;
use swagger_viewer_core::{DEFAULT_TIMEOUT, default_config_path};

/// Settings shared by the API surface and the MCP service.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    /// Location of the config file.
    ///
    /// `None` when the home directory is unknown; initialization then
    /// needs an explicit URL.
    /// Default: `~/swagger.json`
    pub config_path: Option<PathBuf>,

    /// Re-fetch the document when the config file changes.
    ///
    /// Only applies after an initialization that took its URL from the
    /// config file.
    /// Default: true
    pub watch_config: bool,

    /// Timeout for fetching a document over HTTP.
    /// Default: 30 seconds
    pub http_timeout: Duration,

    /// Language used when `mcp_swagger_generate_code` gets none.
    /// Default: "javascript"
    pub default_language: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            config_path: default_config_path(),
            watch_config: true,
            http_timeout: DEFAULT_TIMEOUT,
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl ServerSettings {
    /// Creates a settings builder starting from the defaults.
    #[must_use]
    pub fn builder() -> ServerSettingsBuilder {
        ServerSettingsBuilder::default()
    }
}

/// Builder for [`ServerSettings`].
#[derive(Debug, Clone, Default)]
pub struct ServerSettingsBuilder {
    settings: ServerSettings,
}

impl ServerSettingsBuilder {
    /// Sets the config file location.
    #[must_use]
    pub fn config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings.config_path = Some(path.into());
        self
    }

    /// Enables or disables config file watching.
    #[must_use]
    pub fn watch_config(mut self, enabled: bool) -> Self {
        self.settings.watch_config = enabled;
        self
    }

    /// Sets the HTTP fetch timeout.
    #[must_use]
    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.settings.http_timeout = timeout;
        self
    }

    /// Sets the default code generation language.
    #[must_use]
    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.settings.default_language = language.into();
        self
    }

    /// Builds the settings.
    #[must_use]
    pub fn build(self) -> ServerSettings {
        self.settings
    }
}
