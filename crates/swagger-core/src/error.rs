//! Error types for document loading, validation and config handling.
//!
//! Callers at the tool boundary usually collapse these into a single
//! "document unavailable" outcome; the variants exist so the reason can be
//! logged and tested.
//!
//! # Examples
//!
//! ```
//! use swagger_viewer_core::{Error, Result};
//!
//! fn require_url(url: Option<&str>) -> Result<&str> {
//!     url.ok_or_else(|| Error::ConfigError {
//!         message: "swaggerUrl is missing".to_string(),
//!     })
//! }
//!
//! let err = require_url(None).unwrap_err();
//! assert!(err.is_config_error());
//! ```

use thiserror::Error;

/// Main error type for the swagger viewer.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file is unreadable or malformed.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Local file I/O failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying error cause
        #[source]
        source: std::io::Error,
    },

    /// The document location could not be reached.
    #[error("Failed to fetch document from '{url}': {source}")]
    FetchFailed {
        /// Location that was requested
        url: String,
        /// Underlying HTTP client error
        #[source]
        source: reqwest::Error,
    },

    /// The upstream answered with a non-success status.
    #[error("Document request to '{url}' returned HTTP {status}")]
    HttpStatus {
        /// Location that was requested
        url: String,
        /// Status code returned by the upstream
        status: u16,
    },

    /// The document body is neither valid JSON nor valid YAML.
    #[error("Failed to parse document from '{location}': {message}")]
    ParseError {
        /// Where the document came from
        location: String,
        /// Parser error message
        message: String,
    },

    /// The document parsed but is not a valid OpenAPI/Swagger description.
    #[error("Invalid API document: {reason}")]
    ValidationError {
        /// Why the document was rejected
        reason: String,
    },

    /// An internal `$ref` could not be resolved.
    #[error("Unresolved reference '{reference}': {reason}")]
    ReferenceError {
        /// The `$ref` value
        reference: String,
        /// Why it could not be followed
        reason: String,
    },

    /// The file watcher could not be registered.
    #[error("Failed to watch '{path}': {source}")]
    WatchError {
        /// Watched path
        path: String,
        /// Underlying watcher error
        #[source]
        source: notify::Error,
    },

    /// A code template failed to register or render.
    #[error("Template error: {message}")]
    TemplateError {
        /// Handlebars error message
        message: String,
    },
}

impl Error {
    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_viewer_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "bad json".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if the document could not be retrieved at all.
    ///
    /// Covers network failures, non-success HTTP statuses and unreadable
    /// local files.
    #[must_use]
    pub const fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::HttpStatus { .. } | Self::Io { .. }
        )
    }

    /// Returns `true` if the body was retrieved but could not be parsed.
    #[must_use]
    pub const fn is_parse_error(&self) -> bool {
        matches!(self, Self::ParseError { .. })
    }

    /// Returns `true` if the document failed validation or reference resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_viewer_core::Error;
    ///
    /// let err = Error::ValidationError {
    ///     reason: "missing paths".to_string(),
    /// };
    /// assert!(err.is_validation_error());
    /// ```
    #[must_use]
    pub const fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::ValidationError { .. } | Self::ReferenceError { .. }
        )
    }

    /// Returns `true` if a code template failed to register or render.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }
}

/// Result type alias for swagger viewer operations.
pub type Result<T> = std::result::Result<T, Error>;
