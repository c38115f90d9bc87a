//! Document retrieval.
//!
//! A document location is either an `http(s)://` URL, fetched with a GET
//! request, or a local file given as a `file://` URL or a plain path. The
//! body is handed to [`parse_document`] for parsing and validation.

use crate::parser::parse_document;
use crate::{ApiDocument, Error, Result};
use reqwest::Client;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Request timeout used by [`DocumentFetcher::new`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where a document is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// Remote document
    Url(Url),
    /// Local file
    File(PathBuf),
}

impl DocumentSource {
    /// Classifies a location string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the location looks like a URL but
    /// cannot be parsed, or is a `file://` URL without a usable path.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_viewer_core::DocumentSource;
    ///
    /// let remote = DocumentSource::parse("https://petstore.swagger.io/v2/swagger.json").unwrap();
    /// assert!(matches!(remote, DocumentSource::Url(_)));
    ///
    /// let local = DocumentSource::parse("./openapi.yaml").unwrap();
    /// assert!(matches!(local, DocumentSource::File(_)));
    /// ```
    pub fn parse(location: &str) -> Result<Self> {
        let location = location.trim();

        if location.starts_with("http://") || location.starts_with("https://") {
            let url = Url::parse(location).map_err(|e| Error::ConfigError {
                message: format!("Invalid swagger URL '{location}': {e}"),
            })?;
            return Ok(Self::Url(url));
        }

        if location.starts_with("file://") {
            let url = Url::parse(location).map_err(|e| Error::ConfigError {
                message: format!("Invalid file URL '{location}': {e}"),
            })?;
            let path = url.to_file_path().map_err(|()| Error::ConfigError {
                message: format!("File URL has no local path: {location}"),
            })?;
            return Ok(Self::File(path));
        }

        Ok(Self::File(PathBuf::from(location)))
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and validates API documents.
///
/// Cheap to clone; clones share the underlying HTTP connection pool.
#[derive(Debug, Clone)]
pub struct DocumentFetcher {
    client: Client,
}

impl DocumentFetcher {
    /// Creates a fetcher with [`DEFAULT_TIMEOUT`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a fetcher whose HTTP requests give up after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("swagger-viewer/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to configure HTTP client, using defaults: {e}");
                Client::new()
            });

        Self { client }
    }

    /// Fetches, parses and validates the document at `location`.
    ///
    /// # Errors
    ///
    /// Returns a fetch error ([`Error::is_fetch_error`]) if the document
    /// cannot be retrieved, [`Error::ParseError`] if the body is not JSON or
    /// YAML, and a validation error if it is not a usable API description.
    pub async fn try_fetch(&self, location: &str) -> Result<ApiDocument> {
        let source = DocumentSource::parse(location)?;
        let body = self.load(&source).await?;
        let document = parse_document(&source.to_string(), &body)?;

        tracing::info!(
            "Loaded {} document from {source} ({} endpoints)",
            document.flavor(),
            document.endpoint_count()
        );

        Ok(document)
    }

    /// Fetches the document at `location`, logging any failure.
    ///
    /// All failures collapse to `None`; use [`Self::try_fetch`] to learn
    /// the reason.
    pub async fn fetch(&self, location: &str) -> Option<ApiDocument> {
        match self.try_fetch(location).await {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Error fetching swagger doc: {e}");
                None
            }
        }
    }

    async fn load(&self, source: &DocumentSource) -> Result<String> {
        match source {
            DocumentSource::Url(url) => {
                tracing::debug!("GET {url}");

                let response = self
                    .client
                    .get(url.clone())
                    .header(reqwest::header::ACCEPT, "application/json, application/yaml")
                    .send()
                    .await
                    .map_err(|e| Error::FetchFailed {
                        url: url.to_string(),
                        source: e,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(Error::HttpStatus {
                        url: url.to_string(),
                        status: status.as_u16(),
                    });
                }

                response.text().await.map_err(|e| Error::FetchFailed {
                    url: url.to_string(),
                    source: e,
                })
            }
            DocumentSource::File(path) => {
                tracing::debug!("Reading {}", path.display());

                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|e| Error::Io {
                        path: path.display().to_string(),
                        source: e,
                    })
            }
        }
    }
}

impl Default for DocumentFetcher {
    fn default() -> Self {
        Self::new()
    }
}
