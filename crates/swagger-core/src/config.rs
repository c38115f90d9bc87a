//! Configuration file handling.
//!
//! The configuration lives in a single JSON file, `~/swagger.json` by
//! default, authored by the user:
//!
//! ```json
//! { "swaggerUrl": "https://petstore.swagger.io/v2/swagger.json" }
//! ```
//!
//! This crate only ever reads the file. Unknown attributes are ignored.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File name of the configuration inside the home directory.
pub const CONFIG_FILE_NAME: &str = "swagger.json";

/// Parsed configuration file.
///
/// # Examples
///
/// ```
/// use swagger_viewer_core::SwaggerConfig;
///
/// let config: SwaggerConfig =
///     serde_json::from_str(r#"{"swaggerUrl": "http://x/doc.json", "other": 1}"#).unwrap();
/// assert_eq!(config.swagger_url(), Some("http://x/doc.json"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwaggerConfig {
    /// Location of the OpenAPI/Swagger document
    #[serde(rename = "swaggerUrl", default, skip_serializing_if = "Option::is_none")]
    pub swagger_url: Option<String>,
}

impl SwaggerConfig {
    /// Returns the document URL, treating an empty or blank string as absent.
    #[must_use]
    pub fn swagger_url(&self) -> Option<&str> {
        self.swagger_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

/// Returns the default configuration path, `<home>/swagger.json`.
///
/// Returns `None` when the home directory cannot be determined.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

/// Reads the configuration file, reporting why it could not be used.
///
/// A missing file is not an error and yields `Ok(None)`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file exists but cannot be read, and
/// [`Error::ConfigError`] if it is not a valid JSON object.
pub async fn try_read_config(path: &Path) -> Result<Option<SwaggerConfig>> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Io {
                path: path.display().to_string(),
                source: e,
            });
        }
    };

    let config = serde_json::from_str(&content).map_err(|e| Error::ConfigError {
        message: format!("{}: {e}", path.display()),
    })?;

    Ok(Some(config))
}

/// Reads the configuration file, never failing.
///
/// Any problem other than a missing file is logged as a warning and
/// reported as `None`.
///
/// # Examples
///
/// ```
/// use swagger_viewer_core::read_config;
/// use std::path::Path;
///
/// # async fn example() {
/// let config = read_config(Path::new("/nonexistent/swagger.json")).await;
/// assert!(config.is_none());
/// # }
/// ```
pub async fn read_config(path: &Path) -> Option<SwaggerConfig> {
    match try_read_config(path).await {
        Ok(Some(config)) => Some(config),
        Ok(None) => {
            tracing::debug!("No swagger config at {}", path.display());
            None
        }
        Err(e) => {
            tracing::warn!("Error reading swagger config: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_read_existing_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, r#"{"swaggerUrl": "http://x/doc.json"}"#)
            .await
            .unwrap();

        let config = read_config(&path).await.unwrap();
        assert_eq!(config.swagger_url(), Some("http://x/doc.json"));
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        assert!(try_read_config(&path).await.unwrap().is_none());
        assert!(read_config(&path).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, "{ not json").await.unwrap();

        let err = try_read_config(&path).await.unwrap_err();
        assert!(err.is_config_error());
        assert!(read_config(&path).await.is_none());
    }

    #[test]
    fn test_blank_url_is_absent() {
        let config = SwaggerConfig {
            swagger_url: Some("   ".to_string()),
        };
        assert_eq!(config.swagger_url(), None);
        assert_eq!(SwaggerConfig::default().swagger_url(), None);
    }

    #[test]
    fn test_default_path_ends_with_file_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with(CONFIG_FILE_NAME));
        }
    }
}
