//! Plain in-process surface of the swagger viewer.
//!
//! The same four operations the MCP tools expose, returning Rust values
//! instead of response envelopes.
//!
//! # Examples
//!
//! ```no_run
//! use swagger_viewer_server::{ServerSettings, SwaggerApi};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let api = SwaggerApi::new(ServerSettings::default())?;
//!
//! api.initialize(Some("https://petstore.swagger.io/v2/swagger.json")).await?;
//! for hit in api.search(Some("pet")).await? {
//!     println!("{} {}", hit.method, hit.path);
//! }
//!
//! let code = api.generate_code(Some("/pet/{petId}"), Some("get"), None).await?;
//! println!("{}", code.code);
//! # Ok(())
//! # }
//! ```

use crate::error::ToolError;
use crate::settings::ServerSettings;
use crate::state::SwaggerState;
use crate::types::{GenerateCodeResult, InitializeResult};
use std::sync::Arc;
use swagger_viewer_codegen::CodeGenerator;
use swagger_viewer_core::{EndpointSummary, SearchResult, search_endpoints};

/// Swagger viewer operations as async methods.
///
/// Cheap to clone; clones share the document cache.
#[derive(Debug, Clone)]
pub struct SwaggerApi {
    state: Arc<SwaggerState>,
    generator: Arc<CodeGenerator<'static>>,
}

impl SwaggerApi {
    /// Creates an instance with an empty cache.
    ///
    /// # Errors
    ///
    /// Returns a template error if the code templates fail to compile.
    pub fn new(settings: ServerSettings) -> swagger_viewer_core::Result<Self> {
        Ok(Self {
            state: SwaggerState::new(settings),
            generator: Arc::new(CodeGenerator::new()?),
        })
    }

    /// Shared state behind this instance.
    #[must_use]
    pub const fn state(&self) -> &Arc<SwaggerState> {
        &self.state
    }

    /// Fetches and caches the document.
    ///
    /// # Errors
    ///
    /// See [`SwaggerState::initialize`].
    pub async fn initialize(&self, swagger_url: Option<&str>) -> Result<InitializeResult, ToolError> {
        self.state.initialize(swagger_url).await
    }

    /// Searches the cached document.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingQuery`] for a missing or empty query and
    /// [`ToolError::NotInitialized`] if no document can be loaded.
    pub async fn search(&self, query: Option<&str>) -> Result<Vec<SearchResult>, ToolError> {
        let query = non_empty(query).ok_or(ToolError::MissingQuery)?;
        let document = self.state.ensure_document().await?;

        let results = search_endpoints(Some(&document), query);
        tracing::debug!("Search '{query}' matched {} endpoints", results.len());
        Ok(results)
    }

    /// Generates a client stub for one endpoint.
    ///
    /// `language` defaults to the configured default language.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingPathOrMethod`] if either is missing or
    /// empty, [`ToolError::NotInitialized`] if no document can be loaded, and
    /// [`ToolError::EndpointNotFound`] if the pair is not in the document.
    pub async fn generate_code(
        &self,
        path: Option<&str>,
        method: Option<&str>,
        language: Option<&str>,
    ) -> Result<GenerateCodeResult, ToolError> {
        let (Some(path), Some(method)) = (non_empty(path), non_empty(method)) else {
            return Err(ToolError::MissingPathOrMethod);
        };
        let language =
            non_empty(language).unwrap_or(self.state.settings().default_language.as_str());

        let document = self.state.ensure_document().await?;
        let endpoint =
            document
                .find_endpoint(path, method)
                .ok_or_else(|| ToolError::EndpointNotFound {
                    path: path.to_string(),
                    method: method.to_string(),
                })?;

        let code = self.generator.generate(endpoint, language)?;
        Ok(GenerateCodeResult { code })
    }

    /// Lists every path with its methods.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::NotInitialized`] if no document can be loaded.
    pub async fn get_all_endpoints(&self) -> Result<Vec<EndpointSummary>, ToolError> {
        let document = self.state.ensure_document().await?;
        Ok(document.endpoint_summaries())
    }

    /// Releases the config watcher.
    pub async fn shutdown(&self) {
        self.state.shutdown().await;
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
