//! Type definitions for the swagger viewer tools.
//!
//! Parameter and result types for the four tools:
//! - `mcp_swagger_initialize`: fetch and cache a document
//! - `mcp_swagger_search`: keyword search over endpoints
//! - `mcp_swagger_generate_code`: client stub for one endpoint
//! - `mcp_swagger_get_all_endpoints`: list paths and their methods

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Tool name for initialization.
pub const INITIALIZE_TOOL: &str = "mcp_swagger_initialize";
/// Tool name for endpoint search.
pub const SEARCH_TOOL: &str = "mcp_swagger_search";
/// Tool name for code generation.
pub const GENERATE_CODE_TOOL: &str = "mcp_swagger_generate_code";
/// Tool name for the endpoint listing.
pub const GET_ALL_ENDPOINTS_TOOL: &str = "mcp_swagger_get_all_endpoints";

// ============================================================================
// mcp_swagger_initialize types
// ============================================================================

/// Parameters for initializing the document cache.
///
/// # Examples
///
/// ```
/// use swagger_viewer_server::types::InitializeParams;
///
/// let params: InitializeParams =
///     serde_json::from_str(r#"{"swaggerUrl": "http://x/doc.json"}"#).unwrap();
/// assert_eq!(params.swagger_url.as_deref(), Some("http://x/doc.json"));
///
/// let empty: InitializeParams = serde_json::from_str("{}").unwrap();
/// assert!(empty.swagger_url.is_none());
/// ```
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct InitializeParams {
    /// URL of the swagger document. Defaults to `swaggerUrl` in ~/swagger.json
    #[serde(rename = "swaggerUrl", default)]
    pub swagger_url: Option<String>,
}

/// Result of a successful initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    /// Always `true`
    pub success: bool,

    /// Always `"loaded"`
    pub cache_status: String,

    /// Location the document was loaded from
    pub swagger_url: String,

    /// Number of (path, method) operations in the document
    pub endpoint_count: usize,
}

impl InitializeResult {
    /// Builds the result for a document loaded from `swagger_url`.
    #[must_use]
    pub fn loaded(swagger_url: impl Into<String>, endpoint_count: usize) -> Self {
        Self {
            success: true,
            cache_status: "loaded".to_string(),
            swagger_url: swagger_url.into(),
            endpoint_count,
        }
    }
}

// ============================================================================
// mcp_swagger_search types
// ============================================================================

/// Parameters for searching endpoints.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// Keyword matched case-insensitively against path, method, summary,
    /// description and operation id
    pub query: String,
}

// ============================================================================
// mcp_swagger_generate_code types
// ============================================================================

/// Parameters for generating a client stub.
///
/// # Examples
///
/// ```
/// use swagger_viewer_server::types::GenerateCodeParams;
///
/// let params: GenerateCodeParams =
///     serde_json::from_str(r#"{"path": "/users/{id}", "method": "GET"}"#).unwrap();
/// assert!(params.language.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GenerateCodeParams {
    /// Endpoint path exactly as written in the document, e.g. `/users/{id}`
    pub path: String,

    /// HTTP method, case-insensitive
    pub method: String,

    /// Target language (default: "javascript")
    #[serde(default)]
    pub language: Option<String>,
}

/// Generated client stub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateCodeResult {
    /// Source text
    pub code: String,
}
