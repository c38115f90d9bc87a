//! Template contexts for client stub generation.
//!
//! Every field a template references is always present (strings may be
//! empty, lists may be empty) so rendering works in strict mode.

use serde::{Deserialize, Serialize};

/// Context for rendering one endpoint as a JavaScript function.
///
/// # Examples
///
/// ```
/// use swagger_viewer_codegen::types::JsEndpointContext;
///
/// let context = JsEndpointContext {
///     function_name: "users__id_".to_string(),
///     method: "GET".to_string(),
///     path: "/users/{id}".to_string(),
///     summary: "Get user".to_string(),
///     param_docs: vec!["{string} params.id - path, required".to_string()],
///     path_params: vec![],
///     query_params: vec![],
///     has_query: false,
///     has_body: false,
///     body_access: String::new(),
///     url: "`/users/${id}`".to_string(),
/// };
///
/// assert_eq!(context.method, "GET");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsEndpointContext {
    /// Generated function name
    pub function_name: String,
    /// Upper-case HTTP method
    pub method: String,
    /// Path template, comment-safe
    pub path: String,
    /// One-line summary for the doc comment, or empty
    pub summary: String,
    /// `@param` lines for the doc comment
    pub param_docs: Vec<String>,
    /// Path parameters bound to locals before the URL is built
    pub path_params: Vec<PathParamBinding>,
    /// Query parameters appended to the URL
    pub query_params: Vec<QueryParamBinding>,
    /// Whether any query parameter exists
    pub has_query: bool,
    /// Whether the request carries a JSON body
    pub has_body: bool,
    /// Expression producing the body value, empty without a body
    pub body_access: String,
    /// Template literal for the request URL, backticks included
    pub url: String,
}

/// A path parameter read into a local variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathParamBinding {
    /// Local variable name
    pub local: String,
    /// Expression reading the value from `params`
    pub access: String,
}

/// A query parameter appended to the query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParamBinding {
    /// Quoted parameter name as a JS string literal
    pub literal: String,
    /// Expression reading the value from `params`
    pub access: String,
}
