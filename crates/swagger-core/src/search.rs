//! Keyword search over the endpoints of a document.
//!
//! A linear scan: every operation contributes one searchable string (see
//! [`Endpoint::search_text`]) and matches when the lower-cased query is a
//! substring of it. Results keep document order.

use crate::document::{ApiDocument, Endpoint, Parameter};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Read-only projection of an endpoint returned by [`search_endpoints`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Path template
    pub path: String,

    /// HTTP method, upper case
    pub method: String,

    /// Short summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Long description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Merged parameter list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,

    /// Response map keyed by status code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Value>,
}

impl From<&Endpoint> for SearchResult {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            path: endpoint.path.clone(),
            method: endpoint.method.to_ascii_uppercase(),
            summary: endpoint.summary.clone(),
            description: endpoint.description.clone(),
            parameters: endpoint.parameters.clone(),
            responses: endpoint.responses.clone(),
        }
    }
}

/// Returns every endpoint whose search text contains `query`.
///
/// Matching is case-insensitive. An absent document, or one without paths,
/// yields an empty list.
///
/// # Examples
///
/// ```
/// use swagger_viewer_core::{parse_document, search_endpoints};
///
/// let doc = parse_document(
///     "inline",
///     r#"{
///         "swagger": "2.0",
///         "info": {"title": "Users", "version": "1"},
///         "paths": {"/users/{id}": {"get": {"summary": "Get user"}}}
///     }"#,
/// )
/// .unwrap();
///
/// let results = search_endpoints(Some(&doc), "USER");
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].method, "GET");
///
/// assert!(search_endpoints(None, "user").is_empty());
/// ```
#[must_use]
pub fn search_endpoints(document: Option<&ApiDocument>, query: &str) -> Vec<SearchResult> {
    let Some(document) = document.filter(|doc| doc.has_paths()) else {
        return Vec::new();
    };

    let needle = query.to_lowercase();
    document
        .endpoints()
        .filter(|endpoint| endpoint.search_text().contains(&needle))
        .map(SearchResult::from)
        .collect()
}
