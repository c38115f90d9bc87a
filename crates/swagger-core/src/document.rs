//! In-memory model of a validated OpenAPI/Swagger document.
//!
//! Only the parts the viewer needs are modelled: the ordered path table and,
//! for each path, the ordered list of operations with their parameters,
//! request body and responses. Everything else about a parameter is kept
//! verbatim in [`Parameter::metadata`] so it can be echoed back to callers.
//!
//! Paths and methods keep the order in which they appear in the source
//! document.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys of a path item that denote operations, in OpenAPI order.
pub const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Which specification family a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFlavor {
    /// Swagger 2.0
    Swagger2,
    /// OpenAPI 3.x
    OpenApi3,
}

impl fmt::Display for SpecFlavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Swagger2 => write!(f, "Swagger 2.0"),
            Self::OpenApi3 => write!(f, "OpenAPI 3"),
        }
    }
}

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// `?name=value`
    Query,
    /// HTTP header
    Header,
    /// `{name}` segment of the path template
    Path,
    /// Cookie (OpenAPI 3)
    Cookie,
    /// Request body (Swagger 2.0)
    Body,
    /// Form field (Swagger 2.0)
    FormData,
}

impl ParameterLocation {
    /// Returns the location as written in the `in` field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Header => "header",
            Self::Path => "path",
            Self::Cookie => "cookie",
            Self::Body => "body",
            Self::FormData => "formData",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One operation parameter.
///
/// # Examples
///
/// ```
/// use swagger_viewer_core::{Parameter, ParameterLocation};
/// use serde_json::json;
///
/// let param: Parameter = serde_json::from_value(json!({
///     "name": "id",
///     "in": "path",
///     "required": true,
///     "type": "integer"
/// }))
/// .unwrap();
///
/// assert_eq!(param.location, ParameterLocation::Path);
/// assert!(param.required);
/// assert_eq!(param.metadata["type"], "integer");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name
    pub name: String,

    /// Parameter location
    #[serde(rename = "in")]
    pub location: ParameterLocation,

    /// Whether the parameter must be supplied
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,

    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remaining fields (schema, type, format, ...) as written in the document
    #[serde(flatten)]
    pub metadata: Map<String, Value>,
}

/// One operation of the document: a (path, method) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Path template, e.g. `/users/{id}`
    pub path: String,

    /// Method key as written in the document (lower case)
    pub method: String,

    /// Short summary
    pub summary: Option<String>,

    /// Long description
    pub description: Option<String>,

    /// `operationId`
    pub operation_id: Option<String>,

    /// Path-level and operation-level parameters, merged
    pub parameters: Vec<Parameter>,

    /// OpenAPI 3 `requestBody`
    pub request_body: Option<Value>,

    /// Response map keyed by status code
    pub responses: Option<Value>,
}

impl Endpoint {
    /// Returns the text the keyword search matches against.
    ///
    /// Path, method, summary, description and operation id, skipping absent
    /// or empty fields, joined with spaces and lower-cased.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_viewer_core::Endpoint;
    ///
    /// let endpoint = Endpoint {
    ///     path: "/users/{id}".to_string(),
    ///     method: "get".to_string(),
    ///     summary: Some("Get User".to_string()),
    ///     description: None,
    ///     operation_id: Some("getUser".to_string()),
    ///     parameters: vec![],
    ///     request_body: None,
    ///     responses: None,
    /// };
    ///
    /// assert_eq!(endpoint.search_text(), "/users/{id} get get user getuser");
    /// ```
    #[must_use]
    pub fn search_text(&self) -> String {
        [
            Some(self.path.as_str()),
            Some(self.method.as_str()),
            self.summary.as_deref(),
            self.description.as_deref(),
            self.operation_id.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }

    /// Iterates over the parameters carried at `location`.
    pub fn parameters_in(&self, location: ParameterLocation) -> impl Iterator<Item = &Parameter> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// All operations registered under one path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEntry {
    /// Path template
    pub path: String,

    /// Operations in document order
    pub endpoints: Vec<Endpoint>,
}

impl PathEntry {
    /// Returns the method keys of this path in document order.
    #[must_use]
    pub fn methods(&self) -> Vec<String> {
        self.endpoints.iter().map(|e| e.method.clone()).collect()
    }
}

/// One row of the "all endpoints" listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointSummary {
    /// Path template
    pub path: String,

    /// Method keys present for the path, in document order
    pub methods: Vec<String>,
}

/// A validated API description with internal references resolved.
///
/// Built by [`ApiDocument::from_value`] or [`crate::parse_document`].
/// Immutable once built; the cache replaces it wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    pub(crate) flavor: SpecFlavor,
    pub(crate) title: Option<String>,
    pub(crate) version: Option<String>,
    pub(crate) paths: Vec<PathEntry>,
}

impl ApiDocument {
    /// Specification family of the source document.
    #[must_use]
    pub const fn flavor(&self) -> SpecFlavor {
        self.flavor
    }

    /// `info.title`, if present.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// `info.version`, if present.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Path table in document order.
    #[must_use]
    pub fn paths(&self) -> &[PathEntry] {
        &self.paths
    }

    /// Returns `true` if the document declares at least one path.
    #[must_use]
    pub fn has_paths(&self) -> bool {
        !self.paths.is_empty()
    }

    /// Iterates over every operation, path order first, then method order.
    pub fn endpoints(&self) -> impl Iterator<Item = &Endpoint> {
        self.paths.iter().flat_map(|p| p.endpoints.iter())
    }

    /// Number of operations in the document.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.paths.iter().map(|p| p.endpoints.len()).sum()
    }

    /// Looks up one operation.
    ///
    /// The path must match exactly; the method is compared
    /// case-insensitively.
    #[must_use]
    pub fn find_endpoint(&self, path: &str, method: &str) -> Option<&Endpoint> {
        let method = method.to_ascii_lowercase();
        self.paths
            .iter()
            .find(|p| p.path == path)?
            .endpoints
            .iter()
            .find(|e| e.method == method)
    }

    /// Lists every path with the methods it supports.
    #[must_use]
    pub fn endpoint_summaries(&self) -> Vec<EndpointSummary> {
        self.paths
            .iter()
            .map(|p| EndpointSummary {
                path: p.path.clone(),
                methods: p.methods(),
            })
            .collect()
    }
}
