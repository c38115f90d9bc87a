//! Tool-level errors.
//!
//! Every variant renders to the exact message returned to the caller in the
//! `error` field of the response payload.

use serde_json::{Value, json};
use thiserror::Error;

/// Failure of a tool call.
#[derive(Error, Debug)]
pub enum ToolError {
    /// `query` was missing or empty.
    #[error("Query is required")]
    MissingQuery,

    /// `path` or `method` was missing or empty.
    #[error("Path and method are required")]
    MissingPathOrMethod,

    /// Initialization had no URL, neither as argument nor in the config file.
    #[error("swaggerUrl is required")]
    MissingSwaggerUrl,

    /// The document could not be fetched, parsed or validated.
    #[error("Failed to fetch swagger documentation")]
    FetchFailed {
        /// Location that was tried
        url: String,
    },

    /// An argument was present but not a string.
    #[error("{name} must be a string")]
    InvalidArgument {
        /// Argument name as sent by the caller
        name: &'static str,
    },

    /// No document is cached and none could be loaded from the config file.
    #[error("Please initialize swagger first")]
    NotInitialized,

    /// The (path, method) pair is not in the document.
    #[error("Endpoint not found")]
    EndpointNotFound {
        /// Requested path
        path: String,
        /// Requested method
        method: String,
    },

    /// No tool with this name exists.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        /// Requested tool name
        name: String,
    },

    /// Code generation failed.
    #[error("Code generation failed: {0}")]
    Codegen(#[from] swagger_viewer_core::Error),
}

impl ToolError {
    /// Returns `true` if the caller omitted or mistyped an argument.
    #[must_use]
    pub const fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingQuery
                | Self::MissingPathOrMethod
                | Self::MissingSwaggerUrl
                | Self::InvalidArgument { .. }
        )
    }

    /// Payload for document tools: `{"error": "<message>"}`.
    #[must_use]
    pub fn to_payload(&self) -> Value {
        json!({ "error": self.to_string() })
    }

    /// Payload for initialization: `{"success": false, "error": "<message>"}`.
    #[must_use]
    pub fn to_initialize_payload(&self) -> Value {
        json!({ "success": false, "error": self.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ToolError::MissingQuery.to_string(), "Query is required");
        assert_eq!(
            ToolError::NotInitialized.to_string(),
            "Please initialize swagger first"
        );
        assert_eq!(
            ToolError::UnknownTool {
                name: "nope".to_string()
            }
            .to_string(),
            "Unknown tool: nope"
        );
    }

    #[test]
    fn test_payload_shapes() {
        let err = ToolError::EndpointNotFound {
            path: "/x".to_string(),
            method: "get".to_string(),
        };
        assert_eq!(err.to_payload(), json!({"error": "Endpoint not found"}));

        let err = ToolError::FetchFailed {
            url: "http://x/doc.json".to_string(),
        };
        assert_eq!(
            err.to_initialize_payload(),
            json!({"success": false, "error": "Failed to fetch swagger documentation"})
        );
    }

    #[test]
    fn test_argument_errors() {
        assert!(ToolError::MissingPathOrMethod.is_argument_error());
        assert!(ToolError::InvalidArgument { name: "query" }.is_argument_error());
        assert!(!ToolError::NotInitialized.is_argument_error());
        assert_eq!(
            ToolError::InvalidArgument { name: "query" }.to_string(),
            "query must be a string"
        );
    }
}
