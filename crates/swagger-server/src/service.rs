//! MCP service exposing the swagger viewer tools.
//!
//! The `SwaggerService` provides four tools:
//! 1. `mcp_swagger_initialize` - Fetch and cache the swagger document
//! 2. `mcp_swagger_search` - Keyword search over endpoints
//! 3. `mcp_swagger_generate_code` - Client stub for one endpoint
//! 4. `mcp_swagger_get_all_endpoints` - Paths and their methods
//!
//! Every response is a single text item holding a JSON document. Failures
//! are reported in-band with `isError: true` and an `error` message rather
//! than as protocol errors.

use crate::api::SwaggerApi;
use crate::error::ToolError;
use crate::settings::ServerSettings;
use crate::types::{
    GENERATE_CODE_TOOL, GenerateCodeParams, INITIALIZE_TOOL, InitializeParams, SEARCH_TOOL,
    SearchParams,
};
use rmcp::handler::server::ServerHandler;
use rmcp::handler::server::tool::{ToolCallContext, ToolRouter};
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorCode, Implementation, JsonObject,
    ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, tool, tool_router};
use serde::Serialize;
use serde_json::{Value, json};

/// MCP server for browsing a swagger document.
///
/// # Examples
///
/// ```no_run
/// use swagger_viewer_server::{ServerSettings, SwaggerService};
/// use rmcp::ServiceExt;
/// use rmcp::transport::stdio;
///
/// # async fn example() -> anyhow::Result<()> {
/// let service = SwaggerService::new(ServerSettings::default())?;
/// service.serve(stdio()).await?.waiting().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SwaggerService {
    /// Operations behind the tools
    api: SwaggerApi,

    /// Tool router for MCP protocol
    tool_router: ToolRouter<Self>,
}

impl SwaggerService {
    /// Creates a service with an empty document cache.
    ///
    /// # Errors
    ///
    /// Returns a template error if the code templates fail to compile.
    pub fn new(settings: ServerSettings) -> swagger_viewer_core::Result<Self> {
        Ok(Self::with_api(SwaggerApi::new(settings)?))
    }

    /// Wraps an existing API instance, sharing its cache.
    #[must_use]
    pub fn with_api(api: SwaggerApi) -> Self {
        Self {
            api,
            tool_router: Self::tool_router(),
        }
    }

    /// The API behind the tools.
    #[must_use]
    pub const fn api(&self) -> &SwaggerApi {
        &self.api
    }
}

#[tool_router]
impl SwaggerService {
    /// Fetch and cache the swagger document.
    #[tool(
        name = "mcp_swagger_initialize",
        description = "Fetch and cache a swagger/OpenAPI document. Uses swaggerUrl when given, otherwise the swaggerUrl in ~/swagger.json."
    )]
    async fn initialize(
        &self,
        Parameters(params): Parameters<InitializeParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.api.initialize(params.swagger_url.as_deref()).await {
            Ok(result) => success(&result),
            Err(e) => {
                tracing::warn!("Initialization failed: {e}");
                Ok(failure(&e.to_initialize_payload()))
            }
        }
    }

    /// Search endpoints by keyword.
    #[tool(
        name = "mcp_swagger_search",
        description = "Search the cached swagger document for endpoints whose path, method, summary, description or operationId contains the query (case-insensitive)."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(self.api.search(Some(&params.query)).await)
    }

    /// Generate a client stub for one endpoint.
    #[tool(
        name = "mcp_swagger_generate_code",
        description = "Generate client code calling one endpoint of the cached swagger document. Only javascript is supported; other languages return a placeholder."
    )]
    async fn generate_code(
        &self,
        Parameters(params): Parameters<GenerateCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            self.api
                .generate_code(
                    Some(&params.path),
                    Some(&params.method),
                    params.language.as_deref(),
                )
                .await,
        )
    }

    /// List all paths with their methods.
    #[tool(
        name = "mcp_swagger_get_all_endpoints",
        description = "List every path of the cached swagger document with the HTTP methods it supports."
    )]
    async fn get_all_endpoints(&self) -> Result<CallToolResult, McpError> {
        respond(self.api.get_all_endpoints().await)
    }
}

impl ServerHandler for SwaggerService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Browse a swagger/OpenAPI document. Call mcp_swagger_initialize first \
                 (or configure swaggerUrl in ~/swagger.json), then search endpoints, \
                 list them, or generate client code."
                    .to_string(),
            ),
        }
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!("Tool call: {}", request.name);

        if !self.tool_router.has_route(&request.name) {
            let error = ToolError::UnknownTool {
                name: request.name.to_string(),
            };
            tracing::warn!("{error}");
            return Ok(failure(&error.to_payload()));
        }

        if let Err(error) = check_arguments(&request.name, request.arguments.as_ref()) {
            tracing::debug!("Rejected {} call: {error}", request.name);
            return Ok(failure(&error_payload(&request.name, &error)));
        }

        let tool = request.name.clone();
        let tcc = ToolCallContext::new(self, request, context);
        match self.tool_router.call(tcc).await {
            // Argument shapes the pre-check does not know about still get the envelope
            Err(e) if e.code == ErrorCode::INVALID_PARAMS => {
                tracing::debug!("Invalid parameters for {tool}: {}", e.message);
                let mut payload = json!({ "error": e.message });
                if tool == INITIALIZE_TOOL {
                    payload["success"] = json!(false);
                }
                Ok(failure(&payload))
            }
            result => result,
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tool_router.list_all()))
    }
}

// ============================================================================
// Response helpers
// ============================================================================

/// Rejects calls that omit a required argument or send a non-string one
/// before they are routed.
fn check_arguments(tool: &str, arguments: Option<&JsonObject>) -> Result<(), ToolError> {
    let value = |key: &str| {
        arguments
            .and_then(|args| args.get(key))
            .filter(|value| !value.is_null())
    };
    let string = |key: &'static str| match value(key) {
        Some(v) if !v.is_string() => Err(ToolError::InvalidArgument { name: key }),
        _ => Ok(()),
    };

    match tool {
        INITIALIZE_TOOL => string("swaggerUrl"),
        SEARCH_TOOL => {
            if value("query").is_none() {
                return Err(ToolError::MissingQuery);
            }
            string("query")
        }
        GENERATE_CODE_TOOL => {
            if value("path").is_none() || value("method").is_none() {
                return Err(ToolError::MissingPathOrMethod);
            }
            string("path")?;
            string("method")?;
            string("language")
        }
        _ => Ok(()),
    }
}

/// Initialization failures carry `success: false` as well.
fn error_payload(tool: &str, error: &ToolError) -> Value {
    if tool == INITIALIZE_TOOL {
        error.to_initialize_payload()
    } else {
        error.to_payload()
    }
}

fn respond<T: Serialize>(result: Result<T, ToolError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(value) => success(&value),
        Err(e) if e.is_argument_error() => {
            tracing::debug!("Tool rejected arguments: {e}");
            Ok(failure(&e.to_payload()))
        }
        Err(e) => {
            tracing::warn!("Tool failed: {e}");
            Ok(failure(&e.to_payload()))
        }
    }
}

fn success<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("Failed to serialize result: {e}"), None)
    })?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

fn failure(payload: &Value) -> CallToolResult {
    CallToolResult::error(vec![Content::text(payload.to_string())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GET_ALL_ENDPOINTS_TOOL;

    fn args(value: Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_service_lists_four_tools() {
        let service = SwaggerService::new(ServerSettings::default()).unwrap();
        let mut names: Vec<_> = service
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                GENERATE_CODE_TOOL,
                GET_ALL_ENDPOINTS_TOOL,
                INITIALIZE_TOOL,
                SEARCH_TOOL,
            ]
        );
    }

    #[test]
    fn test_required_fields_are_declared_in_schema() {
        let service = SwaggerService::new(ServerSettings::default()).unwrap();
        let tools = service.tool_router.list_all();

        let generate = tools
            .iter()
            .find(|tool| tool.name == GENERATE_CODE_TOOL)
            .unwrap();
        let required = generate.input_schema.get("required").unwrap();
        assert!(required.as_array().unwrap().contains(&json!("path")));
        assert!(required.as_array().unwrap().contains(&json!("method")));
        assert!(!required.as_array().unwrap().contains(&json!("language")));
    }

    #[test]
    fn test_missing_arguments_are_rejected() {
        assert!(matches!(
            check_arguments(SEARCH_TOOL, None),
            Err(ToolError::MissingQuery)
        ));
        assert!(matches!(
            check_arguments(SEARCH_TOOL, Some(&args(json!({"query": null})))),
            Err(ToolError::MissingQuery)
        ));
        assert!(matches!(
            check_arguments(GENERATE_CODE_TOOL, Some(&args(json!({"path": "/x"})))),
            Err(ToolError::MissingPathOrMethod)
        ));
        assert!(
            check_arguments(
                GENERATE_CODE_TOOL,
                Some(&args(json!({"path": "/x", "method": "get"})))
            )
            .is_ok()
        );
        assert!(check_arguments(INITIALIZE_TOOL, None).is_ok());
    }

    #[test]
    fn test_non_string_arguments_are_rejected() {
        assert!(matches!(
            check_arguments(SEARCH_TOOL, Some(&args(json!({"query": 5})))),
            Err(ToolError::InvalidArgument { name: "query" })
        ));
        assert!(matches!(
            check_arguments(
                GENERATE_CODE_TOOL,
                Some(&args(json!({"path": "/x", "method": ["get"]})))
            ),
            Err(ToolError::InvalidArgument { name: "method" })
        ));
        assert!(matches!(
            check_arguments(
                GENERATE_CODE_TOOL,
                Some(&args(json!({"path": "/x", "method": "get", "language": 1})))
            ),
            Err(ToolError::InvalidArgument { name: "language" })
        ));
        assert!(
            check_arguments(
                GENERATE_CODE_TOOL,
                Some(&args(json!({"path": "/x", "method": "get", "language": null})))
            )
            .is_ok()
        );
        assert!(matches!(
            check_arguments(INITIALIZE_TOOL, Some(&args(json!({"swaggerUrl": true})))),
            Err(ToolError::InvalidArgument { name: "swaggerUrl" })
        ));
    }

    #[test]
    fn test_initialize_errors_carry_success_flag() {
        let error = ToolError::InvalidArgument { name: "swaggerUrl" };
        assert_eq!(
            error_payload(INITIALIZE_TOOL, &error),
            json!({"success": false, "error": "swaggerUrl must be a string"})
        );
        assert_eq!(
            error_payload(SEARCH_TOOL, &error),
            json!({"error": "swaggerUrl must be a string"})
        );
    }

    #[test]
    fn test_failure_sets_error_flag() {
        let result = failure(&ToolError::NotInitialized.to_payload());
        assert_eq!(result.is_error, Some(true));
    }
}
