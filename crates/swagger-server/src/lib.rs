//! MCP server for browsing OpenAPI/Swagger documents.
//!
//! Exposes four tools over the MCP stdio transport:
//!
//! 1. **`mcp_swagger_initialize`** - Fetch and cache the document
//! 2. **`mcp_swagger_search`** - Keyword search over endpoints
//! 3. **`mcp_swagger_generate_code`** - JavaScript client stub for one endpoint
//! 4. **`mcp_swagger_get_all_endpoints`** - Paths and their methods
//!
//! The same operations are available in-process through [`SwaggerApi`].
//!
//! # Examples
//!
//! ```no_run
//! use swagger_viewer_server::{ServerSettings, SwaggerService};
//! use rmcp::transport::stdio;
//! use rmcp::ServiceExt;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let service = SwaggerService::new(ServerSettings::default())?
//!     .serve(stdio())
//!     .await?;
//! service.waiting().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Document lifecycle
//!
//! Tools that need a document and find the cache empty first try to
//! initialize from `~/swagger.json`; if that fails they answer
//! `"Please initialize swagger first"`. After an initialization that used the
//! config file, changes to the file trigger a re-fetch.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod api;
pub mod error;
pub mod service;
pub mod settings;
pub mod state;
pub mod types;

pub use api::SwaggerApi;
pub use error::ToolError;
pub use service::SwaggerService;
pub use settings::{ServerSettings, ServerSettingsBuilder};
pub use state::SwaggerState;
pub use types::{
    GenerateCodeParams, GenerateCodeResult, InitializeParams, InitializeResult, SearchParams,
};
