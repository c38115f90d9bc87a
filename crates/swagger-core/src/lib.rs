//! Core of the swagger viewer: config, document loading and search.
//!
//! This crate knows how to find the user's swagger configuration, retrieve
//! an OpenAPI/Swagger document from a URL or file, validate it, and answer
//! keyword queries over its endpoints. It has no knowledge of the MCP
//! transport; see `swagger-viewer-server` for that.
//!
//! # Architecture
//!
//! - Config store ([`read_config`], [`ConfigWatcher`])
//! - Document model ([`ApiDocument`], [`Endpoint`], [`Parameter`])
//! - Parsing, validation and `$ref` resolution ([`parse_document`], [`resolver`])
//! - Retrieval ([`DocumentFetcher`])
//! - Keyword search ([`search_endpoints`])
//!
//! # Examples
//!
//! ```no_run
//! use swagger_viewer_core::{DocumentFetcher, search_endpoints};
//!
//! # async fn example() {
//! let fetcher = DocumentFetcher::new();
//! let doc = fetcher.fetch("https://petstore.swagger.io/v2/swagger.json").await;
//!
//! for hit in search_endpoints(doc.as_ref(), "pet") {
//!     println!("{} {}", hit.method, hit.path);
//! }
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod config;
mod document;
mod error;
mod fetcher;
mod parser;
mod search;
mod watcher;

pub mod resolver;

pub use config::{CONFIG_FILE_NAME, SwaggerConfig, default_config_path, read_config, try_read_config};
pub use document::{
    ApiDocument, Endpoint, EndpointSummary, HTTP_METHODS, Parameter, ParameterLocation, PathEntry,
    SpecFlavor,
};
pub use error::{Error, Result};
pub use fetcher::{DEFAULT_TIMEOUT, DocumentFetcher, DocumentSource};
pub use parser::parse_document;
pub use search::{SearchResult, search_endpoints};
pub use watcher::ConfigWatcher;
