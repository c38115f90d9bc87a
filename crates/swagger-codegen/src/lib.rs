//! Client call stub generation for OpenAPI/Swagger endpoints.
//!
//! Renders a single endpoint of an [`swagger_viewer_core::ApiDocument`] as
//! source code calling it, using Handlebars templates. JavaScript (`fetch`)
//! is the only supported target.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod generator;
pub mod language;
pub mod naming;
pub mod template_engine;
pub mod types;

pub use generator::CodeGenerator;
pub use language::{DEFAULT_LANGUAGE, TargetLanguage};
