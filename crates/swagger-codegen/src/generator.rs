//! Client stub generator.
//!
//! Turns one [`Endpoint`] into source text calling it. Only JavaScript is
//! generated; any other language yields a placeholder comment instead of
//! an error.
//!
//! # Examples
//!
//! ```
//! use swagger_viewer_codegen::CodeGenerator;
//! use swagger_viewer_core::parse_document;
//!
//! let doc = parse_document(
//!     "inline",
//!     r#"{
//!         "swagger": "2.0",
//!         "info": {"title": "Users", "version": "1"},
//!         "paths": {"/users/{id}": {"get": {
//!             "summary": "Get user",
//!             "parameters": [{"name": "id", "in": "path", "required": true, "type": "string"}]
//!         }}}
//!     }"#,
//! )
//! .unwrap();
//!
//! let generator = CodeGenerator::new().unwrap();
//! let endpoint = doc.find_endpoint("/users/{id}", "get").unwrap();
//! let code = generator.generate(endpoint, "javascript").unwrap();
//!
//! assert!(code.contains("async function users__id_("));
//! assert!(code.contains("`/users/${id}`"));
//! ```

use crate::language::TargetLanguage;
use crate::naming::{
    function_name, local_name, path_placeholders, property_access, string_literal, url_template,
};
use crate::template_engine::{JAVASCRIPT_ENDPOINT, TemplateEngine};
use crate::types::{JsEndpointContext, PathParamBinding, QueryParamBinding};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use swagger_viewer_core::{Endpoint, Parameter, ParameterLocation, Result};

/// Name under which an OpenAPI 3 `requestBody` is read from `params`.
const REQUEST_BODY_PARAM: &str = "body";

/// Generator for endpoint client stubs.
#[derive(Debug)]
pub struct CodeGenerator<'a> {
    engine: TemplateEngine<'a>,
}

impl CodeGenerator<'_> {
    /// Creates a generator with the built-in templates.
    ///
    /// # Errors
    ///
    /// Returns a template error if a built-in template fails to compile.
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: TemplateEngine::new()?,
        })
    }

    /// Generates a client stub for `endpoint` in the named language.
    ///
    /// Unsupported languages produce
    /// `// <language> code generation is not supported yet`.
    ///
    /// # Errors
    ///
    /// Returns a template error if rendering fails.
    pub fn generate(&self, endpoint: &Endpoint, language: &str) -> Result<String> {
        self.generate_for(endpoint, &TargetLanguage::parse(language))
    }

    /// Generates a client stub for `endpoint` in `language`.
    ///
    /// # Errors
    ///
    /// Returns a template error if rendering fails.
    pub fn generate_for(&self, endpoint: &Endpoint, language: &TargetLanguage) -> Result<String> {
        match language {
            TargetLanguage::JavaScript => {
                let context = javascript_context(endpoint);
                tracing::debug!(
                    "Generating javascript for {} {} as {}",
                    context.method,
                    endpoint.path,
                    context.function_name
                );
                self.engine.render(JAVASCRIPT_ENDPOINT, &context)
            }
            TargetLanguage::Unsupported(name) => {
                tracing::debug!("Code generation requested for unsupported language '{name}'");
                Ok(language.unsupported_placeholder())
            }
        }
    }
}

/// Builds the template context for a JavaScript stub.
#[must_use]
pub fn javascript_context(endpoint: &Endpoint) -> JsEndpointContext {
    let mut taken = HashSet::new();
    let mut locals = HashMap::new();
    let mut path_params = Vec::new();

    for param in endpoint.parameters_in(ParameterLocation::Path) {
        let local = local_name(&param.name, &mut taken);
        locals.insert(param.name.clone(), local.clone());
        path_params.push(PathParamBinding {
            local,
            access: property_access("params", &param.name),
        });
    }

    // Placeholders the document never declared are still read from `params`
    for name in path_placeholders(&endpoint.path) {
        if name.is_empty() || locals.contains_key(name) {
            continue;
        }
        let local = local_name(name, &mut taken);
        locals.insert(name.to_string(), local.clone());
        path_params.push(PathParamBinding {
            local,
            access: property_access("params", name),
        });
    }

    let query_params: Vec<_> = endpoint
        .parameters_in(ParameterLocation::Query)
        .map(|param| QueryParamBinding {
            literal: string_literal(&param.name),
            access: property_access("params", &param.name),
        })
        .collect();

    let body_name = endpoint
        .parameters_in(ParameterLocation::Body)
        .next()
        .map(|param| param.name.as_str())
        .or_else(|| endpoint.request_body.as_ref().map(|_| REQUEST_BODY_PARAM));

    let mut param_docs: Vec<String> = endpoint.parameters.iter().map(param_doc).collect();
    if endpoint.request_body.is_some() && body_name == Some(REQUEST_BODY_PARAM) {
        let required = endpoint
            .request_body
            .as_ref()
            .and_then(|body| body.get("required"))
            .and_then(Value::as_bool)
            .unwrap_or(false);
        param_docs.push(doc_line(
            "object",
            REQUEST_BODY_PARAM,
            "body",
            required,
            endpoint
                .request_body
                .as_ref()
                .and_then(|body| body.get("description"))
                .and_then(Value::as_str),
        ));
    }

    JsEndpointContext {
        function_name: function_name(&endpoint.path),
        method: endpoint.method.to_ascii_uppercase(),
        path: comment_safe(&endpoint.path),
        summary: endpoint
            .summary
            .as_deref()
            .or(endpoint.description.as_deref())
            .and_then(|text| text.lines().next())
            .map(comment_safe)
            .unwrap_or_default(),
        param_docs,
        has_query: !query_params.is_empty(),
        path_params,
        query_params,
        has_body: body_name.is_some(),
        body_access: body_name
            .map(|name| property_access("params", name))
            .unwrap_or_default(),
        url: url_template(&endpoint.path, &locals),
    }
}

fn param_doc(param: &Parameter) -> String {
    doc_line(
        param_type(param),
        &param.name,
        param.location.as_str(),
        param.required,
        param.description.as_deref(),
    )
}

fn doc_line(
    ty: &str,
    name: &str,
    location: &str,
    required: bool,
    description: Option<&str>,
) -> String {
    let mut line = format!("{{{ty}}} params.{name} - {location}");
    if required {
        line.push_str(", required");
    }
    if let Some(text) = description.and_then(|d| d.lines().next()) {
        line.push_str(". ");
        line.push_str(text);
    }
    comment_safe(&line)
}

fn param_type(param: &Parameter) -> &str {
    let schema = param.metadata.get("schema");
    param
        .metadata
        .get("type")
        .or_else(|| schema.and_then(|s| s.get("type")))
        .and_then(Value::as_str)
        .unwrap_or_else(|| {
            if schema.is_some() { "object" } else { "*" }
        })
}

fn comment_safe(text: &str) -> String {
    text.replace("*/", "*\\/")
}
