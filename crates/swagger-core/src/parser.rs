//! Parsing and validation of raw API documents.
//!
//! A body is parsed as JSON first and as YAML second. The resulting tree is
//! checked for a known specification version and basic structure, OpenAPI
//! 3.0 documents are additionally deserialized into the `openapiv3` model,
//! and the path table is flattened into [`ApiDocument`] with internal
//! references resolved.

use crate::document::{
    ApiDocument, Endpoint, HTTP_METHODS, Parameter, ParameterLocation, PathEntry, SpecFlavor,
};
use crate::resolver::{RefResolver, reference_of};
use crate::{Error, Result};
use serde_json::{Map, Value};

/// Parses and validates a document body.
///
/// `location` is only used in error messages.
///
/// # Errors
///
/// Returns [`Error::ParseError`] if the body is neither JSON nor YAML, and
/// [`Error::ValidationError`] / [`Error::ReferenceError`] if it is not a
/// usable OpenAPI/Swagger document.
///
/// # Examples
///
/// ```
/// use swagger_viewer_core::parse_document;
///
/// let body = r#"{
///     "swagger": "2.0",
///     "info": {"title": "Users", "version": "1.0"},
///     "paths": {"/users/{id}": {"get": {"summary": "Get user"}}}
/// }"#;
///
/// let doc = parse_document("inline", body).unwrap();
/// assert_eq!(doc.endpoint_count(), 1);
/// assert_eq!(doc.title(), Some("Users"));
/// ```
pub fn parse_document(location: &str, body: &str) -> Result<ApiDocument> {
    let value = parse_body(location, body)?;
    ApiDocument::from_value(&value)
}

fn parse_body(location: &str, body: &str) -> Result<Value> {
    serde_json::from_str(body).or_else(|json_err| {
        serde_yaml::from_str::<Value>(body).map_err(|yaml_err| Error::ParseError {
            location: location.to_string(),
            message: format!("not JSON ({json_err}) and not YAML ({yaml_err})"),
        })
    })
}

impl ApiDocument {
    /// Validates a parsed document tree and builds the endpoint model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the tree is not an
    /// OpenAPI/Swagger document, or [`Error::ReferenceError`] if an internal
    /// `$ref` cannot be followed.
    pub fn from_value(root: &Value) -> Result<Self> {
        let object = root.as_object().ok_or_else(|| invalid("document root must be an object"))?;

        let flavor = detect_flavor(object)?;
        validate_structure(root, object, flavor)?;

        let info = object.get("info");
        let title = info.and_then(|i| i.get("title")).and_then(Value::as_str);
        let version = info.and_then(|i| i.get("version")).and_then(Value::as_str);

        let resolver = RefResolver::new(root);
        let paths = match object.get("paths") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(paths)) => paths
                .iter()
                // Specification extensions are not path items
                .filter(|(path, _)| !path.starts_with("x-"))
                .map(|(path, item)| build_path_entry(&resolver, path, item))
                .collect::<Result<Vec<_>>>()?,
            Some(_) => return Err(invalid("'paths' must be an object")),
        };

        tracing::debug!(
            "Parsed {flavor} document '{}' with {} paths",
            title.unwrap_or("untitled"),
            paths.len()
        );

        Ok(Self {
            flavor,
            title: title.map(str::to_string),
            version: version.map(str::to_string),
            paths,
        })
    }
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::ValidationError {
        reason: reason.into(),
    }
}

fn detect_flavor(object: &Map<String, Value>) -> Result<SpecFlavor> {
    if let Some(version) = object.get("openapi") {
        let version = version
            .as_str()
            .ok_or_else(|| invalid("'openapi' must be a version string"))?;
        if version.starts_with("3.") {
            return Ok(SpecFlavor::OpenApi3);
        }
        return Err(invalid(format!("unsupported OpenAPI version '{version}'")));
    }

    match object.get("swagger").and_then(Value::as_str) {
        Some("2.0") => Ok(SpecFlavor::Swagger2),
        Some(other) => Err(invalid(format!("unsupported Swagger version '{other}'"))),
        None => Err(invalid("missing 'openapi' or 'swagger' version field")),
    }
}

fn validate_structure(root: &Value, object: &Map<String, Value>, flavor: SpecFlavor) -> Result<()> {
    let info = object
        .get("info")
        .and_then(Value::as_object)
        .ok_or_else(|| invalid("missing 'info' object"))?;
    for field in ["title", "version"] {
        if !info.get(field).is_some_and(Value::is_string) {
            return Err(invalid(format!("'info.{field}' must be a string")));
        }
    }

    match flavor {
        SpecFlavor::Swagger2 => {
            if !object.get("paths").is_some_and(Value::is_object) {
                return Err(invalid("missing 'paths' object"));
            }
        }
        SpecFlavor::OpenApi3 => {
            let is_3_0 = object
                .get("openapi")
                .and_then(Value::as_str)
                .is_some_and(|v| v.starts_with("3.0"));
            // 3.1 documents use JSON Schema constructs the 3.0 model rejects
            if is_3_0 {
                serde_json::from_value::<openapiv3::OpenAPI>(root.clone())
                    .map_err(|e| invalid(format!("OpenAPI 3.0 schema violation: {e}")))?;
            }
        }
    }

    Ok(())
}

fn build_path_entry<'a>(
    resolver: &RefResolver<'a>,
    path: &str,
    item: &'a Value,
) -> Result<PathEntry> {
    let item = resolver
        .resolve(item)?
        .as_object()
        .ok_or_else(|| invalid(format!("path item '{path}' must be an object")))?;

    let shared = match item.get("parameters") {
        Some(params) => build_parameters(resolver, path, params)?,
        None => Vec::new(),
    };

    let mut endpoints = Vec::new();
    for (key, operation) in item {
        if !HTTP_METHODS.contains(&key.as_str()) {
            continue;
        }
        endpoints.push(build_endpoint(resolver, path, key, operation, &shared)?);
    }

    Ok(PathEntry {
        path: path.to_string(),
        endpoints,
    })
}

fn build_endpoint<'a>(
    resolver: &RefResolver<'a>,
    path: &str,
    method: &str,
    operation: &'a Value,
    shared: &[Parameter],
) -> Result<Endpoint> {
    let operation = operation
        .as_object()
        .ok_or_else(|| invalid(format!("operation '{method} {path}' must be an object")))?;

    let own = match operation.get("parameters") {
        Some(params) => build_parameters(resolver, path, params)?,
        None => Vec::new(),
    };

    let text = |field: &str| {
        operation
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    };

    let request_body = operation
        .get("requestBody")
        .map(|body| resolver.resolve(body).cloned())
        .transpose()?;

    let responses = operation
        .get("responses")
        .map(|responses| resolve_responses(resolver, responses))
        .transpose()?;

    Ok(Endpoint {
        path: path.to_string(),
        method: method.to_string(),
        summary: text("summary"),
        description: text("description"),
        operation_id: text("operationId"),
        parameters: merge_parameters(shared, own),
        request_body,
        responses,
    })
}

fn build_parameters<'a>(
    resolver: &RefResolver<'a>,
    path: &str,
    params: &'a Value,
) -> Result<Vec<Parameter>> {
    let params = params
        .as_array()
        .ok_or_else(|| invalid(format!("parameters of '{path}' must be an array")))?;

    let mut out = Vec::with_capacity(params.len());
    for raw in params {
        let resolved = resolver.resolve(raw)?;
        if let Some(reference) = reference_of(resolved) {
            tracing::warn!("Skipping unresolved parameter '{reference}' on '{path}'");
            continue;
        }

        let param: Parameter = serde_json::from_value(resolved.clone())
            .map_err(|e| invalid(format!("invalid parameter on '{path}': {e}")))?;
        out.push(param);
    }

    Ok(out)
}

/// Operation-level parameters override path-level ones with the same
/// name and location.
fn merge_parameters(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let key = |p: &Parameter| -> (String, ParameterLocation) { (p.name.clone(), p.location) };

    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter(|s| !own.iter().any(|o| key(o) == key(*s)))
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

fn resolve_responses<'a>(resolver: &RefResolver<'a>, responses: &'a Value) -> Result<Value> {
    let Some(map) = responses.as_object() else {
        return Ok(responses.clone());
    };

    let mut out = Map::with_capacity(map.len());
    for (status, response) in map {
        out.insert(status.clone(), resolver.resolve(response)?.clone());
    }
    Ok(Value::Object(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn swagger2(paths: Value) -> Value {
        json!({
            "swagger": "2.0",
            "info": {"title": "Test", "version": "1.0"},
            "paths": paths
        })
    }

    #[test]
    fn test_swagger2_document() {
        let doc = ApiDocument::from_value(&swagger2(json!({
            "/users/{id}": {
                "get": {
                    "summary": "Get user",
                    "operationId": "getUser",
                    "parameters": [{"name": "id", "in": "path", "required": true, "type": "string"}],
                    "responses": {"200": {"description": "ok"}}
                }
            }
        })))
        .unwrap();

        assert_eq!(doc.flavor(), SpecFlavor::Swagger2);
        let endpoint = doc.find_endpoint("/users/{id}", "get").unwrap();
        assert_eq!(endpoint.summary.as_deref(), Some("Get user"));
        assert_eq!(endpoint.operation_id.as_deref(), Some("getUser"));
        assert_eq!(endpoint.parameters.len(), 1);
        assert_eq!(endpoint.responses.as_ref().unwrap()["200"]["description"], "ok");
    }

    #[test]
    fn test_path_extensions_are_skipped() {
        let doc = ApiDocument::from_value(&swagger2(json!({
            "x-generated-by": "tooling",
            "/ping": {"get": {"summary": "Ping"}}
        })))
        .unwrap();

        assert_eq!(doc.paths().len(), 1);
        assert_eq!(doc.endpoint_count(), 1);
        assert!(doc.find_endpoint("x-generated-by", "get").is_none());
    }

    #[test]
    fn test_document_order_is_preserved() {
        let doc = ApiDocument::from_value(&swagger2(json!({
            "/zeta": {"post": {}, "get": {}},
            "/alpha": {"delete": {}}
        })))
        .unwrap();

        let summaries = doc.endpoint_summaries();
        assert_eq!(summaries[0].path, "/zeta");
        assert_eq!(summaries[0].methods, vec!["post", "get"]);
        assert_eq!(summaries[1].path, "/alpha");
    }

    #[test]
    fn test_non_method_keys_are_not_operations() {
        let doc = ApiDocument::from_value(&swagger2(json!({
            "/pets": {
                "summary": "Pets",
                "parameters": [{"name": "trace", "in": "header", "type": "string"}],
                "x-internal": true,
                "get": {}
            }
        })))
        .unwrap();

        assert_eq!(doc.endpoint_summaries()[0].methods, vec!["get"]);
        let endpoint = doc.find_endpoint("/pets", "get").unwrap();
        assert_eq!(endpoint.parameters.len(), 1);
        assert_eq!(endpoint.parameters[0].location, ParameterLocation::Header);
    }

    #[test]
    fn test_operation_parameters_override_path_parameters() {
        let doc = ApiDocument::from_value(&swagger2(json!({
            "/pets/{id}": {
                "parameters": [
                    {"name": "id", "in": "path", "required": true, "type": "string"},
                    {"name": "verbose", "in": "query", "type": "boolean"}
                ],
                "get": {
                    "parameters": [
                        {"name": "id", "in": "path", "required": true, "type": "integer"}
                    ]
                }
            }
        })))
        .unwrap();

        let endpoint = doc.find_endpoint("/pets/{id}", "get").unwrap();
        assert_eq!(endpoint.parameters.len(), 2);
        let id = endpoint.parameters.iter().find(|p| p.name == "id").unwrap();
        assert_eq!(id.metadata["type"], "integer");
    }

    #[test]
    fn test_parameter_refs_are_resolved() {
        let mut root = swagger2(json!({
            "/pets": {"get": {"parameters": [{"$ref": "#/parameters/Limit"}]}}
        }));
        root["parameters"] = json!({"Limit": {"name": "limit", "in": "query", "type": "integer"}});

        let doc = ApiDocument::from_value(&root).unwrap();
        let endpoint = doc.find_endpoint("/pets", "get").unwrap();
        assert_eq!(endpoint.parameters[0].name, "limit");
        assert_eq!(endpoint.parameters[0].location, ParameterLocation::Query);
    }

    #[test]
    fn test_dangling_ref_is_rejected() {
        let root = swagger2(json!({
            "/pets": {"get": {"parameters": [{"$ref": "#/parameters/Missing"}]}}
        }));
        let err = ApiDocument::from_value(&root).unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_openapi3_document_with_request_body() {
        let root = json!({
            "openapi": "3.0.3",
            "info": {"title": "Pets", "version": "2.0"},
            "paths": {
                "/pets": {
                    "post": {
                        "summary": "Create pet",
                        "requestBody": {"$ref": "#/components/requestBodies/Pet"},
                        "responses": {"201": {"$ref": "#/components/responses/Created"}}
                    }
                }
            },
            "components": {
                "requestBodies": {
                    "Pet": {"content": {"application/json": {"schema": {"type": "object"}}}}
                },
                "responses": {
                    "Created": {"description": "created"}
                }
            }
        });

        let doc = ApiDocument::from_value(&root).unwrap();
        assert_eq!(doc.flavor(), SpecFlavor::OpenApi3);
        let endpoint = doc.find_endpoint("/pets", "post").unwrap();
        assert!(endpoint.request_body.as_ref().unwrap().get("content").is_some());
        assert_eq!(endpoint.responses.as_ref().unwrap()["201"]["description"], "created");
    }

    #[test]
    fn test_openapi3_schema_violation_is_rejected() {
        let root = json!({
            "openapi": "3.0.0",
            "info": {"title": "Broken", "version": "1"},
            "paths": {"/x": {"get": {"summary": 42, "responses": {}}}}
        });
        assert!(ApiDocument::from_value(&root).unwrap_err().is_validation_error());
    }

    #[test]
    fn test_unknown_version_is_rejected() {
        let root = json!({"info": {"title": "x", "version": "1"}, "paths": {}});
        assert!(ApiDocument::from_value(&root).unwrap_err().is_validation_error());

        let root = json!({"swagger": "1.2", "info": {"title": "x", "version": "1"}, "paths": {}});
        assert!(ApiDocument::from_value(&root).unwrap_err().is_validation_error());
    }

    #[test]
    fn test_missing_info_is_rejected() {
        let root = json!({"swagger": "2.0", "paths": {}});
        assert!(ApiDocument::from_value(&root).is_err());
    }

    #[test]
    fn test_invalid_parameter_location_is_rejected() {
        let root = swagger2(json!({
            "/pets": {"get": {"parameters": [{"name": "x", "in": "somewhere"}]}}
        }));
        assert!(ApiDocument::from_value(&root).is_err());
    }

    #[test]
    fn test_yaml_body_is_accepted() {
        let body = "swagger: '2.0'\ninfo:\n  title: Yaml\n  version: '1'\npaths:\n  /ping:\n    get:\n      summary: Ping\n";
        let doc = parse_document("doc.yaml", body).unwrap();
        assert_eq!(doc.find_endpoint("/ping", "get").unwrap().summary.as_deref(), Some("Ping"));
    }

    #[test]
    fn test_scalar_body_is_rejected() {
        let err = parse_document("doc", "just some text").unwrap_err();
        assert!(err.is_validation_error());
    }

    #[test]
    fn test_unparseable_body_is_parse_error() {
        let err = parse_document("doc", "{ \"unterminated\": [").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_openapi31_without_paths_has_no_paths() {
        let root = json!({
            "openapi": "3.1.0",
            "info": {"title": "Hooks", "version": "1"},
            "webhooks": {}
        });
        let doc = ApiDocument::from_value(&root).unwrap();
        assert!(!doc.has_paths());
    }
}
