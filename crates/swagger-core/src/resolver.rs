//! Internal `$ref` resolution.
//!
//! Follows JSON-pointer references (`#/...`) inside the document that holds
//! them. Chains of references are followed until a concrete value is found;
//! cycles are rejected. References into other documents are not fetched:
//! they are returned unchanged and logged, so the caller decides whether the
//! unresolved node is usable.

use crate::{Error, Result};
use serde_json::Value;
use std::collections::HashSet;

/// Resolves `$ref` nodes against a root document.
#[derive(Debug, Clone, Copy)]
pub struct RefResolver<'a> {
    root: &'a Value,
}

impl<'a> RefResolver<'a> {
    /// Creates a resolver for `root`.
    #[must_use]
    pub const fn new(root: &'a Value) -> Self {
        Self { root }
    }

    /// Returns the value `node` stands for.
    ///
    /// Non-reference nodes are returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReferenceError`] if a local pointer does not exist,
    /// the fragment is not a JSON pointer, or the references form a cycle.
    ///
    /// # Examples
    ///
    /// ```
    /// use swagger_viewer_core::resolver::RefResolver;
    /// use serde_json::json;
    ///
    /// let root = json!({
    ///     "parameters": { "Id": { "name": "id", "in": "path" } },
    ///     "node": { "$ref": "#/parameters/Id" }
    /// });
    ///
    /// let resolver = RefResolver::new(&root);
    /// let resolved = resolver.resolve(&root["node"]).unwrap();
    /// assert_eq!(resolved["name"], "id");
    /// ```
    pub fn resolve(&self, node: &'a Value) -> Result<&'a Value> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = node;

        while let Some(reference) = reference_of(current) {
            let Some(fragment) = reference.strip_prefix('#') else {
                tracing::warn!("External $ref '{reference}' is not resolved");
                return Ok(current);
            };

            if !seen.insert(reference) {
                return Err(Error::ReferenceError {
                    reference: reference.to_string(),
                    reason: "cyclic reference".to_string(),
                });
            }

            current = self.lookup(reference, fragment)?;
        }

        Ok(current)
    }

    fn lookup(&self, reference: &str, fragment: &str) -> Result<&'a Value> {
        if fragment.is_empty() {
            return Ok(self.root);
        }

        if !fragment.starts_with('/') {
            return Err(Error::ReferenceError {
                reference: reference.to_string(),
                reason: "fragment is not a JSON pointer".to_string(),
            });
        }

        self.root
            .pointer(fragment)
            .ok_or_else(|| Error::ReferenceError {
                reference: reference.to_string(),
                reason: "pointer does not exist in the document".to_string(),
            })
    }
}

/// Returns the `$ref` string of a reference node.
#[must_use]
pub fn reference_of(node: &Value) -> Option<&str> {
    node.as_object()?.get("$ref")?.as_str()
}
