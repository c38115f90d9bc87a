//! Template engine for code generation using Handlebars.
//!
//! Wraps Handlebars with the built-in client stub templates registered.
//! Output is source code, not HTML, so escaping is turned off.
//!
//! # Examples
//!
//! ```
//! use swagger_viewer_codegen::template_engine::TemplateEngine;
//! use serde_json::json;
//!
//! let mut engine = TemplateEngine::new().unwrap();
//! engine.register_template_string("greeting", "// {{name}} <3").unwrap();
//!
//! let out = engine.render("greeting", &json!({"name": "pets"})).unwrap();
//! assert_eq!(out, "// pets <3");
//! ```

use handlebars::Handlebars;
use serde::Serialize;
use swagger_viewer_core::{Error, Result};

/// Name of the JavaScript endpoint template.
pub const JAVASCRIPT_ENDPOINT: &str = "javascript/endpoint";

/// Template engine for client stub generation.
#[derive(Debug)]
pub struct TemplateEngine<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> TemplateEngine<'a> {
    /// Creates a new template engine with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if a built-in template fails to
    /// compile.
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();

        // Strict mode: fail on missing variables
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);

        Self::register_javascript_templates(&mut handlebars)?;

        Ok(Self { handlebars })
    }

    fn register_javascript_templates(handlebars: &mut Handlebars<'a>) -> Result<()> {
        handlebars
            .register_template_string(
                JAVASCRIPT_ENDPOINT,
                include_str!("../templates/javascript/endpoint.js.hbs"),
            )
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register javascript endpoint template: {e}"),
            })
    }

    /// Renders a template with the given context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template is not registered,
    /// the context cannot be serialized, or a referenced variable is
    /// missing from the context.
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        self.handlebars
            .render(template_name, context)
            .map_err(|e| Error::TemplateError {
                message: format!("Template rendering failed: {e}"),
            })
    }

    /// Registers an additional template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TemplateError`] if the template string is invalid.
    pub fn register_template_string(&mut self, name: &str, template: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| Error::TemplateError {
                message: format!("Failed to register template '{name}': {e}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_template_engine_creation() {
        assert!(TemplateEngine::new().is_ok());
    }

    #[test]
    fn test_output_is_not_html_escaped() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("raw", "{{code}}")
            .unwrap();

        let out = engine
            .render("raw", &json!({"code": "a < b && `x` === 'y'"}))
            .unwrap();
        assert_eq!(out, "a < b && `x` === 'y'");
    }

    #[test]
    fn test_missing_variable_fails_in_strict_mode() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .register_template_string("strict", "{{absent}}")
            .unwrap();

        let err = engine.render("strict", &json!({})).unwrap_err();
        assert!(err.is_template_error());
    }

    #[test]
    fn test_unknown_template_fails() {
        let engine = TemplateEngine::new().unwrap();
        assert!(engine.render("missing/template", &json!({})).is_err());
    }

    #[test]
    fn test_invalid_template_string() {
        let mut engine = TemplateEngine::new().unwrap();
        let err = engine
            .register_template_string("bad", "{{#if}}")
            .unwrap_err();
        assert!(err.is_template_error());
    }
}
