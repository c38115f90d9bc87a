//! Target language selection.

use std::fmt;

/// Language requested when none is given.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Language a client stub is generated in.
///
/// # Examples
///
/// ```
/// use swagger_viewer_codegen::TargetLanguage;
///
/// assert_eq!(TargetLanguage::parse(" JS "), TargetLanguage::JavaScript);
/// assert_eq!(
///     TargetLanguage::parse("python"),
///     TargetLanguage::Unsupported("python".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetLanguage {
    /// `fetch`-based async function
    #[default]
    JavaScript,
    /// Anything else, as the caller spelled it
    Unsupported(String),
}

impl TargetLanguage {
    /// Interprets a language name. Matching is case-insensitive.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        match name.to_ascii_lowercase().as_str() {
            "javascript" | "js" => Self::JavaScript,
            _ => Self::Unsupported(name.to_string()),
        }
    }

    /// Comment returned instead of code for unsupported languages.
    #[must_use]
    pub fn unsupported_placeholder(&self) -> String {
        format!("// {self} code generation is not supported yet")
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JavaScript => f.write_str(DEFAULT_LANGUAGE),
            Self::Unsupported(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TargetLanguage::parse("JavaScript"), TargetLanguage::JavaScript);
        assert_eq!(TargetLanguage::parse("js"), TargetLanguage::JavaScript);
        assert_eq!(
            TargetLanguage::parse(" TypeScript "),
            TargetLanguage::Unsupported("TypeScript".to_string())
        );
    }

    #[test]
    fn test_placeholder_keeps_original_spelling() {
        let lang = TargetLanguage::parse("Python");
        assert_eq!(
            lang.unsupported_placeholder(),
            "// Python code generation is not supported yet"
        );
    }

    #[test]
    fn test_default_is_javascript() {
        assert_eq!(TargetLanguage::default(), TargetLanguage::JavaScript);
        assert_eq!(TargetLanguage::default().to_string(), DEFAULT_LANGUAGE);
    }
}
