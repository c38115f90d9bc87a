//! JavaScript naming helpers.
//!
//! Turns path templates and parameter names from an API document into
//! identifiers, property accessors and template literals that are safe to
//! paste into generated source.

use std::collections::{HashMap, HashSet};

/// Identifiers the generated function declares itself.
pub const RESERVED_LOCALS: [&str; 6] = [
    "params",
    "query",
    "queryString",
    "url",
    "options",
    "response",
];

const JS_KEYWORDS: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally",
    "for", "function", "if", "implements", "import", "in", "instanceof", "interface", "let",
    "new", "null", "package", "private", "protected", "public", "return", "static", "super",
    "switch", "this", "throw", "true", "try", "typeof", "undefined", "var", "void", "while",
    "with", "yield",
];

/// Builds the generated function's name from a path template.
///
/// Segments are split on `/` (empty ones dropped), every character that is
/// not an ASCII letter or digit becomes `_`, and the segments are joined
/// with `_`.
///
/// # Examples
///
/// ```
/// use swagger_viewer_codegen::naming::function_name;
///
/// assert_eq!(function_name("/users/{id}"), "users__id_");
/// assert_eq!(function_name("/pet/findByStatus"), "pet_findByStatus");
/// assert_eq!(function_name("/"), "root");
/// assert_eq!(function_name("/2fa/verify"), "_2fa_verify");
/// ```
#[must_use]
pub fn function_name(path: &str) -> String {
    let name = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("_");

    if name.is_empty() {
        return "root".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{name}");
    }
    name
}

/// Returns `true` if `name` can be written as `object.name`.
///
/// Only ASCII identifiers are accepted; keywords are rejected.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !JS_KEYWORDS.contains(&name)
}

/// Returns a JavaScript string literal for `value`.
#[must_use]
pub fn string_literal(value: &str) -> String {
    // A JSON string is a valid JS string literal
    serde_json::Value::String(value.to_string()).to_string()
}

/// Returns an expression reading property `name` from `object`.
///
/// # Examples
///
/// ```
/// use swagger_viewer_codegen::naming::property_access;
///
/// assert_eq!(property_access("params", "limit"), "params.limit");
/// assert_eq!(property_access("params", "X-Request-Id"), r#"params["X-Request-Id"]"#);
/// ```
#[must_use]
pub fn property_access(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{object}.{name}")
    } else {
        format!("{object}[{}]", string_literal(name))
    }
}

/// Picks a local variable name for `name` not already in `taken`.
///
/// The chosen name is added to `taken`.
///
/// # Examples
///
/// ```
/// use std::collections::HashSet;
/// use swagger_viewer_codegen::naming::local_name;
///
/// let mut taken = HashSet::new();
/// assert_eq!(local_name("id", &mut taken), "id");
/// assert_eq!(local_name("user-id", &mut taken), "user_id");
/// assert_eq!(local_name("url", &mut taken), "url_");
/// assert_eq!(local_name("class", &mut taken), "class_");
/// ```
pub fn local_name(name: &str, taken: &mut HashSet<String>) -> String {
    let mut local: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();

    if local.is_empty() || local.starts_with(|c: char| c.is_ascii_digit()) {
        local.insert(0, '_');
    }

    while JS_KEYWORDS.contains(&local.as_str())
        || RESERVED_LOCALS.contains(&local.as_str())
        || taken.contains(&local)
    {
        local.push('_');
    }

    taken.insert(local.clone());
    local
}

/// Returns the `{name}` placeholders of a path template, in order and
/// without duplicates.
///
/// # Examples
///
/// ```
/// use swagger_viewer_codegen::naming::path_placeholders;
///
/// assert_eq!(path_placeholders("/users/{id}/posts/{postId}"), vec!["id", "postId"]);
/// assert!(path_placeholders("/users").is_empty());
/// ```
#[must_use]
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = &after[..end];
        if !names.contains(&name) {
            names.push(name);
        }
        rest = &after[end + 1..];
    }
    names
}

/// Builds a template literal for `path`, substituting `{name}` placeholders.
///
/// `locals` maps a placeholder name to the local variable holding its value.
/// Placeholders without an entry are kept as literal text.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use swagger_viewer_codegen::naming::url_template;
///
/// let locals = HashMap::from([("id".to_string(), "id".to_string())]);
/// assert_eq!(url_template("/users/{id}", &locals), "`/users/${id}`");
/// assert_eq!(url_template("/users/{other}", &locals), "`/users/{other}`");
/// ```
#[must_use]
pub fn url_template<S: std::hash::BuildHasher>(
    path: &str,
    locals: &HashMap<String, String, S>,
) -> String {
    let mut out = String::with_capacity(path.len() + 2);
    out.push('`');

    let mut rest = path;
    while let Some(start) = rest.find('{') {
        push_literal(&mut out, &rest[..start]);

        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            push_literal(&mut out, &rest[start..]);
            rest = "";
            break;
        };

        let name = &after[..end];
        match locals.get(name) {
            Some(local) => {
                out.push_str("${");
                out.push_str(local);
                out.push('}');
            }
            None => {
                out.push('{');
                push_literal(&mut out, name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    push_literal(&mut out, rest);

    out.push('`');
    out
}

fn push_literal(out: &mut String, text: &str) {
    for c in text.chars() {
        if matches!(c, '`' | '\\' | '$') {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name_replaces_punctuation() {
        assert_eq!(function_name("/store/order.json"), "store_order_json");
        assert_eq!(function_name("//a//b/"), "a_b");
        assert_eq!(function_name(""), "root");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("petId"));
        assert!(is_identifier("$top"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier("page[size]"));
        assert!(!is_identifier("delete"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn test_local_names_do_not_collide() {
        let mut taken = HashSet::new();
        assert_eq!(local_name("a.b", &mut taken), "a_b");
        assert_eq!(local_name("a-b", &mut taken), "a_b_");
        assert_eq!(local_name("9lives", &mut taken), "_9lives");
        assert_eq!(local_name("params", &mut taken), "params_");
    }

    #[test]
    fn test_path_placeholders() {
        assert_eq!(path_placeholders("/a/{x}/b/{x}/{y}"), vec!["x", "y"]);
        assert_eq!(path_placeholders("/a/{}"), vec![""]);
        assert!(path_placeholders("/a/{open").is_empty());
    }

    #[test]
    fn test_url_template_multiple_placeholders() {
        let locals = HashMap::from([
            ("owner".to_string(), "owner".to_string()),
            ("repo-name".to_string(), "repo_name".to_string()),
        ]);
        assert_eq!(
            url_template("/repos/{owner}/{repo-name}/issues", &locals),
            "`/repos/${owner}/${repo_name}/issues`"
        );
    }

    #[test]
    fn test_url_template_escapes_literal_text() {
        let locals: HashMap<String, String> = HashMap::new();
        assert_eq!(url_template("/a`b/$c/{open", &locals), r"`/a\`b/\$c/{open`");
    }

    #[test]
    fn test_string_literal_escapes_quotes() {
        assert_eq!(string_literal(r#"say "hi""#), r#""say \"hi\"""#);
    }
}
