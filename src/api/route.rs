//! Route templates
//!
//! Turns `/databases/{databaseId}/collections` into a concrete path.

use crate::error::{Error, Result};

/// Render a route template.
///
/// Each `{name}` placeholder is replaced by the value paired with `name` in
/// `substitutions`. The template is scanned once, so a substituted value that
/// itself looks like a placeholder is left alone. An unterminated `{` is
/// copied through. Substitutions the template never references are ignored.
pub fn render(template: &str, substitutions: &[(&str, &str)]) -> Result<String> {
    let mut path = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        let close = open + close;
        let name = &rest[open + 1..close];

        let value = substitutions
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| Error::MissingRouteParam(name.to_string()))?;

        path.push_str(&rest[..open]);
        path.push_str(value);
        rest = &rest[close + 1..];
    }

    path.push_str(rest);
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_without_placeholders() {
        assert_eq!(render("/databases", &[]).unwrap(), "/databases");
    }

    #[test]
    fn test_render_single_placeholder() {
        let path = render("/users/{userId}/prefs", &[("userId", "abc123")]).unwrap();
        assert_eq!(path, "/users/abc123/prefs");
    }

    #[test]
    fn test_render_multiple_placeholders() {
        let path = render(
            "/databases/{databaseId}/collections/{collectionId}/documents/{documentId}",
            &[
                ("collectionId", "posts"),
                ("databaseId", "main"),
                ("documentId", "doc-1"),
            ],
        )
        .unwrap();
        assert_eq!(path, "/databases/main/collections/posts/documents/doc-1");
    }

    #[test]
    fn test_render_missing_substitution_is_an_error() {
        let err = render("/database/{dattableId}/collections", &[("databaseId", "main")])
            .unwrap_err();
        assert!(matches!(err, Error::MissingRouteParam(name) if name == "dattableId"));
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let path = render("/functions/{functionId}", &[("functionId", "{functionId}")]).unwrap();
        assert_eq!(path, "/functions/{functionId}");
    }

    #[test]
    fn test_render_unterminated_brace_is_verbatim() {
        let path = render("/odd/{userId}/{tail", &[("userId", "u1")]).unwrap();
        assert_eq!(path, "/odd/u1/{tail");
    }

    #[test]
    fn test_render_ignores_unused_substitutions() {
        let path = render("/health/db", &[("unused", "x")]).unwrap();
        assert_eq!(path, "/health/db");
    }
}
