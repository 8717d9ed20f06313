//! Request parameters
//!
//! [`Params`] collects the named values of one call. It does not judge whether
//! a value is "empty"; the renderers below decide what reaches the wire.

use serde_json::{Map, Value};

/// Named request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Anything with a JSON representation is accepted:
    /// strings, numbers, booleans, slices, `Vec`s and JSON maps.
    pub fn insert(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Add a parameter only when the caller supplied one
    pub fn insert_opt<T: Into<Value>>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.insert(key, value),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Render as a URL query string (no leading `?`).
    ///
    /// `null`, empty strings and empty arrays are omitted. Arrays use the
    /// `key[]=v` form, nested objects `key[sub]=v`.
    pub fn to_query(&self) -> String {
        let mut query_parts: Vec<String> = Vec::new();

        for (key, value) in &self.0 {
            push_query_pairs(&mut query_parts, key, value);
        }

        query_parts.join("&")
    }

    /// Render as a JSON body. Only `null` values are dropped.
    pub fn to_body(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Render as multipart text fields, using the query conventions for
    /// nested values.
    pub fn to_form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::new();
        for (key, value) in &self.0 {
            collect_pairs(&mut fields, key.clone(), value);
        }
        fields
    }
}

fn push_query_pairs(query_parts: &mut Vec<String>, key: &str, value: &Value) {
    let mut pairs = Vec::new();
    collect_pairs(&mut pairs, key.to_string(), value);
    for (name, value) in pairs {
        query_parts.push(format!(
            "{}={}",
            urlencoding::encode(&name),
            urlencoding::encode(&value)
        ));
    }
}

fn collect_pairs(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => {},
        Value::String(s) if s.is_empty() => {},
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Bool(b) => pairs.push((key, b.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::Array(arr) => {
            for item in arr {
                collect_pairs(pairs, format!("{}[]", key), item);
            }
        },
        Value::Object(map) => {
            for (sub, item) in map {
                collect_pairs(pairs, format!("{}[{}]", key, sub), item);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_opt_skips_none() {
        let params = Params::new()
            .insert("search", "alice")
            .insert_opt::<u32>("limit", None)
            .insert_opt("offset", Some(10));

        assert_eq!(params.len(), 2);
        assert!(params.get("limit").is_none());
        assert_eq!(params.get("offset"), Some(&json!(10)));
    }

    #[test]
    fn test_insert_stores_maps_and_slices_as_given() {
        let mut prefs = Map::new();
        prefs.insert("theme".to_string(), json!("dark"));
        let queries: &[&str] = &["limit(1)"];

        let params = Params::new().insert("prefs", prefs).insert("queries", queries);
        assert_eq!(params.get("prefs"), Some(&json!({"theme": "dark"})));
        assert_eq!(params.get("queries"), Some(&json!(["limit(1)"])));
    }

    #[test]
    fn test_assembler_keeps_empty_values() {
        let params = Params::new()
            .insert("search", "")
            .insert("queries", Vec::<String>::new());
        assert_eq!(params.get("search"), Some(&json!("")));
        assert_eq!(params.get("queries"), Some(&json!([])));
    }

    #[test]
    fn test_query_omits_empty_values() {
        let params = Params::new()
            .insert("search", "")
            .insert("queries", Vec::<String>::new())
            .insert("limit", 25);
        assert_eq!(params.to_query(), "limit=25");
    }

    #[test]
    fn test_query_encodes_arrays_and_scalars() {
        let params = Params::new()
            .insert("async", true)
            .insert("queries", vec!["limit(5)", "equal(\"name\", \"a b\")"]);

        assert_eq!(
            params.to_query(),
            "async=true&queries%5B%5D=limit%285%29&queries%5B%5D=equal%28%22name%22%2C%20%22a%20b%22%29"
        );
    }

    #[test]
    fn test_query_encodes_nested_objects() {
        let params = Params::new().insert("prefs", json!({"theme": "dark"}));
        assert_eq!(params.to_query(), "prefs%5Btheme%5D=dark");
    }

    #[test]
    fn test_body_keeps_empty_but_drops_null() {
        let params = Params::new()
            .insert("prefs", json!({}))
            .insert("name", "")
            .insert("gone", Value::Null);

        assert_eq!(params.to_body(), json!({"prefs": {}, "name": ""}));
    }

    #[test]
    fn test_form_fields_flatten_permissions() {
        let params = Params::new()
            .insert("fileId", "f1")
            .insert("permissions", vec!["read(\"any\")"]);

        assert_eq!(
            params.to_form_fields(),
            vec![
                ("fileId".to_string(), "f1".to_string()),
                ("permissions[]".to_string(), "read(\"any\")".to_string()),
            ]
        );
    }
}
