//! Property-based tests using proptest
//!
//! These tests verify route rendering, query rendering and response decoding
//! using randomized inputs.

use appwrite::api::{decode, render, Params};
use appwrite::services::health::HealthStatus;
use appwrite::services::storage::File;
use appwrite::Error;
use proptest::prelude::*;
use serde_json::json;

/// Route segments as Appwrite accepts them for ids
fn arb_id() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9._-]{0,35}"
}

/// Generate arbitrary file metadata
fn arb_file() -> impl Strategy<Value = File> {
    (
        arb_id(),
        arb_id(),
        "[a-z]{1,12}\\.(png|txt|pdf)",
        prop_oneof!["image/png", "text/plain", "application/pdf"],
        any::<u32>(),
        prop::collection::vec("(read|update|delete)\\(\"any\"\\)", 0..4),
    )
        .prop_map(|(id, bucket_id, name, mime_type, size, permissions)| File {
            id,
            bucket_id,
            name,
            mime_type: mime_type.to_string(),
            size_original: u64::from(size),
            permissions,
            ..File::default()
        })
}

proptest! {
    /// A rendered placeholder is gone and its value sits where it was
    #[test]
    fn rendered_placeholder_is_replaced_in_place(
        prefix in "(/[a-z]{1,8}){0,3}",
        suffix in "(/[a-z]{1,8}){0,3}",
        value in arb_id(),
    ) {
        let template = format!("{}/{{userId}}{}", prefix, suffix);
        let path = render(&template, &[("userId", value.as_str())]).unwrap();

        prop_assert!(!path.contains("{userId}"), "path still contains {{userId}} placeholder");
        prop_assert_eq!(path, format!("{}/{}{}", prefix, value, suffix));
    }

    /// Templates without placeholders render verbatim
    #[test]
    fn templates_without_placeholders_are_unchanged(template in "(/[a-z0-9-]{1,10}){1,5}") {
        prop_assert_eq!(render(&template, &[]).unwrap(), template);
    }

    /// Any placeholder without a substitution fails instead of producing a path
    #[test]
    fn unmatched_placeholder_fails(name in "[a-z][a-zA-Z]{0,10}") {
        let template = format!("/databases/{{{}}}/collections", name);
        let result = render(&template, &[("unrelatedKey", "x")]);
        let is_missing = matches!(result, Err(Error::MissingRouteParam(missing)) if missing == name);
        prop_assert!(is_missing);
    }

    /// Decoding then re-encoding known fields keeps every value
    #[test]
    fn file_decode_roundtrip(file in arb_file()) {
        let encoded = serde_json::to_vec(&file).unwrap();
        let decoded: File = decode(&encoded).unwrap();
        prop_assert_eq!(decoded, file);
    }

    /// Missing optional fields take their defaults
    #[test]
    fn missing_fields_default(ping in any::<u32>()) {
        let body = json!({"ping": ping}).to_string();
        let status: HealthStatus = decode(body.as_bytes()).unwrap();
        prop_assert_eq!(status.ping, u64::from(ping));
        prop_assert_eq!(status.status, "");
    }

    /// Truncated JSON never decodes into a partial struct
    #[test]
    fn truncated_json_is_a_decode_error(file in arb_file(), cut in 1usize..20) {
        let encoded = serde_json::to_vec(&file).unwrap();
        let cut = cut.min(encoded.len() - 1);
        let truncated = &encoded[..encoded.len() - cut];
        let result: Result<File, Error> = decode(truncated);
        prop_assert!(matches!(result, Err(Error::Decode(_))));
    }

    /// Empty strings and arrays never reach the query string
    #[test]
    fn query_omits_empty_values(search in "[a-z]{0,6}", queries in prop::collection::vec("[a-z]{1,6}", 0..3)) {
        let query = Params::new()
            .insert("search", search.as_str())
            .insert("queries", queries.as_slice())
            .to_query();

        prop_assert_eq!(query.contains("search="), !search.is_empty());
        prop_assert_eq!(query.matches("queries%5B%5D=").count(), queries.len());
    }
}
