//! Response decoding

use crate::error::Result;
use serde::de::DeserializeOwned;

/// Decode a response body into `T`.
///
/// Fields are matched by JSON key; unknown keys are ignored and missing keys
/// fall back to the model's defaults. An empty body is treated as `{}` so
/// that bodiless responses decode to the model's default.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    if bytes.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(serde_json::from_slice(b"{}")?);
    }
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        #[serde(rename = "$id")]
        id: String,
        size: i64,
        enabled: bool,
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let sample: Sample = decode(br#"{"$id":"a1","size":3,"extra":[1,2]}"#).unwrap();
        assert_eq!(sample.id, "a1");
        assert_eq!(sample.size, 3);
    }

    #[test]
    fn test_decode_missing_fields_default() {
        let sample: Sample = decode(br#"{"$id":"a1"}"#).unwrap();
        assert_eq!(sample, Sample { id: "a1".into(), size: 0, enabled: false });
    }

    #[test]
    fn test_decode_empty_body_is_default() {
        let sample: Sample = decode(b"").unwrap();
        assert_eq!(sample, Sample::default());
    }

    #[test]
    fn test_decode_type_mismatch_fails() {
        let result: Result<Sample> = decode(br#"{"$id":"a1","size":"big"}"#);
        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[test]
    fn test_decode_malformed_json_fails() {
        let result: Result<Sample> = decode(br#"{"$id":"a1","#);
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
