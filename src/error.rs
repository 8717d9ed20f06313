//! SDK errors
//!
//! Every façade method returns [`Result`]. Errors are propagated as-is: the SDK
//! never retries and never reclassifies a non-2xx response, callers inspect
//! [`Error::status`] themselves.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection refused, DNS, TLS, timeouts raised by the transport.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API request failed: {status}{}", api_suffix(.message))]
    Api {
        status: StatusCode,
        /// `message` field of the Appwrite error body, when present
        message: Option<String>,
        /// `type` field of the Appwrite error body, when present
        kind: Option<String>,
        /// Raw response body
        body: String,
    },

    /// Malformed JSON or a field whose type does not match the model.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error("invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// A caller-supplied upload content type that is not a valid MIME type.
    #[error("invalid MIME type: {0}")]
    InvalidMimeType(String),

    #[error("missing value for route parameter `{0}`")]
    MissingRouteParam(String),

    #[error("file is {size} bytes, uploads are limited to {limit} bytes")]
    UploadTooLarge { size: usize, limit: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status of an [`Error::Api`] error
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(err) => err.status(),
            _ => None,
        }
    }

    /// Build an API error from a status and raw body, picking up the
    /// `message`/`type` fields Appwrite puts in its error documents.
    pub(crate) fn api(status: StatusCode, body: String) -> Self {
        let parsed: Option<serde_json::Value> = serde_json::from_str(&body).ok();
        let field = |name: &str| {
            parsed
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(|v| v.as_str())
                .map(|s| s.to_string())
        };

        Error::Api {
            status,
            message: field("message"),
            kind: field("type"),
            body,
        }
    }
}

fn api_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(" - {}", m))
        .unwrap_or_default()
}

/// Format an SDK error for display
///
/// Keeps the output short and free of raw server payloads.
pub fn format_error(error: &Error) -> String {
    if let Error::Api { status, message, .. } = error {
        let hint = match status.as_u16() {
            401 => "Authentication failed. Check the project id and API key.",
            403 => "Permission denied. Check the API key scopes.",
            404 => "Resource not found.",
            409 => "Resource conflict. The resource may already exist.",
            429 => "Rate limit exceeded. Please try again later.",
            400 => "Invalid request. Check your parameters.",
            500 | 503 => "Appwrite service temporarily unavailable. Please try again.",
            _ => "Request failed.",
        };
        return match message {
            Some(message) => format!("{} ({})", hint, truncate(message, 80)),
            None => hint.to_string(),
        };
    }

    match error {
        Error::Transport(_) => {
            "Request failed. Check your network connection and the endpoint.".to_string()
        },
        other => truncate(&other.to_string(), 80),
    }
}

fn truncate(text: &str, max: usize) -> String {
    let mut chars = text.chars().filter(|c| !c.is_control());
    let truncated = chars.by_ref().take(max).collect::<String>();

    if chars.next().is_some() {
        format!("{}...", truncated)
    } else {
        truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_picks_up_message_and_type() {
        let err = Error::api(
            StatusCode::NOT_FOUND,
            r#"{"message":"User not found","code":404,"type":"user_not_found","version":"1.4.0"}"#
                .to_string(),
        );

        match &err {
            Error::Api { message, kind, .. } => {
                assert_eq!(message.as_deref(), Some("User not found"));
                assert_eq!(kind.as_deref(), Some("user_not_found"));
            },
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
        assert_eq!(err.to_string(), "API request failed: 404 Not Found - User not found");
    }

    #[test]
    fn test_api_error_with_non_json_body() {
        let err = Error::api(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>".to_string());
        match err {
            Error::Api { message, kind, body, .. } => {
                assert!(message.is_none());
                assert!(kind.is_none());
                assert_eq!(body, "<html>bad gateway</html>");
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_format_error_hints() {
        let err = Error::api(StatusCode::UNAUTHORIZED, String::new());
        assert_eq!(
            format_error(&err),
            "Authentication failed. Check the project id and API key."
        );

        let err = Error::api(StatusCode::NOT_FOUND, r#"{"message":"Bucket missing"}"#.to_string());
        assert_eq!(format_error(&err), "Resource not found. (Bucket missing)");
    }

    #[test]
    fn test_format_error_keeps_short_non_ascii_messages() {
        let err = Error::api(
            StatusCode::NOT_FOUND,
            r#"{"message":"Benutzer Müller nicht gefunden\n"}"#.to_string(),
        );
        assert_eq!(
            format_error(&err),
            "Resource not found. (Benutzer Müller nicht gefunden)"
        );
    }

    #[test]
    fn test_format_error_truncates_long_messages() {
        let err = Error::MissingRouteParam("x".repeat(200));
        let formatted = format_error(&err);
        assert!(formatted.ends_with("..."));
        assert_eq!(formatted.len(), 83);
    }
}
