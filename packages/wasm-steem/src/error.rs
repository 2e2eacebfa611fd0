//! Error types for wasm-steem

use thiserror::Error;
use wasm_bindgen::prelude::*;

/// Main error type for wasm-steem operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WasmSteemError {
    /// Operation name not present in the schema registry
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
    /// Schema registry document could not be loaded
    #[error("Invalid registry: {0}")]
    InvalidRegistry(String),
    /// Malformed signing URI
    #[error("Invalid URI: {0}")]
    InvalidUri(String),
    /// URL-safe base64 payload that does not decode to UTF-8 text
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),
    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(String),
    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for WasmSteemError {
    fn from(err: serde_json::Error) -> Self {
        WasmSteemError::Json(err.to_string())
    }
}

impl From<url::ParseError> for WasmSteemError {
    fn from(err: url::ParseError) -> Self {
        WasmSteemError::InvalidUri(err.to_string())
    }
}

impl From<base64::DecodeError> for WasmSteemError {
    fn from(err: base64::DecodeError) -> Self {
        WasmSteemError::InvalidEncoding(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for WasmSteemError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        WasmSteemError::InvalidEncoding(err.to_string())
    }
}

// REQUIRED: Converts to JS Error with stack trace
impl From<WasmSteemError> for JsValue {
    fn from(err: WasmSteemError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WasmSteemError::UnknownOperation("unknown_op".to_string());
        assert_eq!(err.to_string(), "Unknown operation: unknown_op");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WasmSteemError = json_err.into();
        assert!(matches!(err, WasmSteemError::Json(_)));
    }

    #[test]
    fn test_from_url_error() {
        let err: WasmSteemError = url::Url::parse("not a uri").unwrap_err().into();
        assert!(err.to_string().starts_with("Invalid URI"));
    }
}
