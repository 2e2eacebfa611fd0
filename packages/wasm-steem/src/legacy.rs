//! Legacy signing links
//!
//! Older clients link to signing pages with a query-string form such as
//! `steem://transfer?to=bob&amount=1.000%20STEEM&redirect_uri=...` or
//! `https://host/sign/transfer?...`. These are resolved against the schema
//! registry and re-encoded as canonical `steem://sign/op/...` URIs.

use crate::error::WasmSteemError;
use crate::registry::{FieldType, OperationRegistry};
use crate::types::{Operation, Payload};
use crate::uri::{self, RequestParams, SigningRequest};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// Query key holding the callback URL
const REDIRECT_URI: &str = "redirect_uri";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranscodeError {
    /// Not parseable as a URI, or no operation segment
    #[error("Malformed legacy URI: {0}")]
    Malformed(String),
    /// Operation is not in the registry
    #[error("Unrecognized operation: {0}")]
    NotRecognized(String),
    /// Canonical encode/decode failed
    #[error("Failed to encode signing URI: {0}")]
    Encode(#[from] WasmSteemError),
}

/// Canonical URI together with its decoded form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRequest {
    pub uri: String,
    pub request: SigningRequest,
}

/// Convert a legacy signing link into a canonical signing URI
pub fn transcode(
    registry: &OperationRegistry,
    legacy_uri: &str,
) -> Result<CanonicalRequest, TranscodeError> {
    let url = Url::parse(legacy_uri).map_err(|e| TranscodeError::Malformed(e.to_string()))?;
    let segment = operation_segment(&url)
        .ok_or_else(|| TranscodeError::Malformed("missing operation name".to_string()))?;
    let name = to_snake_case(&segment);
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();

    let Some(op_schema) = registry.get(&name) else {
        log::debug!("legacy link names unknown operation '{}'", name);
        return Err(TranscodeError::NotRecognized(name));
    };

    let mut params = Payload::new();
    for (key, spec) in &op_schema.schema {
        let Some(raw) = query.get(key) else {
            continue;
        };
        let value = match spec.field_type {
            FieldType::Array | FieldType::Object => {
                serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.clone()))
            }
            FieldType::Bool => Value::Bool(matches!(raw.as_str(), "true" | "1")),
            _ => Value::String(raw.clone()),
        };
        params.insert(key.clone(), value);
    }

    let envelope = RequestParams::with_callback(query.get(REDIRECT_URI).cloned());
    let uri = uri::encode_op(&Operation(name, params), &envelope)?;
    let request = uri::decode(&uri)?;
    log::debug!("transcoded legacy link to {}", uri);

    Ok(CanonicalRequest { uri, request })
}

/// Segment of the link naming the operation
///
/// Web links carry it in the path, app links in the host position; in both
/// a leading `sign` is skipped.
fn operation_segment(url: &Url) -> Option<String> {
    let host = match url.scheme() {
        "http" | "https" => None,
        _ => url.host_str().filter(|host| !host.is_empty()),
    };
    let mut segments = host
        .into_iter()
        .chain(url.path().split('/').filter(|s| !s.is_empty()));
    let segment = match segments.next()? {
        "sign" => segments.next(),
        first => Some(first),
    };
    segment.map(str::to_string)
}

/// `transferToVesting`, `transfer-to-vesting` -> `transfer_to_vesting`
pub(crate) fn to_snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower) {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(c.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words.join("_")
}
