//! Canonical signing URIs
//!
//! A signing request is a transaction (or one or more operations) packed as
//! URL-safe base64 JSON into a `steem://sign/...` URI:
//!
//! ```text
//! steem://sign/tx/<payload>[?params]    full transaction
//! steem://sign/op/<payload>[?params]    single operation
//! steem://sign/ops/<payload>[?params]   operation list
//! ```
//!
//! Params are `cb` (base64 callback URL), `nb` (do not broadcast) and
//! `s` (preferred signer).

use crate::b64u;
use crate::error::WasmSteemError;
use crate::types::{Operation, Payload, Transaction};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use url::{form_urlencoded, Url};

pub const SCHEME: &str = "steem";
const SIGN_HOST: &str = "sign";

/// Placeholders filled in from chain state just before signing
const TX_TEMPLATE_FIELDS: [(&str, &str); 3] = [
    ("ref_block_num", "__ref_block_num"),
    ("ref_block_prefix", "__ref_block_prefix"),
    ("expiration", "__expiration"),
];

/// Characters `encodeURIComponent` leaves as-is
const CALLBACK_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Options carried alongside the transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// Where to send the host after signing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback: Option<String>,
    /// Sign only, do not broadcast
    #[serde(default)]
    pub no_broadcast: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<String>,
}

impl RequestParams {
    pub fn with_callback(callback: Option<String>) -> Self {
        RequestParams {
            callback,
            ..Default::default()
        }
    }
}

/// Decoded signing URI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SigningRequest {
    pub tx: Transaction,
    pub params: RequestParams,
}

pub fn encode_tx(tx: &Transaction, params: &RequestParams) -> Result<String, WasmSteemError> {
    Ok(sign_uri("tx", &serde_json::to_string(tx)?, params))
}

pub fn encode_op(op: &Operation, params: &RequestParams) -> Result<String, WasmSteemError> {
    Ok(sign_uri("op", &serde_json::to_string(op)?, params))
}

/// Encode an operation list; a single operation uses the `op` form
pub fn encode_ops(ops: &[Operation], params: &RequestParams) -> Result<String, WasmSteemError> {
    if let [op] = ops {
        return encode_op(op, params);
    }
    Ok(sign_uri("ops", &serde_json::to_string(ops)?, params))
}

fn sign_uri(kind: &str, payload: &str, params: &RequestParams) -> String {
    format!(
        "{}://{}/{}/{}{}",
        SCHEME,
        SIGN_HOST,
        kind,
        b64u::encode(payload),
        encode_params(params)
    )
}

fn encode_params(params: &RequestParams) -> String {
    let mut out = Vec::new();
    if let Some(callback) = &params.callback {
        out.push(format!("cb={}", b64u::encode(callback)));
    }
    if params.no_broadcast {
        out.push("nb".to_string());
    }
    if let Some(signer) = &params.signer {
        let signer: String = form_urlencoded::byte_serialize(signer.as_bytes()).collect();
        out.push(format!("s={}", signer));
    }
    if out.is_empty() {
        String::new()
    } else {
        format!("?{}", out.join("&"))
    }
}

/// Decode a `steem://sign/...` URI
pub fn decode(uri: &str) -> Result<SigningRequest, WasmSteemError> {
    let url = Url::parse(uri)?;
    if url.scheme() != SCHEME {
        return Err(WasmSteemError::InvalidUri(format!(
            "Invalid protocol, expected '{}:' got '{}:'",
            SCHEME,
            url.scheme()
        )));
    }
    if url.host_str() != Some(SIGN_HOST) {
        return Err(WasmSteemError::InvalidUri(format!(
            "Invalid action, expected '{}' got {:?}",
            SIGN_HOST,
            url.host_str()
        )));
    }

    let segments: Vec<&str> = url
        .path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default();
    let (kind, raw_payload) = match segments.as_slice() {
        [kind, payload] => (*kind, *payload),
        _ => {
            return Err(WasmSteemError::InvalidUri(
                "Invalid request, expected a type and a payload".to_string(),
            ))
        }
    };

    let payload: Value = serde_json::from_str(&b64u::decode(raw_payload)?)?;
    let tx = match kind {
        "tx" => serde_json::from_value(payload)?,
        "op" => tx_template(vec![serde_json::from_value(payload)?]),
        "ops" => tx_template(serde_json::from_value(payload)?),
        other => {
            return Err(WasmSteemError::InvalidUri(format!(
                "Invalid signing type '{}'",
                other
            )))
        }
    };

    Ok(SigningRequest {
        tx,
        params: decode_params(&url)?,
    })
}

fn tx_template(operations: Vec<Operation>) -> Transaction {
    let mut extra = Payload::new();
    for (field, placeholder) in TX_TEMPLATE_FIELDS {
        extra.insert(field.to_string(), json!(placeholder));
    }
    extra.insert("extensions".to_string(), json!([]));
    Transaction { operations, extra }
}

fn decode_params(url: &Url) -> Result<RequestParams, WasmSteemError> {
    let mut params = RequestParams::default();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "cb" => params.callback = Some(b64u::decode(&value)?),
            "nb" => params.no_broadcast = true,
            "s" => params.signer = Some(value.into_owned()),
            _ => {}
        }
    }
    Ok(params)
}

/// Values substituted into a callback URL after signing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallbackContext {
    /// Transaction signature
    #[serde(default)]
    pub sig: Option<String>,
    /// Transaction id
    #[serde(default)]
    pub id: Option<String>,
    /// Block number the transaction was included in
    #[serde(default)]
    pub block: Option<u64>,
    /// Index of the transaction within the block
    #[serde(default)]
    pub txn: Option<u32>,
}

/// Fill `{{sig}}`, `{{id}}`, `{{block}}` and `{{txn}}` in a callback URL
///
/// Values are percent-encoded like `encodeURIComponent`; missing values
/// become empty strings.
pub fn resolve_callback(template: &str, ctx: &CallbackContext) -> String {
    let values = [
        ("{{sig}}", ctx.sig.clone()),
        ("{{id}}", ctx.id.clone()),
        ("{{block}}", ctx.block.map(|b| b.to_string())),
        ("{{txn}}", ctx.txn.map(|t| t.to_string())),
    ];
    values
        .iter()
        .fold(template.to_string(), |url, (placeholder, value)| {
            let encoded = utf8_percent_encode(value.as_deref().unwrap_or_default(), CALLBACK_VALUE);
            url.replace(placeholder, &encoded.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamedOperation;
    use serde_json::json;

    fn vote() -> Operation {
        serde_json::from_value(json!(["vote", { "voter": "alice", "author": "bob", "permlink": "test", "weight": 10000 }]))
            .unwrap()
    }

    #[test]
    fn test_encode_single_op_uses_op_form() {
        let uri = encode_ops(&[vote()], &RequestParams::default()).unwrap();
        assert!(uri.starts_with("steem://sign/op/"));
        assert!(!uri.contains('?'));
    }

    #[test]
    fn test_encode_params() {
        let params = RequestParams {
            callback: Some("https://example.com/done".to_string()),
            no_broadcast: true,
            signer: Some("alice".to_string()),
        };
        let uri = encode_op(&vote(), &params).unwrap();
        let query = uri.split_once('?').unwrap().1;
        assert_eq!(
            query,
            format!("cb={}&nb&s=alice", b64u::encode("https://example.com/done"))
        );
    }

    #[test]
    fn test_decode_op_builds_template() {
        let uri = encode_op(&vote(), &RequestParams::with_callback(Some("https://x.io".into()))).unwrap();
        let request = decode(&uri).unwrap();

        assert_eq!(request.tx.operations, vec![vote()]);
        assert_eq!(request.tx.extra["ref_block_num"], "__ref_block_num");
        assert_eq!(request.tx.extra["expiration"], "__expiration");
        assert_eq!(request.tx.extra["extensions"], json!([]));
        assert_eq!(request.params.callback.as_deref(), Some("https://x.io"));
        assert!(!request.params.no_broadcast);
    }

    #[test]
    fn test_ops_roundtrip() {
        let transfer: Operation =
            serde_json::from_value(json!(["transfer", { "from": "a", "to": "b", "amount": "1.000 STEEM" }])).unwrap();
        let ops = vec![vote(), transfer];
        let params = RequestParams {
            callback: None,
            no_broadcast: true,
            signer: Some("alice".to_string()),
        };
        let uri = encode_ops(&ops, &params).unwrap();
        assert!(uri.starts_with("steem://sign/ops/"));

        let request = decode(&uri).unwrap();
        assert_eq!(request.tx.operations, ops);
        assert_eq!(request.params, params);
    }

    #[test]
    fn test_tx_roundtrip() {
        let tx: Transaction = serde_json::from_value(json!({
            "ref_block_num": 1234,
            "ref_block_prefix": 5678,
            "expiration": "2020-01-01T00:00:00",
            "extensions": [],
            "operations": [["vote", { "voter": "alice" }]]
        }))
        .unwrap();
        let request = decode(&encode_tx(&tx, &RequestParams::default()).unwrap()).unwrap();
        assert_eq!(request.tx, tx);
        assert_eq!(request.tx.operations[0].name(), "vote");
    }

    #[test]
    fn test_decode_rejects_foreign_uris() {
        assert!(decode("https://sign/op/e30.").is_err());
        assert!(decode("steem://verify/op/e30.").is_err());
        assert!(decode("steem://sign/op").is_err());
        assert!(decode("steem://sign/what/e30.").is_err());
        assert!(decode("not a uri").is_err());
    }

    #[test]
    fn test_resolve_callback() {
        let ctx = CallbackContext {
            sig: Some("abc/=+".to_string()),
            id: Some("deadbeef".to_string()),
            block: Some(42),
            txn: None,
        };
        assert_eq!(
            resolve_callback("https://x.io/?s={{sig}}&id={{id}}&b={{block}}&t={{txn}}", &ctx),
            "https://x.io/?s=abc%2F%3D%2B&id=deadbeef&b=42&t="
        );
    }

    #[test]
    fn test_resolve_callback_escapes_like_uri_component() {
        let ctx = CallbackContext {
            sig: Some("a b!~*'()-_.".to_string()),
            id: Some("é&#".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_callback("app://done?sig={{sig}}&id={{id}}", &ctx),
            "app://done?sig=a%20b!~*'()-_.&id=%C3%A9%26%23"
        );
    }
}
