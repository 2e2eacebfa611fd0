//! WASM bindings for signing URIs
//!
//! UriNamespace provides static methods for canonical and legacy signing links

use crate::b64u;
use crate::legacy::transcode;
use crate::types::{Operation, Transaction};
use crate::uri::{self, CallbackContext, RequestParams};
use crate::wasm::registry::RegistryJs;
use crate::wasm::{from_js, to_js};
use wasm_bindgen::prelude::*;

/// Namespace for URI operations
#[wasm_bindgen]
pub struct UriNamespace;

#[wasm_bindgen]
impl UriNamespace {
    /// Convert a legacy query-string signing link into a canonical one
    ///
    /// # Returns
    /// `{ uri, request: { tx, params } }`, or undefined when the link is
    /// malformed or names an operation the registry does not know.
    #[wasm_bindgen(js_name = transcodeLegacy)]
    pub fn transcode_legacy(registry: &RegistryJs, legacy_uri: &str) -> Result<JsValue, JsValue> {
        match transcode(registry.inner(), legacy_uri) {
            Ok(canonical) => to_js(&canonical),
            Err(e) => {
                log::warn!("not a recognized legacy link ({}): {}", legacy_uri, e);
                Ok(JsValue::UNDEFINED)
            }
        }
    }

    /// Encode an operation list as `steem://sign/op(s)/...`
    ///
    /// # Arguments
    /// * `ops` - `[[name, payload], ...]`
    /// * `params` - Optional `{ callback, noBroadcast, signer }`
    #[wasm_bindgen(js_name = encodeOps)]
    pub fn encode_ops(ops: JsValue, params: JsValue) -> Result<String, JsValue> {
        let ops: Vec<Operation> = from_js(ops, "operations")?;
        let params = params_from_js(params)?;
        Ok(uri::encode_ops(&ops, &params)?)
    }

    /// Encode a full transaction as `steem://sign/tx/...`
    #[wasm_bindgen(js_name = encodeTx)]
    pub fn encode_tx(tx: JsValue, params: JsValue) -> Result<String, JsValue> {
        let tx: Transaction = from_js(tx, "transaction")?;
        let params = params_from_js(params)?;
        Ok(uri::encode_tx(&tx, &params)?)
    }

    /// Decode a canonical signing URI into `{ tx, params }`
    pub fn decode(signing_uri: &str) -> Result<JsValue, JsValue> {
        to_js(&uri::decode(signing_uri)?)
    }

    /// Fill `{{sig}}`, `{{id}}`, `{{block}}`, `{{txn}}` in a callback URL
    #[wasm_bindgen(js_name = resolveCallback)]
    pub fn resolve_callback(template: &str, context: JsValue) -> Result<String, JsValue> {
        let context: CallbackContext = from_js(context, "callback context")?;
        Ok(uri::resolve_callback(template, &context))
    }

    /// URL-safe base64 of UTF-8 text
    #[wasm_bindgen(js_name = b64uEncode)]
    pub fn b64u_encode(input: &str) -> String {
        b64u::encode(input)
    }

    #[wasm_bindgen(js_name = b64uDecode)]
    pub fn b64u_decode(input: &str) -> Result<String, JsValue> {
        Ok(b64u::decode(input)?)
    }
}

fn params_from_js(params: JsValue) -> Result<RequestParams, JsValue> {
    if params.is_undefined() || params.is_null() {
        return Ok(RequestParams::default());
    }
    from_js(params, "params")
}
