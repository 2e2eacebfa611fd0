//! WASM bindings for transaction processing and authority resolution

use crate::authority::resolve_authority;
use crate::processor::process_transaction;
use crate::types::{ConversionContext, DynamicGlobalProperties, Transaction, TransactionEnvelope};
use crate::wasm::registry::RegistryJs;
use crate::wasm::{from_js, to_js};
use wasm_bindgen::prelude::*;

/// Namespace for transaction operations
#[wasm_bindgen]
pub struct TransactionNamespace;

#[wasm_bindgen]
impl TransactionNamespace {
    /// Coerce every operation of a transaction envelope for display/signing
    ///
    /// # Arguments
    /// * `registry` - Operation schemas
    /// * `envelope` - `{ tx: { operations: [[name, payload], ...], ... }, ... }`
    /// * `context` - `{ vestsToSP: number }`
    ///
    /// Throws if an operation is not in the registry.
    #[wasm_bindgen(js_name = processTransaction)]
    pub fn process_transaction_wasm(
        registry: &RegistryJs,
        envelope: JsValue,
        context: JsValue,
    ) -> Result<JsValue, JsValue> {
        let envelope: TransactionEnvelope = from_js(envelope, "envelope")?;
        let context: ConversionContext = from_js(context, "context")?;
        let processed = process_transaction(registry.inner(), &envelope, &context)?;
        to_js(&processed)
    }

    /// Minimum authority ("posting" | "active") needed to sign `tx`
    ///
    /// Returns undefined when no operation requires an authority.
    #[wasm_bindgen(js_name = resolveAuthority)]
    pub fn resolve_authority_wasm(registry: &RegistryJs, tx: JsValue) -> Result<Option<String>, JsValue> {
        let tx: Transaction = from_js(tx, "transaction")?;
        Ok(resolve_authority(registry.inner(), &tx).map(|a| a.as_str().to_string()))
    }

    /// Derive `{ vestsToSP }` from chain dynamic global properties
    #[wasm_bindgen(js_name = conversionContext)]
    pub fn conversion_context(props: JsValue) -> Result<JsValue, JsValue> {
        let props: DynamicGlobalProperties = from_js(props, "global properties")?;
        to_js(&ConversionContext::from_global_properties(&props)?)
    }
}
