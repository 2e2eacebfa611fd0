//! WASM bindings for wasm-steem
//!
//! This module contains thin wrappers with #[wasm_bindgen] that delegate
//! to the core Rust implementations.

pub mod environment;
pub mod registry;
pub mod transaction;
pub mod uri;

// Re-export WASM types
pub use environment::EnvironmentNamespace;
pub use registry::RegistryJs;
pub use transaction::TransactionNamespace;
pub use uri::UriNamespace;

use serde::{de::DeserializeOwned, Serialize};
use wasm_bindgen::prelude::*;

/// Route `log` output to the browser console
///
/// `level` is one of "error", "warn", "info", "debug", "trace" (default "warn").
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = initLogger)]
pub fn init_logger(level: Option<String>) {
    let level = level
        .and_then(|l| l.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Warn);
    wasm_logger::init(wasm_logger::Config::new(level));
}

/// Serialize to a plain JS value (objects, not `Map`s)
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}
