//! WASM bindings for the operation schema registry

use crate::registry::OperationRegistry;
use wasm_bindgen::prelude::*;

/// JavaScript-owned operation registry
#[wasm_bindgen]
pub struct RegistryJs {
    inner: OperationRegistry,
}

#[wasm_bindgen]
impl RegistryJs {
    /// Load a registry from its JSON document
    ///
    /// # Example
    /// ```json
    /// {
    ///   "vote": {
    ///     "authority": "posting",
    ///     "schema": {
    ///       "voter": { "type": "string" },
    ///       "weight": { "type": "int", "defaultValue": 10000 }
    ///     }
    ///   }
    /// }
    /// ```
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<RegistryJs, JsValue> {
        Ok(RegistryJs {
            inner: OperationRegistry::from_json(json)?,
        })
    }

    /// Registry bundled with the module
    pub fn builtin() -> Result<RegistryJs, JsValue> {
        Ok(RegistryJs {
            inner: OperationRegistry::builtin()?,
        })
    }

    pub fn has(&self, name: &str) -> bool {
        self.inner.contains(name)
    }

    /// "posting", "active" or undefined
    #[wasm_bindgen(js_name = authorityOf)]
    pub fn authority_of(&self, name: &str) -> Option<String> {
        self.inner
            .authority_of(name)
            .map(|authority| authority.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn names(&self) -> Vec<String> {
        self.inner.names().map(str::to_string).collect()
    }
}

// Non-WASM methods for internal use
impl RegistryJs {
    pub fn inner(&self) -> &OperationRegistry {
        &self.inner
    }
}
