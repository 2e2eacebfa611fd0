//! WASM bindings for host environment detection

use crate::environment::{detect, HostHints};
use crate::wasm::{from_js, to_js};
use wasm_bindgen::prelude::*;

/// Namespace for environment detection
#[wasm_bindgen]
pub struct EnvironmentNamespace;

#[wasm_bindgen]
impl EnvironmentNamespace {
    /// Classify the host from `{ userAgent, extensionRuntime }`
    ///
    /// # Returns
    /// One of "extension", "miniProgram", "androidWebView", "iosWebView", "browser"
    pub fn detect(hints: JsValue) -> Result<JsValue, JsValue> {
        let hints: HostHints = from_js(hints, "host hints")?;
        to_js(&detect(&hints))
    }

    /// Classify the host from a user-agent string alone
    #[wasm_bindgen(js_name = detectUserAgent)]
    pub fn detect_user_agent(user_agent: &str) -> Result<JsValue, JsValue> {
        to_js(&detect(&HostHints::from_user_agent(user_agent)))
    }

    #[wasm_bindgen(js_name = isMobileWebView)]
    pub fn is_mobile_webview(user_agent: &str) -> bool {
        detect(&HostHints::from_user_agent(user_agent)).is_mobile_webview()
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::environment::HostEnvironment;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_detect_user_agent() {
        let env = EnvironmentNamespace::detect_user_agent("Mozilla/5.0 (Linux; Android 10; K; wv)").unwrap();
        let env: HostEnvironment = serde_wasm_bindgen::from_value(env).unwrap();
        assert_eq!(env, HostEnvironment::AndroidWebView);
    }
}
