//! Host environment detection
//!
//! Signing results are relayed differently depending on where the client
//! runs. This only classifies the host; the messaging itself lives with the
//! host-side bridges.

use serde::{Deserialize, Serialize};

/// Where the signing client is running
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HostEnvironment {
    /// Browser extension page
    Extension,
    /// Chat-app mini-program webview
    MiniProgram,
    /// Android app webview
    AndroidWebView,
    /// iOS app webview
    IosWebView,
    /// Plain browser
    Browser,
}

impl HostEnvironment {
    pub fn is_mobile_webview(self) -> bool {
        matches!(
            self,
            HostEnvironment::AndroidWebView | HostEnvironment::IosWebView | HostEnvironment::MiniProgram
        )
    }
}

/// Facts gathered by the host about its runtime
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostHints {
    pub user_agent: String,
    /// An extension runtime (`chrome.runtime.id`) is reachable
    #[serde(default)]
    pub extension_runtime: bool,
}

impl HostHints {
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        HostHints {
            user_agent: user_agent.into(),
            extension_runtime: false,
        }
    }
}

pub fn detect(hints: &HostHints) -> HostEnvironment {
    let ua = hints.user_agent.as_str();
    if hints.extension_runtime {
        HostEnvironment::Extension
    } else if ua.contains("miniProgram") {
        HostEnvironment::MiniProgram
    } else if is_android_webview(ua) {
        HostEnvironment::AndroidWebView
    } else if is_ios_webview(ua) {
        HostEnvironment::IosWebView
    } else {
        HostEnvironment::Browser
    }
}

fn is_android_webview(ua: &str) -> bool {
    // Lollipop+ webviews carry "; wv)", older ones "Version/x.y Chrome/"
    ua.contains("Android") && (ua.contains("; wv)") || (ua.contains("Version/") && ua.contains("Chrome/")))
}

fn is_ios_webview(ua: &str) -> bool {
    ["iPhone", "iPad", "iPod"].iter().any(|device| ua.contains(device)) && !ua.contains("Safari")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(
        "Mozilla/5.0 (Linux; Android 10; K; wv) AppleWebKit/537.36 (KHTML, like Gecko) Version/4.0 Chrome/120.0.0.0 Mobile Safari/537.36",
        HostEnvironment::AndroidWebView
    )]
    #[case(
        "Mozilla/5.0 (Linux; Android 10; K) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36",
        HostEnvironment::Browser
    )]
    #[case(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
        HostEnvironment::IosWebView
    )]
    #[case(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1",
        HostEnvironment::Browser
    )]
    #[case(
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148 MicroMessenger/8.0.40 miniProgram",
        HostEnvironment::MiniProgram
    )]
    #[case(
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
        HostEnvironment::Browser
    )]
    fn test_detect_from_user_agent(#[case] ua: &str, #[case] expected: HostEnvironment) {
        assert_eq!(detect(&HostHints::from_user_agent(ua)), expected);
    }

    #[test]
    fn test_extension_runtime_takes_precedence() {
        let hints = HostHints {
            user_agent: "Mozilla/5.0 (Linux; Android 10; K; wv)".to_string(),
            extension_runtime: true,
        };
        assert_eq!(detect(&hints), HostEnvironment::Extension);
    }

    #[test]
    fn test_is_mobile_webview() {
        assert!(HostEnvironment::IosWebView.is_mobile_webview());
        assert!(!HostEnvironment::Browser.is_mobile_webview());
        assert!(!HostEnvironment::Extension.is_mobile_webview());
    }
}
