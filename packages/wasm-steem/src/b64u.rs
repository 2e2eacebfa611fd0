//! URL-safe base64
//!
//! Standard base64 with `+`, `/` and `=` swapped for `-`, `_` and `.` so the
//! result can sit in a URI path segment or query value.

use crate::error::WasmSteemError;
use base64::prelude::*;

/// Standard alphabet character and its URL-safe replacement
const SUBSTITUTIONS: [(char, char); 3] = [('+', '-'), ('/', '_'), ('=', '.')];

fn substitute(input: &str, to_url_safe: bool) -> String {
    input
        .chars()
        .map(|c| {
            SUBSTITUTIONS
                .iter()
                .find_map(|&(std, safe)| match to_url_safe {
                    true if c == std => Some(safe),
                    false if c == safe => Some(std),
                    _ => None,
                })
                .unwrap_or(c)
        })
        .collect()
}

/// Encode UTF-8 text as URL-safe base64
pub fn encode(input: &str) -> String {
    substitute(&BASE64_STANDARD.encode(input), true)
}

/// Decode URL-safe base64 back into UTF-8 text
pub fn decode(input: &str) -> Result<String, WasmSteemError> {
    let bytes = BASE64_STANDARD.decode(substitute(input, false))?;
    Ok(String::from_utf8(bytes)?)
}
