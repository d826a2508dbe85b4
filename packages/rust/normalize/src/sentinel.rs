//! Detection of "unknown" / "not applicable" placeholder values.

use serde_json::Value;

/// Substrings that mark a string value as carrying no information.
const SENTINEL_MARKERS: [&str; 2] = ["unknown", "n/a"];

/// Returns `true` when `value` is a string whose lowercased text contains
/// `"unknown"` or `"n/a"`.
///
/// Anything that is not a string (numbers, booleans, null, lists, records)
/// is never a sentinel.
pub fn is_unknown(value: &Value) -> bool {
    match value {
        Value::String(text) => {
            let lowered = text.to_lowercase();
            SENTINEL_MARKERS
                .iter()
                .any(|marker| lowered.contains(marker))
        }
        _ => false,
    }
}
