//! Tolerant tag parsing at the storage boundary.
//!
//! Tags are persisted as JSON text. Older rows hold a JSON array, some hold
//! that array double-encoded as a JSON string, and some hold NULL or junk.
//! Everything past this function sees a plain `Vec<String>`.

use serde_json::Value;

/// Parse a stored tag column into a list of tags. Never fails: anything that
/// is not (possibly string-wrapped) JSON array data yields an empty list.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    let raw = match raw {
        Some(r) if !r.trim().is_empty() => r,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => strings_of(items),
        // One level of double encoding: "\"[\\\"seo\\\"]\""
        Ok(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
            Ok(Value::Array(items)) => strings_of(items),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn strings_of(items: Vec<Value>) -> Vec<String> {
    items
        .into_iter()
        .filter_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        })
        .collect()
}
