//! Encoding of request parameters into `ArcGIS` REST form/query pairs.
//!
//! The REST API does not accept nested structures in query strings:
//! arrays of scalars are sent comma-separated, anything structured is sent
//! as a JSON string, and nulls are omitted entirely.

use std::collections::BTreeMap;

use serde_json::Value;

/// Encodes params into `(key, value)` pairs ready for a query string or a
/// form body. Pairs are ordered by key.
#[must_use]
pub fn encode_params(params: &BTreeMap<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| encode_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn encode_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(_) | Value::Number(_) | Value::Object(_) => Some(value.to_string()),
        Value::Array(items) => {
            if items
                .iter()
                .any(|item| matches!(item, Value::Object(_) | Value::Array(_)))
            {
                Some(value.to_string())
            } else {
                Some(
                    items
                        .iter()
                        .filter_map(encode_value)
                        .collect::<Vec<_>>()
                        .join(","),
                )
            }
        }
    }
}
