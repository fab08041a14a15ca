//! Records and keyed collections.

use std::collections::BTreeMap;

use serde_json::Value;

/// One row as returned by the API: a JSON object.
pub type Record = Value;

/// Records keyed by composite index. At most one record per key.
pub type Collection = BTreeMap<String, Record>;

/// Renders one primary value as key text.
///
/// Strings are used verbatim; everything else uses its compact JSON text,
/// so `null` becomes `null` and `42` becomes `42`.
pub fn key_fragment(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Extracts the records carried by a response body.
///
/// An array yields its elements, an object yields itself, anything else
/// yields nothing.
pub fn records_from_response(body: Value) -> Vec<Record> {
    match body {
        Value::Array(records) => records,
        record @ Value::Object(_) => vec![record],
        Value::Null => Vec::new(),
        other => {
            tracing::warn!(
                target: "collection_sync::record",
                body = %other,
                "response body is neither an array nor an object; ignoring"
            );
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_key_fragment() {
        assert_eq!(key_fragment(&json!("abc")), "abc");
        assert_eq!(key_fragment(&json!(42)), "42");
        assert_eq!(key_fragment(&json!(1.5)), "1.5");
        assert_eq!(key_fragment(&json!(true)), "true");
        assert_eq!(key_fragment(&Value::Null), "null");
        assert_eq!(key_fragment(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_records_from_response() {
        assert_eq!(records_from_response(json!([{"id": 1}, {"id": 2}])).len(), 2);
        assert_eq!(records_from_response(json!({"id": 1})), vec![json!({"id": 1})]);
        assert!(records_from_response(Value::Null).is_empty());
        assert!(records_from_response(json!("oops")).is_empty());
    }
}
