//! Small helpers for walking decoded JSON trees.

use crate::error::{CodecError, CodecResult};
use serde_json::{Map, Value};

/// Requires a value to be a JSON object.
pub(crate) fn expect_object<'a>(
    value: &'a Value,
    what: &str,
) -> CodecResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| CodecError::invalid_structure(format!("{what} must be a JSON object")))
}

/// Requires a string field on an object.
pub(crate) fn require_str<'a>(
    map: &'a Map<String, Value>,
    key: &str,
    what: &str,
) -> CodecResult<&'a str> {
    map.get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| CodecError::invalid_structure(format!("{what} requires string {key:?}")))
}

/// Reads an optional string field.
pub(crate) fn optional_str<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Reads an optional unsigned integer field.
pub(crate) fn optional_u64(map: &Map<String, Value>, key: &str) -> Option<u64> {
    map.get(key).and_then(Value::as_u64)
}

/// Requires a float field on an object.
pub(crate) fn require_f64(map: &Map<String, Value>, key: &str, what: &str) -> CodecResult<f64> {
    map.get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| CodecError::invalid_structure(format!("{what} requires number {key:?}")))
}

/// Reads an optional array field; a missing field is an empty slice.
pub(crate) fn optional_array<'a>(map: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    map.get(key).and_then(Value::as_array).map_or(&[], |v| v)
}

/// Reads an optional object field; a missing field decodes as empty.
pub(crate) fn optional_object<'a>(
    map: &'a Map<String, Value>,
    key: &str,
) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}
