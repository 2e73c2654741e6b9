//! Reverse conversion: JSON value → DynamicValue.
//!
//! JSON numbers keep the narrowest exact representation: non-negative
//! integers become `UInt64`, negative integers `Int64`, everything else
//! `Float64`.

use coerce_core::{Document, DynamicValue};
use thiserror::Error;

/// Errors that can occur while decoding a JSON record.
#[derive(Debug, Error)]
pub enum JsonValueError {
    /// The input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),

    /// A record must be a JSON object.
    #[error("Expected a JSON object record, got {0}")]
    NotAnObject(&'static str),
}

/// Convert a JSON value to a dynamic value.
pub fn json_to_dynamic(value: serde_json::Value) -> DynamicValue {
    match value {
        serde_json::Value::Null => DynamicValue::Null,
        serde_json::Value::Bool(b) => DynamicValue::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                DynamicValue::UInt64(u)
            } else if let Some(i) = n.as_i64() {
                DynamicValue::Int64(i)
            } else if let Some(f) = n.as_f64() {
                DynamicValue::Float64(f)
            } else {
                DynamicValue::String(n.to_string())
            }
        }
        serde_json::Value::String(s) => DynamicValue::String(s),
        serde_json::Value::Array(arr) => {
            DynamicValue::Array(arr.into_iter().map(json_to_dynamic).collect())
        }
        serde_json::Value::Object(obj) => DynamicValue::Object(
            obj.into_iter()
                .map(|(k, v)| (k, json_to_dynamic(v)))
                .collect(),
        ),
    }
}

/// Convert a JSON object into a document.
pub fn document_from_json(value: serde_json::Value) -> Result<Document, JsonValueError> {
    match value {
        serde_json::Value::Object(obj) => Ok(obj
            .into_iter()
            .map(|(k, v)| (k, json_to_dynamic(v)))
            .collect()),
        other => Err(JsonValueError::NotAnObject(json_type_name(&other))),
    }
}

/// Parse a JSON text (e.g. one JSONL line) into a document.
pub fn document_from_str(text: &str) -> Result<Document, JsonValueError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    document_from_json(value)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
