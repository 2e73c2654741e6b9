//! Forward conversion: CoercedValue → JSON value.

use coerce_core::{CoercedValue, NormalizedDocument};
use serde_json::json;

/// Wrapper for JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<CoercedValue> for JsonValue {
    fn from(value: CoercedValue) -> Self {
        JsonValue(coerced_to_json(&value))
    }
}

/// Convert a coerced value to JSON.
///
/// Geo points become `{"lat": .., "lon": ..}`. Non-finite floats have no
/// JSON representation and become `null`.
pub fn coerced_to_json(value: &CoercedValue) -> serde_json::Value {
    match value {
        CoercedValue::Text(s) => json!(s),
        CoercedValue::Float(f) => float_to_json(*f),
        CoercedValue::UnsignedInt(u) => json!(*u),
        CoercedValue::Int(i) => json!(*i),
        CoercedValue::Bool(b) => json!(*b),
        CoercedValue::GeoPoint(p) => json!({
            "lat": float_to_json(p.lat),
            "lon": float_to_json(p.lon),
        }),
    }
}

/// Convert a normalized document to a JSON object.
pub fn normalized_to_json(document: &NormalizedDocument) -> serde_json::Value {
    let map = document
        .fields
        .iter()
        .map(|(name, value)| (name.clone(), coerced_to_json(value)))
        .collect::<serde_json::Map<_, _>>();
    serde_json::Value::Object(map)
}

fn float_to_json(f: f64) -> serde_json::Value {
    serde_json::Number::from_f64(f)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
