//! Index field types.
//!
//! `FieldType` names the type a field is declared with in an index schema.
//! Each field type maps onto exactly one coercer.
//!
//! # YAML Format
//!
//! ```yaml
//! type: text
//! type: numeric
//! type: geo_point
//! ```

use crate::coerce;
use crate::error::Result;
use crate::geo;
use crate::values::{CoercedValue, DynamicValue};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Declared type of an index field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Analyzed full text
    Text,

    /// Exact-match text
    Keyword,

    /// 64-bit float
    Numeric,

    /// 64-bit unsigned integer
    Unsigned,

    /// Native signed integer
    Integer,

    /// Boolean
    Bool,

    /// Latitude/longitude pair
    GeoPoint,
}

impl FieldType {
    pub const ALL: [FieldType; 7] = [
        FieldType::Text,
        FieldType::Keyword,
        FieldType::Numeric,
        FieldType::Unsigned,
        FieldType::Integer,
        FieldType::Bool,
        FieldType::GeoPoint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Keyword => "keyword",
            FieldType::Numeric => "numeric",
            FieldType::Unsigned => "unsigned",
            FieldType::Integer => "integer",
            FieldType::Bool => "bool",
            FieldType::GeoPoint => "geo_point",
        }
    }

    /// Coerce a value into this field type.
    pub fn coerce(&self, value: &DynamicValue) -> Result<CoercedValue> {
        Ok(match self {
            FieldType::Text | FieldType::Keyword => CoercedValue::Text(coerce::to_text(value)),
            FieldType::Numeric => CoercedValue::Float(coerce::to_float(value)?),
            FieldType::Unsigned => CoercedValue::UnsignedInt(coerce::to_unsigned(value)?),
            FieldType::Integer => CoercedValue::Int(coerce::to_int(value)?),
            FieldType::Bool => CoercedValue::Bool(coerce::to_bool(value)?),
            FieldType::GeoPoint => CoercedValue::GeoPoint(geo::to_geo_point(value)?),
        })
    }

    /// Pick a field type for a field that has no declared mapping.
    ///
    /// Returns `None` for values that cannot be mapped dynamically (null,
    /// bytes, arrays and objects).
    pub fn infer(value: &DynamicValue) -> Option<FieldType> {
        match value {
            DynamicValue::String(_) => Some(FieldType::Text),
            DynamicValue::Float64(_)
            | DynamicValue::UInt64(_)
            | DynamicValue::Int64(_)
            | DynamicValue::Int(_) => Some(FieldType::Numeric),
            DynamicValue::Bool(_) => Some(FieldType::Bool),
            DynamicValue::Null
            | DynamicValue::Bytes(_)
            | DynamicValue::Array(_)
            | DynamicValue::Object(_) => None,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown field type: {s}"))
    }
}
