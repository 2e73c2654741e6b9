//! Value representations for field coercion.
//!
//! [`DynamicValue`] is the loosely-typed value an ingestion pipeline decodes
//! from a record. [`CoercedValue`] is what comes out once a value has been
//! forced into one of the index field types.

use crate::coerce;
use crate::error::Result;
use crate::geo::{self, GeoPoint};
use std::collections::BTreeMap;
use std::fmt;

/// Loosely-typed value decoded from an input record.
///
/// Exactly one variant is active. The scalar variants (`String` through
/// `Bool`) each have a defined mapping to every target type; `Null`,
/// `Bytes`, `Array` and `Object` are only accepted by [`coerce::to_text`].
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    /// UTF-8 text
    String(String),

    /// 64-bit floating point
    Float64(f64),

    /// 64-bit unsigned integer
    UInt64(u64),

    /// 64-bit signed integer
    Int64(i64),

    /// Native-width signed integer
    Int(isize),

    /// Boolean value
    Bool(bool),

    /// Explicit null
    Null,

    /// Raw binary data
    Bytes(Vec<u8>),

    /// Ordered list of values
    Array(Vec<DynamicValue>),

    /// Nested record
    Object(BTreeMap<String, DynamicValue>),
}

impl DynamicValue {
    /// Name of the active variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Float64(_) => "float64",
            Self::UInt64(_) => "uint64",
            Self::Int64(_) => "int64",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Null => "null",
            Self::Bytes(_) => "bytes",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this is one of the scalar variants the coercers understand.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::String(_)
                | Self::Float64(_)
                | Self::UInt64(_)
                | Self::Int64(_)
                | Self::Int(_)
                | Self::Bool(_)
        )
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn to_text(&self) -> String {
        coerce::to_text(self)
    }

    pub fn to_float(&self) -> Result<f64> {
        coerce::to_float(self)
    }

    pub fn to_unsigned(&self) -> Result<u64> {
        coerce::to_unsigned(self)
    }

    pub fn to_int(&self) -> Result<isize> {
        coerce::to_int(self)
    }

    pub fn to_bool(&self) -> Result<bool> {
        coerce::to_bool(self)
    }

    pub fn to_geo_point(&self) -> Result<GeoPoint> {
        geo::to_geo_point(self)
    }
}

/// Generic rendering used by [`coerce::to_text`]. Never fails.
impl fmt::Display for DynamicValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Float64(v) => write!(f, "{v}"),
            Self::UInt64(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Null => f.write_str("null"),
            Self::Bytes(b) => write!(f, "{b:?}"),
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Object(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for DynamicValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for DynamicValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for DynamicValue {
    fn from(value: f64) -> Self {
        Self::Float64(value)
    }
}

impl From<u64> for DynamicValue {
    fn from(value: u64) -> Self {
        Self::UInt64(value)
    }
}

impl From<i64> for DynamicValue {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<i32> for DynamicValue {
    fn from(value: i32) -> Self {
        Self::Int64(value as i64)
    }
}

impl From<isize> for DynamicValue {
    fn from(value: isize) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for DynamicValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<u8>> for DynamicValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Vec<DynamicValue>> for DynamicValue {
    fn from(value: Vec<DynamicValue>) -> Self {
        Self::Array(value)
    }
}

impl From<BTreeMap<String, DynamicValue>> for DynamicValue {
    fn from(value: BTreeMap<String, DynamicValue>) -> Self {
        Self::Object(value)
    }
}

/// A value that has been coerced into an index field type.
#[derive(Debug, Clone, PartialEq)]
pub enum CoercedValue {
    Text(String),
    Float(f64),
    UnsignedInt(u64),
    Int(isize),
    Bool(bool),
    GeoPoint(GeoPoint),
}

impl CoercedValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UnsignedInt(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<isize> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_geo_point(&self) -> Option<GeoPoint> {
        match self {
            Self::GeoPoint(p) => Some(*p),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_names() {
        assert_eq!(DynamicValue::from("x").type_name(), "string");
        assert_eq!(DynamicValue::from(1.5).type_name(), "float64");
        assert_eq!(DynamicValue::from(1u64).type_name(), "uint64");
        assert_eq!(DynamicValue::from(-1i64).type_name(), "int64");
        assert_eq!(DynamicValue::from(7isize).type_name(), "int");
        assert_eq!(DynamicValue::from(true).type_name(), "bool");
        assert_eq!(DynamicValue::Null.type_name(), "null");
        assert_eq!(DynamicValue::from(vec![1u8]).type_name(), "bytes");
        assert_eq!(DynamicValue::Array(vec![]).type_name(), "array");
        assert_eq!(DynamicValue::Object(BTreeMap::new()).type_name(), "object");
    }

    #[test]
    fn test_display_nested() {
        let mut map = BTreeMap::new();
        map.insert("b".to_string(), DynamicValue::from(2i64));
        map.insert("a".to_string(), DynamicValue::Null);
        let value = DynamicValue::Array(vec![
            DynamicValue::from("x"),
            DynamicValue::from(1.5),
            DynamicValue::Object(map),
        ]);
        assert_eq!(value.to_string(), "[x, 1.5, {a: null, b: 2}]");
    }

    #[test]
    fn test_display_bytes() {
        assert_eq!(DynamicValue::from(b"hi".to_vec()).to_string(), "[104, 105]");
    }

    #[test]
    fn test_is_scalar() {
        assert!(DynamicValue::from(false).is_scalar());
        assert!(!DynamicValue::Null.is_scalar());
        assert!(!DynamicValue::Array(vec![]).is_scalar());
    }

    #[test]
    fn test_method_forms() {
        let value = DynamicValue::from("12");
        assert_eq!(value.as_str(), Some("12"));
        assert_eq!(value.to_text(), "12");
        assert_eq!(value.to_float().unwrap(), 12.0);
        assert_eq!(value.to_unsigned().unwrap(), 12);
        assert_eq!(value.to_int().unwrap(), 12);
        assert!(value.to_bool().is_err());
        assert!(value.to_geo_point().is_err());
        assert_eq!(DynamicValue::from(1u64).as_str(), None);
    }

    #[test]
    fn test_coerced_accessors() {
        assert_eq!(CoercedValue::Int(3).as_int(), Some(3));
        assert_eq!(CoercedValue::Int(3).as_u64(), None);
        assert_eq!(CoercedValue::Text("a".into()).as_text(), Some("a"));
    }
}
