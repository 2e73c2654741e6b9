//! JSON conversions for coerce-core values.
//!
//! This crate bridges JSON records and coerce-core's value types.
//!
//! # Modules
//!
//! - [`forward`] - CoercedValue → JSON value conversion
//! - [`reverse`] - JSON value → DynamicValue conversion
//!
//! # Example
//!
//! ```ignore
//! use coerce_core::{CoercedValue, FieldType};
//! use json_values::{json_to_dynamic, JsonValue};
//!
//! // Reverse: JSON value → DynamicValue
//! let value = json_to_dynamic(serde_json::json!("45.0,-122.0"));
//! let point = FieldType::GeoPoint.coerce(&value).unwrap();
//!
//! // Forward: CoercedValue → JSON value
//! let json: JsonValue = point.into();
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{coerced_to_json, normalized_to_json, JsonValue};
pub use reverse::{document_from_json, document_from_str, json_to_dynamic, JsonValueError};
