//! Dynamic value coercion for index fields.
//!
//! This crate turns loosely-typed values decoded from ingested records into
//! the typed values an index stores:
//!
//! - [`DynamicValue`] - Value as decoded from a record
//! - [`coerce`] - Scalar coercers (text, float, unsigned, int, bool)
//! - [`geo`] - `"lat,lon"` geo point parsing and validation
//! - [`FieldType`] / [`IndexSchema`] - Declared field types loaded from YAML
//! - [`document`] - Whole-record normalization against a schema
//!
//! # Architecture
//!
//! ```text
//! document::normalize_document
//!    │
//!    └─── FieldType::coerce
//!            │
//!            ├─── geo::to_geo_point ──┐
//!            │                        │
//!            └─── coerce::to_* ◄──────┘ (to_text)
//! ```
//!
//! # Example
//!
//! ```rust
//! use coerce_core::{coerce, geo, DynamicValue};
//!
//! assert_eq!(coerce::to_unsigned(&DynamicValue::from("123")).unwrap(), 123);
//! assert_eq!(coerce::to_int(&DynamicValue::from(true)).unwrap(), 1);
//!
//! let point = geo::to_geo_point(&DynamicValue::from("45.0,-122.0")).unwrap();
//! assert_eq!((point.lat, point.lon), (45.0, -122.0));
//! ```

pub mod coerce;
pub mod document;
pub mod error;
pub mod geo;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use coerce::{to_bool, to_float, to_int, to_text, to_unsigned};
pub use document::{
    normalize_document, Document, DocumentError, NormalizeStats, NormalizedDocument, Normalizer,
};
pub use error::{Bound, CoerceError, ErrorKind, Result};
pub use geo::{to_geo_point, GeoPoint};
pub use schema::{DynamicMapping, FieldMapping, IndexSchema, SchemaError};
pub use types::FieldType;
pub use values::{CoercedValue, DynamicValue};
