//! Document normalization.
//!
//! Applies an [`IndexSchema`] to a decoded record: declared fields are
//! coerced to their declared type, undeclared fields are handled according
//! to the schema's [`DynamicMapping`].

use crate::error::CoerceError;
use crate::schema::{DynamicMapping, FieldMapping, IndexSchema};
use crate::types::FieldType;
use crate::values::{CoercedValue, DynamicValue};
use std::collections::BTreeMap;

/// A decoded record, keyed by field name.
pub type Document = BTreeMap<String, DynamicValue>;

/// Errors that reject a whole document.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DocumentError {
    /// A field value could not be coerced to its field type.
    #[error("Field '{field}' ({field_type}): {source}")]
    Field {
        field: String,
        field_type: FieldType,
        #[source]
        source: CoerceError,
    },

    /// A field is not declared and the index does not allow dynamic fields.
    #[error("Field '{field}' is not declared in strict index '{index}'")]
    UndeclaredField { index: String, field: String },
}

/// Result of normalizing one document.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedDocument {
    /// Coerced field values
    pub fields: BTreeMap<String, CoercedValue>,

    /// Mappings inferred for undeclared fields
    pub new_mappings: Vec<FieldMapping>,

    /// Fields that were dropped (nulls, unmappable values, disabled dynamic mapping)
    pub skipped_fields: Vec<String>,
}

impl NormalizedDocument {
    pub fn get(&self, field: &str) -> Option<&CoercedValue> {
        self.fields.get(field)
    }
}

/// Normalize one document against a schema.
///
/// Null values are dropped rather than coerced. The first field that fails
/// to coerce rejects the document.
pub fn normalize_document(
    schema: &IndexSchema,
    document: &Document,
) -> Result<NormalizedDocument, DocumentError> {
    let mut normalized = NormalizedDocument::default();

    for (name, value) in document {
        if value.is_null() {
            tracing::debug!("Skipping null field '{name}'");
            normalized.skipped_fields.push(name.clone());
            continue;
        }

        let field_type = match schema.field_type(name) {
            Some(field_type) => field_type,
            None => match schema.dynamic {
                DynamicMapping::Strict => {
                    return Err(DocumentError::UndeclaredField {
                        index: schema.name.clone(),
                        field: name.clone(),
                    });
                }
                DynamicMapping::Disabled => {
                    tracing::debug!("Skipping undeclared field '{name}'");
                    normalized.skipped_fields.push(name.clone());
                    continue;
                }
                DynamicMapping::Enabled => match FieldType::infer(value) {
                    Some(field_type) => {
                        tracing::debug!("Mapped new field '{name}' as {field_type}");
                        normalized
                            .new_mappings
                            .push(FieldMapping::new(name.clone(), field_type));
                        field_type
                    }
                    None => {
                        tracing::debug!(
                            "Cannot map field '{name}' of type {} dynamically",
                            value.type_name()
                        );
                        normalized.skipped_fields.push(name.clone());
                        continue;
                    }
                },
            },
        };

        let coerced = field_type
            .coerce(value)
            .map_err(|source| DocumentError::Field {
                field: name.clone(),
                field_type,
                source,
            })?;
        normalized.fields.insert(name.clone(), coerced);
    }

    Ok(normalized)
}

/// Running counters kept by a [`Normalizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeStats {
    pub documents: usize,
    pub normalized: usize,
    pub rejected: usize,
    pub fields_skipped: usize,
    pub fields_mapped: usize,
}

/// Normalizes a stream of documents, growing the schema with dynamically
/// mapped fields as they are discovered.
#[derive(Debug, Clone)]
pub struct Normalizer {
    schema: IndexSchema,
    fail_fast: bool,
    stats: NormalizeStats,
}

impl Normalizer {
    pub fn new(schema: IndexSchema, fail_fast: bool) -> Self {
        Self {
            schema,
            fail_fast,
            stats: NormalizeStats::default(),
        }
    }

    pub fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    pub fn stats(&self) -> NormalizeStats {
        self.stats
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Normalize the next document.
    ///
    /// In lenient mode a rejected document is logged and `Ok(None)` is
    /// returned; with `fail_fast` the error is returned instead.
    pub fn normalize(
        &mut self,
        document: &Document,
    ) -> Result<Option<NormalizedDocument>, DocumentError> {
        self.stats.documents += 1;

        match normalize_document(&self.schema, document) {
            Ok(normalized) => {
                for mapping in &normalized.new_mappings {
                    // new_mappings only holds names the schema did not declare
                    let added = self.schema.add_field(mapping.name.clone(), mapping.field_type);
                    debug_assert!(added.is_ok(), "mapping for '{}' already declared", mapping.name);
                }
                self.stats.normalized += 1;
                self.stats.fields_skipped += normalized.skipped_fields.len();
                self.stats.fields_mapped += normalized.new_mappings.len();
                Ok(Some(normalized))
            }
            Err(e) => {
                self.stats.rejected += 1;
                if self.fail_fast {
                    return Err(e);
                }
                tracing::warn!("Rejected document {}: {e}", self.stats.documents);
                Ok(None)
            }
        }
    }

    /// Consume the normalizer, returning the (possibly extended) schema.
    pub fn into_schema(self) -> IndexSchema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::geo::GeoPoint;

    fn doc(pairs: &[(&str, DynamicValue)]) -> Document {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn places(dynamic: DynamicMapping) -> IndexSchema {
        IndexSchema::new("places", dynamic)
            .with_field("title", FieldType::Text)
            .unwrap()
            .with_field("visits", FieldType::Unsigned)
            .unwrap()
            .with_field("location", FieldType::GeoPoint)
            .unwrap()
    }

    #[test]
    fn test_declared_fields_coerced() {
        let schema = places(DynamicMapping::Strict);
        let document = doc(&[
            ("title", DynamicValue::from(42i64)),
            ("visits", DynamicValue::from("17")),
            ("location", DynamicValue::from("45.5,-122.6")),
        ]);

        let normalized = normalize_document(&schema, &document).unwrap();
        assert_eq!(normalized.get("title"), Some(&CoercedValue::Text("42".into())));
        assert_eq!(normalized.get("visits"), Some(&CoercedValue::UnsignedInt(17)));
        assert_eq!(
            normalized.get("location"),
            Some(&CoercedValue::GeoPoint(GeoPoint { lat: 45.5, lon: -122.6 }))
        );
        assert!(normalized.new_mappings.is_empty());
    }

    #[test]
    fn test_field_error_names_field() {
        let schema = places(DynamicMapping::Strict);
        let document = doc(&[("location", DynamicValue::from("91,0"))]);

        let err = normalize_document(&schema, &document).unwrap_err();
        match &err {
            DocumentError::Field { field, source, .. } => {
                assert_eq!(field, "location");
                assert_eq!(source.kind(), ErrorKind::Range);
            }
            other => panic!("Expected field error, got {other:?}"),
        }
        assert!(err.to_string().starts_with("Field 'location' (geo_point)"));
    }

    #[test]
    fn test_nulls_dropped() {
        let schema = places(DynamicMapping::Strict);
        let document = doc(&[("visits", DynamicValue::Null)]);

        let normalized = normalize_document(&schema, &document).unwrap();
        assert!(normalized.fields.is_empty());
        assert_eq!(normalized.skipped_fields, vec!["visits".to_string()]);
    }

    #[test]
    fn test_strict_rejects_undeclared() {
        let schema = places(DynamicMapping::Strict);
        let document = doc(&[("extra", DynamicValue::from(true))]);

        let err = normalize_document(&schema, &document).unwrap_err();
        assert!(matches!(err, DocumentError::UndeclaredField { .. }));
    }

    #[test]
    fn test_disabled_skips_undeclared() {
        let schema = places(DynamicMapping::Disabled);
        let document = doc(&[("extra", DynamicValue::from(true))]);

        let normalized = normalize_document(&schema, &document).unwrap();
        assert!(normalized.fields.is_empty());
        assert_eq!(normalized.skipped_fields, vec!["extra".to_string()]);
    }

    #[test]
    fn test_dynamic_infers_mappings() {
        let schema = places(DynamicMapping::Enabled);
        let document = doc(&[
            ("score", DynamicValue::from(3u64)),
            ("tags", DynamicValue::Array(vec![DynamicValue::from("a")])),
            ("note", DynamicValue::from("hi")),
        ]);

        let normalized = normalize_document(&schema, &document).unwrap();
        assert_eq!(normalized.get("score"), Some(&CoercedValue::Float(3.0)));
        assert_eq!(normalized.get("note"), Some(&CoercedValue::Text("hi".into())));
        assert_eq!(
            normalized.new_mappings,
            vec![
                FieldMapping::new("note", FieldType::Text),
                FieldMapping::new("score", FieldType::Numeric),
            ]
        );
        assert_eq!(normalized.skipped_fields, vec!["tags".to_string()]);
    }

    #[test]
    fn test_normalizer_grows_schema() {
        let mut normalizer = Normalizer::new(places(DynamicMapping::Enabled), false);

        let first = doc(&[("score", DynamicValue::from(1.5))]);
        assert!(normalizer.normalize(&first).unwrap().is_some());
        assert_eq!(normalizer.schema().field_type("score"), Some(FieldType::Numeric));

        // score is now numeric, so text that is not a number is rejected
        let second = doc(&[("score", DynamicValue::from("high"))]);
        assert!(normalizer.normalize(&second).unwrap().is_none());

        let stats = normalizer.stats();
        assert_eq!(stats.documents, 2);
        assert_eq!(stats.normalized, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.fields_mapped, 1);
    }

    #[test]
    fn test_normalizer_fail_fast() {
        let mut normalizer = Normalizer::new(places(DynamicMapping::Strict), true);
        assert!(normalizer.fail_fast());
        let bad = doc(&[("visits", DynamicValue::from(-1i64))]);

        let err = normalizer.normalize(&bad).unwrap_err();
        assert!(matches!(err, DocumentError::Field { .. }));
        assert_eq!(normalizer.stats().rejected, 1);
    }

    #[test]
    fn test_normalizer_maps_field_removed_from_schema() {
        let mut schema = places(DynamicMapping::Enabled);
        schema.fields.retain(|field| field.name != "visits");
        let mut normalizer = Normalizer::new(schema, false);

        let document = doc(&[("visits", DynamicValue::from("3"))]);
        let normalized = normalizer.normalize(&document).unwrap().unwrap();
        assert_eq!(normalized.get("visits"), Some(&CoercedValue::Text("3".into())));
        assert_eq!(normalizer.schema().field_type("visits"), Some(FieldType::Text));
        assert_eq!(
            normalizer.schema().field_names(),
            vec!["title", "location", "visits"]
        );
    }
}
