//! Index schema definitions.
//!
//! An index schema declares the field type of each known field and how
//! fields that are not declared are handled.
//!
//! ## YAML Format
//!
//! ```yaml
//! name: places
//! dynamic: true        # true | false | strict
//! fields:
//!   - name: title
//!     type: text
//!   - name: location
//!     type: geo_point
//! ```

use crate::types::FieldType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// The same field name is declared twice
    #[error("Field '{field}' is declared more than once in index '{index}'")]
    DuplicateField { index: String, field: String },

    /// Field not found in index schema
    #[error("Field '{field}' not found in index '{index}'")]
    FieldNotFound { index: String, field: String },
}

// ============================================================================
// Dynamic Mapping
// ============================================================================

/// How fields that are not declared in the schema are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DynamicRepr", into = "DynamicRepr")]
pub enum DynamicMapping {
    /// Infer a field type from the value and index the field.
    #[default]
    Enabled,

    /// Drop the field.
    Disabled,

    /// Reject the whole document.
    Strict,
}

// `dynamic:` accepts a YAML bool or the string "strict".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DynamicRepr {
    Flag(bool),
    Mode(String),
}

impl TryFrom<DynamicRepr> for DynamicMapping {
    type Error = String;

    fn try_from(repr: DynamicRepr) -> Result<Self, Self::Error> {
        match repr {
            DynamicRepr::Flag(true) => Ok(DynamicMapping::Enabled),
            DynamicRepr::Flag(false) => Ok(DynamicMapping::Disabled),
            DynamicRepr::Mode(mode) => match mode.as_str() {
                "true" => Ok(DynamicMapping::Enabled),
                "false" => Ok(DynamicMapping::Disabled),
                "strict" => Ok(DynamicMapping::Strict),
                other => Err(format!(
                    "invalid dynamic mapping '{other}', expected true, false or strict"
                )),
            },
        }
    }
}

impl From<DynamicMapping> for DynamicRepr {
    fn from(mapping: DynamicMapping) -> Self {
        match mapping {
            DynamicMapping::Enabled => DynamicRepr::Flag(true),
            DynamicMapping::Disabled => DynamicRepr::Flag(false),
            DynamicMapping::Strict => DynamicRepr::Mode("strict".to_string()),
        }
    }
}

// ============================================================================
// Schema Types
// ============================================================================

/// A single declared field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldMapping {
    /// Field name
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl FieldMapping {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Field mappings for one index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexSchema {
    /// Index name
    pub name: String,

    /// Treatment of undeclared fields
    #[serde(default)]
    pub dynamic: DynamicMapping,

    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldMapping>,

    /// Field lookup map (built after deserialization)
    #[serde(skip)]
    field_map: HashMap<String, usize>,
}

impl IndexSchema {
    /// Create an empty schema.
    pub fn new(name: impl Into<String>, dynamic: DynamicMapping) -> Self {
        Self {
            name: name.into(),
            dynamic,
            fields: Vec::new(),
            field_map: HashMap::new(),
        }
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: IndexSchema = serde_yaml::from_str(yaml)?;
        schema.build_field_map()?;
        Ok(schema)
    }

    fn build_field_map(&mut self) -> Result<(), SchemaError> {
        self.field_map.clear();
        for (idx, field) in self.fields.iter().enumerate() {
            if self.field_map.insert(field.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateField {
                    index: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Declare a new field.
    pub fn add_field(
        &mut self,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> Result<(), SchemaError> {
        let name = name.into();
        if self.lookup(&name).is_some() {
            return Err(SchemaError::DuplicateField {
                index: self.name.clone(),
                field: name,
            });
        }
        self.field_map.insert(name.clone(), self.fields.len());
        self.fields.push(FieldMapping::new(name, field_type));
        Ok(())
    }

    /// Builder-style variant of [`IndexSchema::add_field`].
    pub fn with_field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
    ) -> Result<Self, SchemaError> {
        self.add_field(name, field_type)?;
        Ok(self)
    }

    // `fields` is public, so the map may be stale after direct edits
    fn lookup(&self, name: &str) -> Option<&FieldMapping> {
        self.field_map
            .get(name)
            .and_then(|&idx| self.fields.get(idx))
            .filter(|field| field.name == name)
            .or_else(|| self.fields.iter().find(|field| field.name == name))
    }

    /// Get a declared field by name.
    pub fn get_field(&self, name: &str) -> Result<&FieldMapping, SchemaError> {
        self.lookup(name).ok_or_else(|| SchemaError::FieldNotFound {
            index: self.name.clone(),
            field: name.to_string(),
        })
    }

    /// Declared type of a field, if any.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.lookup(name).map(|field| field.field_type)
    }

    /// Get all declared field names in declaration order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_SCHEMA: &str = r#"
name: places
dynamic: strict
fields:
  - name: title
    type: text
  - name: rating
    type: numeric
  - name: visits
    type: unsigned
  - name: open
    type: bool
  - name: location
    type: geo_point
"#;

    #[test]
    fn test_parse_schema() {
        let schema = IndexSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.name, "places");
        assert_eq!(schema.dynamic, DynamicMapping::Strict);
        assert_eq!(schema.fields.len(), 5);
        assert_eq!(
            schema.field_names(),
            vec!["title", "rating", "visits", "open", "location"]
        );
    }

    #[test]
    fn test_get_field_type() {
        let schema = IndexSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        assert_eq!(schema.field_type("location"), Some(FieldType::GeoPoint));
        assert_eq!(schema.field_type("visits"), Some(FieldType::Unsigned));
        assert_eq!(schema.field_type("missing"), None);
    }

    #[test]
    fn test_field_not_found() {
        let schema = IndexSchema::from_yaml(SAMPLE_SCHEMA).unwrap();

        let result = schema.get_field("nonexistent");
        assert!(matches!(result, Err(SchemaError::FieldNotFound { .. })));
    }

    #[test]
    fn test_dynamic_defaults_to_enabled() {
        let schema = IndexSchema::from_yaml("name: logs\n").unwrap();
        assert_eq!(schema.dynamic, DynamicMapping::Enabled);
        assert!(schema.fields.is_empty());
    }

    #[test]
    fn test_dynamic_bool_forms() {
        let schema = IndexSchema::from_yaml("name: a\ndynamic: false\n").unwrap();
        assert_eq!(schema.dynamic, DynamicMapping::Disabled);

        let schema = IndexSchema::from_yaml("name: a\ndynamic: true\n").unwrap();
        assert_eq!(schema.dynamic, DynamicMapping::Enabled);

        let result = IndexSchema::from_yaml("name: a\ndynamic: sometimes\n");
        assert!(matches!(result, Err(SchemaError::YamlError(_))));
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let yaml = r#"
name: dup
fields:
  - name: a
    type: text
  - name: a
    type: bool
"#;
        let result = IndexSchema::from_yaml(yaml);
        assert!(matches!(result, Err(SchemaError::DuplicateField { .. })));
    }

    #[test]
    fn test_unknown_field_type_rejected() {
        let yaml = "name: a\nfields:\n  - name: when\n    type: date\n";
        assert!(IndexSchema::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_add_field() {
        let mut schema = IndexSchema::new("events", DynamicMapping::Enabled)
            .with_field("name", FieldType::Keyword)
            .unwrap();
        schema.add_field("count", FieldType::Integer).unwrap();

        assert_eq!(schema.field_type("count"), Some(FieldType::Integer));
        assert!(schema.add_field("name", FieldType::Text).is_err());
    }

    #[test]
    fn test_lookup_after_fields_changed() {
        let mut schema = IndexSchema::new("events", DynamicMapping::Enabled)
            .with_field("a", FieldType::Text)
            .unwrap()
            .with_field("b", FieldType::Bool)
            .unwrap();

        schema.fields.remove(0);
        assert_eq!(schema.field_type("a"), None);
        assert_eq!(schema.field_type("b"), Some(FieldType::Bool));
        assert!(matches!(
            schema.get_field("a"),
            Err(SchemaError::FieldNotFound { .. })
        ));

        schema.fields.clear();
        assert_eq!(schema.field_type("a"), None);
        assert_eq!(schema.field_type("b"), None);

        schema.add_field("b", FieldType::Integer).unwrap();
        assert_eq!(schema.field_type("b"), Some(FieldType::Integer));
        assert_eq!(schema.field_names(), vec!["b"]);
    }

    #[test]
    fn test_serialize_round_trip() {
        let schema = IndexSchema::from_yaml(SAMPLE_SCHEMA).unwrap();
        let yaml = serde_yaml::to_string(&schema).unwrap();
        let parsed = IndexSchema::from_yaml(&yaml).unwrap();
        assert_eq!(parsed.dynamic, DynamicMapping::Strict);
        assert_eq!(parsed.fields, schema.fields);
    }
}
