//! Error types for value coercion.
//!
//! Every coercion either produces the target value or returns one of these
//! errors. Nothing is silently defaulted and nothing panics.

use std::fmt;
use thiserror::Error;

/// Which end of an interval a value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Lower,
    Upper,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Lower => f.write_str("lower"),
            Bound::Upper => f.write_str("upper"),
        }
    }
}

/// Coarse classification of a [`CoerceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input variant has no mapping to the target type.
    UnsupportedType,
    /// Text failed strict numeric or boolean literal parsing.
    Parse,
    /// Structural shape violation, e.g. a geo string with the wrong field count.
    Format,
    /// A numeric value fell outside the valid interval of the target.
    Range,
}

/// Errors that can occur while coercing a dynamic value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoerceError {
    /// The input variant cannot be converted to the target type.
    #[error("{target}: unsupported type {type_name}")]
    UnsupportedType {
        target: &'static str,
        type_name: &'static str,
    },

    /// Text could not be parsed as a literal of the target type.
    #[error("{target}: cannot parse '{value}'")]
    Parse { target: &'static str, value: String },

    /// The text does not have the expected shape.
    #[error("invalid format '{value}': expected {expected}")]
    Format {
        value: String,
        expected: &'static str,
    },

    /// A geo point coordinate is not a float literal.
    #[error("geo_point {axis} is not a float: '{value}'")]
    InvalidCoordinate { axis: &'static str, value: String },

    /// A number is outside the interval accepted by the target.
    #[error("{what} must be within [{min}, {max}], got {value} (violates {bound} bound)")]
    Range {
        what: &'static str,
        value: String,
        bound: Bound,
        min: String,
        max: String,
    },
}

impl CoerceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoerceError::UnsupportedType { .. } => ErrorKind::UnsupportedType,
            CoerceError::Parse { .. } => ErrorKind::Parse,
            CoerceError::Format { .. } | CoerceError::InvalidCoordinate { .. } => {
                ErrorKind::Format
            }
            CoerceError::Range { .. } => ErrorKind::Range,
        }
    }

    pub fn is_format_error(&self) -> bool {
        self.kind() == ErrorKind::Format
    }

    /// The bound a [`CoerceError::Range`] violated, if this is a range error.
    pub fn violated_bound(&self) -> Option<Bound> {
        match self {
            CoerceError::Range { bound, .. } => Some(*bound),
            _ => None,
        }
    }

    pub(crate) fn unsupported(target: &'static str, type_name: &'static str) -> Self {
        CoerceError::UnsupportedType { target, type_name }
    }

    pub(crate) fn parse(target: &'static str, value: &str) -> Self {
        CoerceError::Parse {
            target,
            value: value.to_string(),
        }
    }

    pub(crate) fn range<T: fmt::Display>(
        what: &'static str,
        value: impl fmt::Display,
        bound: Bound,
        min: T,
        max: T,
    ) -> Self {
        CoerceError::Range {
            what,
            value: value.to_string(),
            bound,
            min: min.to_string(),
            max: max.to_string(),
        }
    }
}

/// Result type for value coercion.
pub type Result<T> = std::result::Result<T, CoerceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_groups_format_errors() {
        let shape = CoerceError::Format {
            value: "45".to_string(),
            expected: "\"lat,lon\"",
        };
        let coord = CoerceError::InvalidCoordinate {
            axis: "latitude",
            value: "abc".to_string(),
        };
        assert!(shape.is_format_error());
        assert!(coord.is_format_error());
        assert_eq!(coord.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_range_message() {
        let err = CoerceError::range("latitude", 91.0, Bound::Upper, -90.0, 90.0);
        assert_eq!(
            err.to_string(),
            "latitude must be within [-90, 90], got 91 (violates upper bound)"
        );
        assert_eq!(err.violated_bound(), Some(Bound::Upper));
    }

    #[test]
    fn test_unsupported_message() {
        let err = CoerceError::unsupported("float", "array");
        assert_eq!(err.to_string(), "float: unsupported type array");
        assert_eq!(err.kind(), ErrorKind::UnsupportedType);
        assert_eq!(err.violated_bound(), None);
    }
}
