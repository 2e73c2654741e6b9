//! Scalar coercers: dynamic value → text, float, unsigned, int, bool.
//!
//! Each coercer is an exhaustive match over [`DynamicValue`]. Only
//! [`to_text`] is total; the others reject `Null`, `Bytes`, `Array` and
//! `Object` with [`CoerceError::UnsupportedType`].

use crate::error::{Bound, CoerceError, Result};
use crate::values::DynamicValue;

/// Literals accepted by [`to_bool`].
pub const TRUE_LITERALS: [&str; 6] = ["1", "t", "T", "TRUE", "true", "True"];
pub const FALSE_LITERALS: [&str; 6] = ["0", "f", "F", "FALSE", "false", "False"];

// 2^64, the first float that no longer fits in a u64.
const U64_LIMIT: f64 = 18_446_744_073_709_551_616.0;

/// Render any value as text.
///
/// Floats use the shortest representation that parses back to the same
/// value, without exponent or trailing zeros.
pub fn to_text(value: &DynamicValue) -> String {
    match value {
        DynamicValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub fn to_float(value: &DynamicValue) -> Result<f64> {
    match value {
        DynamicValue::Float64(f) => Ok(*f),
        DynamicValue::UInt64(u) => Ok(*u as f64),
        DynamicValue::Int64(i) => Ok(*i as f64),
        DynamicValue::Int(i) => Ok(*i as f64),
        DynamicValue::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        DynamicValue::String(s) => parse_float(s).ok_or_else(|| CoerceError::parse("float", s)),
        other => Err(CoerceError::unsupported("float", other.type_name())),
    }
}

/// Coerce to an unsigned integer.
///
/// Floats are truncated toward zero. Negative numbers are rejected with a
/// range error instead of wrapping around.
pub fn to_unsigned(value: &DynamicValue) -> Result<u64> {
    match value {
        DynamicValue::UInt64(u) => Ok(*u),
        DynamicValue::Float64(f) => float_to_unsigned(*f),
        DynamicValue::Int64(i) => u64::try_from(*i).map_err(|_| unsigned_range(i, Bound::Lower)),
        DynamicValue::Int(i) => u64::try_from(*i).map_err(|_| unsigned_range(i, Bound::Lower)),
        DynamicValue::Bool(b) => Ok(u64::from(*b)),
        DynamicValue::String(s) => {
            // u64::from_str accepts a leading '+'
            if s.starts_with('+') {
                return Err(CoerceError::parse("unsigned", s));
            }
            s.parse::<u64>()
                .map_err(|_| CoerceError::parse("unsigned", s))
        }
        other => Err(CoerceError::unsupported("unsigned", other.type_name())),
    }
}

/// Coerce to a native signed integer, truncating floats toward zero.
pub fn to_int(value: &DynamicValue) -> Result<isize> {
    match value {
        DynamicValue::Int(i) => Ok(*i),
        DynamicValue::Float64(f) => float_to_int(*f),
        DynamicValue::UInt64(u) => isize::try_from(*u).map_err(|_| int_range(u, Bound::Upper)),
        DynamicValue::Int64(i) => isize::try_from(*i).map_err(|_| {
            let bound = if *i < 0 { Bound::Lower } else { Bound::Upper };
            int_range(i, bound)
        }),
        DynamicValue::Bool(b) => Ok(isize::from(*b)),
        DynamicValue::String(s) => s.parse::<isize>().map_err(|_| CoerceError::parse("int", s)),
        other => Err(CoerceError::unsupported("int", other.type_name())),
    }
}

pub fn to_bool(value: &DynamicValue) -> Result<bool> {
    match value {
        DynamicValue::Bool(b) => Ok(*b),
        DynamicValue::Float64(f) => Ok(*f != 0.0),
        DynamicValue::UInt64(u) => Ok(*u != 0),
        DynamicValue::Int64(i) => Ok(*i != 0),
        DynamicValue::Int(i) => Ok(*i != 0),
        DynamicValue::String(s) => parse_bool(s).ok_or_else(|| CoerceError::parse("bool", s)),
        other => Err(CoerceError::unsupported("bool", other.type_name())),
    }
}

/// Strict float literal parsing: decimal or scientific notation, no
/// surrounding whitespace.
pub fn parse_float(text: &str) -> Option<f64> {
    text.parse::<f64>().ok()
}

pub fn parse_bool(text: &str) -> Option<bool> {
    if TRUE_LITERALS.contains(&text) {
        Some(true)
    } else if FALSE_LITERALS.contains(&text) {
        Some(false)
    } else {
        None
    }
}

fn float_to_unsigned(f: f64) -> Result<u64> {
    let truncated = f.trunc();
    // NaN fails this comparison too
    if !(truncated >= 0.0) {
        return Err(unsigned_range(f, Bound::Lower));
    }
    if truncated >= U64_LIMIT {
        return Err(unsigned_range(f, Bound::Upper));
    }
    Ok(truncated as u64)
}

fn float_to_int(f: f64) -> Result<isize> {
    let truncated = f.trunc();
    if !(truncated >= isize::MIN as f64) {
        return Err(int_range(f, Bound::Lower));
    }
    // isize::MAX rounds up to 2^(bits-1) as a float, which is out of range
    if truncated >= isize::MAX as f64 {
        return Err(int_range(f, Bound::Upper));
    }
    Ok(truncated as isize)
}

fn unsigned_range(value: impl std::fmt::Display, bound: Bound) -> CoerceError {
    CoerceError::range("unsigned", value, bound, u64::MIN, u64::MAX)
}

fn int_range(value: impl std::fmt::Display, bound: Bound) -> CoerceError {
    CoerceError::range("int", value, bound, isize::MIN, isize::MAX)
}
