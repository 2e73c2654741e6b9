//! Geo point parsing.
//!
//! A geo point arrives as text of the form `"lat,lon"`. Any value is accepted
//! as input: it is rendered with [`to_text`] first, so a number such as `123`
//! is parsed as the string `"123"` (and rejected for lacking a comma).

use crate::coerce::{parse_float, to_text};
use crate::error::{Bound, CoerceError, Result};
use crate::values::DynamicValue;

pub const LAT_MIN: f64 = -90.0;
pub const LAT_MAX: f64 = 90.0;
pub const LON_MIN: f64 = -180.0;
pub const LON_MAX: f64 = 180.0;

const EXPECTED_SHAPE: &str = "\"lat,lon\"";

/// A validated (latitude, longitude) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    /// Build a point, validating both coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self> {
        check_axis("latitude", lat, LAT_MIN, LAT_MAX)?;
        check_axis("longitude", lon, LON_MIN, LON_MAX)?;
        Ok(Self { lat, lon })
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(point: GeoPoint) -> Self {
        (point.lat, point.lon)
    }
}

/// Parse a value into a geo point.
///
/// Fields are not trimmed, so `"45, -122"` is rejected on the longitude.
pub fn to_geo_point(value: &DynamicValue) -> Result<GeoPoint> {
    let text = to_text(value);

    let fields: Vec<&str> = text.split(',').collect();
    let [lat_text, lon_text] = fields.as_slice() else {
        return Err(CoerceError::Format {
            value: text.clone(),
            expected: EXPECTED_SHAPE,
        });
    };

    let lat = parse_coordinate("latitude", lat_text)?;
    check_axis("latitude", lat, LAT_MIN, LAT_MAX)?;

    let lon = parse_coordinate("longitude", lon_text)?;
    check_axis("longitude", lon, LON_MIN, LON_MAX)?;

    Ok(GeoPoint { lat, lon })
}

fn parse_coordinate(axis: &'static str, text: &str) -> Result<f64> {
    parse_float(text).ok_or_else(|| CoerceError::InvalidCoordinate {
        axis,
        value: text.to_string(),
    })
}

fn check_axis(axis: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if value >= min && value <= max {
        return Ok(());
    }
    // NaN is reported against the lower bound
    let bound = if value > max { Bound::Upper } else { Bound::Lower };
    Err(CoerceError::range(axis, value, bound, min, max))
}
