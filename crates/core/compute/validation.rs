//! Validation for filter parameters.
//!
//! Every check returns a [`ConfigError`] so filters can reject parameters
//! before touching their stored state.

use crate::error::ConfigError;
use hexsieve_types::GeoPoint;

/// Validates a latitude in degrees: finite and within [-90.0, 90.0].
///
/// # Examples
///
/// ```
/// use hexsieve::compute::validation::validate_latitude;
///
/// assert!(validate_latitude("min_lat", 33.5).is_ok());
/// assert!(validate_latitude("min_lat", 95.0).is_err());
/// assert!(validate_latitude("min_lat", f64::NAN).is_err());
/// ```
pub fn validate_latitude(field: &'static str, lat: f64) -> Result<(), ConfigError> {
    if !lat.is_finite() {
        return Err(ConfigError::range(
            field,
            format!("Latitude must be finite, got: {}", lat),
        ));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(ConfigError::range(
            field,
            format!("Latitude out of range [-90.0, 90.0]: {}", lat),
        ));
    }
    Ok(())
}

/// Validates a longitude in degrees: finite and within [-180.0, 180.0].
pub fn validate_longitude(field: &'static str, lng: f64) -> Result<(), ConfigError> {
    if !lng.is_finite() {
        return Err(ConfigError::range(
            field,
            format!("Longitude must be finite, got: {}", lng),
        ));
    }
    if !(-180.0..=180.0).contains(&lng) {
        return Err(ConfigError::range(
            field,
            format!("Longitude out of range [-180.0, 180.0]: {}", lng),
        ));
    }
    Ok(())
}

/// Validates both components of a point.
pub fn validate_point(field: &'static str, point: &GeoPoint) -> Result<(), ConfigError> {
    validate_latitude(field, point.lat())?;
    validate_longitude(field, point.lng())
}

/// Validates a polygon outline: at least three valid points.
///
/// # Examples
///
/// ```
/// use hexsieve::compute::validation::validate_polygon_points;
/// use hexsieve_types::GeoPoint;
///
/// let triangle = [
///     GeoPoint::new(33.5, -116.5),
///     GeoPoint::new(34.0, -116.0),
///     GeoPoint::new(33.5, -115.5),
/// ];
/// assert!(validate_polygon_points("points", &triangle).is_ok());
/// assert!(validate_polygon_points("points", &triangle[..2]).is_err());
/// ```
pub fn validate_polygon_points(field: &'static str, points: &[GeoPoint]) -> Result<(), ConfigError> {
    if points.len() < 3 {
        return Err(ConfigError::range(
            field,
            format!(
                "At least 3 points are required to define a polygon, got {}",
                points.len()
            ),
        ));
    }
    for (idx, point) in points.iter().enumerate() {
        validate_point(field, point).map_err(|e| {
            ConfigError::range(field, format!("Point at index {}: {}", idx, e))
        })?;
    }
    Ok(())
}

/// Validates a strictly positive, finite length.
pub fn validate_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::range(
            field,
            format!("Must be a positive finite value, got: {}", value),
        ));
    }
    Ok(())
}

/// Validates a rotation angle in degrees within [0, 360).
pub fn validate_rotation(field: &'static str, degrees: f64) -> Result<(), ConfigError> {
    if !degrees.is_finite() || !(0.0..360.0).contains(&degrees) {
        return Err(ConfigError::range(
            field,
            format!("Rotation must be within [0, 360) degrees, got: {}", degrees),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latitude_bounds_inclusive() {
        assert!(validate_latitude("lat", -90.0).is_ok());
        assert!(validate_latitude("lat", 90.0).is_ok());
        assert!(validate_latitude("lat", 90.000001).is_err());
    }

    #[test]
    fn test_longitude_bounds() {
        assert!(validate_longitude("lng", -180.0).is_ok());
        assert!(validate_longitude("lng", 180.0).is_ok());
        assert!(validate_longitude("lng", -181.0).is_err());
        assert!(validate_longitude("lng", f64::INFINITY).is_err());
    }

    #[test]
    fn test_polygon_point_index_reported() {
        let points = [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(0.0, 200.0),
        ];
        let err = validate_polygon_points("points", &points).unwrap_err();
        assert!(err.to_string().contains("index 2"));
    }

    #[test]
    fn test_rotation_half_open() {
        assert!(validate_rotation("rotation", 0.0).is_ok());
        assert!(validate_rotation("rotation", 359.9).is_ok());
        assert!(validate_rotation("rotation", 360.0).is_err());
        assert!(validate_rotation("rotation", -1.0).is_err());
    }

    #[test]
    fn test_positive() {
        assert!(validate_positive("axis", 0.5).is_ok());
        assert!(validate_positive("axis", 0.0).is_err());
        assert!(validate_positive("axis", f64::NAN).is_err());
    }
}
