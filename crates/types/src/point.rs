//! Geographic points with bit-exact equality.
//!
//! Boundary amalgamation relies on two neighbouring cells reporting the
//! same shared vertex with identical floating point values, so equality and
//! hashing here compare the raw bits of both components instead of using
//! `f64` comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// A latitude/longitude pair in degrees.
///
/// # Examples
///
/// ```
/// use hexsieve_types::GeoPoint;
///
/// let palm_springs = GeoPoint::new(33.8303, -116.5453);
/// assert_eq!(palm_springs.lat(), 33.8303);
/// assert_eq!(palm_springs.lng(), -116.5453);
///
/// // Equality is bit-for-bit.
/// assert_ne!(GeoPoint::new(0.0, 0.0), GeoPoint::new(-0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    lat: f64,
    lng: f64,
}

impl GeoPoint {
    /// Create a point from latitude and longitude in degrees.
    #[inline]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    #[inline]
    pub fn lat(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Whether both components are finite numbers.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    #[inline]
    fn bits(&self) -> (u64, u64) {
        (self.lat.to_bits(), self.lng.to_bits())
    }
}

impl PartialEq for GeoPoint {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for GeoPoint {}

impl Hash for GeoPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for GeoPoint {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Total order over the raw bits; only used to normalise unordered pairs.
impl Ord for GeoPoint {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.bits().cmp(&other.bits())
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat, self.lng)
    }
}

impl From<GeoPoint> for geo::Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::coord! { x: point.lng, y: point.lat }
    }
}

impl From<geo::Coord<f64>> for GeoPoint {
    fn from(coord: geo::Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for geo::Point<f64> {
    fn from(point: GeoPoint) -> Self {
        geo::Point::new(point.lng, point.lat)
    }
}
