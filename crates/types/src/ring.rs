//! Closed boundary rings and outer/hole polygon groups.

use crate::point::GeoPoint;
use serde::{Deserialize, Serialize};

/// An ordered, cyclic sequence of points.
///
/// The ring is implicitly closed: the first point follows the last one, so
/// the first point is never repeated at the end.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<GeoPoint>);

impl Ring {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }

    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.0
    }

    #[inline]
    pub fn into_points(self) -> Vec<GeoPoint> {
        self.0
    }

    /// Number of vertices (and, since the ring is closed, of edges).
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    pub fn first(&self) -> Option<&GeoPoint> {
        self.0.first()
    }

    /// Consecutive vertex pairs, including the closing pair `(last, first)`.
    pub fn edges(&self) -> impl Iterator<Item = (GeoPoint, GeoPoint)> + '_ {
        let n = self.0.len();
        (0..n).map(move |i| (self.0[i], self.0[(i + 1) % n]))
    }

    /// Vertices followed by the first vertex again, as output formats expect.
    pub fn closed_points(&self) -> impl Iterator<Item = GeoPoint> + '_ {
        self.0.iter().copied().chain(self.0.first().copied())
    }

    /// Ray-casting point-in-polygon test.
    ///
    /// A horizontal ray is cast from `point` and the boundary crossings are
    /// counted; an odd count means the point is inside. Latitude is treated
    /// as the planar y axis and longitude as x.
    pub fn contains_point(&self, point: &GeoPoint) -> bool {
        let pts = &self.0;
        if pts.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (pi, pj) = (pts[i], pts[j]);
            if (pi.lat() > point.lat()) != (pj.lat() > point.lat())
                && point.lng()
                    < (pj.lng() - pi.lng()) * (point.lat() - pi.lat()) / (pj.lat() - pi.lat())
                        + pi.lng()
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether `other` describes the same cyclic sequence, starting anywhere
    /// but walking in the same direction.
    pub fn cyclic_eq(&self, other: &Ring) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.is_empty() {
            return true;
        }

        let n = self.len();
        let first = self.0[0];
        other
            .0
            .iter()
            .enumerate()
            .filter(|(_, p)| **p == first)
            .any(|(offset, _)| (0..n).all(|i| self.0[i] == other.0[(offset + i) % n]))
    }

    /// Same as [`Ring::cyclic_eq`] but also accepts the reversed direction.
    pub fn cyclic_eq_any_direction(&self, other: &Ring) -> bool {
        if self.cyclic_eq(other) {
            return true;
        }
        let mut reversed = other.0.clone();
        reversed.reverse();
        self.cyclic_eq(&Ring(reversed))
    }

    /// Convert into a closed `geo::LineString` (x = longitude, y = latitude).
    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.closed_points()
            .map(geo::Coord::from)
            .collect::<Vec<_>>()
            .into()
    }
}

impl From<Vec<GeoPoint>> for Ring {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self(points)
    }
}

/// One outer ring with the rings that form its holes.
///
/// Nesting is flattened to one level: a ring found inside a hole is still
/// reported as a hole of the outermost ring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolygonGroup {
    pub outer: Ring,
    #[serde(default)]
    pub holes: Vec<Ring>,
}

impl PolygonGroup {
    pub fn new(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }

    pub fn to_polygon(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(
            self.outer.to_line_string(),
            self.holes.iter().map(Ring::to_line_string).collect(),
        )
    }
}
