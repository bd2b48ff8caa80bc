//! Outer ring / hole classification.
//!
//! Rings are considered largest first (vertex count stands in for extent)
//! and each ring is attached to the first top-level ring that contains its
//! first point. Only top-level rings are tested as parents, so a ring inside
//! a hole is reported as another hole of the outer ring rather than as a new
//! island.

use hexsieve_types::{PolygonGroup, Ring};

#[derive(Debug)]
struct RingNode {
    ring: Ring,
    children: Vec<Ring>,
}

/// Whether `inner` lies inside `outer`, judged by `inner`'s first point.
pub fn ring_inside(inner: &Ring, outer: &Ring) -> bool {
    inner
        .first()
        .is_some_and(|point| outer.contains_point(point))
}

/// Group rings into outer boundaries and their holes.
///
/// Groups are returned in the order their outer rings were first placed,
/// which after the size sort means largest outer ring first.
///
/// # Examples
///
/// ```
/// use hexsieve::compute::hierarchy::resolve_holes;
/// use hexsieve_types::{GeoPoint, Ring};
///
/// let square = |r: f64| {
///     Ring::new(vec![
///         GeoPoint::new(-r, -r),
///         GeoPoint::new(-r, r),
///         GeoPoint::new(r, r),
///         GeoPoint::new(r, -r),
///     ])
/// };
/// let mut outer = square(10.0).into_points();
/// outer.insert(1, GeoPoint::new(-10.0, 0.0));
///
/// let groups = resolve_holes(vec![square(2.0), Ring::new(outer)]);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].holes, vec![square(2.0)]);
/// ```
pub fn resolve_holes(mut rings: Vec<Ring>) -> Vec<PolygonGroup> {
    rings.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut roots: Vec<RingNode> = Vec::new();
    for ring in rings {
        match roots.iter_mut().find(|root| ring_inside(&ring, &root.ring)) {
            Some(parent) => parent.children.push(ring),
            None => roots.push(RingNode {
                ring,
                children: Vec::new(),
            }),
        }
    }

    roots
        .into_iter()
        .map(|node| PolygonGroup::new(node.ring, node.children))
        .collect()
}
