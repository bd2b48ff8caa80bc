//! Boundary amalgamation by edge cancellation.
//!
//! Every cell contributes its boundary edges to a toggle set: an edge seen a
//! second time is removed instead of inserted. Two adjacent cells contribute
//! their shared edge once each, so all interior edges cancel and only the
//! outer boundaries and hole boundaries of the merged shape survive. The
//! survivors are then walked back into closed rings.

use crate::error::{GeometryError, Result};
use crate::index::CellIndexer;
use hexsieve_types::{CellId, GeoPoint, Ring};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};

/// An undirected edge between two boundary points.
///
/// `Edge(a, b) == Edge(b, a)`. The direction the edge was first seen in is
/// kept so that a ring walked from it follows the original orientation.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    pub start: GeoPoint,
    pub end: GeoPoint,
}

impl Edge {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        Self { start, end }
    }

    fn normalized(&self) -> (GeoPoint, GeoPoint) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// The endpoint opposite `point`, if `point` is one of the endpoints.
    pub fn other(&self, point: &GeoPoint) -> Option<GeoPoint> {
        if self.start == *point {
            Some(self.end)
        } else if self.end == *point {
            Some(self.start)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

/// Insertion-ordered set where inserting a present edge removes it.
///
/// Keeping insertion order makes ring seeds, and therefore ring start points,
/// deterministic for a given cell order.
#[derive(Debug, Default)]
pub struct EdgeToggleSet {
    slots: Vec<Option<Edge>>,
    positions: FxHashMap<Edge, usize>,
}

impl EdgeToggleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `edge`, or remove it if already present. Returns `true` when the
    /// edge was inserted.
    pub fn toggle(&mut self, edge: Edge) -> bool {
        if let Some(pos) = self.positions.remove(&edge) {
            self.slots[pos] = None;
            false
        } else {
            self.positions.insert(edge, self.slots.len());
            self.slots.push(Some(edge));
            true
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn contains(&self, edge: &Edge) -> bool {
        self.positions.contains_key(edge)
    }

    /// Surviving edges in first-insertion order.
    pub fn into_edges(self) -> Vec<Edge> {
        self.slots.into_iter().flatten().collect()
    }
}

/// Surviving boundary edges of the union of `cells`.
pub fn boundary_edges(cells: &[CellId], indexer: &dyn CellIndexer) -> Result<Vec<Edge>> {
    let mut edges = EdgeToggleSet::new();
    for &cell in cells {
        let boundary = indexer.cell_to_boundary(cell)?;
        for (start, end) in boundary.edges() {
            edges.toggle(Edge::new(start, end));
        }
    }
    Ok(edges.into_edges())
}

/// Link undirected edges into closed rings.
///
/// Each walk starts from the first unused edge and repeatedly follows any
/// unused edge incident to the current endpoint until it returns to the
/// starting point. Fails with [`GeometryError::UnclosedRing`] when the walk
/// reaches a point with no unused edge.
pub fn link_rings(edges: &[Edge]) -> Result<Vec<Ring>, GeometryError> {
    let mut incident: FxHashMap<GeoPoint, SmallVec<[usize; 2]>> = FxHashMap::default();
    for (idx, edge) in edges.iter().enumerate() {
        incident.entry(edge.start).or_default().push(idx);
        incident.entry(edge.end).or_default().push(idx);
    }

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();

    for seed in 0..edges.len() {
        if used[seed] {
            continue;
        }
        used[seed] = true;

        let start = edges[seed].start;
        let mut points = vec![start];
        let mut next = edges[seed].end;

        while next != start {
            let step = incident
                .get(&next)
                .and_then(|candidates| candidates.iter().copied().find(|&idx| !used[idx]));

            let Some(idx) = step else {
                return Err(GeometryError::UnclosedRing {
                    start,
                    at: next,
                    ring_len: points.len(),
                });
            };

            used[idx] = true;
            points.push(next);
            // `idx` came from the incidence list of `next`, so `other` exists.
            next = edges[idx].other(&next).unwrap_or(start);
        }

        if points.len() < 3 {
            return Err(GeometryError::DegenerateRing { len: points.len() });
        }
        rings.push(Ring::new(points));
    }

    Ok(rings)
}

/// Merge adjacent cells into their outer and hole boundary rings.
///
/// Rings are returned unclassified; see [`crate::compute::hierarchy`] for
/// telling outer rings from holes.
pub fn amalgamate(cells: &[CellId], indexer: &dyn CellIndexer) -> Result<Vec<Ring>> {
    let edges = boundary_edges(cells, indexer)?;
    log::debug!(
        "{} cells left {} boundary edges after cancellation",
        cells.len(),
        edges.len()
    );

    let rings = link_rings(&edges)?;
    log::debug!("Linked {} boundary rings", rings.len());
    Ok(rings)
}
