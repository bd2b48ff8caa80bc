//! Hexagonal grid indexing collaborators.
//!
//! The engine never computes cell geometry itself. Everything it needs from a
//! tessellation goes through the [`CellIndexer`] trait, so the same filters
//! and amalgamation code run on top of H3 or on the planar test lattice.

use crate::error::Result;
use hexsieve_types::{CellId, GeoPoint, Ring};

#[cfg(feature = "h3")]
mod h3;
mod planar;

#[cfg(feature = "h3")]
pub use h3::H3Indexer;
pub use planar::{MAX_PLANAR_RESOLUTION, PlanarHexGrid};

/// Trait for tessellation index implementations.
///
/// Implementations must report a vertex shared by two neighbouring cells
/// with bit-identical coordinates from both cells, otherwise boundary
/// amalgamation cannot cancel the shared edge.
pub trait CellIndexer: Send + Sync {
    /// Cells at `resolution` covering the polygon described by `boundary`
    /// (implicitly closed, latitude/longitude degrees).
    fn polygon_to_cells(&self, boundary: &[GeoPoint], resolution: u8) -> Result<Vec<CellId>>;

    /// Ordered boundary vertices of `cell`.
    fn cell_to_boundary(&self, cell: CellId) -> Result<Ring>;

    /// Center point of `cell`.
    fn cell_to_center(&self, cell: CellId) -> Result<GeoPoint>;
}
