//! Planar pointy-top hexagon lattice.
//!
//! Cells are addressed by axial coordinates `(q, r)`. Every vertex lies on an
//! integer lattice (`x` in units of `sqrt(3)/2 * size`, `y` in units of
//! `size / 2`), and coordinates are derived from those integers with a single
//! multiply-add. Neighbouring cells therefore produce bit-identical shared
//! vertices, which makes the grid a deterministic stand-in for H3 in tests
//! and offline runs.
//!
//! Cell id layout: `resolution` in bits 56..64, `q` in bits 28..56 and `r` in
//! bits 0..28, both as 28-bit two's complement.

use super::CellIndexer;
use crate::error::{HexsieveError, Result};
use hexsieve_types::{CellId, GeoPoint, Ring};

const COORD_BITS: u32 = 28;
const COORD_MASK: u64 = (1 << COORD_BITS) - 1;
const COORD_LIMIT: i32 = 1 << (COORD_BITS - 1);

/// Finest supported resolution (cell size halves at every level).
pub const MAX_PLANAR_RESOLUTION: u8 = 24;

/// Refuse fills that would enumerate more candidates than this.
const MAX_FILL_CANDIDATES: u64 = 50_000_000;

/// Vertex offsets in lattice units, counter-clockwise from 30 degrees.
const VERTEX_OFFSETS: [(i64, i64); 6] = [(1, 1), (0, 2), (-1, 1), (-1, -1), (0, -2), (1, -1)];

/// A flat hexagonal lattice anchored at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanarHexGrid {
    origin: GeoPoint,
    base_size: f64,
}

impl PlanarHexGrid {
    /// Create a grid whose resolution-0 cells have a circumradius of
    /// `base_size` degrees.
    pub fn new(origin: GeoPoint, base_size: f64) -> Self {
        Self { origin, base_size }
    }

    /// Encode axial coordinates into a cell id.
    pub fn cell(q: i32, r: i32, resolution: u8) -> Result<CellId> {
        if !(-COORD_LIMIT..COORD_LIMIT).contains(&q) || !(-COORD_LIMIT..COORD_LIMIT).contains(&r)
        {
            return Err(HexsieveError::ExternalData(format!(
                "Axial coordinates ({}, {}) exceed the planar grid range",
                q, r
            )));
        }
        if resolution > MAX_PLANAR_RESOLUTION {
            return Err(HexsieveError::ExternalData(format!(
                "Planar resolution {} exceeds maximum {}",
                resolution, MAX_PLANAR_RESOLUTION
            )));
        }

        let q_bits = (q as u32 as u64) & COORD_MASK;
        let r_bits = (r as u32 as u64) & COORD_MASK;
        Ok(CellId::new(
            ((resolution as u64) << 56) | (q_bits << COORD_BITS) | r_bits,
        ))
    }

    /// Decode a cell id into `(q, r, resolution)`.
    pub fn axial(cell: CellId) -> Result<(i32, i32, u8)> {
        let raw = cell.get();
        let resolution = (raw >> 56) as u8;
        if resolution > MAX_PLANAR_RESOLUTION {
            return Err(HexsieveError::ExternalData(format!(
                "Cell {:x} is not a planar grid cell",
                cell
            )));
        }

        let sign_extend = |bits: u64| ((bits as u32) << (32 - COORD_BITS)) as i32 >> (32 - COORD_BITS);
        let q = sign_extend((raw >> COORD_BITS) & COORD_MASK);
        let r = sign_extend(raw & COORD_MASK);
        Ok((q, r, resolution))
    }

    fn size(&self, resolution: u8) -> f64 {
        self.base_size / (1u64 << resolution) as f64
    }

    fn units(&self, resolution: u8) -> (f64, f64) {
        let size = self.size(resolution);
        (size * 3f64.sqrt() / 2.0, size / 2.0)
    }

    fn lattice_point(&self, x: i64, y: i64, resolution: u8) -> GeoPoint {
        let (unit_x, unit_y) = self.units(resolution);
        GeoPoint::new(
            self.origin.lat() + y as f64 * unit_y,
            self.origin.lng() + x as f64 * unit_x,
        )
    }

    fn checked_axial(q: i64, r: i64) -> Result<(i32, i32)> {
        match (i32::try_from(q), i32::try_from(r)) {
            (Ok(q), Ok(r)) => Ok((q, r)),
            _ => Err(HexsieveError::ExternalData(format!(
                "Axial coordinates ({}, {}) exceed the planar grid range",
                q, r
            ))),
        }
    }

    fn center_units(q: i32, r: i32) -> (i64, i64) {
        (2 * q as i64 + r as i64, 3 * r as i64)
    }
}

impl Default for PlanarHexGrid {
    fn default() -> Self {
        Self::new(GeoPoint::new(0.0, 0.0), 1.0)
    }
}

impl CellIndexer for PlanarHexGrid {
    fn polygon_to_cells(&self, boundary: &[GeoPoint], resolution: u8) -> Result<Vec<CellId>> {
        if boundary.len() < 3 {
            return Ok(Vec::new());
        }
        if resolution > MAX_PLANAR_RESOLUTION {
            return Err(HexsieveError::ExternalData(format!(
                "Planar resolution {} exceeds maximum {}",
                resolution, MAX_PLANAR_RESOLUTION
            )));
        }

        let ring = Ring::new(boundary.to_vec());
        let (unit_x, unit_y) = self.units(resolution);

        let (mut min_lat, mut max_lat) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut min_lng, mut max_lng) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in boundary {
            min_lat = min_lat.min(p.lat());
            max_lat = max_lat.max(p.lat());
            min_lng = min_lng.min(p.lng());
            max_lng = max_lng.max(p.lng());
        }

        // Lattice y of a center is 3r; lattice x is 2q + r.
        let y_min = (min_lat - self.origin.lat()) / unit_y;
        let y_max = (max_lat - self.origin.lat()) / unit_y;
        let x_min = (min_lng - self.origin.lng()) / unit_x;
        let x_max = (max_lng - self.origin.lng()) / unit_x;
        if !(y_min.is_finite() && y_max.is_finite() && x_min.is_finite() && x_max.is_finite()) {
            return Err(HexsieveError::ExternalData(
                "Polygon coordinates must be finite".to_string(),
            ));
        }

        let r_lo = (y_min / 3.0).floor() as i64 - 1;
        let r_hi = (y_max / 3.0).ceil() as i64 + 1;
        let rows = (r_hi - r_lo + 1) as u64;
        let cols = ((x_max - x_min) / 2.0).ceil() as u64 + 3;
        if rows.saturating_mul(cols) > MAX_FILL_CANDIDATES {
            return Err(HexsieveError::ExternalData(format!(
                "Polygon fill would examine {} x {} planar cells at resolution {}",
                rows, cols, resolution
            )));
        }

        let mut cells = Vec::new();
        for r in r_lo..=r_hi {
            let q_lo = ((x_min - r as f64) / 2.0).floor() as i64 - 1;
            let q_hi = ((x_max - r as f64) / 2.0).ceil() as i64 + 1;
            for q in q_lo..=q_hi {
                let (q, r) = Self::checked_axial(q, r)?;
                let (x, y) = Self::center_units(q, r);
                if ring.contains_point(&self.lattice_point(x, y, resolution)) {
                    cells.push(Self::cell(q, r, resolution)?);
                }
            }
        }

        Ok(cells)
    }

    fn cell_to_boundary(&self, cell: CellId) -> Result<Ring> {
        let (q, r, resolution) = Self::axial(cell)?;
        let (x, y) = Self::center_units(q, r);
        Ok(Ring::new(
            VERTEX_OFFSETS
                .iter()
                .map(|(dx, dy)| self.lattice_point(x + dx, y + dy, resolution))
                .collect(),
        ))
    }

    fn cell_to_center(&self, cell: CellId) -> Result<GeoPoint> {
        let (q, r, resolution) = Self::axial(cell)?;
        let (x, y) = Self::center_units(q, r);
        Ok(self.lattice_point(x, y, resolution))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_axial_round_trip_negative() {
        let cell = PlanarHexGrid::cell(-5, 17, 3).unwrap();
        assert_eq!(PlanarHexGrid::axial(cell).unwrap(), (-5, 17, 3));
    }

    #[test]
    fn test_cell_rejects_out_of_range() {
        assert!(PlanarHexGrid::cell(COORD_LIMIT, 0, 0).is_err());
        assert!(PlanarHexGrid::cell(0, 0, MAX_PLANAR_RESOLUTION + 1).is_err());
    }

    #[test]
    fn test_boundary_has_six_points() {
        let grid = PlanarHexGrid::default();
        let cell = PlanarHexGrid::cell(0, 0, 0).unwrap();
        let ring = grid.cell_to_boundary(cell).unwrap();
        assert_eq!(ring.len(), 6);
        assert!(ring.contains_point(&grid.cell_to_center(cell).unwrap()));
    }

    #[test]
    fn test_neighbours_share_bit_identical_edge() {
        let grid = PlanarHexGrid::new(GeoPoint::new(33.7, -116.1), 0.37);
        let a = grid
            .cell_to_boundary(PlanarHexGrid::cell(2, -1, 4).unwrap())
            .unwrap();
        let b = grid
            .cell_to_boundary(PlanarHexGrid::cell(3, -1, 4).unwrap())
            .unwrap();

        let a_points: FxHashSet<_> = a.points().iter().copied().collect();
        let shared = b.points().iter().filter(|p| a_points.contains(p)).count();
        assert_eq!(shared, 2);
    }

    #[test]
    fn test_polygon_to_cells_centres_inside() {
        let grid = PlanarHexGrid::default();
        let square = [
            GeoPoint::new(-3.0, -3.0),
            GeoPoint::new(-3.0, 3.0),
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(3.0, -3.0),
        ];
        let cells = grid.polygon_to_cells(&square, 0).unwrap();
        assert!(!cells.is_empty());
        assert!(cells.contains(&PlanarHexGrid::cell(0, 0, 0).unwrap()));

        let ring = Ring::new(square.to_vec());
        for cell in &cells {
            assert!(ring.contains_point(&grid.cell_to_center(*cell).unwrap()));
        }
    }

    #[test]
    fn test_finer_resolution_yields_more_cells() {
        let grid = PlanarHexGrid::default();
        let square = [
            GeoPoint::new(-3.0, -3.0),
            GeoPoint::new(-3.0, 3.0),
            GeoPoint::new(3.0, 3.0),
            GeoPoint::new(3.0, -3.0),
        ];
        let coarse = grid.polygon_to_cells(&square, 0).unwrap();
        let fine = grid.polygon_to_cells(&square, 2).unwrap();
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn test_degenerate_polygon_is_empty() {
        let grid = PlanarHexGrid::default();
        let line = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(grid.polygon_to_cells(&line, 0).unwrap().is_empty());
    }

    #[test]
    fn test_fill_far_from_origin_is_rejected() {
        // Rows around 7e9 do not fit an axial coordinate.
        let grid = PlanarHexGrid::new(GeoPoint::new(0.0, 0.0), 1e-9);
        let boundary = vec![
            GeoPoint::new(10.0, 0.0),
            GeoPoint::new(10.0, 1e-8),
            GeoPoint::new(10.0 + 1e-8, 1e-8),
            GeoPoint::new(10.0 + 1e-8, 0.0),
        ];
        assert!(matches!(
            grid.polygon_to_cells(&boundary, 0),
            Err(HexsieveError::ExternalData(_))
        ));
    }
}
