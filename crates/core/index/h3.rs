//! H3 indexing backed by the `h3o` crate.

use super::CellIndexer;
use crate::error::{HexsieveError, Result};
use h3o::geom::{ContainmentMode, PolyfillConfig, Polygon, ToCells};
use h3o::{CellIndex, LatLng, Resolution};
use hexsieve_types::{CellId, GeoPoint, Ring};

/// H3 cell indexer.
///
/// Polygon fill selects the cells whose centroid lies inside the polygon,
/// using h3o's spherical polyfill. Polygons spanning the antimeridian are
/// filled across it rather than around the globe.
#[derive(Debug, Clone, Copy, Default)]
pub struct H3Indexer;

impl H3Indexer {
    pub fn new() -> Self {
        Self
    }

    fn resolution(resolution: u8) -> Result<Resolution> {
        Resolution::try_from(resolution).map_err(|e| {
            HexsieveError::ExternalData(format!("Invalid H3 resolution {}: {}", resolution, e))
        })
    }

    fn cell_index(cell: CellId) -> Result<CellIndex> {
        CellIndex::try_from(cell.get()).map_err(|e| {
            HexsieveError::ExternalData(format!("Invalid H3 cell {:x}: {}", cell, e))
        })
    }

    fn to_point(ll: LatLng) -> GeoPoint {
        GeoPoint::new(ll.lat(), ll.lng())
    }

    fn polygon(boundary: &[GeoPoint]) -> Result<Polygon> {
        let exterior = Ring::new(boundary.to_vec()).to_line_string();
        Polygon::from_degrees(geo::Polygon::new(exterior, Vec::new()))
            .map_err(|e| HexsieveError::ExternalData(format!("Invalid H3 polygon: {}", e)))
    }
}

impl CellIndexer for H3Indexer {
    fn polygon_to_cells(&self, boundary: &[GeoPoint], resolution: u8) -> Result<Vec<CellId>> {
        if boundary.len() < 3 {
            return Ok(Vec::new());
        }

        let resolution = Self::resolution(resolution)?;
        let polygon = Self::polygon(boundary)?;
        let config =
            PolyfillConfig::new(resolution).containment_mode(ContainmentMode::ContainsCentroid);

        let cells: Vec<CellId> = polygon
            .to_cells(config)
            .map(|cell| CellId::new(u64::from(cell)))
            .collect();

        log::debug!(
            "H3 fill at resolution {} kept {} cells",
            u8::from(resolution),
            cells.len()
        );
        Ok(cells)
    }

    fn cell_to_boundary(&self, cell: CellId) -> Result<Ring> {
        let index = Self::cell_index(cell)?;
        Ok(Ring::new(
            index.boundary().iter().copied().map(Self::to_point).collect(),
        ))
    }

    fn cell_to_center(&self, cell: CellId) -> Result<GeoPoint> {
        Ok(Self::to_point(LatLng::from(Self::cell_index(cell)?)))
    }
}
