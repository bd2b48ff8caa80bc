use super::{Filter, FilterContext, FilterParams, InitialFilter, RegionState};
use crate::compute::validation::validate_polygon_points;
use crate::error::{ConfigError, Result};
use hexsieve_types::{CellId, GeoPoint};
use serde::{Deserialize, Serialize};

/// Outline of an arbitrary region, implicitly closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonParams {
    pub points: Vec<GeoPoint>,
}

impl PolygonParams {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }
}

/// Keeps the cells inside a user-drawn polygon.
#[derive(Debug)]
pub struct BoundingPolygonFilter {
    ctx: FilterContext,
    outline: Option<Vec<GeoPoint>>,
    state: RegionState,
}

impl BoundingPolygonFilter {
    pub const KIND: &'static str = "bounding_polygon";

    pub fn new(ctx: FilterContext) -> Self {
        Self {
            ctx,
            outline: None,
            state: RegionState::default(),
        }
    }

    fn compute_cells(&self) -> Result<Vec<CellId>> {
        let Some(outline) = &self.outline else {
            return Ok(Vec::new());
        };
        let cells = self
            .ctx
            .indexer
            .polygon_to_cells(outline, self.ctx.resolution)?;
        log::debug!(
            "Polygon with {} points covers {} cells",
            outline.len(),
            cells.len()
        );
        Ok(cells)
    }
}

impl Filter for BoundingPolygonFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::BoundingPolygon(PolygonParams { points }) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        validate_polygon_points("points", &points)?;

        self.outline = Some(points);
        self.state.valid.reset();
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        self.state.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        self.state
            .process(Self::KIND, self.outline.is_some(), || self.compute_cells())
    }

    fn describe(&self) -> String {
        match &self.outline {
            Some(points) => points
                .iter()
                .map(GeoPoint::to_string)
                .collect::<Vec<_>>()
                .join(", "),
            None => "unconfigured".to_string(),
        }
    }

    fn as_initial(&self) -> Option<&dyn InitialFilter> {
        Some(self)
    }
}

impl InitialFilter for BoundingPolygonFilter {
    fn valid_cells(&self) -> Result<Vec<CellId>> {
        self.state
            .universe(Self::KIND, self.outline.is_some(), || self.compute_cells())
    }
}
