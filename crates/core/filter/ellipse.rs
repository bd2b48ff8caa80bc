use super::{Filter, FilterContext, FilterParams, InitialFilter, RegionState};
use crate::compute::validation::{validate_point, validate_positive, validate_rotation};
use crate::error::{ConfigError, Result};
use hexsieve_types::{CellId, GeoPoint};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Number of vertices used to approximate the ellipse outline.
pub const ELLIPSE_BOUNDARY_POINTS: usize = 100;

/// A rotated ellipse; axes are semi-axis lengths in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EllipseParams {
    pub center: GeoPoint,
    pub major_axis: f64,
    pub minor_axis: f64,
    /// Counter-clockwise rotation in degrees, within [0, 360).
    #[serde(default)]
    pub rotation: f64,
}

impl EllipseParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_point("center", &self.center)?;
        validate_positive("major_axis", self.major_axis)?;
        validate_positive("minor_axis", self.minor_axis)?;
        validate_rotation("rotation", self.rotation)
    }

    /// Outline of the ellipse as [`ELLIPSE_BOUNDARY_POINTS`] points.
    ///
    /// The major axis runs along longitude before rotation.
    pub fn boundary(&self) -> Vec<GeoPoint> {
        let (sin_r, cos_r) = self.rotation.to_radians().sin_cos();

        (0..ELLIPSE_BOUNDARY_POINTS)
            .map(|i| {
                let angle = 2.0 * PI * i as f64 / ELLIPSE_BOUNDARY_POINTS as f64;
                let x = self.major_axis * angle.cos();
                let y = self.minor_axis * angle.sin();

                let rx = x * cos_r - y * sin_r;
                let ry = x * sin_r + y * cos_r;
                GeoPoint::new(self.center.lat() + ry, self.center.lng() + rx)
            })
            .collect()
    }
}

/// Keeps the cells inside a rotated ellipse.
#[derive(Debug)]
pub struct BoundingEllipseFilter {
    ctx: FilterContext,
    ellipse: Option<EllipseParams>,
    state: RegionState,
}

impl BoundingEllipseFilter {
    pub const KIND: &'static str = "bounding_ellipse";

    pub fn new(ctx: FilterContext) -> Self {
        Self {
            ctx,
            ellipse: None,
            state: RegionState::default(),
        }
    }

    fn compute_cells(&self) -> Result<Vec<CellId>> {
        let Some(ellipse) = &self.ellipse else {
            return Ok(Vec::new());
        };
        log::debug!("Filling ellipse {}", self.describe());
        self.ctx
            .indexer
            .polygon_to_cells(&ellipse.boundary(), self.ctx.resolution)
    }
}

impl Filter for BoundingEllipseFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::BoundingEllipse(ellipse) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        ellipse.validate()?;

        self.ellipse = Some(ellipse);
        self.state.valid.reset();
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        self.state.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        self.state
            .process(Self::KIND, self.ellipse.is_some(), || self.compute_cells())
    }

    fn describe(&self) -> String {
        match &self.ellipse {
            Some(e) => format!(
                "Center: {}, Major Axis: {:.2}, Minor Axis: {:.2}, Rotation: {:.2}",
                e.center, e.major_axis, e.minor_axis, e.rotation
            ),
            None => "Ellipse not initialized".to_string(),
        }
    }

    fn as_initial(&self) -> Option<&dyn InitialFilter> {
        Some(self)
    }
}

impl InitialFilter for BoundingEllipseFilter {
    fn valid_cells(&self) -> Result<Vec<CellId>> {
        self.state
            .universe(Self::KIND, self.ellipse.is_some(), || self.compute_cells())
    }
}
