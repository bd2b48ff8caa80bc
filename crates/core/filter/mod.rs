//! Filter contract and the built-in filters.
//!
//! A filter is configured once with validated parameters, then handed an
//! input cell collection and asked to `process()` it any number of times.
//! Initial filters can additionally produce their own cell universe from
//! nothing, which is how a pipeline is seeded.

use crate::error::{ConfigError, HexsieveError, Result};
use crate::index::CellIndexer;
use crate::source::{IsochroneRequest, IsochroneSource, SkyBrightness};
use hexsieve_types::CellId;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

mod bounding_box;
mod composite;
mod ellipse;
mod isochrone;
mod light_pollution;
mod polygon;
mod registry;

pub use bounding_box::{BoundingBox, BoundingBoxFilter};
pub use composite::{CompositeFilter, CompositeParams};
pub use ellipse::{BoundingEllipseFilter, ELLIPSE_BOUNDARY_POINTS, EllipseParams};
pub use isochrone::{IsochroneFilter, MAX_ISOCHRONE_MINUTES, MIN_ISOCHRONE_MINUTES};
pub use light_pollution::{LightPollutionFilter, LightPollutionParams};
pub use polygon::{BoundingPolygonFilter, PolygonParams};
pub use registry::{FilterConstructor, FilterRegistry};

/// Trait implemented by every filter.
pub trait Filter: fmt::Debug + Send {
    /// Registry tag of this filter kind.
    fn kind(&self) -> &'static str;

    /// Validate and store parameters.
    ///
    /// On error the previously configured parameters stay in effect.
    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError>;

    /// Replace the working input collection.
    fn set_input(&mut self, cells: Vec<CellId>);

    /// Filter the last input with the last configuration.
    ///
    /// Idempotent: repeated calls without reconfiguring return the same cells.
    fn process(&self) -> Result<Vec<CellId>>;

    /// Human-readable summary of the configured requirements.
    fn describe(&self) -> String;

    /// This filter as an initial filter, if it can seed a pipeline.
    fn as_initial(&self) -> Option<&dyn InitialFilter> {
        None
    }

    /// Append a child filter. Only composite filters accept children.
    fn add_filter(&mut self, child: Box<dyn Filter>) -> Result<(), ConfigError> {
        Err(ConfigError::shape(
            self.kind(),
            format!("cannot take child filter {}", child.kind()),
        ))
    }
}

/// A filter that can produce cells without any input, used to seed a
/// pipeline with its universe.
pub trait InitialFilter: Filter {
    /// Every cell this filter accepts. Does not require `set_input`.
    fn valid_cells(&self) -> Result<Vec<CellId>>;
}

/// Parameters for every built-in filter kind, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterParams {
    BoundingBox(BoundingBox),
    BoundingPolygon(PolygonParams),
    BoundingEllipse(EllipseParams),
    Isochrone(IsochroneRequest),
    LightPollution(LightPollutionParams),
    Composite(CompositeParams),
}

impl FilterParams {
    /// Registry tag of the filter these parameters configure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::BoundingBox(_) => BoundingBoxFilter::KIND,
            Self::BoundingPolygon(_) => BoundingPolygonFilter::KIND,
            Self::BoundingEllipse(_) => BoundingEllipseFilter::KIND,
            Self::Isochrone(_) => IsochroneFilter::KIND,
            Self::LightPollution(_) => LightPollutionFilter::KIND,
            Self::Composite(_) => CompositeFilter::KIND,
        }
    }

    pub(crate) fn mismatch(&self, filter: &'static str) -> ConfigError {
        ConfigError::shape(
            filter,
            format!("expected {} parameters, got {}", filter, self.kind()),
        )
    }
}

/// Shared collaborators handed to filters at construction.
#[derive(Clone)]
pub struct FilterContext {
    pub indexer: Arc<dyn CellIndexer>,
    pub resolution: u8,
    pub brightness: Option<Arc<dyn SkyBrightness>>,
    pub isochrones: Option<Arc<dyn IsochroneSource>>,
}

impl FilterContext {
    pub fn new(indexer: Arc<dyn CellIndexer>, resolution: u8) -> Self {
        Self {
            indexer,
            resolution,
            brightness: None,
            isochrones: None,
        }
    }

    pub fn with_brightness(mut self, source: Arc<dyn SkyBrightness>) -> Self {
        self.brightness = Some(source);
        self
    }

    pub fn with_isochrones(mut self, source: Arc<dyn IsochroneSource>) -> Self {
        self.isochrones = Some(source);
        self
    }
}

impl fmt::Debug for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("resolution", &self.resolution)
            .field("brightness", &self.brightness.is_some())
            .field("isochrones", &self.isochrones.is_some())
            .finish()
    }
}

/// Lazily computed universe of an initial filter, reset on reconfigure.
#[derive(Debug, Default)]
pub(crate) struct ValidCells(OnceCell<Vec<CellId>>);

impl ValidCells {
    pub(crate) fn get_or_compute<F>(&self, compute: F) -> Result<&[CellId]>
    where
        F: FnOnce() -> Result<Vec<CellId>>,
    {
        self.0.get_or_try_init(compute).map(Vec::as_slice)
    }

    pub(crate) fn reset(&mut self) {
        self.0 = OnceCell::new();
    }
}

/// Input and universe bookkeeping shared by the region filters.
#[derive(Debug, Default)]
pub(crate) struct RegionState {
    pub(crate) input: Option<Vec<CellId>>,
    pub(crate) valid: ValidCells,
}

impl RegionState {
    /// Keep the input cells that belong to the region's universe.
    pub(crate) fn process<F>(
        &self,
        filter: &'static str,
        configured: bool,
        compute: F,
    ) -> Result<Vec<CellId>>
    where
        F: FnOnce() -> Result<Vec<CellId>>,
    {
        if !configured {
            return Err(HexsieveError::NotReady {
                filter,
                missing: "configuration",
            });
        }
        let input = self.input.as_deref().ok_or(HexsieveError::NotReady {
            filter,
            missing: "input",
        })?;
        let valid = self.valid.get_or_compute(compute)?;
        Ok(crate::compute::cellset::intersect(input, valid))
    }

    pub(crate) fn universe<F>(
        &self,
        filter: &'static str,
        configured: bool,
        compute: F,
    ) -> Result<Vec<CellId>>
    where
        F: FnOnce() -> Result<Vec<CellId>>,
    {
        if !configured {
            return Err(HexsieveError::NotReady {
                filter,
                missing: "configuration",
            });
        }
        Ok(self.valid.get_or_compute(compute)?.to_vec())
    }
}
