use super::{Filter, FilterContext, FilterParams, InitialFilter, RegionState};
use crate::compute::validation::validate_point;
use crate::error::{ConfigError, HexsieveError, Result};
use crate::source::{IsochroneRequest, IsochroneSource};
use hexsieve_types::CellId;
use std::sync::Arc;

pub const MIN_ISOCHRONE_MINUTES: u32 = 1;
pub const MAX_ISOCHRONE_MINUTES: u32 = 60;

/// Keeps the cells reachable from a center point within a travel time.
///
/// The reachable area is requested from the context's [`IsochroneSource`]
/// the first time the universe is needed and reused until reconfigured.
pub struct IsochroneFilter {
    ctx: FilterContext,
    source: Arc<dyn IsochroneSource>,
    request: Option<IsochroneRequest>,
    state: RegionState,
}

impl IsochroneFilter {
    pub const KIND: &'static str = "isochrone";

    /// Fails when the context carries no isochrone source.
    pub fn new(ctx: FilterContext) -> Result<Self> {
        let source = ctx.isochrones.clone().ok_or_else(|| {
            HexsieveError::ExternalData(
                "Isochrone filter requires an isochrone source".to_string(),
            )
        })?;
        Ok(Self {
            ctx,
            source,
            request: None,
            state: RegionState::default(),
        })
    }

    fn compute_cells(&self) -> Result<Vec<CellId>> {
        let Some(request) = &self.request else {
            return Ok(Vec::new());
        };

        let boundary = self.source.isochrone(request)?;
        if boundary.is_empty() {
            log::warn!("Isochrone {} is empty", self.describe());
            return Ok(Vec::new());
        }

        let cells = self
            .ctx
            .indexer
            .polygon_to_cells(&boundary, self.ctx.resolution)?;
        log::debug!(
            "Isochrone with {} boundary points covers {} cells",
            boundary.len(),
            cells.len()
        );
        Ok(cells)
    }
}

impl std::fmt::Debug for IsochroneFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IsochroneFilter")
            .field("ctx", &self.ctx)
            .field("request", &self.request)
            .finish_non_exhaustive()
    }
}

impl Filter for IsochroneFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::Isochrone(request) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        validate_point("center", &request.center)?;
        if !(MIN_ISOCHRONE_MINUTES..=MAX_ISOCHRONE_MINUTES).contains(&request.max_minutes) {
            return Err(ConfigError::range(
                "max_minutes",
                format!(
                    "Must be within [{}, {}], got: {}",
                    MIN_ISOCHRONE_MINUTES, MAX_ISOCHRONE_MINUTES, request.max_minutes
                ),
            ));
        }

        self.request = Some(request);
        self.state.valid.reset();
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        self.state.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        self.state
            .process(Self::KIND, self.request.is_some(), || self.compute_cells())
    }

    fn describe(&self) -> String {
        match &self.request {
            Some(r) => format!(
                "Center: {}, Max Minutes: {}, Mode: {}",
                r.center, r.max_minutes, r.mode
            ),
            None => "unconfigured".to_string(),
        }
    }

    fn as_initial(&self) -> Option<&dyn InitialFilter> {
        Some(self)
    }
}

impl InitialFilter for IsochroneFilter {
    fn valid_cells(&self) -> Result<Vec<CellId>> {
        self.state
            .universe(Self::KIND, self.request.is_some(), || self.compute_cells())
    }
}
