use super::{Filter, FilterContext, FilterParams, InitialFilter, RegionState};
use crate::compute::validation::{validate_latitude, validate_longitude};
use crate::error::{ConfigError, Result};
use hexsieve_types::{CellId, GeoPoint};
use serde::{Deserialize, Serialize};

/// A latitude/longitude rectangle in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    pub fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// Build from `[min_lat, max_lat, min_lon, max_lon]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexsieve::filter::BoundingBox;
    ///
    /// let desert = BoundingBox::from_slice(&[33.5, 34.2, -116.5, -115.0]).unwrap();
    /// assert_eq!(desert.max_lat, 34.2);
    /// assert!(BoundingBox::from_slice(&[33.5, 34.2, -116.5]).is_err());
    /// ```
    pub fn from_slice(bounds: &[f64]) -> Result<Self, ConfigError> {
        match bounds {
            &[min_lat, max_lat, min_lon, max_lon] => {
                Ok(Self::new(min_lat, max_lat, min_lon, max_lon))
            }
            _ => Err(ConfigError::shape(
                BoundingBoxFilter::KIND,
                format!(
                    "Bounding box requires exactly 4 values [min_lat, max_lat, min_lon, max_lon], got {}",
                    bounds.len()
                ),
            )),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_latitude("min_lat", self.min_lat)?;
        validate_latitude("max_lat", self.max_lat)?;
        if self.min_lat > self.max_lat {
            return Err(ConfigError::range(
                "min_lat",
                format!(
                    "min_lat ({}) must be <= max_lat ({})",
                    self.min_lat, self.max_lat
                ),
            ));
        }

        validate_longitude("min_lon", self.min_lon)?;
        validate_longitude("max_lon", self.max_lon)?;
        if self.min_lon > self.max_lon {
            return Err(ConfigError::range(
                "min_lon",
                format!(
                    "min_lon ({}) must be <= max_lon ({})",
                    self.min_lon, self.max_lon
                ),
            ));
        }

        Ok(())
    }

    /// Corners in fill order: south-west, south-east, north-east, north-west.
    pub fn corners(&self) -> [GeoPoint; 4] {
        [
            GeoPoint::new(self.min_lat, self.min_lon),
            GeoPoint::new(self.min_lat, self.max_lon),
            GeoPoint::new(self.max_lat, self.max_lon),
            GeoPoint::new(self.max_lat, self.min_lon),
        ]
    }
}

/// Keeps the cells inside a latitude/longitude rectangle.
#[derive(Debug)]
pub struct BoundingBoxFilter {
    ctx: FilterContext,
    bounds: Option<BoundingBox>,
    state: RegionState,
}

impl BoundingBoxFilter {
    pub const KIND: &'static str = "bounding_box";

    pub fn new(ctx: FilterContext) -> Self {
        Self {
            ctx,
            bounds: None,
            state: RegionState::default(),
        }
    }

    pub fn bounds(&self) -> Option<&BoundingBox> {
        self.bounds.as_ref()
    }

    fn compute_cells(&self) -> Result<Vec<CellId>> {
        let Some(bounds) = self.bounds else {
            return Ok(Vec::new());
        };
        let cells = self
            .ctx
            .indexer
            .polygon_to_cells(&bounds.corners(), self.ctx.resolution)?;
        log::debug!("Bounding box {} covers {} cells", self.describe(), cells.len());
        Ok(cells)
    }
}

impl Filter for BoundingBoxFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::BoundingBox(bounds) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        bounds.validate()?;

        self.bounds = Some(bounds);
        self.state.valid.reset();
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        self.state.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        self.state
            .process(Self::KIND, self.bounds.is_some(), || self.compute_cells())
    }

    fn describe(&self) -> String {
        match &self.bounds {
            Some(b) => format!(
                "{} -> {}, {} -> {}",
                b.min_lat, b.max_lat, b.min_lon, b.max_lon
            ),
            None => "unconfigured".to_string(),
        }
    }

    fn as_initial(&self) -> Option<&dyn InitialFilter> {
        Some(self)
    }
}

impl InitialFilter for BoundingBoxFilter {
    fn valid_cells(&self) -> Result<Vec<CellId>> {
        self.state
            .universe(Self::KIND, self.bounds.is_some(), || self.compute_cells())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HexsieveError;
    use crate::index::PlanarHexGrid;
    use std::sync::Arc;

    fn filter() -> BoundingBoxFilter {
        BoundingBoxFilter::new(FilterContext::new(Arc::new(PlanarHexGrid::default()), 1))
    }

    fn params(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> FilterParams {
        FilterParams::BoundingBox(BoundingBox::new(min_lat, max_lat, min_lon, max_lon))
    }

    #[test]
    fn test_rejects_out_of_range() {
        let mut f = filter();
        assert!(matches!(
            f.configure(params(-91.0, 10.0, 0.0, 1.0)),
            Err(ConfigError::OutOfRange { field: "min_lat", .. })
        ));
        assert!(matches!(
            f.configure(params(0.0, 10.0, 5.0, 1.0)),
            Err(ConfigError::OutOfRange { field: "min_lon", .. })
        ));
        assert!(matches!(
            f.configure(params(0.0, 10.0, 0.0, 181.0)),
            Err(ConfigError::OutOfRange { field: "max_lon", .. })
        ));
    }

    #[test]
    fn test_failed_configure_keeps_previous_state() {
        let mut f = filter();
        f.configure(params(-2.0, 2.0, -2.0, 2.0)).unwrap();
        let before = f.valid_cells().unwrap();

        assert!(f.configure(params(5.0, 1.0, 0.0, 1.0)).is_err());
        assert_eq!(f.bounds(), Some(&BoundingBox::new(-2.0, 2.0, -2.0, 2.0)));
        assert_eq!(f.valid_cells().unwrap(), before);
    }

    #[test]
    fn test_wrong_params_are_invalid_shape() {
        let mut f = filter();
        let err = f
            .configure(FilterParams::LightPollution(super::super::LightPollutionParams {
                min_sqm: 21.0,
            }))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidShape { filter: "bounding_box", .. }));
    }

    #[test]
    fn test_process_requires_configuration_and_input() {
        let mut f = filter();
        assert!(matches!(
            f.process(),
            Err(HexsieveError::NotReady { missing: "configuration", .. })
        ));

        f.configure(params(-2.0, 2.0, -2.0, 2.0)).unwrap();
        assert!(matches!(
            f.process(),
            Err(HexsieveError::NotReady { missing: "input", .. })
        ));
    }

    #[test]
    fn test_process_keeps_cells_inside() {
        let mut f = filter();
        f.configure(params(-2.0, 2.0, -2.0, 2.0)).unwrap();
        let inside = PlanarHexGrid::cell(0, 0, 1).unwrap();
        let outside = PlanarHexGrid::cell(40, 40, 1).unwrap();

        f.set_input(vec![outside, inside]);
        assert_eq!(f.process().unwrap(), vec![inside]);
        assert_eq!(f.process().unwrap(), vec![inside]);
    }

    #[test]
    fn test_reconfigure_refreshes_universe() {
        let mut f = filter();
        f.configure(params(-1.0, 1.0, -1.0, 1.0)).unwrap();
        let small = f.valid_cells().unwrap().len();

        f.configure(params(-4.0, 4.0, -4.0, 4.0)).unwrap();
        assert!(f.valid_cells().unwrap().len() > small);
    }

    #[test]
    fn test_describe() {
        let mut f = filter();
        f.configure(params(33.5, 34.2, -116.5, -115.0)).unwrap();
        assert_eq!(f.describe(), "33.5 -> 34.2, -116.5 -> -115");
    }
}
