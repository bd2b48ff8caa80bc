use crate::error::{HexsieveError, Result};
use hexsieve_types::GeoPoint;
use serde::{Deserialize, Serialize};

/// Sky brightness lookup, in SQM (magnitudes per square arcsecond; higher
/// is darker).
pub trait SkyBrightness: Send + Sync {
    fn sqm_at(&self, point: GeoPoint) -> Result<f64>;
}

impl<F> SkyBrightness for F
where
    F: Fn(GeoPoint) -> f64 + Send + Sync,
{
    fn sqm_at(&self, point: GeoPoint) -> Result<f64> {
        Ok(self(point))
    }
}

/// A regular latitude/longitude raster of SQM samples.
///
/// Row 0 is the southernmost row and column 0 the westernmost column; each
/// sample covers a `step` x `step` degree square whose south-west corner is
/// `(south + row * step, west + col * step)`.
///
/// # Examples
///
/// ```
/// use hexsieve::source::{GridBrightness, SkyBrightness};
/// use hexsieve_types::GeoPoint;
///
/// let grid = GridBrightness::new(33.0, -117.0, 0.5, 2, 2, vec![21.1, 21.4, 21.7, 22.0]).unwrap();
/// assert_eq!(grid.sqm_at(GeoPoint::new(33.7, -116.2)).unwrap(), 22.0);
/// assert!(grid.sqm_at(GeoPoint::new(40.0, -116.2)).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridBrightness {
    south: f64,
    west: f64,
    step: f64,
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl GridBrightness {
    pub fn new(
        south: f64,
        west: f64,
        step: f64,
        rows: usize,
        cols: usize,
        values: Vec<f64>,
    ) -> Result<Self> {
        let grid = Self {
            south,
            west,
            step,
            rows,
            cols,
            values,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// Parse a raster from JSON with the same field names as the struct.
    pub fn from_json(json: &str) -> Result<Self> {
        let grid: Self = serde_json::from_str(json)?;
        grid.validate()?;
        Ok(grid)
    }

    fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(HexsieveError::ExternalData(format!(
                "Brightness grid step must be positive, got {}",
                self.step
            )));
        }
        if !(self.south.is_finite() && self.west.is_finite()) {
            return Err(HexsieveError::ExternalData(
                "Brightness grid origin must be finite".to_string(),
            ));
        }
        let expected = self.rows.checked_mul(self.cols).ok_or_else(|| {
            HexsieveError::ExternalData(format!(
                "Brightness grid of {} x {} samples is too large",
                self.rows, self.cols
            ))
        })?;
        if self.values.len() != expected {
            return Err(HexsieveError::ExternalData(format!(
                "Brightness grid has {} values, expected {} x {}",
                self.values.len(),
                self.rows,
                self.cols
            )));
        }
        Ok(())
    }
}

impl SkyBrightness for GridBrightness {
    fn sqm_at(&self, point: GeoPoint) -> Result<f64> {
        let row = ((point.lat() - self.south) / self.step).floor();
        let col = ((point.lng() - self.west) / self.step).floor();

        if !(row >= 0.0 && col >= 0.0 && row < self.rows as f64 && col < self.cols as f64) {
            return Err(HexsieveError::ExternalData(format!(
                "Point {} lies outside the brightness grid",
                point
            )));
        }

        Ok(self.values[row as usize * self.cols + col as usize])
    }
}
