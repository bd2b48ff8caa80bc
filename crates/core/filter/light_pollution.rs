use super::{Filter, FilterContext, FilterParams};
use crate::error::{ConfigError, HexsieveError, Result};
use crate::source::SkyBrightness;
use hexsieve_types::CellId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightPollutionParams {
    /// Darkest acceptable sky is anything at or above this reading.
    pub min_sqm: f64,
}

/// Keeps cells whose center has a sky quality reading of at least `min_sqm`.
pub struct LightPollutionFilter {
    ctx: FilterContext,
    brightness: Arc<dyn SkyBrightness>,
    min_sqm: Option<f64>,
    input: Option<Vec<CellId>>,
}

impl LightPollutionFilter {
    pub const KIND: &'static str = "light_pollution";

    /// Fails when the context carries no brightness source.
    pub fn new(ctx: FilterContext) -> Result<Self> {
        let brightness = ctx.brightness.clone().ok_or_else(|| {
            HexsieveError::ExternalData(
                "Light pollution filter requires a sky brightness source".to_string(),
            )
        })?;
        Ok(Self {
            ctx,
            brightness,
            min_sqm: None,
            input: None,
        })
    }
}

impl std::fmt::Debug for LightPollutionFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LightPollutionFilter")
            .field("min_sqm", &self.min_sqm)
            .field("input", &self.input.as_ref().map(Vec::len))
            .finish_non_exhaustive()
    }
}

impl Filter for LightPollutionFilter {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn configure(&mut self, params: FilterParams) -> Result<(), ConfigError> {
        let FilterParams::LightPollution(LightPollutionParams { min_sqm }) = params else {
            return Err(params.mismatch(Self::KIND));
        };
        if !min_sqm.is_finite() {
            return Err(ConfigError::range(
                "min_sqm",
                format!("Must be finite, got: {}", min_sqm),
            ));
        }

        self.min_sqm = Some(min_sqm);
        Ok(())
    }

    fn set_input(&mut self, cells: Vec<CellId>) {
        self.input = Some(cells);
    }

    fn process(&self) -> Result<Vec<CellId>> {
        let min_sqm = self.min_sqm.ok_or(HexsieveError::NotReady {
            filter: Self::KIND,
            missing: "configuration",
        })?;
        let input = self.input.as_deref().ok_or(HexsieveError::NotReady {
            filter: Self::KIND,
            missing: "input",
        })?;

        let mut kept = Vec::with_capacity(input.len());
        for &cell in input {
            let center = self.ctx.indexer.cell_to_center(cell)?;
            if self.brightness.sqm_at(center)? >= min_sqm {
                kept.push(cell);
            }
        }

        log::debug!(
            "Light pollution kept {} of {} cells at >= {} SQM",
            kept.len(),
            input.len(),
            min_sqm
        );
        Ok(kept)
    }

    fn describe(&self) -> String {
        match self.min_sqm {
            Some(sqm) => format!("Minimum SQM: {:?}", sqm),
            None => "unconfigured".to_string(),
        }
    }
}
