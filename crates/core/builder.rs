//! Pipeline builder
//!
//! Turns a [`PipelineSpec`] into a ready-to-run [`Pipeline`], wiring the
//! shared collaborators (indexer and external data sources) into every
//! filter through one [`FilterContext`].

use crate::config::PipelineSpec;
use crate::error::{ConfigError, Result};
use crate::filter::{FilterContext, FilterRegistry};
use crate::index::CellIndexer;
use crate::pipeline::Pipeline;
use crate::source::{IsochroneSource, SkyBrightness};
use std::fmt;
use std::sync::Arc;

/// Builder for pipelines with injected collaborators.
pub struct PipelineBuilder {
    registry: FilterRegistry,
    indexer: Option<Arc<dyn CellIndexer>>,
    brightness: Option<Arc<dyn SkyBrightness>>,
    isochrones: Option<Arc<dyn IsochroneSource>>,
    resolution: Option<u8>,
}

impl PipelineBuilder {
    /// Create a builder with the built-in filter kinds and the default
    /// indexer.
    pub fn new() -> Self {
        Self {
            registry: FilterRegistry::with_builtin(),
            indexer: None,
            brightness: None,
            isochrones: None,
            resolution: None,
        }
    }

    /// Use a custom registry, e.g. with extra filter kinds.
    pub fn registry(mut self, registry: FilterRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn indexer(mut self, indexer: Arc<dyn CellIndexer>) -> Self {
        self.indexer = Some(indexer);
        self
    }

    pub fn brightness(mut self, source: Arc<dyn SkyBrightness>) -> Self {
        self.brightness = Some(source);
        self
    }

    pub fn isochrones(mut self, source: Arc<dyn IsochroneSource>) -> Self {
        self.isochrones = Some(source);
        self
    }

    /// Override the resolution from the specification's config.
    pub fn resolution(mut self, resolution: u8) -> Self {
        self.resolution = Some(resolution);
        self
    }

    /// The indexer filters will use: the configured one, or the default
    /// for the enabled features.
    pub fn resolved_indexer(&self) -> Arc<dyn CellIndexer> {
        match &self.indexer {
            Some(indexer) => Arc::clone(indexer),
            None => default_indexer(),
        }
    }

    /// Shared context for every filter built from `spec`.
    pub fn context(&self, spec: &PipelineSpec) -> Result<FilterContext> {
        let config = match self.resolution {
            Some(resolution) => spec.config.clone().with_resolution(resolution),
            None => spec.config.clone(),
        };
        config
            .validate()
            .map_err(|e| ConfigError::range("resolution", e))?;

        let mut ctx = FilterContext::new(self.resolved_indexer(), config.resolution);
        if let Some(source) = &self.brightness {
            ctx = ctx.with_brightness(Arc::clone(source));
        }
        if let Some(source) = &self.isochrones {
            ctx = ctx.with_isochrones(Arc::clone(source));
        }
        Ok(ctx)
    }

    /// Build the pipeline. Every filter is configured here, so invalid
    /// parameters fail before anything runs.
    pub fn build(&self, spec: &PipelineSpec) -> Result<Pipeline> {
        let ctx = self.context(spec)?;

        let mut pipeline = Pipeline::new(self.registry.build(&spec.seed, &ctx)?)?;
        for filter in &spec.filters {
            pipeline.add_filter(self.registry.build(filter, &ctx)?);
        }

        log::debug!(
            "Built pipeline: seed {} + {} filters at resolution {}",
            spec.seed.params.kind(),
            spec.filters.len(),
            ctx.resolution
        );
        Ok(pipeline)
    }
}

#[cfg(feature = "h3")]
fn default_indexer() -> Arc<dyn CellIndexer> {
    Arc::new(crate::index::H3Indexer::new())
}

#[cfg(not(feature = "h3"))]
fn default_indexer() -> Arc<dyn CellIndexer> {
    Arc::new(crate::index::PlanarHexGrid::default())
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PipelineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineBuilder")
            .field("registry", &self.registry.kinds().collect::<Vec<_>>())
            .field("indexer", &self.indexer.is_some())
            .field("brightness", &self.brightness.is_some())
            .field("isochrones", &self.isochrones.is_some())
            .field("resolution", &self.resolution)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterSpec;
    use crate::error::HexsieveError;
    use crate::filter::{BoundingBox, FilterParams, LightPollutionParams};
    use crate::index::PlanarHexGrid;
    use hexsieve_types::GeoPoint;

    fn spec() -> PipelineSpec {
        PipelineSpec::new(FilterSpec::new(FilterParams::BoundingBox(BoundingBox::new(
            -2.0, 2.0, -2.0, 2.0,
        ))))
    }

    #[test]
    fn test_builder_planar() {
        let mut pipeline = PipelineBuilder::new()
            .indexer(Arc::new(PlanarHexGrid::default()))
            .resolution(1)
            .build(&spec())
            .unwrap();
        assert!(!pipeline.run().unwrap().is_empty());
    }

    #[test]
    fn test_resolution_override_validated() {
        let err = PipelineBuilder::new()
            .indexer(Arc::new(PlanarHexGrid::default()))
            .resolution(16)
            .build(&spec())
            .unwrap_err();
        assert!(matches!(
            err,
            HexsieveError::Config(ConfigError::OutOfRange { field: "resolution", .. })
        ));
    }

    #[test]
    fn test_missing_source_fails_before_run() {
        let spec = spec().with_filter(FilterSpec::new(FilterParams::LightPollution(
            LightPollutionParams { min_sqm: 21.0 },
        )));
        let builder = PipelineBuilder::new().indexer(Arc::new(PlanarHexGrid::default()));
        assert!(matches!(
            builder.build(&spec),
            Err(HexsieveError::ExternalData(_))
        ));

        let builder = builder.brightness(Arc::new(|_: GeoPoint| 22.0));
        assert_eq!(builder.build(&spec).unwrap().filters().len(), 1);
    }

    #[test]
    fn test_context_carries_sources() {
        let builder = PipelineBuilder::new()
            .indexer(Arc::new(PlanarHexGrid::default()))
            .brightness(Arc::new(|_: GeoPoint| 22.0));
        let ctx = builder.context(&spec()).unwrap();
        assert_eq!(ctx.resolution, 9);
        assert!(ctx.brightness.is_some());
        assert!(ctx.isochrones.is_none());
    }
}
