//! Compile-time registry of filter kinds.
//!
//! Kinds are looked up by their `kind` tag, the same tag used in pipeline
//! specifications, and constructed against a shared [`FilterContext`].

use super::{
    BoundingBoxFilter, BoundingEllipseFilter, BoundingPolygonFilter, CompositeFilter, Filter,
    FilterContext, IsochroneFilter, LightPollutionFilter,
};
use crate::config::FilterSpec;
use crate::error::{ConfigError, Result};
use std::collections::BTreeMap;

/// Builds an unconfigured filter.
pub type FilterConstructor = fn(&FilterContext) -> Result<Box<dyn Filter>>;

#[derive(Debug, Clone)]
pub struct FilterRegistry {
    constructors: BTreeMap<&'static str, FilterConstructor>,
}

impl FilterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// A registry with every built-in filter kind.
    pub fn with_builtin() -> Self {
        Self::new()
            .with(BoundingBoxFilter::KIND, |ctx| {
                Ok(Box::new(BoundingBoxFilter::new(ctx.clone())))
            })
            .with(BoundingPolygonFilter::KIND, |ctx| {
                Ok(Box::new(BoundingPolygonFilter::new(ctx.clone())))
            })
            .with(BoundingEllipseFilter::KIND, |ctx| {
                Ok(Box::new(BoundingEllipseFilter::new(ctx.clone())))
            })
            .with(IsochroneFilter::KIND, |ctx| {
                Ok(Box::new(IsochroneFilter::new(ctx.clone())?))
            })
            .with(LightPollutionFilter::KIND, |ctx| {
                Ok(Box::new(LightPollutionFilter::new(ctx.clone())?))
            })
            .with(CompositeFilter::KIND, |_| Ok(Box::new(CompositeFilter::new())))
    }

    pub fn with(mut self, kind: &'static str, constructor: FilterConstructor) -> Self {
        self.register(kind, constructor);
        self
    }

    /// Register a kind, replacing any previous constructor for it.
    pub fn register(&mut self, kind: &'static str, constructor: FilterConstructor) {
        if self.constructors.insert(kind, constructor).is_some() {
            log::warn!("Replacing registered filter kind {}", kind);
        }
    }

    /// Registered kind tags in sorted order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Construct an unconfigured filter by kind tag.
    pub fn create(&self, kind: &str, ctx: &FilterContext) -> Result<Box<dyn Filter>> {
        let constructor = self
            .constructors
            .get(kind)
            .ok_or_else(|| ConfigError::UnknownFilterKind(kind.to_string()))?;
        constructor(ctx)
    }

    /// Construct and configure a filter tree from its specification.
    pub fn build(&self, spec: &FilterSpec, ctx: &FilterContext) -> Result<Box<dyn Filter>> {
        let mut filter = self.create(spec.params.kind(), ctx)?;
        filter.configure(spec.params.clone())?;

        for child in &spec.children {
            filter.add_filter(self.build(child, ctx)?)?;
        }

        log::debug!("Built {} filter: {}", filter.kind(), filter.describe());
        Ok(filter)
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}
