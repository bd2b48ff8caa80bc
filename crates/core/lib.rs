//! Composable filters over hexagonal cells, with boundary amalgamation.
//!
//! ## Features
//! - **Filter pipeline**: a seed filter produces the candidate universe, and
//!   downstream filters narrow it strictly in order
//! - **Boolean composition**: OR / XOR / NOT composite filters with nested
//!   children
//! - **Amalgamation**: adjacent cells merge into outer rings and holes by
//!   cancelling shared edges
//! - **Output**: KML placemarks or a GeoJSON feature collection
//!
//! ```rust
//! use hexsieve::prelude::*;
//! use std::sync::Arc;
//!
//! let spec = PipelineSpec::new(FilterSpec::new(FilterParams::BoundingBox(
//!     BoundingBox::new(-2.0, 2.0, -2.0, 2.0),
//! )));
//!
//! let indexer = Arc::new(PlanarHexGrid::default());
//! let mut pipeline = PipelineBuilder::new()
//!     .indexer(indexer.clone())
//!     .resolution(1)
//!     .build(&spec)?;
//!
//! let cells = pipeline.run()?;
//! let polygons = render(&cells, indexer.as_ref())?;
//! assert_eq!(polygons.len(), 1);
//! # Ok::<(), hexsieve::HexsieveError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod filter;
pub mod index;
pub mod output;
pub mod pipeline;
pub mod source;

pub use builder::PipelineBuilder;
pub use config::{Config, FilterSpec, OutputConfig, OutputFormat, PipelineSpec};
pub use error::{ConfigError, GeometryError, HexsieveError, Result};
pub use pipeline::{Pipeline, render};

pub use hexsieve_types::{CellId, GeoPoint, LogicalOperator, PolygonGroup, Ring};

pub use compute::validation;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{HexsieveError, Pipeline, PipelineBuilder, Result, render};

    pub use crate::{CellId, GeoPoint, LogicalOperator, PolygonGroup, Ring};

    pub use crate::{Config, FilterSpec, OutputConfig, OutputFormat, PipelineSpec};

    pub use crate::filter::{
        BoundingBox, CompositeParams, EllipseParams, Filter, FilterContext, FilterParams,
        FilterRegistry, InitialFilter, LightPollutionParams, PolygonParams,
    };

    #[cfg(feature = "h3")]
    pub use crate::index::H3Indexer;
    pub use crate::index::{CellIndexer, PlanarHexGrid};

    pub use crate::source::{IsochroneRequest, IsochroneSource, SkyBrightness, TransportMode};
}
