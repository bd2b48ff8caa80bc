//! External reference data consumed by filters.
//!
//! Sources are loaded once by the caller and injected into filters through
//! [`crate::filter::FilterContext`], so expensive data (rasters, routing
//! responses) is shared read-only across every filter and invocation
//! without global state.

mod brightness;
mod isochrone;

pub use brightness::{GridBrightness, SkyBrightness};
pub use isochrone::{GeoJsonIsochrones, IsochroneRequest, IsochroneSource, TransportMode};
