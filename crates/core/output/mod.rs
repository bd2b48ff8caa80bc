//! Serialization of rendered polygons.
//!
//! Both writers emit vertices as longitude, latitude and close every ring by
//! repeating its first point.

mod geojson;
mod kml;

pub use self::geojson::{GeoJsonWriter, to_feature_collection};
pub use self::kml::KmlWriter;

use crate::config::{OutputConfig, OutputFormat};
use crate::error::Result;
use hexsieve_types::PolygonGroup;
use std::path::Path;

/// Render `groups` in the configured format.
pub fn render_document(groups: &[PolygonGroup], config: &OutputConfig) -> Result<String> {
    match config.format {
        OutputFormat::Kml => KmlWriter::from_config(config).render(groups),
        OutputFormat::GeoJson => GeoJsonWriter::from_config(config).render(groups),
    }
}

/// Render `groups` in the configured format and write them to `path`.
pub fn write_document<P: AsRef<Path>>(
    groups: &[PolygonGroup],
    config: &OutputConfig,
    path: P,
) -> Result<()> {
    let path = path.as_ref();
    let document = render_document(groups, config)?;
    std::fs::write(path, document)?;
    log::info!(
        "Wrote {} polygons as {} to {}",
        groups.len(),
        config.format.extension(),
        path.display()
    );
    Ok(())
}
