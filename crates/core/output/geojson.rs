use crate::config::OutputConfig;
use crate::error::{HexsieveError, Result};
use ::geojson::{Feature, FeatureCollection, Geometry, Value};
use geo::ChamberlainDuquetteArea;
use hexsieve_types::{PolygonGroup, Ring};
use serde_json::{Map, json};
use std::path::Path;

fn ring_positions(ring: &Ring) -> Vec<Vec<f64>> {
    ring.closed_points().map(|p| vec![p.lng(), p.lat()]).collect()
}

/// One `Polygon` feature per group, carrying its name, hole count and
/// approximate area in square meters.
pub fn to_feature_collection(groups: &[PolygonGroup]) -> FeatureCollection {
    let features = groups
        .iter()
        .map(|group| {
            let mut rings = Vec::with_capacity(group.holes.len() + 1);
            rings.push(ring_positions(&group.outer));
            rings.extend(group.holes.iter().map(ring_positions));

            let mut properties = Map::new();
            if let Some(first) = group.outer.first() {
                properties.insert("name".to_string(), json!(first.to_string()));
            }
            properties.insert("holes".to_string(), json!(group.holes.len()));
            properties.insert(
                "area_m2".to_string(),
                json!(group.to_polygon().chamberlain_duquette_unsigned_area()),
            );

            Feature {
                bbox: None,
                geometry: Some(Geometry::new(Value::Polygon(rings))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// GeoJSON `FeatureCollection` writer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeoJsonWriter {
    document_name: Option<String>,
}

impl GeoJsonWriter {
    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            document_name: Some(config.document_name.clone()),
        }
    }

    pub fn render(&self, groups: &[PolygonGroup]) -> Result<String> {
        let mut collection = to_feature_collection(groups);
        if let Some(name) = &self.document_name {
            let mut members = Map::new();
            members.insert("name".to_string(), json!(name));
            collection.foreign_members = Some(members);
        }

        serde_json::to_string_pretty(&collection).map_err(|e| {
            HexsieveError::Serialization(format!("Failed to serialize polygons: {}", e))
        })
    }

    pub fn write<P: AsRef<Path>>(&self, groups: &[PolygonGroup], path: P) -> Result<()> {
        std::fs::write(path, self.render(groups)?)?;
        Ok(())
    }
}
