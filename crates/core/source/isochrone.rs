use crate::error::{HexsieveError, Result};
use geojson::{GeoJson, Geometry, Value};
use hexsieve_types::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode of travel for an isochrone request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    #[default]
    Driving,
    PublicTransport,
    Cycling,
    Walking,
    Hiking,
}

impl TransportMode {
    /// Routing service profile name.
    pub fn profile(&self) -> &'static str {
        match self {
            Self::Driving => "driving-car",
            Self::PublicTransport => "public-transport",
            Self::Cycling => "cycling-regular",
            Self::Walking => "foot-walking",
            Self::Hiking => "foot-hiking",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile())
    }
}

/// Area reachable from `center` within `max_minutes` using `mode`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IsochroneRequest {
    pub center: GeoPoint,
    pub max_minutes: u32,
    #[serde(default)]
    pub mode: TransportMode,
}

impl IsochroneRequest {
    /// Travel budget in seconds, `None` if it does not fit a `u32`.
    pub fn range_seconds(&self) -> Option<u32> {
        self.max_minutes.checked_mul(60)
    }
}

/// Producer of isochrone polygons.
pub trait IsochroneSource: Send + Sync {
    /// Boundary of the reachable area, implicitly closed.
    fn isochrone(&self, request: &IsochroneRequest) -> Result<Vec<GeoPoint>>;
}

/// A routing-service isochrone response that was fetched ahead of time.
///
/// Accepts a GeoJSON `FeatureCollection`, `Feature` or bare geometry and
/// uses the exterior ring of the first polygon, as routing services return
/// one feature per requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct GeoJsonIsochrones {
    boundary: Vec<GeoPoint>,
}

impl GeoJsonIsochrones {
    pub fn from_geojson(geojson: &str) -> Result<Self> {
        let parsed: GeoJson = geojson.parse().map_err(|e| {
            HexsieveError::ExternalData(format!("Failed to parse isochrone GeoJSON: {}", e))
        })?;

        let geometry = match parsed {
            GeoJson::FeatureCollection(collection) => collection
                .features
                .into_iter()
                .next()
                .and_then(|feature| feature.geometry),
            GeoJson::Feature(feature) => feature.geometry,
            GeoJson::Geometry(geometry) => Some(geometry),
        }
        .ok_or_else(|| {
            HexsieveError::ExternalData("Isochrone response contains no geometry".to_string())
        })?;

        Ok(Self {
            boundary: Self::exterior(geometry)?,
        })
    }

    fn exterior(geometry: Geometry) -> Result<Vec<GeoPoint>> {
        let rings = match geometry.value {
            Value::Polygon(rings) => rings,
            Value::MultiPolygon(polygons) => polygons.into_iter().next().unwrap_or_default(),
            _ => {
                return Err(HexsieveError::ExternalData(
                    "Isochrone geometry is not a Polygon".to_string(),
                ));
            }
        };

        let exterior = rings.into_iter().next().ok_or_else(|| {
            HexsieveError::ExternalData("Isochrone polygon has no rings".to_string())
        })?;

        let mut points = exterior
            .iter()
            .map(|coords| match coords.as_slice() {
                [lng, lat, ..] => Ok(GeoPoint::new(*lat, *lng)),
                _ => Err(HexsieveError::ExternalData(
                    "Coordinate must have at least 2 values".to_string(),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        if points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        Ok(points)
    }

    pub fn boundary(&self) -> &[GeoPoint] {
        &self.boundary
    }
}

impl IsochroneSource for GeoJsonIsochrones {
    fn isochrone(&self, request: &IsochroneRequest) -> Result<Vec<GeoPoint>> {
        log::debug!(
            "Serving {} minute {} isochrone around {} from a stored response",
            request.max_minutes,
            request.mode,
            request.center
        );
        Ok(self.boundary.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {"group_index": 0, "value": 1800.0},
            "geometry": {
                "type": "Polygon",
                "coordinates": [[
                    [-116.5, 33.5], [-116.0, 33.5], [-116.0, 34.0], [-116.5, 34.0], [-116.5, 33.5]
                ]]
            }
        }]
    }"#;

    #[test]
    fn test_parse_feature_collection() {
        let source = GeoJsonIsochrones::from_geojson(RESPONSE).unwrap();
        assert_eq!(source.boundary().len(), 4);
        assert_eq!(source.boundary()[0], GeoPoint::new(33.5, -116.5));
    }

    #[test]
    fn test_non_polygon_rejected() {
        let point = r#"{"type": "Point", "coordinates": [-116.5, 33.5]}"#;
        assert!(matches!(
            GeoJsonIsochrones::from_geojson(point),
            Err(HexsieveError::ExternalData(_))
        ));
        assert!(GeoJsonIsochrones::from_geojson("not json").is_err());
    }

    #[test]
    fn test_request_range_and_profile() {
        let request = IsochroneRequest {
            center: GeoPoint::new(33.8, -116.4),
            max_minutes: 30,
            mode: TransportMode::Cycling,
        };
        assert_eq!(request.range_seconds(), Some(1800));
        assert_eq!(request.mode.profile(), "cycling-regular");

        let unbounded = IsochroneRequest {
            max_minutes: u32::MAX,
            ..request
        };
        assert_eq!(unbounded.range_seconds(), None);
    }

    #[test]
    fn test_source_returns_boundary() {
        let source = GeoJsonIsochrones::from_geojson(RESPONSE).unwrap();
        let request = IsochroneRequest {
            center: GeoPoint::new(33.8, -116.4),
            max_minutes: 30,
            mode: TransportMode::default(),
        };
        assert_eq!(source.isochrone(&request).unwrap(), source.boundary());
    }
}
