//! Engine configuration and pipeline specifications.
//!
//! A [`PipelineSpec`] is the serializable description of a whole run: engine
//! settings, the mandatory seed filter and the downstream filters in order.
use crate::filter::FilterParams;
use serde::de::Error;

/// Finest H3 resolution.
pub const MAX_RESOLUTION: u8 = 15;

/// Resolutions above this produce very large cell sets for regional boxes.
const FINE_RESOLUTION_WARNING: u8 = 11;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tessellation resolution; higher values mean smaller cells.
    #[serde(default = "Config::default_resolution")]
    pub resolution: u8,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Kml,
    GeoJson,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Kml => "kml",
            Self::GeoJson => "geojson",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "kml" => Ok(Self::Kml),
            "geojson" | "json" => Ok(Self::GeoJson),
            other => Err(format!("Unknown output format: {}", other)),
        }
    }
}

/// Settings for the rendered polygon document
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_document_name")]
    pub document_name: String,

    /// KML colour in `aabbggrr` hex.
    #[serde(default = "OutputConfig::default_polygon_color")]
    pub polygon_color: String,

    #[serde(default)]
    pub format: OutputFormat,
}

impl OutputConfig {
    fn default_document_name() -> String {
        "Filtered Hexagons".to_string()
    }

    fn default_polygon_color() -> String {
        "aa0000ff".to_string()
    }

    pub fn with_document_name(mut self, name: impl Into<String>) -> Self {
        self.document_name = name.into();
        self
    }

    pub fn with_polygon_color(mut self, color: impl Into<String>) -> Self {
        self.polygon_color = color.into();
        self
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.polygon_color.len() != 8
            || !self.polygon_color.chars().all(|c| c.is_ascii_hexdigit())
        {
            return Err(format!(
                "Polygon color must be 8 hex digits (aabbggrr), got: {}",
                self.polygon_color
            ));
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            document_name: Self::default_document_name(),
            polygon_color: Self::default_polygon_color(),
            format: OutputFormat::default(),
        }
    }
}

impl Config {
    const fn default_resolution() -> u8 {
        9
    }

    pub fn with_resolution(mut self, resolution: u8) -> Self {
        if resolution > FINE_RESOLUTION_WARNING {
            log::warn!(
                "Resolution {} is very fine; large regions may produce millions of cells",
                resolution
            );
        }
        self.resolution = resolution;
        self
    }

    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.resolution > MAX_RESOLUTION {
            return Err(format!(
                "Resolution must be within [0, {}], got: {}",
                MAX_RESOLUTION, self.resolution
            ));
        }
        self.output.validate()
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            output: OutputConfig::default(),
        }
    }
}

/// One filter in a pipeline specification, with its children when it is a
/// composite.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilterSpec {
    #[serde(flatten)]
    pub params: FilterParams,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FilterSpec>,
}

impl FilterSpec {
    pub fn new(params: FilterParams) -> Self {
        Self {
            params,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: FilterSpec) -> Self {
        self.children.push(child);
        self
    }
}

/// A complete, serializable pipeline description.
///
/// ```
/// use hexsieve::config::PipelineSpec;
///
/// let spec = PipelineSpec::from_json(r#"{
///     "config": {"resolution": 7},
///     "seed": {"kind": "bounding_box", "min_lat": 33.5, "max_lat": 34.2, "min_lon": -116.5, "max_lon": -115.0},
///     "filters": [
///         {"kind": "composite", "operator": "NOT", "children": [
///             {"kind": "bounding_ellipse", "center": {"lat": 33.8, "lng": -116.0}, "major_axis": 0.2, "minor_axis": 0.1}
///         ]}
///     ]
/// }"#).unwrap();
/// assert_eq!(spec.config.resolution, 7);
/// assert_eq!(spec.filters[0].children.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PipelineSpec {
    #[serde(default)]
    pub config: Config,

    pub seed: FilterSpec,

    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl PipelineSpec {
    pub fn new(seed: FilterSpec) -> Self {
        Self {
            config: Config::default(),
            seed,
            filters: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let spec: PipelineSpec = serde_json::from_str(json)?;
        if let Err(e) = spec.config.validate() {
            return Err(Error::custom(e));
        }
        Ok(spec)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let spec: PipelineSpec = toml::from_str(toml_str)?;
        if let Err(e) = spec.config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(spec)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
