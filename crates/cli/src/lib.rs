//! Command line runner: load a pipeline specification, run it, merge the
//! surviving cells into polygons and write them to a file.

use anyhow::Context;
use clap::Parser;
use hexsieve::index::{CellIndexer, PlanarHexGrid};
use hexsieve::output::write_document;
use hexsieve::source::{GeoJsonIsochrones, GridBrightness};
use hexsieve::{OutputFormat, PipelineBuilder, PipelineSpec, render};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Pipeline specification (JSON, or TOML when built with the `toml` feature)
    #[arg(short, long)]
    pub pipeline: PathBuf,

    /// Output file [default: filtered_hexagons.<format extension>]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format, overriding the specification (kml or geojson)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Cell resolution, overriding the specification
    #[arg(short, long)]
    pub resolution: Option<u8>,

    /// Gridded sky brightness raster (JSON) for light pollution filters
    #[arg(long)]
    pub brightness: Option<PathBuf>,

    /// Pre-fetched routing service isochrone response (GeoJSON)
    #[arg(long)]
    pub isochrone: Option<PathBuf>,

    /// Use the planar hexagon grid instead of H3
    #[arg(long)]
    pub planar: bool,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub cells: usize,
    pub polygons: usize,
    pub holes: usize,
    pub output: PathBuf,
}

/// Read a pipeline specification, choosing the parser by file extension.
pub fn load_spec(path: &Path) -> anyhow::Result<PipelineSpec> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read pipeline {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_toml(&text, path),
        _ => PipelineSpec::from_json(&text)
            .with_context(|| format!("Invalid pipeline specification {}", path.display())),
    }
}

#[cfg(feature = "toml")]
fn parse_toml(text: &str, path: &Path) -> anyhow::Result<PipelineSpec> {
    PipelineSpec::from_toml(text)
        .with_context(|| format!("Invalid pipeline specification {}", path.display()))
}

#[cfg(not(feature = "toml"))]
fn parse_toml(_text: &str, path: &Path) -> anyhow::Result<PipelineSpec> {
    anyhow::bail!(
        "{} is TOML but hexsieve was built without the `toml` feature",
        path.display()
    )
}

fn indexer(planar: bool) -> anyhow::Result<Arc<dyn CellIndexer>> {
    if planar {
        return Ok(Arc::new(PlanarHexGrid::default()));
    }
    h3_indexer()
}

#[cfg(feature = "h3")]
fn h3_indexer() -> anyhow::Result<Arc<dyn CellIndexer>> {
    Ok(Arc::new(hexsieve::index::H3Indexer::new()))
}

#[cfg(not(feature = "h3"))]
fn h3_indexer() -> anyhow::Result<Arc<dyn CellIndexer>> {
    anyhow::bail!("hexsieve was built without the `h3` feature; pass --planar")
}

/// Run the whole pipeline described by `args`.
pub fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let mut spec = load_spec(&args.pipeline)?;
    if let Some(format) = args.format {
        spec.config.output.format = format;
    }

    let indexer = indexer(args.planar)?;
    let mut builder = PipelineBuilder::new().indexer(Arc::clone(&indexer));
    if let Some(resolution) = args.resolution {
        builder = builder.resolution(resolution);
    }

    if let Some(path) = &args.brightness {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read brightness grid {}", path.display()))?;
        builder = builder.brightness(Arc::new(GridBrightness::from_json(&text)?));
        debug!("Loaded brightness grid from {}", path.display());
    }

    if let Some(path) = &args.isochrone {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read isochrone {}", path.display()))?;
        builder = builder.isochrones(Arc::new(GeoJsonIsochrones::from_geojson(&text)?));
        debug!("Loaded isochrone response from {}", path.display());
    }

    let mut pipeline = builder.build(&spec)?;
    info!(
        "Running pipeline: seed {} and {} filters",
        pipeline.seed().kind(),
        pipeline.filters().len()
    );

    let cells = pipeline.run()?;
    let groups = render(&cells, indexer.as_ref())?;

    let output = args.output.clone().unwrap_or_else(|| {
        PathBuf::from(format!(
            "filtered_hexagons.{}",
            spec.config.output.format.extension()
        ))
    });
    write_document(&groups, &spec.config.output, &output)?;

    let summary = RunSummary {
        cells: cells.len(),
        polygons: groups.len(),
        holes: groups.iter().map(|g| g.holes.len()).sum(),
        output,
    };
    info!(
        "Wrote {} cells as {} polygons ({} holes) to {}",
        summary.cells,
        summary.polygons,
        summary.holes,
        summary.output.display()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const PIPELINE: &str = r#"{
        "config": {"resolution": 1},
        "seed": {"kind": "bounding_box", "min_lat": -3.0, "max_lat": 3.0, "min_lon": -3.0, "max_lon": 3.0},
        "filters": [
            {"kind": "composite", "operator": "NOT", "children": [
                {"kind": "bounding_box", "min_lat": -1.0, "max_lat": 1.0, "min_lon": -1.0, "max_lon": 1.0}
            ]}
        ]
    }"#;

    fn args(dir: &TempDir, extra: &[&str]) -> Args {
        let pipeline = dir.path().join("pipeline.json");
        std::fs::write(&pipeline, PIPELINE).unwrap();

        let mut argv = vec![
            "hexsieve".to_string(),
            "--pipeline".to_string(),
            pipeline.display().to_string(),
            "--planar".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_run_writes_kml() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.kml");
        let summary = run(&args(&dir, &["--output", output.to_str().unwrap()])).unwrap();

        assert_eq!(summary.polygons, 1);
        assert_eq!(summary.holes, 1);
        assert!(summary.cells > 0);
        let kml = std::fs::read_to_string(&output).unwrap();
        assert!(kml.contains("<innerBoundaryIs>"));
    }

    #[test]
    fn test_format_and_resolution_overrides() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("out.geojson");
        let coarse = run(&args(
            &dir,
            &["--output", output.to_str().unwrap(), "--format", "geojson"],
        ))
        .unwrap();
        assert!(std::fs::read_to_string(&output)
            .unwrap()
            .contains("FeatureCollection"));

        let fine = run(&args(
            &dir,
            &["--output", output.to_str().unwrap(), "--resolution", "2"],
        ))
        .unwrap();
        assert!(fine.cells > coarse.cells);
    }

    #[test]
    fn test_missing_brightness_source_is_reported() {
        let dir = TempDir::new().unwrap();
        let pipeline = dir.path().join("dark.json");
        std::fs::write(
            &pipeline,
            r#"{"seed": {"kind": "bounding_box", "min_lat": -1.0, "max_lat": 1.0, "min_lon": -1.0, "max_lon": 1.0},
                "filters": [{"kind": "light_pollution", "min_sqm": 21.0}]}"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            "hexsieve",
            "--pipeline",
            pipeline.to_str().unwrap(),
            "--planar",
        ])
        .unwrap();
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("sky brightness source"));
    }

    #[cfg(not(feature = "h3"))]
    #[test]
    fn test_h3_requires_feature() {
        let dir = TempDir::new().unwrap();
        let mut args = args(&dir, &[]);
        args.planar = false;
        let err = run(&args).unwrap_err();
        assert!(err.to_string().contains("without the `h3` feature"));
    }

    #[test]
    fn test_bad_specification_has_context() {
        let dir = TempDir::new().unwrap();
        let pipeline = dir.path().join("broken.json");
        std::fs::write(&pipeline, "{\"seed\": {\"kind\": \"sun_weather\"}}").unwrap();

        let err = load_spec(&pipeline).unwrap_err();
        assert!(err.to_string().contains("Invalid pipeline specification"));
    }
}
