use hexsieve::compute::cellset;
use hexsieve::filter::{
    BoundingBox, BoundingBoxFilter, Filter, FilterContext, FilterParams, InitialFilter,
};
use hexsieve::index::{CellIndexer, PlanarHexGrid};
use hexsieve::source::{GeoJsonIsochrones, GridBrightness};
use hexsieve::{ConfigError, GeoPoint, HexsieveError, PipelineBuilder, PipelineSpec, render};
use std::sync::Arc;

fn planar() -> Arc<PlanarHexGrid> {
    let _ = env_logger::builder().is_test(true).try_init();
    Arc::new(PlanarHexGrid::default())
}

fn universe(min: f64, max: f64, resolution: u8) -> Vec<hexsieve::CellId> {
    let mut filter = BoundingBoxFilter::new(FilterContext::new(planar(), resolution));
    filter
        .configure(FilterParams::BoundingBox(BoundingBox::new(min, max, min, max)))
        .unwrap();
    filter.valid_cells().unwrap()
}

#[test]
fn test_json_pipeline_with_not_composite() {
    let spec = PipelineSpec::from_json(
        r#"{
            "config": {"resolution": 1},
            "seed": {"kind": "bounding_box", "min_lat": -3.0, "max_lat": 3.0, "min_lon": -3.0, "max_lon": 3.0},
            "filters": [
                {"kind": "composite", "operator": "NOT", "children": [
                    {"kind": "bounding_box", "min_lat": -1.0, "max_lat": 1.0, "min_lon": -1.0, "max_lon": 1.0}
                ]}
            ]
        }"#,
    )
    .unwrap();

    let indexer = planar();
    let mut pipeline = PipelineBuilder::new()
        .indexer(indexer.clone())
        .build(&spec)
        .unwrap();
    let cells = pipeline.run().unwrap();

    let outer = universe(-3.0, 3.0, 1);
    let inner = universe(-1.0, 1.0, 1);
    assert_eq!(cells, cellset::difference(&outer, &inner));

    let groups = render(&cells, indexer.as_ref()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].holes.len(), 1);
}

#[test]
fn test_or_and_xor_composites() {
    let spec = |operator: &str| {
        PipelineSpec::from_json(&format!(
            r#"{{
                "config": {{"resolution": 1}},
                "seed": {{"kind": "bounding_box", "min_lat": -4.0, "max_lat": 4.0, "min_lon": -4.0, "max_lon": 4.0}},
                "filters": [
                    {{"kind": "composite", "operator": "{}", "children": [
                        {{"kind": "bounding_box", "min_lat": -2.0, "max_lat": 1.0, "min_lon": -2.0, "max_lon": 1.0}},
                        {{"kind": "bounding_box", "min_lat": -1.0, "max_lat": 2.0, "min_lon": -1.0, "max_lon": 2.0}}
                    ]}}
                ]
            }}"#,
            operator
        ))
        .unwrap()
    };
    let builder = PipelineBuilder::new().indexer(planar());

    let left = universe(-2.0, 1.0, 1);
    let right = universe(-1.0, 2.0, 1);

    let or = builder.build(&spec("OR")).unwrap().run().unwrap();
    assert!(cellset::symmetric_difference(&or, &cellset::union(&left, &right)).is_empty());

    let xor = builder.build(&spec("XOR")).unwrap().run().unwrap();
    let expected = cellset::difference(
        &cellset::union(&left, &right),
        &cellset::intersect(&left, &right),
    );
    assert!(cellset::symmetric_difference(&xor, &expected).is_empty());
    assert!(!xor.is_empty());
}

#[test]
fn test_and_rejected_before_run() {
    let spec = PipelineSpec::from_json(
        r#"{
            "seed": {"kind": "bounding_box", "min_lat": -1.0, "max_lat": 1.0, "min_lon": -1.0, "max_lon": 1.0},
            "filters": [{"kind": "composite", "operator": "AND"}]
        }"#,
    )
    .unwrap();

    let err = PipelineBuilder::new()
        .indexer(planar())
        .build(&spec)
        .unwrap_err();
    assert!(matches!(
        err,
        HexsieveError::Config(ConfigError::UnsupportedOperator(_))
    ));
}

#[test]
fn test_non_initial_seed_rejected() {
    let spec = PipelineSpec::from_json(r#"{"seed": {"kind": "light_pollution", "min_sqm": 21.0}}"#)
        .unwrap();
    let err = PipelineBuilder::new()
        .indexer(planar())
        .brightness(Arc::new(|_: GeoPoint| 22.0))
        .build(&spec)
        .unwrap_err();
    assert!(matches!(
        err,
        HexsieveError::Config(ConfigError::InvalidShape { .. })
    ));
}

#[test]
fn test_empty_universe() {
    let spec = PipelineSpec::from_json(
        r#"{
            "config": {"resolution": 1},
            "seed": {"kind": "bounding_box", "min_lat": 0.1, "max_lat": 0.2, "min_lon": 0.1, "max_lon": 0.2}
        }"#,
    )
    .unwrap();
    let mut pipeline = PipelineBuilder::new().indexer(planar()).build(&spec).unwrap();
    assert!(matches!(
        pipeline.run(),
        Err(HexsieveError::EmptyUniverse { .. })
    ));
}

#[test]
fn test_light_pollution_with_grid() {
    // West half bright, east half dark.
    let grid = GridBrightness::new(-5.0, -5.0, 5.0, 2, 2, vec![18.0, 21.8, 18.0, 21.8]).unwrap();
    let spec = PipelineSpec::from_json(
        r#"{
            "config": {"resolution": 1},
            "seed": {"kind": "bounding_box", "min_lat": -3.0, "max_lat": 3.0, "min_lon": -3.0, "max_lon": 3.0},
            "filters": [{"kind": "light_pollution", "min_sqm": 21.5}]
        }"#,
    )
    .unwrap();

    let indexer = planar();
    let cells = PipelineBuilder::new()
        .indexer(indexer.clone())
        .brightness(Arc::new(grid))
        .build(&spec)
        .unwrap()
        .run()
        .unwrap();

    assert!(!cells.is_empty());
    for cell in cells {
        assert!(indexer.cell_to_center(cell).unwrap().lng() >= 0.0);
    }
}

#[test]
fn test_isochrone_seed_from_response() {
    let response = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "properties": {},
            "geometry": {"type": "Polygon", "coordinates": [[
                [-2.0, -2.0], [2.0, -2.0], [2.0, 2.0], [-2.0, 2.0], [-2.0, -2.0]
            ]]}
        }]
    }"#;
    let spec = PipelineSpec::from_json(
        r#"{
            "config": {"resolution": 1},
            "seed": {"kind": "isochrone", "center": {"lat": 0.0, "lng": 0.0}, "max_minutes": 30, "mode": "cycling"}
        }"#,
    )
    .unwrap();

    let cells = PipelineBuilder::new()
        .indexer(planar())
        .isochrones(Arc::new(GeoJsonIsochrones::from_geojson(response).unwrap()))
        .build(&spec)
        .unwrap()
        .run()
        .unwrap();

    assert!(cellset::symmetric_difference(&cells, &universe(-2.0, 2.0, 1)).is_empty());
}

#[test]
fn test_out_of_range_parameters_rejected() {
    for seed in [
        r#"{"kind": "bounding_box", "min_lat": -95.0, "max_lat": 1.0, "min_lon": -1.0, "max_lon": 1.0}"#,
        r#"{"kind": "bounding_ellipse", "center": {"lat": 0.0, "lng": 0.0}, "major_axis": 1.0, "minor_axis": 1.0, "rotation": 400.0}"#,
        r#"{"kind": "bounding_polygon", "points": [{"lat": 0.0, "lng": 0.0}, {"lat": 1.0, "lng": 1.0}]}"#,
    ] {
        let spec = PipelineSpec::from_json(&format!(r#"{{"seed": {}}}"#, seed)).unwrap();
        let err = PipelineBuilder::new()
            .indexer(planar())
            .build(&spec)
            .unwrap_err();
        assert!(
            matches!(err, HexsieveError::Config(ConfigError::OutOfRange { .. })),
            "unexpected error for {}: {}",
            seed,
            err
        );
    }
}
