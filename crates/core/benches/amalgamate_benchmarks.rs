use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hexsieve::compute::{amalgamate, cellset, resolve_holes};
use hexsieve::index::{CellIndexer, PlanarHexGrid};
use hexsieve::{CellId, GeoPoint};

fn square_cells(grid: &PlanarHexGrid, half: f64, resolution: u8) -> Vec<CellId> {
    let corners = [
        GeoPoint::new(-half, -half),
        GeoPoint::new(-half, half),
        GeoPoint::new(half, half),
        GeoPoint::new(half, -half),
    ];
    grid.polygon_to_cells(&corners, resolution).unwrap()
}

fn benchmark_amalgamation(c: &mut Criterion) {
    let mut group = c.benchmark_group("amalgamation");
    let grid = PlanarHexGrid::default();

    for resolution in [2u8, 4, 6] {
        let cells = square_cells(&grid, 4.0, resolution);
        group.bench_with_input(
            BenchmarkId::new("solid_square", cells.len()),
            &cells,
            |b, cells| b.iter(|| amalgamate(black_box(cells), &grid).unwrap()),
        );
    }

    // Many small holes stress ring linking and hole resolution.
    let outer = square_cells(&grid, 4.0, 4);
    let holes: Vec<CellId> = outer.iter().copied().step_by(7).collect();
    let swiss = cellset::difference(&outer, &holes);
    group.bench_function("render_with_holes", |b| {
        b.iter(|| resolve_holes(amalgamate(black_box(&swiss), &grid).unwrap()))
    });

    group.finish();
}

fn benchmark_cellset(c: &mut Criterion) {
    let mut group = c.benchmark_group("cellset");
    let grid = PlanarHexGrid::default();
    let a = square_cells(&grid, 4.0, 5);
    let b: Vec<CellId> = a.iter().copied().skip(a.len() / 3).collect();

    group.bench_function("union", |bench| {
        bench.iter(|| cellset::union(black_box(&a), black_box(&b)))
    });
    group.bench_function("symmetric_difference", |bench| {
        bench.iter(|| cellset::symmetric_difference(black_box(&a), black_box(&b)))
    });

    group.finish();
}

criterion_group!(benches, benchmark_amalgamation, benchmark_cellset);
criterion_main!(benches);
