//! Sequential filter pipeline and polygon rendering.

use crate::compute::{amalgamate, resolve_holes};
use crate::error::{ConfigError, HexsieveError, Result};
use crate::filter::Filter;
use crate::index::CellIndexer;
use hexsieve_types::{CellId, PolygonGroup};

/// A seed filter that produces the universe, followed by filters applied
/// strictly in order.
#[derive(Debug)]
pub struct Pipeline {
    seed: Box<dyn Filter>,
    filters: Vec<Box<dyn Filter>>,
}

impl Pipeline {
    /// Fails with [`ConfigError::InvalidShape`] when `seed` cannot produce a
    /// universe on its own.
    pub fn new(seed: Box<dyn Filter>) -> Result<Self, ConfigError> {
        if seed.as_initial().is_none() {
            return Err(ConfigError::shape(
                seed.kind(),
                "cannot seed a pipeline: it does not produce cells without input",
            ));
        }
        Ok(Self {
            seed,
            filters: Vec::new(),
        })
    }

    pub fn add_filter(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn with_filter(mut self, filter: Box<dyn Filter>) -> Self {
        self.add_filter(filter);
        self
    }

    pub fn seed(&self) -> &dyn Filter {
        self.seed.as_ref()
    }

    pub fn filters(&self) -> &[Box<dyn Filter>] {
        &self.filters
    }

    /// Produce the universe from the seed and thread it through every filter.
    ///
    /// The first failing stage aborts the run.
    pub fn run(&mut self) -> Result<Vec<CellId>> {
        let initial = self.seed.as_initial().ok_or_else(|| {
            ConfigError::shape(self.seed.kind(), "seed is not an initial filter")
        })?;

        let mut cells = initial.valid_cells()?;
        if cells.is_empty() {
            return Err(HexsieveError::EmptyUniverse {
                filter: format!("{} ({})", self.seed.kind(), self.seed.describe()),
            });
        }
        log::info!(
            "Seed {} [{}] produced {} cells",
            self.seed.kind(),
            self.seed.describe(),
            cells.len()
        );

        for (stage, filter) in self.filters.iter_mut().enumerate() {
            let before = cells.len();
            filter.set_input(cells);
            cells = filter.process()?;
            log::debug!(
                "Stage {} {} [{}]: {} -> {} cells",
                stage + 1,
                filter.kind(),
                filter.describe(),
                before,
                cells.len()
            );
        }

        log::info!(
            "Pipeline finished with {} cells after {} filters",
            cells.len(),
            self.filters.len()
        );
        Ok(cells)
    }
}

/// Merge cells into polygons: outer rings with their holes.
pub fn render(cells: &[CellId], indexer: &dyn CellIndexer) -> Result<Vec<PolygonGroup>> {
    let rings = amalgamate(cells, indexer)?;
    let groups = resolve_holes(rings);
    log::info!(
        "Rendered {} cells into {} polygons with {} holes",
        cells.len(),
        groups.len(),
        groups.iter().map(|g| g.holes.len()).sum::<usize>()
    );
    Ok(groups)
}
