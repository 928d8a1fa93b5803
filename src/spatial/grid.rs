//! Grid ownership of cells, bounds-checked access and render snapshots
//!
//! The grid owns `width * height` cells in row-major order and borrows the
//! tile catalog for its whole lifetime. It is created once per run with every
//! cell unresolved and mutated in place by collapse steps.

use rand::Rng;

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::cell::{Cell, Reduction};
use crate::algorithm::propagation::{StepOutcome, collapse_step};
use crate::algorithm::selection;
use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::direction::Direction;
use crate::spatial::index::GridIndex;
use crate::spatial::tiles::{TileCatalog, TileId};

/// Lifecycle of a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridStatus {
    /// Some cell can still be selected
    Running,
    /// Every cell is resolved
    Done,
    /// A step failed; the grid must not be stepped again
    Fatal,
}

/// Read-only view of one cell for renderers
#[derive(Debug, Clone, PartialEq)]
pub struct CellSnapshot {
    /// Grid coordinates `[x, y]`
    pub position: [usize; 2],
    /// Committed tile, `None` while unresolved
    pub tile: Option<TileId>,
    /// Priority score (0 once resolved)
    pub entropy: f64,
}

/// Tile grid being filled by the solver
#[derive(Debug, Clone)]
pub struct Grid<'a> {
    catalog: &'a TileCatalog,
    index: GridIndex,
    cells: Vec<Cell>,
    status: GridStatus,
}

impl<'a> Grid<'a> {
    /// Create a grid with every cell unresolved
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or exceeds
    /// [`MAX_GRID_DIMENSION`]
    pub fn new(width: usize, height: usize, catalog: &'a TileCatalog) -> Result<Self> {
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        let index = GridIndex::new(width, height);
        let cells = (0..index.len())
            .filter_map(|linear| index.position(linear))
            .map(|position| Cell::new(position, catalog))
            .collect();

        Ok(Self {
            catalog,
            index,
            cells,
            status: GridStatus::Running,
        })
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.index.width()
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.index.height()
    }

    /// Index helper for this grid's dimensions
    pub const fn index(&self) -> GridIndex {
        self.index
    }

    /// Catalog the cells draw their tiles from
    pub const fn catalog(&self) -> &'a TileCatalog {
        self.catalog
    }

    /// Current lifecycle status
    pub const fn status(&self) -> GridStatus {
        self.status
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Cell at a linear index
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub(crate) const fn set_status(&mut self, status: GridStatus) {
        self.status = status;
    }

    /// Cell at `(x, y)`, `None` outside the grid
    pub fn get_cell(&self, x: i32, y: i32) -> Option<&Cell> {
        self.index.index(x, y).and_then(|index| self.cells.get(index))
    }

    /// Neighbors of `(x, y)` in North, East, South, West order
    pub fn around(&self, x: i32, y: i32) -> [Option<&Cell>; 4] {
        Direction::ALL.map(|direction| {
            let [dx, dy] = direction.offset();
            x.checked_add(dx)
                .zip(y.checked_add(dy))
                .and_then(|(nx, ny)| self.get_cell(nx, ny))
        })
    }

    /// Unresolved cell with the lowest positive entropy, ties broken uniformly
    ///
    /// `None` means every cell is resolved.
    pub fn find_lowest_entropy<R>(&self, rng: &mut R) -> Option<&Cell>
    where
        R: Rng + ?Sized,
    {
        selection::find_lowest_entropy(self, rng).and_then(|index| self.cells.get(index))
    }

    /// Run one collapse step
    ///
    /// Returns `false` once nothing is left to resolve and `true` whenever a
    /// candidate cell existed, whether or not the step committed it.
    ///
    /// # Errors
    ///
    /// Returns an error if the step hits a contradiction or an unknown tile,
    /// or if the grid already failed; the grid is then fatal.
    pub fn collapse_step<R>(&mut self, rng: &mut R) -> Result<bool>
    where
        R: Rng + ?Sized,
    {
        collapse_step(self, rng).map(|outcome| !matches!(outcome, StepOutcome::Finished))
    }

    /// Narrow the possibilities of `(x, y)` before or between steps
    ///
    /// Useful to seed a run with fixed regions. Resolved cells are untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `(x, y)` lies outside the grid
    /// - The constraint would leave the cell with no possibility
    /// - The grid already failed
    pub fn restrict(&mut self, x: i32, y: i32, allowed: &TileBitset) -> Result<Reduction> {
        if self.status == GridStatus::Fatal {
            return Err(AlgorithmError::GridPoisoned);
        }
        let index = self.index.index(x, y).ok_or_else(|| {
            invalid_parameter(
                "position",
                &format!("[{x}, {y}]"),
                &format!("outside {}x{} grid", self.width(), self.height()),
            )
        })?;
        let cell = self.cells.get_mut(index).ok_or_else(|| {
            invalid_parameter("position", &format!("[{x}, {y}]"), &"cell missing")
        })?;
        cell.reduce(allowed)
    }

    /// Number of resolved cells
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_resolved()).count()
    }

    /// Whether every cell is resolved
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Cell::is_resolved)
    }

    /// Per-cell view in linear order for renderers
    pub fn snapshot(&self) -> Vec<CellSnapshot> {
        self.cells
            .iter()
            .map(|cell| CellSnapshot {
                position: cell.position(),
                tile: cell.tile(),
                entropy: cell.entropy(self.catalog),
            })
            .collect()
    }
}
