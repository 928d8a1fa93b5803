//! The collapse step: select, sample, check neighbors, commit and propagate

use rand::Rng;
use tracing::{debug, trace};

use crate::algorithm::cell::Reduction;
use crate::algorithm::feasibility::{is_blocked, is_placement_feasible};
use crate::algorithm::selection::{lowest_entropy_candidates, pick_candidate};
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::grid::{Grid, GridStatus};
use crate::spatial::index::GridIndex;
use crate::spatial::tiles::TileId;

/// What a single collapse step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cell was resolved and its neighbors narrowed
    Committed {
        /// Grid coordinates of the resolved cell
        position: [usize; 2],
        /// Committed tile
        tile: TileId,
    },
    /// The sampled tile did not fit; nothing changed
    Rejected {
        /// Grid coordinates of the candidate cell
        position: [usize; 2],
        /// Tile that was sampled and rejected
        tile: TileId,
    },
    /// Every cell is resolved
    Finished,
}

/// Resolve the lowest-entropy cell and propagate its constraints
///
/// Either the whole collapse-plus-propagation is committed or the grid is left
/// untouched. A candidate whose sampled tile does not fit stays unresolved and
/// may be picked again later; there is no backtracking.
///
/// # Errors
///
/// Returns an error if:
/// - The grid already failed on an earlier step
/// - Every lowest-entropy candidate has no tile that fits its neighbors
/// - A neighbor reduction empties a cell
/// - Sampling yields an identifier the catalog does not know
///
/// Any error leaves the grid fatal.
pub fn collapse_step<R>(grid: &mut Grid<'_>, rng: &mut R) -> Result<StepOutcome>
where
    R: Rng + ?Sized,
{
    match grid.status() {
        GridStatus::Fatal => return Err(AlgorithmError::GridPoisoned),
        GridStatus::Done => return Ok(StepOutcome::Finished),
        GridStatus::Running => {}
    }

    let result = attempt_collapse(grid, rng);
    match &result {
        Ok(StepOutcome::Finished) => grid.set_status(GridStatus::Done),
        Ok(_) => {}
        Err(_) => grid.set_status(GridStatus::Fatal),
    }
    result
}

fn attempt_collapse<R>(grid: &mut Grid<'_>, rng: &mut R) -> Result<StepOutcome>
where
    R: Rng + ?Sized,
{
    let catalog = grid.catalog();
    let lookup = grid.index();
    let candidates = lowest_entropy_candidates(grid);
    let Some(index) = pick_candidate(&candidates, rng) else {
        return Ok(StepOutcome::Finished);
    };

    let cell = grid
        .cell(index)
        .ok_or_else(|| missing_cell(lookup, index))?;
    let position = cell.position();
    let choice = cell.choose(catalog, rng)?;
    let definition = catalog
        .get(choice)
        .ok_or(AlgorithmError::UnknownTileChoice {
            tile: choice,
            catalog_size: catalog.len(),
        })?;

    if !is_placement_feasible(grid, position, definition) {
        if candidates
            .iter()
            .all(|&candidate| is_blocked(grid, candidate))
        {
            return Err(AlgorithmError::Contradiction {
                position,
                step: None,
            });
        }
        debug!(
            "Rejected {choice} at [{}, {}]: a neighbor cannot follow",
            position[0], position[1]
        );
        return Ok(StepOutcome::Rejected {
            position,
            tile: choice,
        });
    }

    // Feasibility guarantees no reduction below empties a neighbor
    grid.cell_mut(index)
        .ok_or_else(|| missing_cell(lookup, index))?
        .collapse(choice, catalog)?;
    debug!("Collapsing [{}, {}] into {choice}", position[0], position[1]);

    for direction in Direction::ALL {
        let Some(neighbor_index) = lookup.neighbor(position, direction) else {
            continue;
        };
        let Some(neighbor) = grid.cell_mut(neighbor_index) else {
            continue;
        };
        if neighbor.is_resolved() {
            continue;
        }
        let reduction = neighbor.reduce(definition.allowed(direction))?;
        if let Reduction::Narrowed(remaining) = reduction {
            let [x, y] = neighbor.position();
            trace!(
                "Reducing [{x}, {y}] ({direction} of [{}, {}]): {remaining} possibilities remain",
                position[0], position[1]
            );
        }
    }

    Ok(StepOutcome::Committed {
        position,
        tile: choice,
    })
}

fn missing_cell(lookup: GridIndex, index: usize) -> AlgorithmError {
    AlgorithmError::InvalidSourceData {
        reason: format!(
            "Cell {index} missing from {}x{} grid",
            lookup.width(),
            lookup.height()
        ),
    }
}
