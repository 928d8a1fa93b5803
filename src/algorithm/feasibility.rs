use crate::algorithm::bitset::TileBitset;
use crate::spatial::direction::Direction;
use crate::spatial::grid::Grid;
use crate::spatial::tiles::{TileDefinition, TileId};

/// Whether placing `tile` at `position` leaves every neighbor satisfiable
///
/// Each neighbor must be out of bounds, already resolved, or still hold at
/// least one tile the definition allows in that direction.
pub fn is_placement_feasible(grid: &Grid<'_>, position: [usize; 2], tile: &TileDefinition) -> bool {
    let index = grid.index();
    Direction::ALL.iter().all(|&direction| {
        index
            .neighbor(position, direction)
            .and_then(|neighbor| grid.cell(neighbor))
            .is_none_or(|neighbor| {
                neighbor.is_resolved() || neighbor.can_reduce(tile.allowed(direction))
            })
    })
}

/// Possibilities of the cell at `index` that could be committed right now
///
/// Only tiles with a positive weight count, since nothing else is ever
/// sampled. Resolved cells and out of range indices yield an empty set.
pub fn viable_choices(grid: &Grid<'_>, index: usize) -> TileBitset {
    let catalog = grid.catalog();
    let mut viable = TileBitset::new(catalog.len());

    let Some(cell) = grid.cell(index) else {
        return viable;
    };
    let Some(possibilities) = cell.possibilities() else {
        return viable;
    };

    let position = cell.position();
    for tile in possibilities.iter() {
        if is_viable(grid, position, tile) {
            viable.insert(tile);
        }
    }
    viable
}

/// Whether the cell at `index` has no tile it could ever commit to
///
/// Grids only change when a step commits, so once every lowest-entropy
/// candidate is blocked no later step can make progress.
pub fn is_blocked(grid: &Grid<'_>, index: usize) -> bool {
    viable_choices(grid, index).is_empty()
}

fn is_viable(grid: &Grid<'_>, position: [usize; 2], tile: TileId) -> bool {
    let catalog = grid.catalog();
    catalog.weight(tile) > 0.0
        && catalog
            .get(tile)
            .is_some_and(|definition| is_placement_feasible(grid, position, definition))
}
