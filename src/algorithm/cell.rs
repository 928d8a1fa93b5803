//! Single grid cell: possibility tracking, entropy score, sampling and reduction

use rand::Rng;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, computation_error};
use crate::math::probability::{entropy_score, weighted_choice};
use crate::spatial::tiles::{TileCatalog, TileId};

/// Resolution state of a cell
///
/// An unresolved set is never empty: a reduction that would empty it fails
/// with a contradiction and leaves the previous set in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellState {
    /// Tiles the cell could still take
    Unresolved(TileBitset),
    /// Committed tile, immutable for the rest of the run
    Resolved(TileId),
}

/// Outcome of narrowing a cell's possibilities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// The cell was already resolved and ignored the constraint
    Skipped,
    /// The constraint allowed every remaining possibility
    Unchanged,
    /// Possibilities were removed; holds how many remain
    Narrowed(usize),
}

/// One position of the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: [usize; 2],
    state: CellState,
}

impl Cell {
    /// Create an unresolved cell holding every tile of `catalog`
    pub fn new(position: [usize; 2], catalog: &TileCatalog) -> Self {
        Self {
            position,
            state: CellState::Unresolved(catalog.all_tiles()),
        }
    }

    /// Grid coordinates `[x, y]` of this cell
    pub const fn position(&self) -> [usize; 2] {
        self.position
    }

    /// Current state
    pub const fn state(&self) -> &CellState {
        &self.state
    }

    /// Whether a tile was committed
    pub const fn is_resolved(&self) -> bool {
        matches!(self.state, CellState::Resolved(_))
    }

    /// Committed tile, if any
    pub const fn tile(&self) -> Option<TileId> {
        match self.state {
            CellState::Resolved(tile) => Some(tile),
            CellState::Unresolved(_) => None,
        }
    }

    /// Remaining possibilities, `None` once resolved
    pub const fn possibilities(&self) -> Option<&TileBitset> {
        match &self.state {
            CellState::Unresolved(possibilities) => Some(possibilities),
            CellState::Resolved(_) => None,
        }
    }

    /// Priority score of this cell; exactly 0 once resolved
    ///
    /// See [`entropy_score`] for the formula. Unresolved cells always score
    /// above 0 since their set is never empty.
    pub fn entropy(&self, catalog: &TileCatalog) -> f64 {
        match &self.state {
            CellState::Resolved(_) => 0.0,
            CellState::Unresolved(possibilities) => {
                entropy_score(possibilities.iter().map(|tile| catalog.weight(tile)))
            }
        }
    }

    /// Sample one remaining possibility proportionally to its weight
    ///
    /// # Errors
    ///
    /// Returns a computation error if the cell is resolved or every remaining
    /// possibility has zero weight
    pub fn choose<R>(&self, catalog: &TileCatalog, rng: &mut R) -> Result<TileId>
    where
        R: Rng + ?Sized,
    {
        let possibilities = self.possibilities().ok_or_else(|| {
            computation_error("weighted tile choice", &"cell is already resolved")
        })?;

        let candidates = possibilities.to_vec();
        let weights: Vec<f64> = candidates.iter().map(|&tile| catalog.weight(tile)).collect();

        weighted_choice(&weights, rng)
            .and_then(|index| candidates.get(index).copied())
            .ok_or_else(|| {
                computation_error(
                    "weighted tile choice",
                    &format!(
                        "no positive weight among {} possibilities at [{}, {}]",
                        candidates.len(),
                        self.position[0],
                        self.position[1]
                    ),
                )
            })
    }

    /// Commit the cell to `choice`, clearing its possibilities
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `choice` is not an identifier of `catalog`
    /// - The cell is already resolved
    pub fn collapse(&mut self, choice: TileId, catalog: &TileCatalog) -> Result<TileId> {
        if !catalog.contains(choice) {
            return Err(AlgorithmError::UnknownTileChoice {
                tile: choice,
                catalog_size: catalog.len(),
            });
        }
        if self.is_resolved() {
            return Err(AlgorithmError::CellAlreadyResolved {
                position: self.position,
            });
        }

        self.state = CellState::Resolved(choice);
        Ok(choice)
    }

    /// Whether any remaining possibility is in `allowed`
    ///
    /// A resolved cell has no possibilities left and answers `false`; callers
    /// skip resolved neighbors before asking.
    pub fn can_reduce(&self, allowed: &TileBitset) -> bool {
        self.possibilities()
            .is_some_and(|possibilities| possibilities.intersects(allowed))
    }

    /// Keep only the possibilities in `allowed`; resolved cells are untouched
    ///
    /// # Errors
    ///
    /// Returns a contradiction if nothing would remain. The cell keeps its
    /// previous possibilities in that case.
    pub fn reduce(&mut self, allowed: &TileBitset) -> Result<Reduction> {
        let CellState::Unresolved(possibilities) = &mut self.state else {
            return Ok(Reduction::Skipped);
        };

        let reduced = possibilities.intersection(allowed);
        if reduced.is_empty() {
            return Err(AlgorithmError::Contradiction {
                position: self.position,
                step: None,
            });
        }

        let before = possibilities.count();
        let remaining = reduced.count();
        *possibilities = reduced;

        Ok(if remaining == before {
            Reduction::Unchanged
        } else {
            Reduction::Narrowed(remaining)
        })
    }
}
