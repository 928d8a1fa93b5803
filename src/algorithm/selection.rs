use rand::Rng;

use crate::spatial::grid::Grid;

/// Linear indices of every cell tied at the lowest positive entropy
///
/// Resolved cells score exactly 0 and are never candidates, so an empty
/// result means the grid is fully resolved. Ties are exact: scores come from
/// the same computation over the same weights.
// Exact float equality is the tie rule
#[allow(clippy::float_cmp)]
pub fn lowest_entropy_candidates(grid: &Grid<'_>) -> Vec<usize> {
    let catalog = grid.catalog();
    let mut lowest = f64::INFINITY;
    let mut candidates = Vec::new();

    for (index, cell) in grid.cells().iter().enumerate() {
        let entropy = cell.entropy(catalog);
        if entropy <= 0.0 {
            continue;
        }
        if entropy < lowest {
            lowest = entropy;
            candidates.clear();
            candidates.push(index);
        } else if entropy == lowest {
            candidates.push(index);
        }
    }

    candidates
}

/// Pick one of `candidates` uniformly at random
pub fn pick_candidate<R>(candidates: &[usize], rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    if candidates.is_empty() {
        return None;
    }
    candidates
        .get(rng.random_range(0..candidates.len()))
        .copied()
}

/// Linear index of the next cell to resolve, `None` once the grid is done
pub fn find_lowest_entropy<R>(grid: &Grid<'_>, rng: &mut R) -> Option<usize>
where
    R: Rng + ?Sized,
{
    pick_candidate(&lowest_entropy_candidates(grid), rng)
}
