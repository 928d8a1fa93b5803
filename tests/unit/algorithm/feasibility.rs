//! Tests for neighbor feasibility checks and blocked-cell detection

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilecollapse::algorithm::feasibility::{
        is_blocked, is_placement_feasible, viable_choices,
    };
    use tilecollapse::spatial::grid::Grid;
    use tilecollapse::spatial::tiles::{TileDefinition, TileId};

    use crate::{catalog_from, hostile_pair_catalog, set, single_tile_catalog};

    fn tile<'a>(grid: &'a Grid<'_>, id: usize) -> &'a TileDefinition {
        grid.catalog()
            .get(TileId::new(id))
            .expect("tile exists in catalog")
    }

    // Without neighbors anything fits
    #[test]
    fn test_isolated_cell_is_feasible() {
        let catalog = hostile_pair_catalog(1.0, 1.0);
        let grid = Grid::new(1, 1, &catalog).expect("valid dimensions");
        assert!(is_placement_feasible(&grid, [0, 0], tile(&grid, 1)));
        assert!(!is_blocked(&grid, 0));
    }

    #[test]
    fn test_unsatisfiable_neighbor_is_infeasible() {
        let catalog = hostile_pair_catalog(1.0, 1.0);
        let grid = Grid::new(2, 1, &catalog).expect("valid dimensions");

        // B allows nothing next to it, A allows B which the neighbor still holds
        assert!(!is_placement_feasible(&grid, [0, 0], tile(&grid, 1)));
        assert!(is_placement_feasible(&grid, [0, 0], tile(&grid, 0)));
        assert_eq!(viable_choices(&grid, 0).to_vec(), vec![TileId::new(0)]);
    }

    // Resolved neighbors are not consulted
    #[test]
    fn test_resolved_neighbors_ignored() {
        let catalog = single_tile_catalog();
        let mut grid = Grid::new(2, 1, &catalog).expect("valid dimensions");
        let mut rng = StdRng::seed_from_u64(0);
        assert!(grid.collapse_step(&mut rng).is_ok());

        let open = grid
            .cells()
            .iter()
            .position(|cell| !cell.is_resolved())
            .expect("one cell left");
        let position = grid.cell(open).map(|cell| cell.position()).expect("cell exists");
        assert!(is_placement_feasible(&grid, position, tile(&grid, 0)));
        assert!(viable_choices(&grid, 1 - open).is_empty());
    }

    // Zero-weight tiles never count as viable
    #[test]
    fn test_zero_weight_not_viable() {
        let catalog = catalog_from(&[
            (0.0, [&[0, 1], &[0, 1], &[0, 1], &[0, 1]]),
            (1.0, [&[], &[], &[], &[]]),
        ]);
        let mut grid = Grid::new(2, 1, &catalog).expect("valid dimensions");

        assert!(is_blocked(&grid, 0));
        assert!(is_blocked(&grid, 1));

        assert!(grid.restrict(1, 0, &set(2, &[0])).is_ok());
        assert!(is_blocked(&grid, 1));
        assert!(viable_choices(&grid, 7).is_empty());
    }
}
