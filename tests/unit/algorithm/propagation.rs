//! Tests for the collapse step: commit, rejection and contradiction

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::propagation::{StepOutcome, collapse_step};
    use tilecollapse::spatial::grid::{Grid, GridStatus};
    use tilecollapse::spatial::tiles::TileId;

    use crate::{catalog_from, free_pair_catalog, hostile_pair_catalog, set};

    // A commit narrows every unresolved neighbor to the allowed set
    #[test]
    fn test_commit_narrows_neighbors() {
        // A allows only B to its east, B allows only A to its west
        let catalog = catalog_from(&[
            (1.0, [&[0, 1], &[1], &[0, 1], &[0, 1]]),
            (3.0, [&[0, 1], &[0, 1], &[0, 1], &[0]]),
        ]);
        let mut grid = Grid::new(2, 1, &catalog).expect("valid dimensions");
        assert!(grid.restrict(0, 0, &set(2, &[0])).is_ok());
        let mut rng = StdRng::seed_from_u64(12);

        let outcome = collapse_step(&mut grid, &mut rng).expect("step succeeds");
        assert_eq!(
            outcome,
            StepOutcome::Committed {
                position: [0, 0],
                tile: TileId::new(0)
            }
        );
        assert_eq!(
            grid.get_cell(1, 0).and_then(|cell| cell.possibilities()).map(|p| p.to_vec()),
            Some(vec![TileId::new(1)])
        );
    }

    // An infeasible draw leaves every cell exactly as it was
    #[test]
    fn test_rejected_step_does_not_mutate() {
        // A demands C around it; B is a near-weightless escape hatch
        let catalog = catalog_from(&[
            (1.0, [&[2], &[2], &[2], &[2]]),
            (1e-12, [&[0, 1, 2], &[0, 1, 2], &[0, 1, 2], &[0, 1, 2]]),
            (1.0, [&[0, 1, 2], &[0, 1, 2], &[0, 1, 2], &[0, 1, 2]]),
        ]);
        let mut grid = Grid::new(2, 1, &catalog).expect("valid dimensions");
        assert!(grid.restrict(0, 0, &set(3, &[0, 1])).is_ok());
        assert!(grid.restrict(1, 0, &set(3, &[0, 1])).is_ok());
        let before = grid.snapshot();
        let mut rng = StdRng::seed_from_u64(5);

        let outcome = collapse_step(&mut grid, &mut rng).expect("step succeeds");
        assert!(matches!(
            outcome,
            StepOutcome::Rejected {
                tile,
                ..
            } if tile == TileId::new(0)
        ));
        assert_eq!(grid.snapshot(), before);
        assert_eq!(grid.status(), GridStatus::Running);
        assert!(grid.collapse_step(&mut rng).is_ok_and(|progressed| progressed));
    }

    // Once every tied candidate is blocked the step reports a contradiction
    #[test]
    fn test_blocked_candidates_contradict() {
        let catalog = hostile_pair_catalog(1.0, 3.0);
        let mut grid = Grid::new(2, 2, &catalog).expect("valid dimensions");
        let mut rng = StdRng::seed_from_u64(8);

        let mut committed = Vec::new();
        let mut failure = None;
        for _ in 0..1_000 {
            match collapse_step(&mut grid, &mut rng) {
                Ok(StepOutcome::Committed { position, tile }) => committed.push((position, tile)),
                Ok(StepOutcome::Rejected { .. }) => {}
                Ok(StepOutcome::Finished) => break,
                Err(error) => {
                    failure = Some(error);
                    break;
                }
            }
        }

        // Only A can ever be placed, and only once before the grid jams
        assert_eq!(committed.len(), 1);
        assert!(committed.iter().all(|&(_, tile)| tile == TileId::new(0)));
        assert!(matches!(
            failure,
            Some(AlgorithmError::Contradiction { step: None, .. })
        ));
        assert_eq!(grid.status(), GridStatus::Fatal);
        assert!(matches!(
            collapse_step(&mut grid, &mut rng),
            Err(AlgorithmError::GridPoisoned)
        ));
    }

    // Steps stop reporting work once every cell is resolved
    #[test]
    fn test_finished_when_resolved() {
        let catalog = free_pair_catalog(1.0, 1.0);
        let mut grid = Grid::new(1, 1, &catalog).expect("valid dimensions");
        let mut rng = StdRng::seed_from_u64(2);

        assert!(matches!(
            collapse_step(&mut grid, &mut rng),
            Ok(StepOutcome::Committed {
                position: [0, 0],
                ..
            })
        ));
        assert_eq!(collapse_step(&mut grid, &mut rng).ok(), Some(StepOutcome::Finished));
        assert_eq!(grid.status(), GridStatus::Done);
    }
}
