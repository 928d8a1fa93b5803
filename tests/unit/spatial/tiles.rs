//! Tests for tile identifiers and catalog validation

#[cfg(test)]
mod tests {
    use tilecollapse::AlgorithmError;
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::spatial::direction::Direction;
    use tilecollapse::spatial::tiles::{TileCatalog, TileDefinition, TileId, hex_color};

    use crate::{catalog_from, set};

    fn definition(weight: f64, capacity: usize) -> TileDefinition {
        TileDefinition {
            color: [10, 20, 30],
            source_position: [0, 0],
            weight,
            neighbors: std::array::from_fn(|_| TileBitset::all(capacity)),
        }
    }

    #[test]
    fn test_tile_id_display() {
        assert_eq!(TileId::new(4).to_string(), "#4");
        assert_eq!(TileId::new(4).index(), 4);
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color([255, 0, 16]), "#ff0010");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            TileCatalog::new(Vec::new()),
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    #[test]
    fn test_invalid_weights_rejected() {
        for weight in [-1.0, f64::NAN, f64::INFINITY] {
            let result = TileCatalog::new(vec![definition(weight, 1)]);
            assert!(
                matches!(
                    result,
                    Err(AlgorithmError::InvalidParameter {
                        parameter: "weight",
                        ..
                    })
                ),
                "weight {weight} should be rejected"
            );
        }
        assert!(TileCatalog::new(vec![definition(0.0, 1)]).is_ok());
    }

    // Neighbor sets must be sized for the catalog they belong to
    #[test]
    fn test_neighbor_capacity_mismatch_rejected() {
        let result = TileCatalog::new(vec![definition(1.0, 2)]);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidSourceData { .. })
        ));
    }

    #[test]
    fn test_catalog_lookup() {
        let catalog = catalog_from(&[
            (1.0, [&[1], &[0], &[], &[0, 1]]),
            (2.5, [&[], &[], &[0], &[]]),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(catalog.contains(TileId::new(1)));
        assert!(!catalog.contains(TileId::new(2)));
        assert_eq!(catalog.get(TileId::new(2)), None);
        assert_eq!(catalog.weight(TileId::new(1)), 2.5);
        assert_eq!(catalog.weight(TileId::new(8)), 0.0);
        assert_eq!(catalog.all_tiles().count(), 2);
        assert_eq!(catalog.color_mapping(), vec![[0, 0, 0], [1, 0, 0]]);
        assert_eq!(catalog.ids().count(), 2);
        assert_eq!(catalog.iter().map(|(id, _)| id.index()).sum::<usize>(), 1);

        let first = catalog.get(TileId::new(0));
        assert_eq!(first.map(|tile| tile.allowed(Direction::North)), Some(&set(2, &[1])));
        assert_eq!(first.map(|tile| tile.allowed(Direction::West)), Some(&set(2, &[0, 1])));
        assert_eq!(first.map(|tile| tile.allowed(Direction::South).is_empty()), Some(true));
    }
}
