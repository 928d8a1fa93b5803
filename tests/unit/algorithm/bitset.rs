//! Tests for `TileBitset` operations over catalog identifiers

#[cfg(test)]
mod tests {
    use tilecollapse::algorithm::bitset::TileBitset;
    use tilecollapse::spatial::tiles::TileId;

    use crate::set;

    // New bitsets are empty, `all` holds every identifier
    #[test]
    fn test_new_and_all() {
        let empty = TileBitset::new(10);
        assert!(empty.is_empty());
        assert_eq!(empty.count(), 0);
        assert_eq!(empty.capacity(), 10);

        let full = TileBitset::all(4);
        assert_eq!(full.count(), 4);
        assert!(full.contains(TileId::new(3)));
        assert!(!full.contains(TileId::new(4)));
    }

    // Identifiers beyond the capacity are neither stored nor reported
    #[test]
    fn test_insert_out_of_capacity() {
        let mut bitset = TileBitset::new(3);
        bitset.insert(TileId::new(1));
        bitset.insert(TileId::new(7));
        assert_eq!(bitset.to_vec(), vec![TileId::new(1)]);
        assert!(!bitset.contains(TileId::new(7)));
    }

    #[test]
    fn test_intersection() {
        let left = set(10, &[1, 3, 5]);
        let right = set(10, &[3, 5, 7]);

        let both = left.intersection(&right);
        assert_eq!(both.to_vec(), vec![TileId::new(3), TileId::new(5)]);
        assert!(left.intersects(&right));
        assert!(!left.intersects(&set(10, &[0, 2])));
    }

    // Overlap is found across word boundaries and between capacities
    #[test]
    fn test_intersects_across_words() {
        let wide = set(200, &[3, 64, 130, 199]);
        assert!(wide.intersects(&set(200, &[199])));
        assert!(wide.intersects(&set(200, &[64])));
        assert!(!wide.intersects(&set(200, &[0, 63, 65, 131, 198])));
        assert!(!wide.intersects(&TileBitset::new(200)));
        assert!(TileBitset::all(200).intersects(&wide));

        assert!(wide.intersects(&set(70, &[64])));
        assert!(set(70, &[64]).intersects(&wide));
        assert!(!wide.intersects(&set(70, &[65, 69])));
        assert!(!set(3, &[0, 1, 2]).intersects(&wide));
        assert!(!TileBitset::new(0).intersects(&wide));
    }

    // Intersection leaves the receiver's capacity unchanged
    #[test]
    fn test_intersect_with_mismatched_capacity() {
        let mut wide = set(8, &[1, 2, 6]);
        wide.intersect_with(&set(4, &[1, 2, 3]));
        assert_eq!(wide.capacity(), 8);
        assert_eq!(wide.to_vec(), vec![TileId::new(1), TileId::new(2)]);
    }

    #[test]
    fn test_empty_intersection() {
        let disjoint = set(6, &[0, 1]).intersection(&set(6, &[4, 5]));
        assert!(disjoint.is_empty());
        assert_eq!(disjoint.count(), 0);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let bitset = TileBitset::from_ids(8, [TileId::new(6), TileId::new(0), TileId::new(3)]);
        let ids: Vec<usize> = bitset.iter().map(TileId::index).collect();
        assert_eq!(ids, vec![0, 3, 6]);
    }

    #[test]
    fn test_display() {
        assert_eq!(set(4, &[0, 2]).to_string(), "{#0, #2}");
        assert_eq!(TileBitset::new(4).to_string(), "{}");
    }
}
