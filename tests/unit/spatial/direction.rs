//! Tests for cardinal direction ordering and offsets

#[cfg(test)]
mod tests {
    use tilecollapse::spatial::direction::Direction;

    // Neighbor arrays are laid out North, East, South, West
    #[test]
    fn test_index_matches_all_order() {
        for (position, direction) in Direction::ALL.iter().enumerate() {
            assert_eq!(direction.index(), position);
        }
    }

    // North points to decreasing y, East to increasing x
    #[test]
    fn test_offsets() {
        assert_eq!(Direction::North.offset(), [0, -1]);
        assert_eq!(Direction::East.offset(), [1, 0]);
        assert_eq!(Direction::South.offset(), [0, 1]);
        assert_eq!(Direction::West.offset(), [-1, 0]);
    }

    #[test]
    fn test_display() {
        let names: Vec<String> = Direction::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["north", "east", "south", "west"]);
    }
}
