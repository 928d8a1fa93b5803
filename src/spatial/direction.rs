//! Cardinal directions shared by adjacency rules and neighbor lookups

use std::fmt;

/// One of the four cardinal directions
///
/// The declaration order (North, East, South, West) is the order used for
/// neighbor arrays and per-direction constraint sets throughout the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing y
    North,
    /// Towards increasing x
    East,
    /// Towards increasing y
    South,
    /// Towards decreasing x
    West,
}

impl Direction {
    /// All directions in neighbor-array order
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Position of this direction in neighbor arrays
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// Coordinate step `[dx, dy]` towards the neighbor in this direction
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::North => [0, -1],
            Self::East => [1, 0],
            Self::South => [0, 1],
            Self::West => [-1, 0],
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        };
        f.write_str(name)
    }
}
