//! Conversion between linear cell indices and grid coordinates

use crate::spatial::direction::Direction;

/// Row-major index helper for a fixed-size grid
///
/// Coordinates outside `[0, width) x [0, height)` are reported as out of
/// bounds instead of wrapping onto the next row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridIndex {
    width: usize,
    height: usize,
}

impl GridIndex {
    /// Create a helper for a `width` x `height` grid
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Grid width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    pub const fn len(&self) -> usize {
        self.width * self.height
    }

    /// Whether the grid has no cells at all
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Linear index of `(x, y)`, or `None` when out of bounds
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then_some(x + y * self.width)
    }

    /// Coordinates `[x, y]` of a linear index, or `None` when out of bounds
    pub const fn position(&self, index: usize) -> Option<[usize; 2]> {
        if index >= self.len() {
            return None;
        }
        Some([index % self.width, index / self.width])
    }

    /// Linear index of the neighbor of `position` in `direction`
    pub fn neighbor(&self, position: [usize; 2], direction: Direction) -> Option<usize> {
        let [dx, dy] = direction.offset();
        let x = i32::try_from(position[0]).ok()?.checked_add(dx)?;
        let y = i32::try_from(position[1]).ok()?.checked_add(dy)?;
        self.index(x, y)
    }

    /// Linear indices of the four neighbors of `position`, in North, East,
    /// South, West order
    pub fn neighbors(&self, position: [usize; 2]) -> [Option<usize>; 4] {
        Direction::ALL.map(|direction| self.neighbor(position, direction))
    }
}
