use bitvec::prelude::*;
use std::fmt;

use crate::spatial::tiles::TileId;

const WORD_BITS: usize = usize::BITS as usize;

/// Fixed-size bitset over the identifiers of one tile catalog
///
/// Backs both unresolved cell possibility sets and per-direction neighbor
/// constraint sets. Membership tests are O(1) and intersections work a word
/// at a time. Identifiers beyond the capacity are never members.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Create a bitset containing every tile of a `capacity`-sized catalog
    pub fn all(capacity: usize) -> Self {
        Self {
            bits: bitvec![1; capacity],
        }
    }

    /// Create a bitset holding exactly the given identifiers
    pub fn from_ids<I>(capacity: usize, ids: I) -> Self
    where
        I: IntoIterator<Item = TileId>,
    {
        let mut bitset = Self::new(capacity);
        for id in ids {
            bitset.insert(id);
        }
        bitset
    }

    /// Number of identifiers this set can describe
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile identifier, ignoring identifiers beyond the capacity
    pub fn insert(&mut self, tile: TileId) {
        if tile.index() < self.bits.len() {
            self.bits.set(tile.index(), true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: TileId) -> bool {
        self.bits.get(tile.index()).as_deref() == Some(&true)
    }

    /// Intersect this bitset with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        if other.bits.len() == self.bits.len() {
            self.bits &= &other.bits;
        } else {
            // Sets from different catalogs only share their common prefix
            let shared = other.bits.len().min(self.bits.len());
            for index in 0..self.bits.len() {
                let keep = index < shared && other.bits.get(index).as_deref() == Some(&true);
                if !keep {
                    self.bits.set(index, false);
                }
            }
        }
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Whether the two sets share at least one identifier
    pub fn intersects(&self, other: &Self) -> bool {
        // Chunks at the same index cover the same identifiers; a shorter
        // final chunk loads zero-extended
        self.bits
            .chunks(WORD_BITS)
            .zip(other.bits.chunks(WORD_BITS))
            .any(|(mine, theirs)| mine.load_le::<usize>() & theirs.load_le::<usize>() != 0)
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Iterate the members in ascending identifier order
    pub fn iter(&self) -> impl Iterator<Item = TileId> + '_ {
        self.bits.iter_ones().map(TileId::new)
    }

    /// Extract all members as a vector
    pub fn to_vec(&self) -> Vec<TileId> {
        self.iter().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let members: Vec<String> = self.iter().map(|tile| tile.to_string()).collect();
        write!(f, "{{{}}}", members.join(", "))
    }
}
