//! Tile identifiers, definitions and the immutable tile catalog

use std::fmt;

use crate::algorithm::bitset::TileBitset;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::direction::Direction;

/// Identifier of one tile within its catalog
///
/// Identifiers are dense: a catalog of `n` tiles uses `0..n`, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileId(usize);

impl TileId {
    /// Wrap a raw catalog index
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Raw catalog index
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Format an RGB color as `#rrggbb`
pub fn hex_color(color: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

/// One tile and its adjacency rules
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    /// Palette color that designates this tile
    pub color: [u8; 3],
    /// Position `[x, y]` of the tile sprite in the tileset, in tile units
    pub source_position: [u32; 2],
    /// Sampling probability mass (zero-weight tiles are never sampled)
    pub weight: f64,
    /// Tiles allowed next to this one, indexed by [`Direction::index`]
    pub neighbors: [TileBitset; 4],
}

impl TileDefinition {
    /// Tiles allowed in the adjacent cell towards `direction`
    pub fn allowed(&self, direction: Direction) -> &TileBitset {
        match direction {
            Direction::North => &self.neighbors[0],
            Direction::East => &self.neighbors[1],
            Direction::South => &self.neighbors[2],
            Direction::West => &self.neighbors[3],
        }
    }
}

/// Ordered, immutable mapping from [`TileId`] to [`TileDefinition`]
#[derive(Debug, Clone, PartialEq)]
pub struct TileCatalog {
    tiles: Vec<TileDefinition>,
}

impl TileCatalog {
    /// Validate and wrap a list of definitions; position in the list is the id
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The list is empty (cells could never hold a possibility)
    /// - A weight is negative or not finite
    /// - A neighbor set was built for a catalog of a different size
    pub fn new(tiles: Vec<TileDefinition>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "Tile catalog holds no tiles".to_string(),
            });
        }

        let size = tiles.len();
        for (index, tile) in tiles.iter().enumerate() {
            if !tile.weight.is_finite() || tile.weight < 0.0 {
                return Err(invalid_parameter(
                    "weight",
                    &tile.weight,
                    &format!("tile #{index} needs a finite, non-negative weight"),
                ));
            }
            if let Some(set) = tile.neighbors.iter().find(|set| set.capacity() != size) {
                return Err(AlgorithmError::InvalidSourceData {
                    reason: format!(
                        "Neighbor set of tile #{index} sized for {} tiles, catalog holds {size}",
                        set.capacity()
                    ),
                });
            }
        }

        Ok(Self { tiles })
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the catalog is empty (never true for a validated catalog)
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether `id` names a tile of this catalog
    pub const fn contains(&self, id: TileId) -> bool {
        id.index() < self.tiles.len()
    }

    /// Definition of `id`
    pub fn get(&self, id: TileId) -> Option<&TileDefinition> {
        self.tiles.get(id.index())
    }

    /// Sampling weight of `id`, 0 for unknown identifiers
    pub fn weight(&self, id: TileId) -> f64 {
        self.get(id).map_or(0.0, |tile| tile.weight)
    }

    /// Identifiers in catalog order
    pub fn ids(&self) -> impl Iterator<Item = TileId> + '_ {
        (0..self.tiles.len()).map(TileId::new)
    }

    /// Identifiers paired with their definitions, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileDefinition)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, tile)| (TileId::new(index), tile))
    }

    /// Possibility set holding every tile
    pub fn all_tiles(&self) -> TileBitset {
        TileBitset::all(self.tiles.len())
    }

    /// Palette colors indexed by tile id
    pub fn color_mapping(&self) -> Vec<[u8; 3]> {
        self.tiles.iter().map(|tile| tile.color).collect()
    }
}
