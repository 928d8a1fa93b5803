//! Spatial data structures
//!
//! This module contains spatial-related functionality including:
//! - Linear index and coordinate conversion
//! - Cardinal directions for adjacency rules
//! - Grid ownership of cells and render snapshots
//! - Tile identifiers, definitions and the tile catalog

/// Cardinal directions in neighbor-array order
pub mod direction;
/// Grid of cells and read-only snapshots
pub mod grid;
/// Row-major index helper
pub mod index;
/// Tile identifiers, definitions and catalog
pub mod tiles;

pub use grid::Grid;
pub use tiles::{TileCatalog, TileId};
