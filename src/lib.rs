//! Weighted wave function collapse over a 2D tile grid
//!
//! Tiles, their weights and their adjacency rules are learned from a palette
//! image and an example image. The grid starts with every tile possible in
//! every cell; cells are then resolved one at a time, lowest entropy first,
//! and each commitment narrows the neighboring cells.

#![forbid(unsafe_code)]

/// Solver core: cells, selection, feasibility, propagation and the driver
pub mod algorithm;
/// Tile catalog construction from palette and example images
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Weighted sampling and the entropy priority score
pub mod math;
/// Grid indexing, directions, cell storage and the tile catalog
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
