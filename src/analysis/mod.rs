//! Analysis of source images into a tile catalog

/// Palette scanning and catalog assembly
pub mod patterns;
/// Weights and neighbor observations from the example image
pub mod statistics;
