//! Mathematical utilities for the solver

/// Weighted sampling and the entropy priority score
pub mod probability;
