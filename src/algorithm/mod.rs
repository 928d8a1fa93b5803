/// Bitset over tile identifiers for possibility and constraint sets
pub mod bitset;
/// Per-cell possibility tracking, entropy score, sampling and reduction
pub mod cell;
/// Step driver with pacing, cancellation and observers
pub mod executor;
/// Neighbor feasibility checks for candidate placements
pub mod feasibility;
/// Collapse step and constraint propagation
pub mod propagation;
/// Lowest-entropy cell selection
pub mod selection;
