pub mod bitset;
pub mod feasibility;
pub mod propagation;
