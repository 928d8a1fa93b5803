//! Input/output: errors, configuration, rendering and the command line

/// Command-line interface and run orchestration
pub mod cli;
/// Constants and runtime defaults
pub mod configuration;
/// Error types and context helpers
pub mod error;
/// Snapshot rendering and PNG export
pub mod image;
/// Terminal progress display
pub mod progress;
/// GIF capture of a run
pub mod visualization;
