//! Error types and context management for solver and catalog operations

use std::fmt;
use std::path::PathBuf;

use crate::spatial::tiles::{TileId, hex_color};

/// Main error type for all solver, catalog and I/O operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// A cell was asked to commit to an identifier the catalog does not know
    UnknownTileChoice {
        /// The rejected identifier
        tile: TileId,
        /// Number of tiles in the catalog
        catalog_size: usize,
    },

    /// Constraint propagation left a cell with no legal tile
    ///
    /// Fatal to the run: there is no backtracking, a retry needs a fresh grid.
    Contradiction {
        /// Grid coordinates (x, y) of the cell that could not be satisfied
        position: [usize; 2],
        /// Driver step during which the contradiction surfaced
        step: Option<usize>,
    },

    /// A resolved cell was asked to commit a second time
    CellAlreadyResolved {
        /// Grid coordinates (x, y) of the cell
        position: [usize; 2],
    },

    /// The grid already failed fatally and must not be stepped again
    GridPoisoned,

    /// The same color appears twice in the palette image
    DuplicateTileColor {
        /// RGB color that was declared twice
        color: [u8; 3],
        /// Palette pixel (x, y) holding the second declaration
        position: [u32; 2],
    },

    /// The example image uses a color the palette does not declare
    UnknownPixelColor {
        /// RGB color of the offending pixel
        color: [u8; 3],
        /// Example pixel (x, y) of the offending color
        position: [u32; 2],
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Source data doesn't meet solver requirements
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownTileChoice { tile, catalog_size } => {
                write!(
                    f,
                    "Unknown tile choice {tile} (catalog holds {catalog_size} tiles)"
                )
            }
            Self::Contradiction { position, step } => {
                write!(
                    f,
                    "Contradiction at cell [{}, {}]: no tile satisfies its neighbors",
                    position[0], position[1]
                )?;
                if let Some(step) = step {
                    write!(f, " (step {step})")?;
                }
                Ok(())
            }
            Self::CellAlreadyResolved { position } => {
                write!(
                    f,
                    "Cell [{}, {}] is already resolved",
                    position[0], position[1]
                )
            }
            Self::GridPoisoned => {
                write!(f, "Grid failed fatally and cannot be stepped again")
            }
            Self::DuplicateTileColor { color, position } => {
                write!(
                    f,
                    "Palette color {} declared twice (again at pixel [{}, {}])",
                    hex_color(*color),
                    position[0],
                    position[1]
                )
            }
            Self::UnknownPixelColor { color, position } => {
                write!(
                    f,
                    "Unknown pixel color {} at example pixel [{}, {}]",
                    hex_color(*color),
                    position[0],
                    position[1]
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidSourceData { reason } => {
                write!(f, "Invalid source data: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for solver results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Current driver step
    pub step: Option<usize>,
}

/// Enriches error messages with run state information
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the driver step
    ///
    /// # Errors
    ///
    /// Propagates the original error with the step applied
    fn with_step(self, step: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only contradictions carry a step slot
            if let AlgorithmError::Contradiction { step, .. } = &mut error {
                if let Some(current) = context.step {
                    *step = Some(current);
                }
            }
            error
        })
    }

    fn with_step(self, step: usize) -> Result<T> {
        self.with_context(ErrorContext { step: Some(step) })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
