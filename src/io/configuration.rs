//! Solver constants and runtime configuration defaults

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 20;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 20;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Pause between two driver steps (in milliseconds)
pub const DEFAULT_STEP_DELAY_MS: u64 = 20;

// Tileset geometry
/// Edge length of one tile sprite in the tileset (in pixels)
pub const DEFAULT_TILE_SIZE: u32 = 16;
/// Gap between neighbouring sprites in the tileset (in pixels)
pub const DEFAULT_TILE_MARGIN: u32 = 1;
/// Output scale factor applied to every rendered cell
pub const DEFAULT_ZOOM: u32 = 2;
/// Largest rendered image edge (in pixels)
pub const MAX_IMAGE_DIMENSION: u32 = 16_384;

/// Shade used for placeholder glyphs on unresolved cells
pub const PLACEHOLDER_INK: [u8; 4] = [32, 32, 32, 255];
/// Background of unresolved cells
pub const PLACEHOLDER_BACKGROUND: [u8; 4] = [224, 224, 224, 255];

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_result";
/// Suffix added to visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_visualization";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 20;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
