//! Command-line interface: build a catalog, run the solver, export the result

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use tracing::{error, info, warn};

use crate::algorithm::executor::{DriverConfig, Executor, RunOutcome, RunReport};
use crate::analysis::patterns::{CatalogBuilder, load_rgba};
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_SEED, DEFAULT_STEP_DELAY_MS,
    DEFAULT_TILE_MARGIN, DEFAULT_TILE_SIZE, DEFAULT_ZOOM, GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::Result;
use crate::io::image::{RenderConfig, Renderer, export_png};
use crate::io::progress::ProgressReporter;
use crate::io::visualization::VisualizationCapture;

#[derive(Parser)]
#[command(name = "tilecollapse")]
#[command(
    author,
    version,
    about = "Fill a tile grid with wave function collapse learned from an example image"
)]
/// Command-line arguments for the tile generation tool
pub struct Cli {
    /// Palette PNG: each opaque pixel color declares one tile at that position
    #[arg(value_name = "PALETTE")]
    pub palette: PathBuf,

    /// Example PNG painted with palette colors
    #[arg(value_name = "EXAMPLE")]
    pub example: PathBuf,

    /// Tileset PNG holding the tile sprites (palette swatches if omitted)
    #[arg(short, long)]
    pub tileset: Option<PathBuf>,

    /// Output PNG path (defaults to `<example>_result.png`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Grid width in cells
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Pause between steps in milliseconds
    #[arg(short, long, default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub delay_ms: u64,

    /// Stop after this many steps
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Sprite edge length in the tileset, in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: u32,

    /// Gap between sprites in the tileset, in pixels
    #[arg(long, default_value_t = DEFAULT_TILE_MARGIN)]
    pub margin: u32,

    /// Output scale factor
    #[arg(short, long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u32,

    /// Also export the run as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Log filter used when `RUST_LOG` is unset (e.g. `debug`)
    #[arg(long, default_value = "warn")]
    pub log: String,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Rendering parameters from the command line
    pub const fn render_config(&self) -> RenderConfig {
        RenderConfig {
            tile_size: self.tile_size,
            margin: self.margin,
            zoom: self.zoom,
        }
    }

    /// Driver pacing from the command line
    pub const fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            step_delay: Duration::from_millis(self.delay_ms),
            max_steps: self.max_steps,
        }
    }
}

/// Install the global `tracing` subscriber, honouring `RUST_LOG` first
pub fn init_logging(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    // A subscriber may already be installed (e.g. by a test harness)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Runs one generation from CLI arguments
pub struct RunProcessor {
    cli: Cli,
}

impl RunProcessor {
    /// Create a new processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Build the catalog, run the solver and export the result
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette, example or tileset images cannot be loaded or are invalid
    /// - The grid or render parameters are invalid
    /// - The solver hits a contradiction
    /// - The result cannot be written
    pub fn process(&mut self) -> Result<RunReport> {
        let catalog = CatalogBuilder::from_png_paths(&self.cli.palette, &self.cli.example)?
            .build()?;

        let mut renderer = Renderer::new(&catalog, self.cli.render_config())?;
        if let Some(tileset_path) = &self.cli.tileset {
            renderer = renderer.with_tileset(load_rgba(tileset_path)?)?;
        }
        renderer.image_size(self.cli.width, self.cli.height)?;

        let mut executor = Executor::seeded(
            &catalog,
            self.cli.width,
            self.cli.height,
            self.cli.seed,
            self.cli.driver_config(),
        )?;

        let display_name = self
            .cli
            .example
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let progress = self
            .cli
            .should_show_progress()
            .then(|| ProgressReporter::new(&display_name, executor.grid().cells().len()));
        let capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(executor.grid()));
        let mut observers = (progress, capture);

        let report = match executor.run(&mut observers) {
            Ok(report) => report,
            Err(e) => {
                if let Some(progress) = &observers.0 {
                    progress.finish("failed");
                }
                error!("Generation of {display_name} failed: {e}");
                return Err(e);
            }
        };

        if let Some(progress) = &observers.0 {
            progress.finish("done");
        }
        if report.outcome != RunOutcome::Completed {
            warn!(
                "Run stopped early ({:?}): {}/{} cells resolved",
                report.outcome, report.resolved, report.total
            );
        }

        let output_path = self
            .cli
            .output
            .clone()
            .unwrap_or_else(|| Self::get_output_path(&self.cli.example));
        export_png(&renderer.render(executor.grid())?, &output_path)?;
        info!("Wrote {}", output_path.display());

        if let Some(capture) = &observers.1 {
            let viz_path = Self::get_visualization_path(&output_path);
            capture.export_gif(&renderer, &viz_path, GIF_FRAME_DELAY_MS)?;
            info!("Wrote {}", viz_path.display());
        }

        Ok(report)
    }

    fn get_output_path(input_path: &Path) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    fn get_visualization_path(output_path: &Path) -> PathBuf {
        let stem = output_path.file_stem().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", stem.to_string_lossy());

        if let Some(parent) = output_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
