//! Frame capture and GIF generation for run visualization

use std::path::Path;

use image::{Delay, Frame};

use crate::algorithm::executor::StepObserver;
use crate::algorithm::propagation::StepOutcome;
use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{AlgorithmError, Result};
use crate::io::image::Renderer;
use crate::spatial::grid::{CellSnapshot, Grid};
use crate::spatial::tiles::TileId;

/// One committed step, with the neighbor scores it changed
#[derive(Debug, Clone, PartialEq)]
pub struct TilePlacement {
    /// Driver step that committed the tile
    pub step: usize,
    /// Grid coordinates of the resolved cell
    pub position: [usize; 2],
    /// Committed tile
    pub tile: TileId,
    /// Linear index and new entropy of each unresolved neighbor
    pub narrowed: Vec<(usize, f64)>,
}

/// Captures tile placements for visualization
///
/// Stores the initial grid once, then one [`TilePlacement`] per committed
/// step; rejected steps leave the grid unchanged and are not recorded.
/// Frames are rebuilt by replaying the placements at export time.
pub struct VisualizationCapture {
    width: usize,
    height: usize,
    initial: Vec<CellSnapshot>,
    placements: Vec<TilePlacement>,
}

impl VisualizationCapture {
    /// Start capturing from the grid's current state
    pub fn new(grid: &Grid<'_>) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            initial: grid.snapshot(),
            placements: Vec::with_capacity(grid.cells().len()),
        }
    }

    /// Number of frames: the initial grid plus one per placement
    pub fn frame_count(&self) -> usize {
        self.placements.len() + 1
    }

    /// Recorded placements in order
    pub fn placements(&self) -> &[TilePlacement] {
        &self.placements
    }

    /// Rebuild the grid as it was in `frame` (0 is the initial grid)
    pub fn snapshot_at(&self, frame: usize) -> Option<Vec<CellSnapshot>> {
        let placements = self.placements.get(..frame)?;
        let mut cells = self.initial.clone();
        for placement in placements {
            apply(&mut cells, self.width, placement);
        }
        Some(cells)
    }

    /// Export the captured frames as a GIF with automatic frame skipping
    ///
    /// Frames requested faster than viewers can show are merged: with a 20ms
    /// delay and a 50ms viewer minimum, every third frame is kept so the
    /// apparent animation speed is preserved. The last frame is held longer.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A frame cannot be rendered
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(
        &self,
        renderer: &Renderer<'_>,
        output_path: &Path,
        frame_delay_ms: u32,
    ) -> Result<()> {
        let frame_delay_ms = frame_delay_ms.max(1);
        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;
        let mut encoder = image::codecs::gif::GifEncoder::new(file);

        let last_index = self.placements.len();
        let mut cells = self.initial.clone();
        for index in 0..=last_index {
            if let Some(placement) = index.checked_sub(1).and_then(|i| self.placements.get(i)) {
                apply(&mut cells, self.width, placement);
            }
            if index % skip_factor != 0 && index != last_index {
                continue;
            }
            // Final frame displays longer for better visibility
            let delay = if index == last_index {
                effective_delay_ms * 25
            } else {
                effective_delay_ms
            };
            let img = renderer.render_snapshot(&cells, self.width, self.height)?;
            encoder
                .encode_frame(Frame::from_parts(
                    img,
                    0,
                    0,
                    Delay::from_numer_denom_ms(delay, 1),
                ))
                .map_err(|e| AlgorithmError::ImageExport {
                    path: output_path.to_path_buf(),
                    source: e,
                })?;
        }

        Ok(())
    }
}

impl StepObserver for VisualizationCapture {
    fn on_step(&mut self, grid: &Grid<'_>, step: usize, outcome: StepOutcome) -> Result<()> {
        let StepOutcome::Committed { position, tile } = outcome else {
            return Ok(());
        };
        let catalog = grid.catalog();
        let narrowed = grid
            .index()
            .neighbors(position)
            .into_iter()
            .flatten()
            .filter_map(|index| grid.cell(index).map(|cell| (index, cell)))
            .filter(|(_, cell)| cell.tile().is_none())
            .map(|(index, cell)| (index, cell.entropy(catalog)))
            .collect();
        self.placements.push(TilePlacement {
            step,
            position,
            tile,
            narrowed,
        });
        Ok(())
    }
}

fn apply(cells: &mut [CellSnapshot], width: usize, placement: &TilePlacement) {
    let [x, y] = placement.position;
    if let Some(cell) = cells.get_mut(y * width + x) {
        cell.tile = Some(placement.tile);
        cell.entropy = 0.0;
    }
    for &(index, entropy) in &placement.narrowed {
        if let Some(cell) = cells.get_mut(index) {
            cell.entropy = entropy;
        }
    }
}
