//! Tile catalog construction from a palette image and an example image
//!
//! Every opaque palette pixel declares one tile: its color is the key used in
//! the example image and its coordinates locate the tile sprite in the
//! tileset. The example image then supplies weights and adjacency rules.

use std::collections::HashMap;
use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info};

use crate::algorithm::bitset::TileBitset;
use crate::analysis::statistics::AdjacencyStatistics;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::tiles::{TileCatalog, TileDefinition, TileId, hex_color};

/// One tile declared by the palette image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    /// RGB key of the tile
    pub color: [u8; 3],
    /// Palette pixel `[x, y]`, which is also the sprite position in tile units
    pub position: [u32; 2],
}

/// Tiles declared by a palette image, in row-major pixel order
#[derive(Debug, Clone, Default)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
    color_index: HashMap<[u8; 3], usize>,
}

impl Palette {
    /// Scan the opaque pixels of a palette image
    ///
    /// Fully transparent pixels are gaps. Colors are compared on RGB only.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::DuplicateTileColor`] when a color is declared
    /// by more than one opaque pixel
    pub fn from_image(palette: &RgbaImage) -> Result<Self> {
        let mut entries = Vec::new();
        let mut color_index = HashMap::new();

        for (x, y, pixel) in palette.enumerate_pixels() {
            let [r, g, b, a] = pixel.0;
            if a == 0 {
                continue;
            }
            let color = [r, g, b];
            if color_index.contains_key(&color) {
                return Err(AlgorithmError::DuplicateTileColor {
                    color,
                    position: [x, y],
                });
            }
            color_index.insert(color, entries.len());
            entries.push(PaletteEntry {
                color,
                position: [x, y],
            });
        }

        Ok(Self {
            entries,
            color_index,
        })
    }

    /// Declared tiles in scan order
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Palette entry declared for `color`
    pub fn lookup(&self, color: [u8; 3]) -> Option<usize> {
        self.color_index.get(&color).copied()
    }

    /// Number of declared tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tile is declared
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a [`TileCatalog`] from a palette image and an example image
pub struct CatalogBuilder {
    palette: Palette,
    statistics: AdjacencyStatistics,
}

impl CatalogBuilder {
    /// Load both images from PNG files and analyse them
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either file cannot be opened or decoded
    /// - The palette declares a color twice
    /// - The example uses a color the palette does not declare
    pub fn from_png_paths<P, Q>(palette_path: P, example_path: Q) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let palette = load_rgba(palette_path.as_ref())?;
        let example = load_rgba(example_path.as_ref())?;
        Self::from_images(&palette, &example)
    }

    /// Analyse already decoded images
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The palette declares a color twice
    /// - The example uses a color the palette does not declare
    pub fn from_images(palette: &RgbaImage, example: &RgbaImage) -> Result<Self> {
        let palette = Palette::from_image(palette)?;
        let statistics =
            AdjacencyStatistics::from_example(example, &palette.color_index, palette.len())?;
        Ok(Self {
            palette,
            statistics,
        })
    }

    /// Declared palette
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Example statistics
    pub const fn statistics(&self) -> &AdjacencyStatistics {
        &self.statistics
    }

    /// Assemble the catalog of tiles that appear in the example
    ///
    /// Tiles absent from the example have weight 0 and are dropped; the rest
    /// keep palette order and are numbered densely from 0.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::InvalidSourceData`] if no palette tile
    /// appears in the example
    pub fn build(&self) -> Result<TileCatalog> {
        let used: Vec<usize> = (0..self.palette.len())
            .filter(|&label| self.statistics.count(label) > 0)
            .collect();

        let mut remap = vec![None; self.palette.len()];
        for (id, &label) in used.iter().enumerate() {
            if let Some(slot) = remap.get_mut(label) {
                *slot = Some(TileId::new(id));
            }
        }

        let mut tiles = Vec::with_capacity(used.len());
        for &label in &used {
            let Some(entry) = self.palette.entries.get(label) else {
                continue;
            };
            let neighbors = Direction::ALL.map(|direction| {
                let observed = self.statistics.observed_neighbors(label, direction);
                TileBitset::from_ids(
                    used.len(),
                    observed
                        .into_iter()
                        .flatten()
                        .filter_map(|&neighbor| remap.get(neighbor).copied().flatten()),
                )
            });
            debug!(
                "Tile {} at [{}, {}]: weight {}",
                hex_color(entry.color),
                entry.position[0],
                entry.position[1],
                self.statistics.count(label)
            );
            tiles.push(TileDefinition {
                color: entry.color,
                source_position: entry.position,
                weight: self.statistics.count(label) as f64,
                neighbors,
            });
        }

        if tiles.is_empty() {
            return Err(AlgorithmError::InvalidSourceData {
                reason: "No palette tile appears in the example image".to_string(),
            });
        }

        info!(
            "Built catalog of {} tiles ({} declared in palette)",
            tiles.len(),
            self.palette.len()
        );
        TileCatalog::new(tiles)
    }
}

/// Load an image file as RGBA
///
/// # Errors
///
/// Returns [`AlgorithmError::ImageLoad`] if the file cannot be opened or decoded
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}
