//! Rendering of grid snapshots to RGBA images and PNG export

use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::io::configuration::{
    DEFAULT_TILE_MARGIN, DEFAULT_TILE_SIZE, DEFAULT_ZOOM, MAX_IMAGE_DIMENSION,
    PLACEHOLDER_BACKGROUND, PLACEHOLDER_INK,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::grid::{CellSnapshot, Grid};
use crate::spatial::tiles::{TileCatalog, TileId, hex_color};

/// Tileset geometry and output scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Edge length of one sprite in the tileset, in pixels
    pub tile_size: u32,
    /// Gap between sprites in the tileset, in pixels
    pub margin: u32,
    /// Integer scale applied to every cell
    pub zoom: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            margin: DEFAULT_TILE_MARGIN,
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl RenderConfig {
    /// Edge length of one rendered cell, saturating on overflow
    pub const fn cell_pixels(&self) -> u32 {
        self.tile_size.saturating_mul(self.zoom)
    }

    /// Pixel origin of the sprite at `[x, y]` (tile units) in the tileset,
    /// `None` if it does not fit in `u32`
    pub fn sprite_origin(&self, source_position: [u32; 2]) -> Option<[u32; 2]> {
        let pitch = self.tile_size.checked_add(self.margin)?;
        Some([
            source_position[0].checked_mul(pitch)?,
            source_position[1].checked_mul(pitch)?,
        ])
    }

    /// Reject degenerate or oversized geometry
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tile size or zoom is zero
    /// - One rendered cell would exceed [`MAX_IMAGE_DIMENSION`]
    /// - The sprite pitch overflows
    pub fn validate(&self) -> Result<()> {
        if self.tile_size == 0 {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &"must be positive",
            ));
        }
        if self.zoom == 0 {
            return Err(invalid_parameter("zoom", &self.zoom, &"must be positive"));
        }
        let fits = self
            .tile_size
            .checked_mul(self.zoom)
            .is_some_and(|cell| cell <= MAX_IMAGE_DIMENSION);
        if !fits {
            return Err(invalid_parameter(
                "zoom",
                &self.zoom,
                &format!(
                    "cells of {} pixels zoomed {}x exceed {MAX_IMAGE_DIMENSION} pixels",
                    self.tile_size, self.zoom
                ),
            ));
        }
        if self.tile_size.checked_add(self.margin).is_none() {
            return Err(invalid_parameter(
                "margin",
                &self.margin,
                &"sprite pitch overflows",
            ));
        }
        Ok(())
    }
}

/// Draws grid snapshots, one square per cell
///
/// Resolved cells show their tileset sprite, or a flat swatch of their
/// palette color when no tileset is given. Unresolved cells show their
/// entropy score, rounded, as a small digit glyph.
pub struct Renderer<'a> {
    catalog: &'a TileCatalog,
    tileset: Option<RgbaImage>,
    config: RenderConfig,
}

impl<'a> Renderer<'a> {
    /// Create a renderer drawing palette swatches
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is degenerate
    pub fn new(catalog: &'a TileCatalog, config: RenderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            tileset: None,
            config,
        })
    }

    /// Draw resolved cells from `tileset` instead of palette swatches
    ///
    /// # Errors
    ///
    /// Returns an error if a catalog sprite lies outside the tileset
    pub fn with_tileset(mut self, tileset: RgbaImage) -> Result<Self> {
        for (id, tile) in self.catalog.iter() {
            let origin = self.config.sprite_origin(tile.source_position);
            let fits = origin.is_some_and(|[x, y]| {
                x.checked_add(self.config.tile_size)
                    .is_some_and(|right| right <= tileset.width())
                    && y.checked_add(self.config.tile_size)
                        .is_some_and(|bottom| bottom <= tileset.height())
            });
            if !fits {
                let [column, row] = tile.source_position;
                return Err(AlgorithmError::InvalidSourceData {
                    reason: format!(
                        "Sprite of tile {id} ({}) at tile [{column}, {row}] exceeds {}x{} tileset",
                        hex_color(tile.color),
                        tileset.width(),
                        tileset.height()
                    ),
                });
            }
        }
        self.tileset = Some(tileset);
        Ok(self)
    }

    /// Render configuration
    pub const fn config(&self) -> RenderConfig {
        self.config
    }

    /// Pixel dimensions of the image for a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if either edge would exceed [`MAX_IMAGE_DIMENSION`]
    pub fn image_size(&self, width: usize, height: usize) -> Result<[u32; 2]> {
        let cell = self.config.cell_pixels();
        let edge = |parameter: &'static str, cells: usize| {
            u32::try_from(cells)
                .ok()
                .and_then(|cells| cells.checked_mul(cell))
                .filter(|&pixels| pixels <= MAX_IMAGE_DIMENSION)
                .ok_or_else(|| {
                    invalid_parameter(
                        parameter,
                        &cells,
                        &format!(
                            "{cells} cells of {cell} pixels exceed {MAX_IMAGE_DIMENSION} pixels"
                        ),
                    )
                })
        };
        Ok([edge("width", width)?, edge("height", height)?])
    }

    /// Render the grid's current state
    ///
    /// # Errors
    ///
    /// Returns an error if a resolved cell names a tile outside the catalog
    pub fn render(&self, grid: &Grid<'_>) -> Result<RgbaImage> {
        self.render_snapshot(&grid.snapshot(), grid.width(), grid.height())
    }

    /// Render a snapshot of a `width` x `height` grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The image would exceed [`MAX_IMAGE_DIMENSION`]
    /// - A resolved cell names a tile outside the catalog
    pub fn render_snapshot(
        &self,
        cells: &[CellSnapshot],
        width: usize,
        height: usize,
    ) -> Result<RgbaImage> {
        let [image_width, image_height] = self.image_size(width, height)?;
        let cell = self.config.cell_pixels();
        let mut img = ImageBuffer::new(image_width, image_height);

        for snapshot in cells {
            let [x, y] = snapshot.position;
            if x >= width || y >= height {
                continue;
            }
            // Both products are bounded by the image size checked above
            let origin = [x as u32 * cell, y as u32 * cell];
            match snapshot.tile {
                Some(tile) => self.draw_tile(&mut img, origin, tile)?,
                None => self.draw_placeholder(&mut img, origin, snapshot.entropy),
            }
        }

        Ok(img)
    }

    fn draw_tile(&self, img: &mut RgbaImage, origin: [u32; 2], tile: TileId) -> Result<()> {
        let definition = self
            .catalog
            .get(tile)
            .ok_or(AlgorithmError::UnknownTileChoice {
                tile,
                catalog_size: self.catalog.len(),
            })?;
        let cell = self.config.cell_pixels();

        match &self.tileset {
            Some(tileset) => {
                let [sx, sy] = self
                    .config
                    .sprite_origin(definition.source_position)
                    .ok_or_else(|| AlgorithmError::InvalidSourceData {
                        reason: format!("Sprite of tile {tile} lies outside the tileset"),
                    })?;
                for dy in 0..cell {
                    for dx in 0..cell {
                        let source = tileset
                            .get_pixel_checked(sx + dx / self.config.zoom, sy + dy / self.config.zoom)
                            .copied()
                            .unwrap_or(Rgba([0, 0, 0, 0]));
                        put(img, origin[0] + dx, origin[1] + dy, source);
                    }
                }
            }
            None => {
                let [r, g, b] = definition.color;
                fill(img, origin, cell, Rgba([r, g, b, 255]));
            }
        }
        Ok(())
    }

    fn draw_placeholder(&self, img: &mut RgbaImage, origin: [u32; 2], entropy: f64) {
        let cell = self.config.cell_pixels();
        fill(img, origin, cell, Rgba(PLACEHOLDER_BACKGROUND));

        let label = format!("{}", entropy.round().max(0.0) as u64);
        let digits: Vec<usize> = label
            .bytes()
            .map(|byte| usize::from(byte.saturating_sub(b'0')))
            .collect();

        // Glyphs are GLYPH_WIDTH x GLYPH_HEIGHT with one column of spacing
        let text_width = digits.len() as u32 * (GLYPH_WIDTH + 1) - 1;
        let scale = (cell / (text_width + 2)).min(cell / (GLYPH_HEIGHT + 2)).max(1);
        let left = origin[0] + cell.saturating_sub(text_width * scale) / 2;
        let top = origin[1] + cell.saturating_sub(GLYPH_HEIGHT * scale) / 2;

        for (position, &digit) in digits.iter().enumerate() {
            let Some(rows) = DIGIT_GLYPHS.get(digit) else {
                continue;
            };
            let glyph_left = left + position as u32 * (GLYPH_WIDTH + 1) * scale;
            for (row, bits) in rows.iter().enumerate() {
                for column in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> column) == 0 {
                        continue;
                    }
                    let x = glyph_left + column * scale;
                    let y = top + row as u32 * scale;
                    for py in y..y + scale {
                        for px in x..x + scale {
                            // Glyphs wider than a tiny cell are clipped to it
                            if px < origin[0] + cell && py < origin[1] + cell {
                                put(img, px, py, Rgba(PLACEHOLDER_INK));
                            }
                        }
                    }
                }
            }
        }
    }
}

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;

/// 3x5 digit bitmaps, one byte per row, most significant of 3 bits leftmost
const DIGIT_GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

fn put(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    if let Some(pixel) = img.get_pixel_mut_checked(x, y) {
        *pixel = color;
    }
}

fn fill(img: &mut RgbaImage, origin: [u32; 2], size: u32, color: Rgba<u8>) {
    for y in origin[1]..origin[1] + size {
        for x in origin[0]..origin[0] + size {
            put(img, x, y, color);
        }
    }
}

/// Save a rendered image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_png(img: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}
