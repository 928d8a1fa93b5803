//! Adjacency statistics gathered from an example image
//!
//! Every example pixel is labelled with its palette entry. The number of
//! pixels per label becomes the tile weight, and the labels seen next to each
//! pixel, per direction, become the tile's neighbor constraints.

use std::collections::{BTreeSet, HashMap};

use image::RgbaImage;
use ndarray::Array2;

use crate::io::error::{AlgorithmError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::index::GridIndex;

/// Weights and observed neighbors for each palette entry
#[derive(Debug, Clone)]
pub struct AdjacencyStatistics {
    labels: Array2<usize>,
    counts: Vec<usize>,
    neighbors: Vec<[BTreeSet<usize>; 4]>,
}

impl AdjacencyStatistics {
    /// Label `example` against the palette colors and count adjacencies
    ///
    /// `color_index` maps an RGB color to its palette entry, and
    /// `palette_len` is the number of entries. Alpha is ignored when matching.
    ///
    /// # Errors
    ///
    /// Returns [`AlgorithmError::UnknownPixelColor`] for the first example
    /// pixel (in row-major order) whose color the palette does not declare
    pub fn from_example(
        example: &RgbaImage,
        color_index: &HashMap<[u8; 3], usize>,
        palette_len: usize,
    ) -> Result<Self> {
        let (width, height) = (example.width() as usize, example.height() as usize);
        let mut labels = Array2::zeros((height, width));

        for (x, y, pixel) in example.enumerate_pixels() {
            let [r, g, b, _] = pixel.0;
            let color = [r, g, b];
            let label = color_index
                .get(&color)
                .copied()
                .ok_or(AlgorithmError::UnknownPixelColor {
                    color,
                    position: [x, y],
                })?;
            if let Some(slot) = labels.get_mut((y as usize, x as usize)) {
                *slot = label;
            }
        }

        let mut counts = vec![0usize; palette_len];
        let mut neighbors = vec![<[BTreeSet<usize>; 4]>::default(); palette_len];
        let index = GridIndex::new(width, height);

        for ((y, x), &label) in labels.indexed_iter() {
            if let Some(count) = counts.get_mut(label) {
                *count += 1;
            }
            let Some(observed) = neighbors.get_mut(label) else {
                continue;
            };
            for (direction, set) in Direction::ALL.iter().zip(observed.iter_mut()) {
                let neighbor_label = index
                    .neighbor([x, y], *direction)
                    .and_then(|linear| index.position(linear))
                    .and_then(|[nx, ny]| labels.get((ny, nx)));
                if let Some(&neighbor_label) = neighbor_label {
                    set.insert(neighbor_label);
                }
            }
        }

        Ok(Self {
            labels,
            counts,
            neighbors,
        })
    }

    /// Palette entry of every example pixel, indexed `(y, x)`
    pub const fn labels(&self) -> &Array2<usize> {
        &self.labels
    }

    /// Number of example pixels using palette entry `label`
    pub fn count(&self, label: usize) -> usize {
        self.counts.get(label).copied().unwrap_or(0)
    }

    /// Palette entries seen next to `label` towards `direction`
    pub fn observed_neighbors(&self, label: usize, direction: Direction) -> Option<&BTreeSet<usize>> {
        self.neighbors
            .get(label)
            .and_then(|sets| sets.get(direction.index()))
    }
}
