//! The computed orientation field and its queries.

mod samples;

#[cfg(test)]
mod tests;

pub use samples::{SampleVectors, VectorSample};

use crate::angle::axial_variance;
use crate::config::Granularity;
use crate::error::{OrientationError, Result};
use crate::grid::Grid2;

/// Immutable grid of ridge angles in `[0, π)`.
///
/// Undefined cells (flat or isotropic windows) are reported as `None`.
/// Queries take pixel coordinates of the source image.
#[derive(Debug, Clone)]
pub struct OrientationField {
    image_width: usize,
    image_height: usize,
    block_size: usize,
    granularity: Granularity,
    angles: Grid2<f32>,
    coherence: Grid2<f32>,
}

impl OrientationField {
    pub(crate) fn from_cells(
        image_width: usize,
        image_height: usize,
        block_size: usize,
        granularity: Granularity,
        angles: Grid2<f32>,
        coherence: Grid2<f32>,
    ) -> Self {
        debug_assert_eq!(angles.width(), coherence.width());
        debug_assert_eq!(angles.height(), coherence.height());
        Self {
            image_width,
            image_height,
            block_size,
            granularity,
            angles,
            coherence,
        }
    }

    pub fn image_width(&self) -> usize {
        self.image_width
    }

    pub fn image_height(&self) -> usize {
        self.image_height
    }

    /// Number of cell columns.
    pub fn width(&self) -> usize {
        self.angles.width()
    }

    /// Number of cell rows.
    pub fn height(&self) -> usize {
        self.angles.height()
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Raw angle cells; undefined cells hold NaN.
    pub fn angles(&self) -> &Grid2<f32> {
        &self.angles
    }

    pub fn coherence_cells(&self) -> &Grid2<f32> {
        &self.coherence
    }

    /// Orientation at the cell containing pixel `(x, y)`.
    pub fn orientation(&self, x: usize, y: usize) -> Result<Option<f32>> {
        let (cx, cy) = self.cell_of(x, y)?;
        Ok(self.cell(cx, cy))
    }

    /// Coherence in `[0, 1]` at the cell containing pixel `(x, y)`.
    pub fn coherence(&self, x: usize, y: usize) -> Result<f32> {
        let (cx, cy) = self.cell_of(x, y)?;
        Ok(self.coherence[(cx, cy)])
    }

    /// Orientation of cell `(cx, cy)`; `None` when undefined or outside the
    /// cell grid.
    pub fn cell(&self, cx: usize, cy: usize) -> Option<f32> {
        self.angles
            .get(cx, cy)
            .copied()
            .filter(|angle| !angle.is_nan())
    }

    /// Cell containing pixel `(x, y)`.
    pub fn cell_of(&self, x: usize, y: usize) -> Result<(usize, usize)> {
        if x >= self.image_width || y >= self.image_height {
            return Err(OrientationError::OutOfRange {
                x,
                y,
                width: self.image_width,
                height: self.image_height,
            });
        }
        Ok(match self.granularity {
            Granularity::Pixel => (x, y),
            Granularity::Block => (x / self.block_size, y / self.block_size),
        })
    }

    /// Lazy samples on a `step × step` pixel lattice. Every call starts a
    /// fresh pass; the iterator itself is also `Clone`.
    pub fn sample_vectors(&self, step: usize) -> Result<SampleVectors<'_>> {
        if step == 0 {
            return Err(OrientationError::InvalidStep { step });
        }
        Ok(SampleVectors::new(self, step))
    }

    /// One sample per block.
    pub fn block_vectors(&self) -> SampleVectors<'_> {
        SampleVectors::new(self, self.block_size)
    }

    pub fn defined_count(&self) -> usize {
        self.defined_angles().count()
    }

    pub fn is_fully_undefined(&self) -> bool {
        self.defined_count() == 0
    }

    /// Circular variance of all defined cells, `None` if there are none.
    pub fn circular_variance(&self) -> Option<f32> {
        axial_variance(self.defined_angles())
    }

    fn defined_angles(&self) -> impl Iterator<Item = f32> + '_ {
        self.angles.iter().copied().filter(|a| !a.is_nan())
    }
}
