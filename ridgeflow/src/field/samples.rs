use std::iter::FusedIterator;

use glam::Vec2;

use super::OrientationField;
use crate::angle::direction;

/// One lattice point of a [`SampleVectors`] pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VectorSample {
    /// Lattice pixel.
    pub x: usize,
    pub y: usize,
    /// Center of that pixel, `(x + 0.5, y + 0.5)`.
    pub position: Vec2,
    /// `None` where the field is undefined.
    pub angle: Option<f32>,
}

impl VectorSample {
    /// Unit vector along the ridge.
    pub fn direction(&self) -> Option<Vec2> {
        self.angle.map(direction)
    }
}

/// Row-major walk over a `step × step` lattice of the image.
///
/// Lattice coordinates are `k·step + step/2`, the last one clamped into the
/// image, so a side of length `n` yields `⌈n / step⌉` samples.
#[derive(Debug, Clone)]
pub struct SampleVectors<'a> {
    field: &'a OrientationField,
    step: usize,
    columns: usize,
    rows: usize,
    next: usize,
}

impl<'a> SampleVectors<'a> {
    pub(super) fn new(field: &'a OrientationField, step: usize) -> Self {
        debug_assert!(step > 0);
        Self {
            field,
            step,
            columns: field.image_width().div_ceil(step),
            rows: field.image_height().div_ceil(step),
            next: 0,
        }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    /// Samples per lattice row.
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn lattice(&self, k: usize, len: usize) -> usize {
        (k * self.step + self.step / 2).min(len - 1)
    }
}

impl Iterator for SampleVectors<'_> {
    type Item = VectorSample;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.columns * self.rows {
            return None;
        }
        let (kx, ky) = (self.next % self.columns, self.next / self.columns);
        self.next += 1;

        let x = self.lattice(kx, self.field.image_width());
        let y = self.lattice(ky, self.field.image_height());
        let angle = self
            .field
            .cell_of(x, y)
            .ok()
            .and_then(|(cx, cy)| self.field.cell(cx, cy));
        Some(VectorSample {
            x,
            y,
            position: Vec2::new(x as f32 + 0.5, y as f32 + 0.5),
            angle,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.columns * self.rows - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SampleVectors<'_> {}

impl FusedIterator for SampleVectors<'_> {}
