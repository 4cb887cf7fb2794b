use super::Grid2;
use crate::error::{OrientationError, Result};

/// Read-only intensity image, row-major, addressed as `(x, y)` with
/// `0 <= x < width` and `0 <= y < height`.
///
/// Only the relative scale of intensities matters to orientation estimation,
/// so implementations may return raw `u8` levels or normalized values.
pub trait PixelGrid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Intensity at `(x, y)`. Callers guarantee the coordinate is in bounds.
    fn intensity(&self, x: usize, y: usize) -> f32;
}

impl<G: PixelGrid + ?Sized> PixelGrid for &G {
    fn width(&self) -> usize {
        (**self).width()
    }

    fn height(&self) -> usize {
        (**self).height()
    }

    fn intensity(&self, x: usize, y: usize) -> f32 {
        (**self).intensity(x, y)
    }
}

impl PixelGrid for Grid2<f32> {
    fn width(&self) -> usize {
        Grid2::width(self)
    }

    fn height(&self) -> usize {
        Grid2::height(self)
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self[(x, y)]
    }
}

impl PixelGrid for Grid2<u8> {
    fn width(&self) -> usize {
        Grid2::width(self)
    }

    fn height(&self) -> usize {
        Grid2::height(self)
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self[(x, y)] as f32
    }
}

/// Borrowed 8-bit grayscale view with an explicit row stride.
#[derive(Debug, Clone, Copy)]
pub struct GrayView<'a> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [u8],
}

impl<'a> GrayView<'a> {
    /// Fails with `InvalidBuffer` if `data` cannot hold `height` rows of
    /// `stride` bytes (the last row only needs `width`), or if
    /// `stride < width`.
    pub fn new(width: usize, height: usize, stride: usize, data: &'a [u8]) -> Result<Self> {
        let expected = if height == 0 {
            0
        } else {
            stride.max(width) * (height - 1) + width
        };
        if stride < width || data.len() < expected {
            return Err(OrientationError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Tightly packed view (`stride == width`).
    pub fn packed(width: usize, height: usize, data: &'a [u8]) -> Result<Self> {
        Self::new(width, height, width, data)
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width]
    }
}

impl PixelGrid for GrayView<'_> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.stride + x] as f32
    }
}
