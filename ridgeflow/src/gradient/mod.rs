//! Per-pixel intensity gradients.
//!
//! - Convolves a 3×3 kernel pair with the image, one row band per worker.
//! - Boundary policy is clamp-to-edge: a neighbor outside the image reads the
//!   nearest border pixel. Along a border the derivative across that border
//!   is therefore a one-sided difference.
//! - `gx > 0` where intensity grows with x, `gy > 0` where it grows with y
//!   (rows go down).


use std::sync::atomic::{AtomicBool, Ordering};

use common::parallel::{for_each_row_band, for_each_row_band2};

use crate::config::GradientOperator;
use crate::error::{OrientationError, Result};
use crate::grid::{Grid2, PixelGrid};

type Kernel3 = [[f32; 3]; 3];

const SOBEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

const SCHARR_X: Kernel3 = [[-3.0, 0.0, 3.0], [-10.0, 0.0, 10.0], [-3.0, 0.0, 3.0]];
const SCHARR_Y: Kernel3 = [[-3.0, -10.0, -3.0], [0.0, 0.0, 0.0], [3.0, 10.0, 3.0]];

impl GradientOperator {
    fn kernels(self) -> (&'static Kernel3, &'static Kernel3) {
        match self {
            GradientOperator::Sobel => (&SOBEL_X, &SOBEL_Y),
            GradientOperator::Scharr => (&SCHARR_X, &SCHARR_Y),
        }
    }
}

/// Horizontal and vertical derivative grids of equal shape.
#[derive(Debug, Clone)]
pub struct GradientGrid {
    gx: Grid2<f32>,
    gy: Grid2<f32>,
}

impl GradientGrid {
    /// Wraps externally computed gradients.
    pub fn from_parts(gx: Grid2<f32>, gy: Grid2<f32>) -> Result<Self> {
        if gx.width() != gy.width() || gx.height() != gy.height() {
            return Err(OrientationError::DimensionMismatch {
                gx_width: gx.width(),
                gx_height: gx.height(),
                gy_width: gy.width(),
                gy_height: gy.height(),
            });
        }
        Ok(Self { gx, gy })
    }

    pub fn width(&self) -> usize {
        self.gx.width()
    }

    pub fn height(&self) -> usize {
        self.gx.height()
    }

    pub fn gx(&self) -> &Grid2<f32> {
        &self.gx
    }

    pub fn gy(&self) -> &Grid2<f32> {
        &self.gy
    }

    /// `(gx, gy)` at a pixel.
    #[inline]
    pub fn at(&self, x: usize, y: usize) -> (f32, f32) {
        (self.gx[(x, y)], self.gy[(x, y)])
    }
}

/// Computes [`GradientGrid`]s with a fixed operator.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientComputer {
    operator: GradientOperator,
}

impl GradientComputer {
    /// Kernel radius. Each side of the image must be longer than this.
    pub const KERNEL_RADIUS: usize = 1;

    pub fn new(operator: GradientOperator) -> Self {
        Self { operator }
    }

    pub fn operator(&self) -> GradientOperator {
        self.operator
    }

    pub fn compute<G: PixelGrid + Sync + ?Sized>(&self, image: &G) -> Result<GradientGrid> {
        let never = AtomicBool::new(false);
        self.compute_cancellable(image, &never)
    }

    /// Like [`compute`](Self::compute); bands not yet started when `cancel`
    /// is raised are skipped and the call returns `Cancelled`.
    pub fn compute_cancellable<G: PixelGrid + Sync + ?Sized>(
        &self,
        image: &G,
        cancel: &AtomicBool,
    ) -> Result<GradientGrid> {
        let width = image.width();
        let height = image.height();
        if width <= Self::KERNEL_RADIUS || height <= Self::KERNEL_RADIUS {
            return Err(OrientationError::ImageTooSmall {
                width,
                height,
                min: Self::KERNEL_RADIUS,
            });
        }

        let luma = to_luma(image, cancel);
        if cancel.load(Ordering::Relaxed) {
            return Err(OrientationError::Cancelled);
        }

        let (kernel_x, kernel_y) = self.operator.kernels();
        let mut gx = vec![0.0f32; width * height];
        let mut gy = vec![0.0f32; width * height];

        for_each_row_band2(&mut gx, &mut gy, width, |first_row, gx_band, gy_band| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let rows = gx_band.len() / width;
            for local_y in 0..rows {
                let y = first_row + local_y;
                let span = local_y * width..(local_y + 1) * width;
                convolve_row(
                    &luma,
                    y,
                    kernel_x,
                    kernel_y,
                    &mut gx_band[span.clone()],
                    &mut gy_band[span],
                );
            }
        });

        if cancel.load(Ordering::Relaxed) {
            return Err(OrientationError::Cancelled);
        }

        GradientGrid::from_parts(
            Grid2::new(width, height, gx),
            Grid2::new(width, height, gy),
        )
    }
}

/// Copies the input into a dense `f32` buffer so the kernel works on slices.
fn to_luma<G: PixelGrid + Sync + ?Sized>(image: &G, cancel: &AtomicBool) -> Grid2<f32> {
    let width = image.width();
    let height = image.height();
    let mut luma = vec![0.0f32; width * height];
    for_each_row_band(&mut luma, width, |first_row, band| {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        for (local_y, row) in band.chunks_mut(width).enumerate() {
            let y = first_row + local_y;
            for (x, v) in row.iter_mut().enumerate() {
                *v = image.intensity(x, y);
            }
        }
    });
    Grid2::new(width, height, luma)
}

/// One output row of both derivatives, with clamped neighbor indices.
#[inline]
fn convolve_row(
    luma: &Grid2<f32>,
    y: usize,
    kernel_x: &Kernel3,
    kernel_y: &Kernel3,
    out_gx: &mut [f32],
    out_gy: &mut [f32],
) {
    let width = luma.width();
    let height = luma.height();
    let rows = [
        luma.row(y.saturating_sub(1)),
        luma.row(y),
        luma.row((y + 1).min(height - 1)),
    ];

    for x in 0..width {
        let xs = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
        let mut sum_x = 0.0f32;
        let mut sum_y = 0.0f32;
        for (ky, row) in rows.iter().enumerate() {
            let kx_row = &kernel_x[ky];
            let ky_row = &kernel_y[ky];
            let (a, b, c) = (row[xs[0]], row[xs[1]], row[xs[2]]);
            sum_x += a * kx_row[0] + b * kx_row[1] + c * kx_row[2];
            sum_y += a * ky_row[0] + b * ky_row[1] + c * ky_row[2];
        }
        out_gx[x] = sum_x;
        out_gy[x] = sum_y;
    }
}
