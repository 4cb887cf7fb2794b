//! Window aggregation of gradient moments.
//!
//! Both granularities write angle and coherence grids through disjoint row
//! bands; a cell reads only the gradients under its own window.

use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use common::parallel::{for_each_row_band, for_each_row_band2};

use super::moments::Moments;
use crate::gradient::GradientGrid;
use crate::grid::Grid2;

/// Angle and coherence grids of one aggregation pass.
pub(crate) struct CellGrids {
    pub angles: Grid2<f32>,
    pub coherence: Grid2<f32>,
}

/// Window `[i − side/2, i − side/2 + side)` clipped to `[0, len)`.
#[inline]
pub(super) fn centered_window(i: usize, side: usize, len: usize) -> Range<usize> {
    let half = side / 2;
    let start = i.saturating_sub(half);
    let end = (i + side - half).min(len);
    start..end
}

/// Block `index` of side `side` clipped to `[0, len)`.
#[inline]
pub(super) fn block_span(index: usize, side: usize, len: usize) -> Range<usize> {
    let start = index * side;
    start..((index + 1) * side).min(len)
}

/// One cell per pixel, each averaging over the window centered on it.
///
/// Separable: a horizontal window sum per row, then a vertical sum of those
/// per output row.
pub(crate) fn aggregate_pixels(
    gradients: &GradientGrid,
    block_size: usize,
    epsilon: f64,
    cancel: &AtomicBool,
) -> CellGrids {
    let width = gradients.width();
    let height = gradients.height();

    let mut horizontal = vec![Moments::default(); width * height];
    for_each_row_band(&mut horizontal, width, |first_row, band| {
        if cancel.load(Ordering::Relaxed) {
            return;
        }
        let mut row_moments = vec![Moments::default(); width];
        for (local_y, out_row) in band.chunks_mut(width).enumerate() {
            let y = first_row + local_y;
            let gx_row = gradients.gx().row(y);
            let gy_row = gradients.gy().row(y);
            for (m, (&gx, &gy)) in row_moments.iter_mut().zip(gx_row.iter().zip(gy_row)) {
                *m = Moments::of_gradient(gx, gy);
            }
            for (x, out) in out_row.iter_mut().enumerate() {
                let mut sum = Moments::default();
                for m in &row_moments[centered_window(x, block_size, width)] {
                    sum += *m;
                }
                *out = sum;
            }
        }
    });
    let horizontal = Grid2::new(width, height, horizontal);

    let mut angles = vec![0.0f32; width * height];
    let mut coherence = vec![0.0f32; width * height];
    for_each_row_band2(
        &mut angles,
        &mut coherence,
        width,
        |first_row, angle_band, coherence_band| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let rows = angle_band.len() / width;
            for local_y in 0..rows {
                let y = first_row + local_y;
                let window = centered_window(y, block_size, height);
                for x in 0..width {
                    let mut sum = Moments::default();
                    for yy in window.clone() {
                        sum += horizontal[(x, yy)];
                    }
                    let (angle, c) = sum.resolve(epsilon);
                    angle_band[local_y * width + x] = angle;
                    coherence_band[local_y * width + x] = c;
                }
            }
        },
    );

    CellGrids {
        angles: Grid2::new(width, height, angles),
        coherence: Grid2::new(width, height, coherence),
    }
}

/// One cell per non-overlapping block.
pub(crate) fn aggregate_blocks(
    gradients: &GradientGrid,
    block_size: usize,
    epsilon: f64,
    cancel: &AtomicBool,
) -> CellGrids {
    let width = gradients.width();
    let height = gradients.height();
    let cells_w = width.div_ceil(block_size);
    let cells_h = height.div_ceil(block_size);

    let mut angles = vec![0.0f32; cells_w * cells_h];
    let mut coherence = vec![0.0f32; cells_w * cells_h];
    for_each_row_band2(
        &mut angles,
        &mut coherence,
        cells_w,
        |first_row, angle_band, coherence_band| {
            if cancel.load(Ordering::Relaxed) {
                return;
            }
            let rows = angle_band.len() / cells_w;
            for local_cy in 0..rows {
                let ys = block_span(first_row + local_cy, block_size, height);
                for cx in 0..cells_w {
                    let xs = block_span(cx, block_size, width);
                    let mut sum = Moments::default();
                    for y in ys.clone() {
                        let gx_row = &gradients.gx().row(y)[xs.clone()];
                        let gy_row = &gradients.gy().row(y)[xs.clone()];
                        for (&gx, &gy) in gx_row.iter().zip(gy_row) {
                            sum += Moments::of_gradient(gx, gy);
                        }
                    }
                    let (angle, c) = sum.resolve(epsilon);
                    angle_band[local_cy * cells_w + cx] = angle;
                    coherence_band[local_cy * cells_w + cx] = c;
                }
            }
        },
    );

    CellGrids {
        angles: Grid2::new(cells_w, cells_h, angles),
        coherence: Grid2::new(cells_w, cells_h, coherence),
    }
}
