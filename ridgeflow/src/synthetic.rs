//! Synthetic ridge patterns for tests, benchmarks and demos.

use std::f32::consts::TAU;

use crate::grid::Grid2;

/// Constant-intensity image.
pub fn uniform(width: usize, height: usize, value: f32) -> Grid2<f32> {
    Grid2::new_filled(width, height, value)
}

/// Parameters of a sinusoidal ridge pattern.
#[derive(Debug, Clone, Copy)]
pub struct RidgePattern {
    /// Ridge direction in image coordinates (+y down), radians.
    pub angle: f32,
    /// Distance between neighboring ridges, in pixels.
    pub wavelength: f32,
    pub mean: f32,
    pub amplitude: f32,
}

impl Default for RidgePattern {
    fn default() -> Self {
        Self {
            angle: 0.0,
            wavelength: 9.0,
            mean: 128.0,
            amplitude: 100.0,
        }
    }
}

impl RidgePattern {
    pub fn at_angle(angle: f32) -> Self {
        Self {
            angle,
            ..Self::default()
        }
    }

    /// Intensity at a continuous position. Constant along `angle`.
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let (sin, cos) = self.angle.sin_cos();
        let across = -x * sin + y * cos;
        self.mean + self.amplitude * (TAU * across / self.wavelength).cos()
    }

    /// Renders the pattern with the rotation centered on the image.
    pub fn render(&self, width: usize, height: usize) -> Grid2<f32> {
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        Grid2::from_fn(width, height, |x, y| {
            self.sample(x as f32 + 0.5 - cx, y as f32 + 0.5 - cy)
        })
    }
}

/// Parallel straight ridges at `angle`, default wavelength and contrast.
pub fn parallel_ridges(width: usize, height: usize, angle: f32) -> Grid2<f32> {
    RidgePattern::at_angle(angle).render(width, height)
}

/// Vertical ridges: intensity varies only along x with the given period.
pub fn vertical_ridges(width: usize, height: usize, period: f32) -> Grid2<f32> {
    Grid2::from_fn(width, height, |x, _| {
        128.0 + 100.0 * (TAU * x as f32 / period).sin()
    })
}
