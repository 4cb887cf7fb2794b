//! Doubled-angle orientation estimation.
//!
//! A computation runs `Uncomputed → GradientsComputed → OrientationsComputed
//! → Ready`. Any failure drops the intermediate buffers and returns the
//! error; nothing partial is ever handed out.

mod aggregate;
mod moments;


use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

pub use moments::Moments;

use crate::config::{Granularity, OrientationConfig};
use crate::error::{OrientationError, Result};
use crate::field::OrientationField;
use crate::gradient::{GradientComputer, GradientGrid};
use crate::grid::PixelGrid;

/// Progress of one field computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uncomputed,
    GradientsComputed,
    OrientationsComputed,
    Ready,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Uncomputed => "uncomputed",
            Stage::GradientsComputed => "gradients computed",
            Stage::OrientationsComputed => "orientations computed",
            Stage::Ready => "ready",
        };
        f.write_str(name)
    }
}

/// Builds [`OrientationField`]s from images or precomputed gradients.
///
/// ```
/// use ridgeflow::{OrientationConfig, OrientationEstimator, synthetic};
///
/// let image = synthetic::vertical_ridges(32, 32, 8.0);
/// let estimator = OrientationEstimator::new(OrientationConfig::blockwise(8)).unwrap();
/// let field = estimator.compute(&image).unwrap();
///
/// let angle = field.orientation(16, 16).unwrap().unwrap();
/// assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    config: OrientationConfig,
    gradients: GradientComputer,
}

impl OrientationEstimator {
    pub fn new(config: OrientationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            gradients: GradientComputer::new(config.operator),
        })
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    pub fn compute<G: PixelGrid + Sync + ?Sized>(&self, image: &G) -> Result<OrientationField> {
        let never = AtomicBool::new(false);
        self.compute_cancellable(image, &never)
    }

    /// Runs the whole pipeline. Workers poll `cancel` once per row band;
    /// once it is raised the remaining bands are skipped and `Cancelled` is
    /// returned.
    pub fn compute_cancellable<G: PixelGrid + Sync + ?Sized>(
        &self,
        image: &G,
        cancel: &AtomicBool,
    ) -> Result<OrientationField> {
        self.config.validate()?;
        let started = Instant::now();
        tracing::debug!(
            width = image.width(),
            height = image.height(),
            block_size = self.config.block_size,
            granularity = ?self.config.granularity,
            stage = %Stage::Uncomputed,
            "Orientation field requested"
        );

        let gradients = self.gradients.compute_cancellable(image, cancel)?;
        tracing::debug!(
            stage = %Stage::GradientsComputed,
            operator = ?self.gradients.operator(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "Gradients computed"
        );

        let field = self.estimate_cancellable(&gradients, cancel)?;
        tracing::debug!(
            stage = %Stage::Ready,
            cells = field.width() * field.height(),
            defined = field.defined_count(),
            elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
            "Orientation field ready"
        );
        Ok(field)
    }

    /// Aggregation only, for callers that bring their own gradients.
    pub fn estimate(&self, gradients: &GradientGrid) -> Result<OrientationField> {
        let never = AtomicBool::new(false);
        self.estimate_cancellable(gradients, &never)
    }

    pub fn estimate_cancellable(
        &self,
        gradients: &GradientGrid,
        cancel: &AtomicBool,
    ) -> Result<OrientationField> {
        self.config.validate()?;
        let width = gradients.width();
        let height = gradients.height();
        if width <= GradientComputer::KERNEL_RADIUS || height <= GradientComputer::KERNEL_RADIUS {
            return Err(OrientationError::ImageTooSmall {
                width,
                height,
                min: GradientComputer::KERNEL_RADIUS,
            });
        }

        let OrientationConfig {
            block_size,
            granularity,
            epsilon,
            ..
        } = self.config;
        let cells = match granularity {
            Granularity::Pixel => aggregate::aggregate_pixels(gradients, block_size, epsilon, cancel),
            Granularity::Block => aggregate::aggregate_blocks(gradients, block_size, epsilon, cancel),
        };
        if cancel.load(Ordering::Relaxed) {
            return Err(OrientationError::Cancelled);
        }
        tracing::debug!(
            stage = %Stage::OrientationsComputed,
            cells_w = cells.angles.width(),
            cells_h = cells.angles.height(),
            "Orientations aggregated"
        );

        Ok(OrientationField::from_cells(
            width,
            height,
            block_size,
            granularity,
            cells.angles,
            cells.coherence,
        ))
    }
}
