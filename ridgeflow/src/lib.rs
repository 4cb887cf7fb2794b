//! Ridgeflow - dense ridge-orientation fields for fingerprint images.
//!
//! The pipeline turns an intensity grid into a grid of ridge angles:
//! - 3×3 Sobel or Scharr gradients with clamp-to-edge borders
//! - doubled-angle aggregation over a block window, per pixel or per block
//! - an immutable [`OrientationField`] with point queries and lazy export
//!   samples for overlay rendering
//!
//! Angles live in `[0, π)`; flat or isotropic windows are reported as
//! undefined (`None`), never as errors.
//!
//! # Quick Start
//!
//! ```rust
//! use ridgeflow::{OrientationConfig, OrientationEstimator, synthetic};
//!
//! let image = synthetic::parallel_ridges(64, 64, 0.5);
//! let estimator = OrientationEstimator::new(OrientationConfig::pixelwise(16))?;
//! let field = estimator.compute(&image)?;
//!
//! let angle = field.orientation(32, 32)?.expect("textured image");
//! assert!((angle - 0.5).abs() < 0.05);
//!
//! for sample in field.sample_vectors(16)? {
//!     let _ = (sample.position, sample.angle);
//! }
//! # Ok::<(), ridgeflow::OrientationError>(())
//! ```

pub mod angle;
pub mod collaborators;
pub mod config;
mod error;
pub mod estimator;
pub mod field;
pub mod gradient;
pub mod grid;
#[cfg(feature = "image")]
pub mod overlay;
pub mod synthetic;

pub mod prelude;

// ============================================================================
// Core types
// ============================================================================

pub use error::{ErrorKind, OrientationError, Result};
pub use grid::{GrayView, Grid2, PixelGrid};

// ============================================================================
// Configuration
// ============================================================================

pub use config::{GradientOperator, Granularity, OrientationConfig};

// ============================================================================
// Pipeline
// ============================================================================

pub use estimator::{Moments, OrientationEstimator, Stage};
pub use field::{OrientationField, SampleVectors, VectorSample};
pub use gradient::{GradientComputer, GradientGrid};

// ============================================================================
// Collaborators
// ============================================================================

pub use collaborators::{OverlaySink, PixelSource};
#[cfg(feature = "image")]
pub use overlay::{ImageFileSource, ImageOverlay, OverlayError, OverlayStyle, SourceError};
