//! Convenience re-exports.

pub use crate::collaborators::{OverlaySink, PixelSource};
pub use crate::config::{Granularity, OrientationConfig};
pub use crate::error::{OrientationError, Result};
pub use crate::estimator::OrientationEstimator;
pub use crate::field::{OrientationField, VectorSample};
pub use crate::grid::{GrayView, PixelGrid};
