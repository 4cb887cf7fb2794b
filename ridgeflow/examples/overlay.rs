//! Example: Draw the ridge orientation field of a fingerprint image
//!
//! Loads a grayscale image, computes a pixelwise orientation field and writes
//! an overlay with one ridge segment per lattice point.
//!
//! Without an input path a synthetic ridge pattern is used instead.
//!
//! Output:
//! ```text
//! test_output/
//!   orientation_overlay.png
//! ```
//!
//! # Usage
//!
//! ```bash
//! cargo run -p ridgeflow --features image --example overlay -- [INPUT] [OUTPUT]
//! ```

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use common::log_setup::{LogConfig, setup_logging};
use ridgeflow::collaborators::{OverlaySink, PixelSource};
use ridgeflow::overlay::{ImageFileSource, ImageOverlay, OverlayStyle};
use ridgeflow::{OrientationConfig, OrientationEstimator, synthetic};

/// Distance between drawn segments, in pixels.
const SAMPLE_STEP: usize = 12;

/// Window side of the orientation estimate.
const BLOCK_SIZE: usize = 16;

fn main() -> Result<()> {
    setup_logging(&LogConfig::with_level("debug")).context("Failed to set up logging")?;

    let mut args = env::args().skip(1);
    let input = args.next().map(PathBuf::from);
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| common::test_utils::test_output_path("orientation_overlay.png"));

    let estimator = OrientationEstimator::new(OrientationConfig::pixelwise(BLOCK_SIZE))?;
    let mut overlay = ImageOverlay::new(OverlayStyle {
        mark_undefined: true,
        ..OverlayStyle::default()
    });

    let started = Instant::now();
    match input {
        Some(path) => {
            tracing::info!(path = %path.display(), "Loading fingerprint image");
            let image = ImageFileSource::new(path).acquire()?;
            let field = estimator.compute(&image)?;
            tracing::info!(
                defined = field.defined_count(),
                cells = field.width() * field.height(),
                variance = ?field.circular_variance(),
                "Orientation field computed"
            );
            overlay.render(&image, field.sample_vectors(SAMPLE_STEP)?)?;
        }
        None => {
            tracing::info!("No input given, using a synthetic ridge pattern");
            let image = synthetic::parallel_ridges(256, 256, 0.6);
            let field = estimator.compute(&image)?;
            overlay.render(&image, field.sample_vectors(SAMPLE_STEP)?)?;
        }
    }
    tracing::info!(
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "Overlay rendered"
    );

    overlay.save(&output)?;
    Ok(())
}
