//! Seams towards image acquisition and overlay rendering.
//!
//! The estimator never decodes files, draws, or names outputs. Callers plug
//! those concerns in through these traits; the `image` feature ships file
//! based implementations in [`crate::overlay`].

use std::convert::Infallible;

use crate::field::{SampleVectors, VectorSample};
use crate::grid::PixelGrid;

/// Supplies the pixel grid for one computation.
pub trait PixelSource {
    type Grid: PixelGrid + Sync;
    type Error: std::error::Error + Send + Sync + 'static;

    fn acquire(&self) -> Result<Self::Grid, Self::Error>;
}

/// Any `Fn() -> Result<G, E>` is a source, handy for in-memory fixtures.
impl<F, G, E> PixelSource for F
where
    F: Fn() -> Result<G, E>,
    G: PixelGrid + Sync,
    E: std::error::Error + Send + Sync + 'static,
{
    type Grid = G;
    type Error = E;

    fn acquire(&self) -> Result<G, E> {
        self()
    }
}

/// Consumes a sample pass over a background image.
pub trait OverlaySink {
    type Error;

    fn render<G: PixelGrid + ?Sized>(
        &mut self,
        background: &G,
        samples: SampleVectors<'_>,
    ) -> Result<(), Self::Error>;
}

/// Collects samples without drawing anything.
impl OverlaySink for Vec<VectorSample> {
    type Error = Infallible;

    fn render<G: PixelGrid + ?Sized>(
        &mut self,
        _background: &G,
        samples: SampleVectors<'_>,
    ) -> Result<(), Infallible> {
        self.extend(samples);
        Ok(())
    }
}
