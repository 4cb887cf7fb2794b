//! File-backed collaborators built on the `image` crate.
//!
//! [`ImageFileSource`] decodes an image file into an 8-bit grayscale grid and
//! [`ImageOverlay`] draws ridge directions over a copy of the image.


use std::path::{Path, PathBuf};

use glam::Vec2;
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};
use thiserror::Error;

use crate::collaborators::{OverlaySink, PixelSource};
use crate::field::SampleVectors;
use crate::grid::PixelGrid;

/// Colors for overlay images.
pub mod colors {
    use image::Rgb;

    pub const RED: Rgb<u8> = Rgb([255, 50, 50]); // Ridge direction
    pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]); // Undefined cell
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to load image '{path}': {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Nothing has been rendered yet")]
    Empty,
    #[error("Failed to save overlay '{path}': {source}")]
    Save {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl PixelGrid for GrayImage {
    fn width(&self) -> usize {
        self.dimensions().0 as usize
    }

    fn height(&self) -> usize {
        self.dimensions().1 as usize
    }

    #[inline]
    fn intensity(&self, x: usize, y: usize) -> f32 {
        self.get_pixel(x as u32, y as u32).0[0] as f32
    }
}

/// Decodes any format the `image` crate supports, converted to luma.
#[derive(Debug, Clone)]
pub struct ImageFileSource {
    path: PathBuf,
}

impl ImageFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PixelSource for ImageFileSource {
    type Grid = GrayImage;
    type Error = SourceError;

    fn acquire(&self) -> Result<GrayImage, SourceError> {
        let image = image::open(&self.path).map_err(|source| SourceError::Decode {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(
            path = %self.path.display(),
            width = image.width(),
            height = image.height(),
            "Decoded source image"
        );
        Ok(image.into_luma8())
    }
}

/// Drawing parameters for [`ImageOverlay`].
#[derive(Debug, Clone, Copy)]
pub struct OverlayStyle {
    /// Segment length in pixels. `None` uses the sample step.
    pub line_length: Option<f32>,
    pub color: Rgb<u8>,
    /// Draw a cross on undefined samples instead of skipping them.
    pub mark_undefined: bool,
    pub undefined_color: Rgb<u8>,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_length: None,
            color: colors::RED,
            mark_undefined: false,
            undefined_color: colors::YELLOW,
        }
    }
}

/// Renders ridge directions as line segments centered on each sample.
#[derive(Debug, Clone, Default)]
pub struct ImageOverlay {
    style: OverlayStyle,
    canvas: Option<RgbImage>,
}

impl ImageOverlay {
    pub fn new(style: OverlayStyle) -> Self {
        Self {
            style,
            canvas: None,
        }
    }

    pub fn canvas(&self) -> Option<&RgbImage> {
        self.canvas.as_ref()
    }

    pub fn into_canvas(self) -> Option<RgbImage> {
        self.canvas
    }

    /// Writes the last rendered overlay; the format follows the extension.
    pub fn save(&self, path: &Path) -> Result<(), OverlayError> {
        let canvas = self.canvas.as_ref().ok_or(OverlayError::Empty)?;
        canvas.save(path).map_err(|source| OverlayError::Save {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Saved orientation overlay");
        Ok(())
    }
}

impl OverlaySink for ImageOverlay {
    type Error = OverlayError;

    fn render<G: PixelGrid + ?Sized>(
        &mut self,
        background: &G,
        samples: SampleVectors<'_>,
    ) -> Result<(), OverlayError> {
        let mut canvas = gray_to_rgb(background);
        let length = self.style.line_length.unwrap_or(samples.step() as f32);
        let half = 0.5 * length;

        for sample in samples {
            let anchor = canvas_point(sample.position);
            match sample.direction() {
                Some(dir) => {
                    let start = anchor - dir * half;
                    let end = anchor + dir * half;
                    draw_line_segment_mut(
                        &mut canvas,
                        (start.x, start.y),
                        (end.x, end.y),
                        self.style.color,
                    );
                }
                None if self.style.mark_undefined => {
                    draw_cross_mut(
                        &mut canvas,
                        self.style.undefined_color,
                        anchor.x.round() as i32,
                        anchor.y.round() as i32,
                    );
                }
                None => {}
            }
        }

        self.canvas = Some(canvas);
        Ok(())
    }
}

/// Canvas coordinates put pixel `(x, y)` at integer `(x, y)`, half a pixel
/// before the geometric center carried by samples.
#[inline]
fn canvas_point(position: Vec2) -> Vec2 {
    position - Vec2::splat(0.5)
}

/// Grayscale background, intensities linearly stretched to the full range.
fn gray_to_rgb<G: PixelGrid + ?Sized>(image: &G) -> RgbImage {
    let width = image.width();
    let height = image.height();

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for y in 0..height {
        for x in 0..width {
            let v = image.intensity(x, y);
            min = min.min(v);
            max = max.max(v);
        }
    }
    let range = if max > min { max - min } else { 1.0 };

    RgbImage::from_fn(width as u32, height as u32, |x, y| {
        let v = image.intensity(x as usize, y as usize);
        let level = ((v - min) / range * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb([level, level, level])
    })
}
