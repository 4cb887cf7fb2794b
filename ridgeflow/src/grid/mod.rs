//! Pixel and scalar grids.
//!
//! [`PixelGrid`] is the read-only input contract: anything with a width, a
//! height and a row-major intensity accessor. [`Grid2`] is the owned buffer
//! used for gradients and angles.

mod buffer;
mod view;


pub use buffer::Grid2;
pub use view::{GrayView, PixelGrid};
