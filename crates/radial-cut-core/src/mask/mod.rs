//! Circular alpha masking of the export canvas.
//!
//! ## Algorithm
//!
//! The mask is composited with the destination-in operator: existing canvas
//! content is kept only where the mask shape is drawn. Per pixel,
//! `out_alpha = dst_alpha * coverage`, colour channels are untouched.
//!
//! Coverage is evaluated at the pixel center `(x + 0.5, y + 0.5)`. Pixels
//! whose center is at or beyond the radius become fully transparent; the
//! one-pixel band just inside the radius is anti-aliased.

mod circle;

pub use circle::{apply_destination_in, CircularMask};
