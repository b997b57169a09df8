//! Geometry of the radial export: viewport, square canvas, and scaled draw.
//!
//! # Transform Order
//!
//! 1. Square canonicalization: the canvas side is the longer source edge
//! 2. Viewport mapping: compute where the whole source lands on the canvas
//! 3. Draw: resample the source into that rectangle (source-over)
//!
//! # Coordinate System
//!
//! - Viewport rectangles are normalized (0.0 to 1.0) relative to the source
//! - Draw placements are integer canvas pixels, origin top-left
//! - Placements may extend past the canvas on any side

mod draw;
mod viewport;

pub use draw::draw_image;
pub use viewport::{compute_placement, square_side, DrawPlacement, ViewportRect};
