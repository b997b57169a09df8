//! Viewport rectangle and the canvas placement derived from it.
//!
//! The crop widget reports the framed region as a rectangle normalized to
//! the source image. To make that region fill an `S×S` canvas, the whole
//! source is drawn at `S / width` by `S / height` pixels, shifted so the
//! rectangle's origin lands on the canvas origin.
//!
//! # Example
//!
//! ```ignore
//! // Portrait 1000x1414, widget framing the full width at the top
//! let side = square_side(1000, 1414); // 1414
//! let rect = ViewportRect::new(0.0, 0.0, 1.0, 1000.0 / 1414.0);
//! let placement = compute_placement(side, 1000, 1414, Some(&rect));
//! assert_eq!((placement.width, placement.height), (1414, 1999));
//! ```

use serde::{Deserialize, Serialize};

/// Region of the source image framed by the crop widget.
///
/// All fields are fractions of the source dimensions. A zero `width` or
/// `height` is a caller error: the resulting placement is meaningless but
/// nothing panics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    /// Left edge (fraction of source width, may be negative when zoomed out past the edge)
    pub x: f64,
    /// Top edge (fraction of source height)
    pub y: f64,
    /// Width (fraction of source width)
    pub width: f64,
    /// Height (fraction of source height)
    pub height: f64,
}

impl ViewportRect {
    /// The whole image.
    pub const FULL: ViewportRect = ViewportRect {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Convert a rectangle in source pixels to the normalized form.
    pub fn from_pixels(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        image_width: u32,
        image_height: u32,
    ) -> Self {
        let (iw, ih) = (image_width as f64, image_height as f64);
        Self::new(x / iw, y / ih, width / iw, height / ih)
    }

    /// Whether the rectangle covers a square pixel area of the given source.
    ///
    /// Only non-square rectangles take the independent X/Y scale path.
    pub fn is_square_for(&self, image_width: u32, image_height: u32) -> bool {
        let w = self.width * image_width as f64;
        let h = self.height * image_height as f64;
        (w - h).abs() < 0.5
    }
}

/// Where the whole source image is drawn on the export canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawPlacement {
    /// Canvas X of the source's left edge
    pub x: i64,
    /// Canvas Y of the source's top edge
    pub y: i64,
    /// Drawn width of the full source
    pub width: i64,
    /// Drawn height of the full source
    pub height: i64,
}

impl DrawPlacement {
    /// True when the source is drawn pixel-for-pixel at the origin.
    pub fn is_unscaled(&self, image_width: u32, image_height: u32) -> bool {
        self.x == 0
            && self.y == 0
            && self.width == image_width as i64
            && self.height == image_height as i64
    }
}

/// Side of the square export canvas: the longer source edge.
///
/// A 1000x1414 source yields a 1414x1414 canvas; the longer edge is never
/// downscaled.
pub fn square_side(image_width: u32, image_height: u32) -> u32 {
    image_width.max(image_height)
}

/// Compute the draw rectangle that makes `viewport` fill a `side×side` canvas.
///
/// Without a viewport the source is drawn unscaled at the origin and the
/// rest of the canvas stays transparent.
pub fn compute_placement(
    side: u32,
    image_width: u32,
    image_height: u32,
    viewport: Option<&ViewportRect>,
) -> DrawPlacement {
    let Some(rect) = viewport else {
        return DrawPlacement {
            x: 0,
            y: 0,
            width: image_width as i64,
            height: image_height as i64,
        };
    };

    let s = side as f64;
    let scale_x = s / rect.width;
    let scale_y = s / rect.height;

    DrawPlacement {
        x: round_half_up(-rect.x * scale_x),
        y: round_half_up(-rect.y * scale_y),
        width: round_half_up(scale_x),
        height: round_half_up(scale_y),
    }
}

/// Round to nearest with ties toward positive infinity (`-2.5 -> -2`).
#[inline]
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}


// ============================================================================
// Property-Based Tests
// ============================================================================
