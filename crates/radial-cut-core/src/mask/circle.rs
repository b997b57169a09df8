//! Inscribed circle mask.

use image::RgbaImage;

/// A filled circle in canvas pixel coordinates.
///
/// # Example
/// ```ignore
/// let mask = CircularMask::inscribed(100);
/// assert_eq!(mask.coverage(50, 50), 1.0); // center
/// assert_eq!(mask.coverage(0, 0), 0.0);   // corner
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularMask {
    /// Center X in canvas pixels
    pub center_x: f64,
    /// Center Y in canvas pixels
    pub center_y: f64,
    /// Radius in canvas pixels
    pub radius: f64,
}

impl CircularMask {
    pub fn new(center_x: f64, center_y: f64, radius: f64) -> Self {
        Self {
            center_x,
            center_y,
            radius: radius.max(0.0),
        }
    }

    /// The circle inscribed in a `side×side` canvas: center `(S/2, S/2)`, radius `S/2`.
    pub fn inscribed(side: u32) -> Self {
        let half = side as f64 / 2.0;
        Self::new(half, half, half)
    }

    /// Distance from the center of pixel `(x, y)` to the circle center.
    #[inline]
    pub fn distance(&self, x: u32, y: u32) -> f64 {
        let dx = x as f64 + 0.5 - self.center_x;
        let dy = y as f64 + 0.5 - self.center_y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Fraction of pixel `(x, y)` covered by the circle (0.0 to 1.0).
    #[inline]
    pub fn coverage(&self, x: u32, y: u32) -> f64 {
        (self.radius - self.distance(x, y)).clamp(0.0, 1.0)
    }
}

/// Composite `mask` onto `canvas` with the destination-in operator.
pub fn apply_destination_in(canvas: &mut RgbaImage, mask: &CircularMask) {
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let coverage = mask.coverage(x, y);
        if coverage >= 1.0 {
            continue;
        }
        pixel.0[3] = (pixel.0[3] as f64 * coverage).round() as u8;
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use image::Rgba;
    use proptest::prelude::*;

    proptest! {
        /// Property: Outside the radius alpha is zero, well inside it is untouched.
        #[test]
        fn prop_mask_alpha_split(side in 4u32..=96, x in 0u32..96, y in 0u32..96) {
            prop_assume!(x < side && y < side);

            let mut canvas = RgbaImage::from_pixel(side, side, Rgba([1, 2, 3, 255]));
            let mask = CircularMask::inscribed(side);
            apply_destination_in(&mut canvas, &mask);

            let d = mask.distance(x, y);
            let alpha = canvas.get_pixel(x, y).0[3];
            if d > mask.radius {
                prop_assert_eq!(alpha, 0);
            }
            if d < mask.radius - 1.0 {
                prop_assert_eq!(alpha, 255);
            }
        }
    }
}
