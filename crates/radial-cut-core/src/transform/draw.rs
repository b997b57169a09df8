//! Scaled source-over draw of a decoded image onto the export canvas.
//!
//! Uses inverse mapping: for each canvas pixel inside the placement
//! rectangle, compute the source coordinate that lands on its center and
//! sample it with bilinear interpolation.
//!
//! ```text
//! src_x = (dst_x + 0.5 - place_x) * src_w / place_w - 0.5
//! src_y = (dst_y + 0.5 - place_y) * src_h / place_h - 0.5
//! ```
//!
//! Interpolation happens on premultiplied values so transparent source
//! pixels do not bleed their colour into neighbours.

use image::{Rgba, RgbaImage};

use super::DrawPlacement;
use crate::decode::DecodedImage;

/// Draw `image` stretched to `placement` onto `canvas`, compositing source-over.
///
/// Canvas pixels outside the placement are left untouched. Parts of the
/// placement that fall outside the canvas are clipped.
pub fn draw_image(canvas: &mut RgbaImage, image: &DecodedImage, placement: &DrawPlacement) {
    if image.is_empty() || placement.width <= 0 || placement.height <= 0 {
        return;
    }

    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let x_start = placement.x.clamp(0, cw) as u32;
    let x_end = placement.x.saturating_add(placement.width).clamp(0, cw) as u32;
    let y_start = placement.y.clamp(0, ch) as u32;
    let y_end = placement.y.saturating_add(placement.height).clamp(0, ch) as u32;

    // Fast path: pixel-for-pixel copy
    if placement.is_unscaled(image.width, image.height) {
        for y in y_start..y_end {
            for x in x_start..x_end {
                blend_over(canvas.get_pixel_mut(x, y), image.pixel(x, y));
            }
        }
        return;
    }

    let scale_x = image.width as f64 / placement.width as f64;
    let scale_y = image.height as f64 / placement.height as f64;
    let origin_x = placement.x as f64;
    let origin_y = placement.y as f64;

    for y in y_start..y_end {
        let src_y = (y as f64 + 0.5 - origin_y) * scale_y - 0.5;
        for x in x_start..x_end {
            let src_x = (x as f64 + 0.5 - origin_x) * scale_x - 0.5;
            let pixel = sample_bilinear(image, src_x, src_y);
            blend_over(canvas.get_pixel_mut(x, y), pixel);
        }
    }
}

/// Get a pixel as premultiplied `[r, g, b, a]` floats in 0..=255.
#[inline]
fn premultiplied(image: &DecodedImage, x: u32, y: u32) -> [f64; 4] {
    let [r, g, b, a] = image.pixel(x, y);
    let alpha = a as f64 / 255.0;
    [
        r as f64 * alpha,
        g as f64 * alpha,
        b as f64 * alpha,
        a as f64,
    ]
}

/// Sample a pixel using bilinear interpolation, clamping to the image edge.
fn sample_bilinear(image: &DecodedImage, x: f64, y: f64) -> [u8; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(image.width - 1);
    let y1 = (y0 + 1).min(image.height - 1);

    // Fractional distances
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = premultiplied(image, x0, y0);
    let p10 = premultiplied(image, x1, y0);
    let p01 = premultiplied(image, x0, y1);
    let p11 = premultiplied(image, x1, y1);

    let mut acc = [0.0f64; 4];
    for i in 0..4 {
        acc[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    let alpha = acc[3];
    if alpha <= 0.0 {
        return [0, 0, 0, 0];
    }

    let unpremultiply = 255.0 / alpha;
    [
        (acc[0] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[1] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        (acc[2] * unpremultiply).clamp(0.0, 255.0).round() as u8,
        alpha.clamp(0.0, 255.0).round() as u8,
    ]
}

/// Straight-alpha source-over: `out = src + dst * (1 - src_a)`.
#[inline]
fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4]) {
    let sa = src[3] as f64 / 255.0;
    if sa >= 1.0 {
        dst.0 = src;
        return;
    }
    if sa <= 0.0 {
        return;
    }

    let da = dst.0[3] as f64 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    for i in 0..3 {
        let c = (src[i] as f64 * sa + dst.0[i] as f64 * da * (1.0 - sa)) / out_a;
        dst.0[i] = c.clamp(0.0, 255.0).round() as u8;
    }
    dst.0[3] = (out_a * 255.0).clamp(0.0, 255.0).round() as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel's red channel encodes its column.
    fn test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x % 256) as u8, (y % 256) as u8, 128, 255]);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    fn placement(x: i64, y: i64, width: i64, height: i64) -> DrawPlacement {
        DrawPlacement {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn test_unscaled_draw_copies_pixels() {
        let img = test_image(10, 20);
        let mut canvas = RgbaImage::new(20, 20);
        draw_image(&mut canvas, &img, &placement(0, 0, 10, 20));

        assert_eq!(canvas.get_pixel(3, 7).0, img.pixel(3, 7));
        // Right half stays transparent
        assert_eq!(canvas.get_pixel(15, 7).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_scaled_draw_fills_placement() {
        let img = DecodedImage::filled(4, 4, [10, 200, 30, 255]);
        let mut canvas = RgbaImage::new(16, 16);
        draw_image(&mut canvas, &img, &placement(0, 0, 16, 16));

        for p in canvas.pixels() {
            assert_eq!(p.0, [10, 200, 30, 255]);
        }
    }

    #[test]
    fn test_offset_draw_clips() {
        let img = test_image(100, 100);
        let mut canvas = RgbaImage::new(50, 50);
        // Show the bottom-right quarter of the image
        draw_image(&mut canvas, &img, &placement(-50, -50, 100, 100));

        assert_eq!(canvas.get_pixel(0, 0).0, img.pixel(50, 50));
        assert_eq!(canvas.get_pixel(49, 49).0, img.pixel(99, 99));
    }

    #[test]
    fn test_upscale_interpolates() {
        // Two columns: black and white
        let img = DecodedImage::new(2, 1, vec![0, 0, 0, 255, 255, 255, 255, 255]);
        let mut canvas = RgbaImage::new(8, 1);
        draw_image(&mut canvas, &img, &placement(0, 0, 8, 1));

        let reds: Vec<u8> = canvas.pixels().map(|p| p.0[0]).collect();
        assert_eq!(reds[0], 0);
        assert_eq!(reds[7], 255);
        assert!(reds.windows(2).all(|w| w[0] <= w[1]), "ramp should be monotonic: {:?}", reds);
    }

    #[test]
    fn test_transparent_neighbours_do_not_bleed() {
        // Opaque red next to transparent green
        let img = DecodedImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 0]);
        let mut canvas = RgbaImage::new(4, 1);
        draw_image(&mut canvas, &img, &placement(0, 0, 4, 1));

        for p in canvas.pixels().filter(|p| p.0[3] > 0) {
            assert_eq!(p.0[1], 0, "green leaked into {:?}", p.0);
        }
    }

    #[test]
    fn test_placement_outside_canvas_is_noop() {
        let img = test_image(10, 10);
        let mut canvas = RgbaImage::new(10, 10);
        draw_image(&mut canvas, &img, &placement(20, 20, 10, 10));
        assert!(canvas.pixels().all(|p| p.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_blend_over_half_alpha_on_opaque() {
        let mut dst = Rgba([0, 0, 255, 255]);
        blend_over(&mut dst, [255, 0, 0, 128]);
        assert_eq!(dst.0[3], 255);
        assert!((dst.0[0] as i32 - 128).abs() <= 1);
        assert!((dst.0[2] as i32 - 127).abs() <= 1);
    }

    #[test]
    fn test_blend_over_on_transparent_keeps_source() {
        let mut dst = Rgba([0, 0, 0, 0]);
        blend_over(&mut dst, [40, 50, 60, 100]);
        assert_eq!(dst.0, [40, 50, 60, 100]);
    }
}
