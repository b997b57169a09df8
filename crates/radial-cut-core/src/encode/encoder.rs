//! Canvas encoding for export.
//!
//! Uses the `image` crate's encoders. Every format is written at the best
//! quality the encoder offers: JPEG at quality 100, WebP lossless, PNG
//! (always lossless).

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use std::io::Cursor;
use thiserror::Error;

use super::ExportFormat;

/// JPEG quality used for export.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Errors that can occur during canvas encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the image
    #[error("{format:?} encoding failed: {reason}")]
    EncodingFailed { format: ExportFormat, reason: String },

    /// The encoder finished without producing any bytes
    #[error("{0:?} encoder produced no data")]
    EmptyOutput(ExportFormat),
}

/// Encode an RGBA canvas to `format`.
///
/// `matte` is the background composited under transparent pixels for
/// formats without alpha.
///
/// # Example
///
/// ```
/// use image::RgbaImage;
/// use radial_cut_core::encode::{encode_canvas, ExportFormat};
///
/// let canvas = RgbaImage::new(8, 8);
/// let png = encode_canvas(&canvas, ExportFormat::Png, [0, 0, 0]).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_canvas(
    canvas: &RgbaImage,
    format: ExportFormat,
    matte: [u8; 3],
) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = canvas.dimensions();
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let mut buffer = Cursor::new(Vec::new());
    let failed = |e: image::ImageError| EncodeError::EncodingFailed {
        format,
        reason: e.to_string(),
    };

    match format {
        ExportFormat::Jpeg => {
            let rgb = flatten_onto(canvas, matte);
            JpegEncoder::new_with_quality(&mut buffer, MAX_JPEG_QUALITY)
                .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
                .map_err(failed)?;
        }
        ExportFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
        ExportFormat::WebP => {
            WebPEncoder::new_lossless(&mut buffer)
                .write_image(canvas.as_raw(), width, height, ExtendedColorType::Rgba8)
                .map_err(failed)?;
        }
    }

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput(format));
    }

    log::debug!("encoded {}x{} canvas as {} ({} bytes)", width, height, format.mime_type(), bytes.len());
    Ok(bytes)
}

/// Composite straight-alpha RGBA over an opaque matte, producing packed RGB.
fn flatten_onto(canvas: &RgbaImage, matte: [u8; 3]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(canvas.as_raw().len() / 4 * 3);
    for pixel in canvas.pixels() {
        let alpha = pixel.0[3] as u32;
        for i in 0..3 {
            let c = pixel.0[i] as u32 * alpha + matte[i] as u32 * (255 - alpha);
            rgb.push(((c + 127) / 255) as u8);
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn canvas(side: u32) -> RgbaImage {
        let mut img = RgbaImage::from_pixel(side, side, Rgba([200, 100, 50, 255]));
        img.put_pixel(0, 0, Rgba([200, 100, 50, 0]));
        img
    }

    #[test]
    fn test_encode_png_magic_and_alpha() {
        let bytes = encode_canvas(&canvas(10), ExportFormat::Png, [0, 0, 0]).unwrap();
        assert_eq!(&bytes[0..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded.get_pixel(5, 5).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let bytes = encode_canvas(&canvas(16), ExportFormat::Jpeg, [0, 0, 0]).unwrap();
        assert_eq!(&bytes[0..2], &[0xFF, 0xD8]);
        let len = bytes.len();
        assert_eq!(&bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_webp_container_and_alpha() {
        let bytes = encode_canvas(&canvas(10), ExportFormat::WebP, [0, 0, 0]).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        // Lossless: pixels survive exactly
        let decoded = image::load_from_memory(&bytes).unwrap().into_rgba8();
        assert_eq!(decoded.get_pixel(0, 0).0[3], 0);
        assert_eq!(decoded.get_pixel(3, 3).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_zero_dimensions() {
        let empty = RgbaImage::new(0, 5);
        let result = encode_canvas(&empty, ExportFormat::Png, [0, 0, 0]);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_flatten_onto_matte() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 0]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 255]));

        let rgb = flatten_onto(&img, [255, 255, 255]);
        assert_eq!(rgb, vec![255, 255, 255, 10, 20, 30]);
    }

    #[test]
    fn test_flatten_half_alpha() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([255, 0, 0, 128]));
        let rgb = flatten_onto(&img, [0, 0, 0]);
        assert_eq!(rgb, vec![128, 0, 0]);
    }

    #[test]
    fn test_encode_error_display() {
        let err = EncodeError::EmptyOutput(ExportFormat::WebP);
        assert_eq!(err.to_string(), "WebP encoder produced no data");
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
