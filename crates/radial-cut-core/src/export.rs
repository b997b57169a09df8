//! The radial export pipeline.
//!
//! `SourceImage` + optional `ViewportRect` + target MIME type in, encoded
//! square image with a circular alpha mask out:
//!
//! 1. Decode the source (EXIF orientation applied)
//! 2. Allocate a transparent `S×S` canvas, `S = max(width, height)`
//! 3. Draw the source so the viewport fills the canvas
//! 4. Composite the inscribed circle with destination-in
//! 5. Encode at maximum quality
//!
//! Failures come back as an [`ExportError`]; how to tell the user is up to
//! the caller (see [`ExportError::notice`]).

use image::RgbaImage;
use thiserror::Error;

use crate::decode::{decode_image, DecodeError, DecodedImage, SourceImage};
use crate::encode::{encode_canvas, EncodeError, ExportFormat};
use crate::host::HostError;
use crate::mask::{apply_destination_in, CircularMask};
use crate::transform::{compute_placement, draw_image, square_side, ViewportRect};

/// Largest canvas area (in pixels) the pipeline will allocate.
///
/// Matches the 2^28 pixel cap browsers put on a single canvas.
pub const MAX_CANVAS_AREA: u64 = 1 << 28;

/// Why an export attempt was aborted.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Export was requested with no image selected.
    #[error("No image selected")]
    NoImage,

    /// The drawing surface could not be created.
    #[error("Unable to create a {side}x{side} drawing surface")]
    SurfaceUnavailable { side: u32 },

    /// The source could not be decoded for drawing.
    #[error("Unable to load the image: {0}")]
    Decode(#[from] DecodeError),

    /// The canvas could not be encoded.
    #[error("Unable to encode the canvas: {0}")]
    Encode(#[from] EncodeError),

    /// The host could not hand out an object URL for the result.
    #[error(transparent)]
    Host(#[from] HostError),
}

impl ExportError {
    /// Blocking notice shown to the user.
    pub fn notice(&self) -> &'static str {
        match self {
            ExportError::NoImage => "Invalid image.",
            ExportError::SurfaceUnavailable { .. } => "Invalid canvas.",
            ExportError::Encode(_) | ExportError::Host(_) => {
                "Unable to convert canvas into a blob."
            }
            ExportError::Decode(_) => {
                "An unknown error occurred when trying to load the image into the canvas. \
                 Check the console log for more information."
            }
        }
    }

    /// Whether the error is also reported to the host's diagnostic log.
    ///
    /// Only decode failures escalate; the rest are fully described by the notice.
    pub fn escalates(&self) -> bool {
        matches!(self, ExportError::Decode(_))
    }
}

/// An encoded export, ready to be wrapped in an object URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    /// Encoded file content
    pub bytes: Vec<u8>,
    /// Format the bytes are encoded in
    pub format: ExportFormat,
    /// Side of the square output in pixels
    pub side: u32,
}

impl ExportedImage {
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }
}

/// Run the full export for `source`.
///
/// `mime_type` overrides the source's declared type. `matte` fills the
/// transparent corners for formats without alpha.
pub fn export_radial(
    source: &SourceImage,
    viewport: Option<&ViewportRect>,
    mime_type: Option<&str>,
    matte: [u8; 3],
) -> Result<ExportedImage, ExportError> {
    let image = decode_image(source.bytes())?;
    let canvas = render_radial(&image, viewport)?;
    let format = ExportFormat::resolve(mime_type, source.mime_type());
    let bytes = encode_canvas(&canvas, format, matte)?;

    Ok(ExportedImage {
        bytes,
        format,
        side: canvas.width(),
    })
}

/// Produce the masked square canvas for a decoded image.
pub fn render_radial(
    image: &DecodedImage,
    viewport: Option<&ViewportRect>,
) -> Result<RgbaImage, ExportError> {
    let side = square_side(image.width, image.height);
    let mut canvas = create_surface(side)?;

    let placement = compute_placement(side, image.width, image.height, viewport);
    log::debug!(
        "drawing {}x{} source on {side}x{side} canvas at {:?}",
        image.width,
        image.height,
        placement
    );
    draw_image(&mut canvas, image, &placement);
    apply_destination_in(&mut canvas, &CircularMask::inscribed(side));

    Ok(canvas)
}

/// Allocate a transparent `side×side` RGBA canvas without aborting on OOM.
fn create_surface(side: u32) -> Result<RgbaImage, ExportError> {
    let area = side as u64 * side as u64;
    if side == 0 || area > MAX_CANVAS_AREA {
        return Err(ExportError::SurfaceUnavailable { side });
    }

    let len = (area * 4) as usize;
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| ExportError::SurfaceUnavailable { side })?;
    buffer.resize(len, 0);

    RgbaImage::from_raw(side, side, buffer).ok_or(ExportError::SurfaceUnavailable { side })
}
