//! Export encoding for the masked canvas.
//!
//! This module provides functionality for:
//! - Resolving the requested MIME type to an [`ExportFormat`]
//! - Listing the export menu entries offered next to the default export
//! - Encoding an RGBA canvas at maximum quality
//!
//! # Alpha handling
//!
//! PNG and WebP keep the transparent corners. JPEG has no alpha channel, so
//! the canvas is composited over a matte colour first (black by default,
//! which is what a browser canvas encoder produces).
//!
//! # Examples
//!
//! ```ignore
//! use radial_cut_core::encode::{encode_canvas, ExportFormat};
//!
//! let format = ExportFormat::resolve(Some("image/webp"), "image/jpeg");
//! let bytes = encode_canvas(&canvas, format, [0, 0, 0]).unwrap();
//! ```

mod encoder;
mod format;

pub use encoder::{encode_canvas, EncodeError, MAX_JPEG_QUALITY};
pub use format::{ExportFormat, MenuEntry};
