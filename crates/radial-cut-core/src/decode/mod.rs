//! Source image intake and decoding.
//!
//! This module provides functionality for:
//! - Holding the user-selected file ([`SourceImage`]) with its declared MIME type
//! - Decoding JPEG, PNG and WebP bytes to RGBA pixels
//! - Applying EXIF orientation the way the browser does for `<img>` decoding
//!
//! # Architecture
//!
//! Pixel dimensions of a source are only known after decoding. Decoding is
//! deferred until an export is requested, so selecting a file never fails.
//!
//! # Examples
//!
//! ```ignore
//! use radial_cut_core::decode::{decode_image, SourceImage};
//!
//! let source = SourceImage::new(Some("me.png".into()), "image/png", bytes);
//! let image = decode_image(source.bytes()).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod source;
mod types;

pub use reader::decode_image;
pub use source::{accept_attribute, SourceImage, ACCEPTED_MIME_TYPES};
pub use types::{DecodeError, DecodedImage, Orientation};
