//! The user-selected source file.

/// MIME types offered by the file picker (accept filter only, not verified).
pub const ACCEPTED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "image/webp"];

/// Value for the file control's `accept` attribute.
pub fn accept_attribute() -> String {
    ACCEPTED_MIME_TYPES.join(",")
}

/// A raster file chosen by the user.
///
/// Holds the undecoded bytes plus what the browser declared about the file.
/// Pixel dimensions are unknown until [`decode_image`](super::decode_image)
/// runs on [`SourceImage::bytes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    name: Option<String>,
    mime_type: String,
    bytes: Vec<u8>,
}

impl SourceImage {
    /// Create a source image from the picked file's name, declared MIME type and content.
    pub fn new(name: Option<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// File name as reported by the file control, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Declared MIME type, used as the default export format.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Raw file content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Whether the declared type is one the picker offers.
    pub fn is_accepted_type(&self) -> bool {
        ACCEPTED_MIME_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&self.mime_type))
    }
}
