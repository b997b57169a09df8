//! Export formats and MIME type resolution.

use serde::{Deserialize, Serialize};

/// Image format of an exported blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExportFormat {
    Jpeg,
    Png,
    WebP,
}

/// One "Generate as ..." entry of the export menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    /// Extension shown to the user (`jpg`, `jpeg`, `png`, `webp`).
    pub extension: &'static str,
    /// MIME type requested when the entry is chosen.
    pub mime_type: &'static str,
    /// Small print under the entry.
    pub hint: Option<&'static str>,
}

impl MenuEntry {
    /// Menu label, e.g. `Generate as .png`.
    pub fn label(&self) -> String {
        format!("Generate as .{}", self.extension)
    }
}

const MENU: [MenuEntry; 4] = [
    MenuEntry {
        extension: "jpg",
        mime_type: "image/jpg",
        hint: None,
    },
    MenuEntry {
        extension: "jpeg",
        mime_type: "image/jpeg",
        hint: None,
    },
    MenuEntry {
        extension: "png",
        mime_type: "image/png",
        hint: Some("The background will be transparent."),
    },
    MenuEntry {
        extension: "webp",
        mime_type: "image/webp",
        hint: Some("This may affect the quality of the final image."),
    },
];

impl ExportFormat {
    /// Parse a MIME type. `image/jpg` is accepted as an alias of JPEG.
    ///
    /// A browser canvas does not recognise `image/jpg` and falls back to PNG;
    /// here it still selects JPEG.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(ExportFormat::Jpeg),
            "image/png" => Some(ExportFormat::Png),
            "image/webp" => Some(ExportFormat::WebP),
            _ => None,
        }
    }

    /// Pick the export format: the requested MIME type if given, else the source's.
    ///
    /// Unknown types fall back to PNG, as a canvas encoder does.
    pub fn resolve(requested: Option<&str>, source_mime: &str) -> Self {
        let mime = requested.unwrap_or(source_mime);
        Self::from_mime(mime).unwrap_or_else(|| {
            log::warn!("unsupported export type {mime:?}, falling back to image/png");
            ExportFormat::Png
        })
    }

    /// Canonical MIME type of the encoded blob.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Png => "image/png",
            ExportFormat::WebP => "image/webp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::WebP => "webp",
        }
    }

    /// Entries of the export menu, in display order.
    pub fn menu() -> &'static [MenuEntry] {
        &MENU
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mime() {
        assert_eq!(ExportFormat::from_mime("image/jpeg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_mime("image/jpg"), Some(ExportFormat::Jpeg));
        assert_eq!(ExportFormat::from_mime("IMAGE/PNG"), Some(ExportFormat::Png));
        assert_eq!(ExportFormat::from_mime(" image/webp "), Some(ExportFormat::WebP));
        assert_eq!(ExportFormat::from_mime("image/gif"), None);
    }

    #[test]
    fn test_resolve_prefers_requested() {
        assert_eq!(
            ExportFormat::resolve(Some("image/webp"), "image/png"),
            ExportFormat::WebP
        );
    }

    #[test]
    fn test_resolve_defaults_to_source() {
        assert_eq!(ExportFormat::resolve(None, "image/jpeg"), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::resolve(None, "image/png"), ExportFormat::Png);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_png() {
        assert_eq!(ExportFormat::resolve(None, "image/gif"), ExportFormat::Png);
        assert_eq!(ExportFormat::resolve(Some(""), "image/jpeg"), ExportFormat::Png);
    }

    #[test]
    fn test_mime_round_trip() {
        for format in [ExportFormat::Jpeg, ExportFormat::Png, ExportFormat::WebP] {
            assert_eq!(ExportFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_menu_order_and_hints() {
        let menu = ExportFormat::menu();
        let exts: Vec<&str> = menu.iter().map(|e| e.extension).collect();
        assert_eq!(exts, ["jpg", "jpeg", "png", "webp"]);
        assert_eq!(menu[2].label(), "Generate as .png");
        assert_eq!(menu[2].hint, Some("The background will be transparent."));
        assert!(menu[0].hint.is_none());
        assert!(menu.iter().all(|e| ExportFormat::from_mime(e.mime_type).is_some()));
    }

    #[test]
    fn test_extension() {
        assert_eq!(ExportFormat::Jpeg.extension(), "jpg");
        assert_eq!(ExportFormat::Png.extension(), "png");
        assert_eq!(ExportFormat::WebP.extension(), "webp");
    }
}
