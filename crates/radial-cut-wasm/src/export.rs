//! Stateless export bindings.
//!
//! [`radial_export`] runs the whole pipeline on a file's bytes without
//! touching any session state, for callers that manage their own UI.
//!
//! # Example
//!
//! ```typescript
//! import { radial_export } from '@radial-cut/wasm';
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const out = radial_export(bytes, file.type, { x: 0, y: 0.2, width: 1, height: 0.6 }, 'image/png');
//! const blob = new Blob([out.bytes()], { type: out.mime_type });
//! ```

use crate::types::{menu_items, viewport_from_js, JsExportedImage};
use radial_cut_core::{export, EditorConfig, SourceImage};
use wasm_bindgen::prelude::*;

/// Export `bytes` as a circle-masked square image.
///
/// # Arguments
///
/// * `bytes` - The file's content
/// * `source_mime` - The file's declared type, used when `target_mime` is absent
/// * `viewport` - `{ x, y, width, height }` normalized to the image, or `null`
/// * `target_mime` - Requested output type; unknown types produce PNG
#[wasm_bindgen]
pub fn radial_export(
    bytes: &[u8],
    source_mime: &str,
    viewport: JsValue,
    target_mime: Option<String>,
) -> Result<JsExportedImage, JsValue> {
    let viewport = viewport_from_js(viewport)?;
    let source = SourceImage::new(None, source_mime, bytes.to_vec());

    export::export_radial(
        &source,
        viewport.as_ref(),
        target_mime.as_deref(),
        EditorConfig::default().matte,
    )
    .map(JsExportedImage::from_exported)
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Value for the file input's `accept` attribute.
#[wasm_bindgen]
pub fn accept_attribute() -> String {
    radial_cut_core::accept_attribute()
}

/// Entries of the "Generate as ..." menu: `{ extension, mime_type, label, hint }[]`.
#[wasm_bindgen]
pub fn export_menu() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&menu_items()).map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use std::io::Cursor;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png(width: u32, height: u32) -> Vec<u8> {
        use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
        let img = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut out, ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[wasm_bindgen_test]
    fn test_export_without_viewport() {
        let out = radial_export(&png(30, 20), "image/png", JsValue::NULL, None).unwrap();
        assert_eq!(out.side(), 30);
        assert_eq!(out.mime_type(), "image/png");
    }

    #[wasm_bindgen_test]
    fn test_export_as_jpeg() {
        let out = radial_export(&png(16, 16), "image/png", JsValue::UNDEFINED, Some("image/jpg".into()))
            .unwrap();
        assert_eq!(out.mime_type(), "image/jpeg");
        assert_eq!(&out.bytes()[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_export_garbage_fails() {
        assert!(radial_export(&[1, 2, 3], "image/png", JsValue::NULL, None).is_err());
    }

    #[wasm_bindgen_test]
    fn test_export_menu() {
        let menu = export_menu().unwrap();
        assert!(js_sys::Array::is_array(&menu));
        assert_eq!(js_sys::Array::from(&menu).length(), 4);
    }
}
