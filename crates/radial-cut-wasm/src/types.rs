//! WASM-compatible wrapper types.
//!
//! Conversions between JavaScript values and the core crate's types live
//! here so the bindings stay thin.

use radial_cut_core::{EditorConfig, ExportFormat, ExportedImage, ViewportRect};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// An encoded radial export for JavaScript.
///
/// `bytes()` copies the encoded file into a `Uint8Array`; wrap it in a
/// `Blob` of type `mime_type` to download or display it.
#[wasm_bindgen]
pub struct JsExportedImage {
    bytes: Vec<u8>,
    mime_type: String,
    side: u32,
}

#[wasm_bindgen]
impl JsExportedImage {
    /// MIME type of the encoded bytes
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        self.mime_type.clone()
    }

    /// Side of the square output in pixels
    #[wasm_bindgen(getter)]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.bytes.len()
    }

    /// Returns the encoded file as a Uint8Array (copied).
    pub fn bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }
}

impl JsExportedImage {
    pub(crate) fn from_exported(exported: ExportedImage) -> Self {
        Self {
            mime_type: exported.mime_type().to_string(),
            side: exported.side,
            bytes: exported.bytes,
        }
    }
}

/// One entry of the export menu as handed to JavaScript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct MenuItem {
    pub extension: &'static str,
    pub mime_type: &'static str,
    pub label: String,
    pub hint: Option<&'static str>,
}

pub(crate) fn menu_items() -> Vec<MenuItem> {
    ExportFormat::menu()
        .iter()
        .map(|entry| MenuItem {
            extension: entry.extension,
            mime_type: entry.mime_type,
            label: entry.label(),
            hint: entry.hint,
        })
        .collect()
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

/// Read an optional `{ x, y, width, height }` viewport; `null`/`undefined` mean none.
pub(crate) fn viewport_from_js(value: JsValue) -> Result<Option<ViewportRect>, JsValue> {
    if is_absent(&value) {
        return Ok(None);
    }
    serde_wasm_bindgen::from_value(value)
        .map(Some)
        .map_err(|e| JsValue::from_str(&format!("Invalid viewport: {}", e)))
}

/// Read a (possibly partial) editor config; `null`/`undefined` give the defaults.
pub(crate) fn config_from_js(value: JsValue) -> Result<EditorConfig, JsValue> {
    let config: EditorConfig = if is_absent(&value) {
        EditorConfig::default()
    } else {
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid config: {}", e)))?
    };
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    Ok(config)
}
