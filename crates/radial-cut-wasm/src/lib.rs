//! Radial Cut WASM - WebAssembly bindings for Radial Cut
//!
//! This crate exposes radial-cut-core to the browser page that hosts the
//! crop editor.
//!
//! # Module Structure
//!
//! - `export` - Stateless radial export of a file's bytes
//! - `logger` - `log` output to the browser console
//! - `session` - The editor session: selection, zoom, pan, export and result URLs
//! - `types` - WASM-compatible wrapper types and JS value conversions
//!
//! # Usage
//!
//! ```typescript
//! import init, { RadialCutSession } from '@radial-cut/wasm';
//!
//! await init();
//!
//! const session = new RadialCutSession(undefined);
//! session.select_image(new Uint8Array(await file.arrayBuffer()), file.name, file.type);
//! session.layout_image(img.naturalWidth, img.naturalHeight);
//! session.begin_export('image/png');   // result view shows its loader
//! await new Promise(requestAnimationFrame);
//! session.complete_export();
//! link.href = session.result_url;
//! link.download = session.download_file_name;
//! ```

use wasm_bindgen::prelude::*;

mod export;
mod logger;
mod session;
mod types;

pub use export::{accept_attribute, export_menu, radial_export};
pub use session::RadialCutSession;
pub use types::JsExportedImage;

/// Initialize the WASM module (called automatically on load)
///
/// Panics and core log lines (`warn` and above; `debug` in debug builds)
/// go to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    logger::init(level);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
