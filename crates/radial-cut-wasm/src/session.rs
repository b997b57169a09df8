//! The editor session exposed to the page.
//!
//! [`RadialCutSession`] owns the interaction state, the crop model the
//! editor renders from and every object URL handed to the page. The page
//! forwards UI events and reads back what to render.

use radial_cut_core::{
    Controller, CropWidget, EditorConfig, ExportError, Host, HostError, PendingExport, ResultView,
    SourceImage, SquareCropModel, PREVIEW_BORDER_RADIUS,
};
use wasm_bindgen::prelude::*;
use web_sys::BlobPropertyBag;

use crate::types::{config_from_js, viewport_from_js};

/// [`Host`] backed by the browser's `URL`, `alert` and `console` APIs.
#[derive(Debug, Default)]
pub(crate) struct BrowserHost;

fn js_error(value: JsValue) -> HostError {
    HostError(format!("{value:?}"))
}

impl Host for BrowserHost {
    fn create_object_url(&mut self, bytes: &[u8], mime_type: &str) -> Result<String, HostError> {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes));

        let opts = BlobPropertyBag::new();
        opts.set_type(mime_type);

        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(js_error)?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(js_error)
    }

    fn revoke_object_url(&mut self, url: &str) {
        let _ = web_sys::Url::revoke_object_url(url);
    }

    fn notify(&mut self, message: &str) {
        match web_sys::window() {
            Some(window) => {
                let _ = window.alert_with_message(message);
            }
            None => web_sys::console::warn_1(&JsValue::from_str(message)),
        }
    }

    fn escalate(&mut self, error: &ExportError) {
        web_sys::console::error_1(&JsValue::from_str(&error.to_string()));
    }

    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }
}

/// One crop editor screen.
///
/// # Example
///
/// ```typescript
/// const session = new RadialCutSession({ max_zoom: 4 });
/// input.accept = accept_attribute();
/// input.onchange = () => {
///   const file = input.files[0];
///   session.select_image(bytes, file.name, file.type);
///   preview.src = session.preview_url;
/// };
/// slider.oninput = () => { slider.value = session.set_zoom(+slider.value); };
///
/// // Show the loader before the export blocks
/// session.begin_export('image/png');
/// renderResultView(session.is_pending);
/// await new Promise(requestAnimationFrame);
/// session.complete_export();
/// ```
#[wasm_bindgen]
pub struct RadialCutSession {
    controller: Controller<BrowserHost>,
    widget: SquareCropModel,
    pending: Option<PendingExport>,
}

#[wasm_bindgen]
impl RadialCutSession {
    /// Create a session from a (partial) config object, or `undefined` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<RadialCutSession, JsValue> {
        let config = config_from_js(config)?;
        Ok(Self::with_config(config))
    }

    /// Select a file. Any previous selection and result are released.
    pub fn select_image(&mut self, bytes: Vec<u8>, name: Option<String>, mime_type: String) {
        self.controller
            .select_image(Some(SourceImage::new(name, mime_type, bytes)));
        self.widget.clear();
        self.widget.set_zoom(self.controller.state().zoom);
    }

    /// Drop the selection (the file input was emptied).
    pub fn clear_image(&mut self) {
        self.controller.select_image(None);
        self.widget.clear();
        self.widget.set_zoom(self.controller.state().zoom);
    }

    /// Tell the crop model the natural size of the loaded preview.
    pub fn layout_image(&mut self, width: u32, height: u32) {
        self.widget.load_image(width, height);
        self.widget.set_zoom(self.controller.state().zoom);
    }

    /// Resize the editor for the current window width; returns the edge length.
    pub fn resize_editor(&mut self, window_width: u32) -> u32 {
        let edge = self.controller.config().editor_edge_for(window_width);
        self.widget.resize(edge, edge);
        edge
    }

    /// Move the zoom slider. Returns the value actually applied.
    pub fn set_zoom(&mut self, value: f64) -> f64 {
        let zoom = self.controller.config().snap_zoom(value);
        self.controller.set_zoom(zoom.value());
        self.widget.set_zoom(zoom);
        zoom.value()
    }

    /// Apply a drag of `(dx, dy)` editor pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.widget.pan_by(dx, dy);
    }

    /// Framed region as `{ x, y, width, height }`, or `null` before layout.
    pub fn viewport(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.widget.viewport())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export the framed region in one call. `mime_type` defaults to the file's type.
    ///
    /// The user has already been notified when this throws.
    pub fn request_export(&mut self, mime_type: Option<String>) -> Result<(), JsValue> {
        self.begin_export(mime_type)?;
        self.complete_export()
    }

    /// Export an explicit viewport instead of the built-in crop model's.
    pub fn request_export_with_viewport(
        &mut self,
        viewport: JsValue,
        mime_type: Option<String>,
    ) -> Result<(), JsValue> {
        self.begin_export_with_viewport(viewport, mime_type)?;
        self.complete_export()
    }

    /// Open the result view as pending, framing the crop model's current region.
    ///
    /// Call `complete_export` once the loader has been painted.
    pub fn begin_export(&mut self, mime_type: Option<String>) -> Result<(), JsValue> {
        let pending = self
            .controller
            .begin_export(&self.widget, mime_type.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.pending = Some(pending);
        Ok(())
    }

    /// Like `begin_export`, with an explicit `{ x, y, width, height }` or `null`.
    pub fn begin_export_with_viewport(
        &mut self,
        viewport: JsValue,
        mime_type: Option<String>,
    ) -> Result<(), JsValue> {
        let viewport = viewport_from_js(viewport)?;
        let pending = self
            .controller
            .begin_export(&viewport, mime_type.as_deref())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.pending = Some(pending);
        Ok(())
    }

    /// Run the export opened by the last `begin_export`. Does nothing if none is open.
    pub fn complete_export(&mut self) -> Result<(), JsValue> {
        let Some(pending) = self.pending.take() else {
            return Ok(());
        };
        self.controller
            .complete_export(pending)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Dismiss the result view.
    pub fn close_result(&mut self) {
        self.controller.close_result();
    }

    #[wasm_bindgen(getter)]
    pub fn preview_url(&self) -> Option<String> {
        self.controller
            .state()
            .source
            .as_ref()
            .and_then(|s| s.preview_url.clone())
    }

    #[wasm_bindgen(getter)]
    pub fn can_export(&self) -> bool {
        self.controller.state().can_export()
    }

    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.controller.state().zoom.value()
    }

    /// Zoom as shown next to the slider, e.g. `150%`.
    #[wasm_bindgen(getter)]
    pub fn zoom_label(&self) -> String {
        self.controller.state().zoom.label()
    }

    #[wasm_bindgen(getter)]
    pub fn is_result_visible(&self) -> bool {
        self.controller.state().result.is_visible()
    }

    #[wasm_bindgen(getter)]
    pub fn is_pending(&self) -> bool {
        matches!(self.controller.state().result, ResultView::Pending)
    }

    #[wasm_bindgen(getter)]
    pub fn result_url(&self) -> Option<String> {
        self.controller.state().result_url().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn result_mime_type(&self) -> Option<String> {
        self.ready().map(|r| r.mime_type.clone())
    }

    /// Name for the result's download link, without extension.
    #[wasm_bindgen(getter)]
    pub fn download_name(&self) -> Option<String> {
        self.ready().map(|r| r.download_name.clone())
    }

    /// Download name including the extension of the result's format.
    #[wasm_bindgen(getter)]
    pub fn download_file_name(&self) -> Option<String> {
        self.ready().map(|r| r.file_name())
    }

    /// Corner radius that renders the preview as a circle.
    #[wasm_bindgen(getter)]
    pub fn preview_border_radius(&self) -> u32 {
        PREVIEW_BORDER_RADIUS
    }
}

impl RadialCutSession {
    fn with_config(config: EditorConfig) -> Self {
        let widget = SquareCropModel::new(config.editor_edge);
        Self {
            controller: Controller::new(BrowserHost, config),
            widget,
            pending: None,
        }
    }

    fn ready(&self) -> Option<&radial_cut_core::ExportResult> {
        match &self.controller.state().result {
            ResultView::Ready(result) => Some(result),
            _ => None,
        }
    }
}
