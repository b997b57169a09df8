//! Crop widget interface and a model of the square avatar editor.
//!
//! The export only needs one thing from the widget: the region of the
//! source currently framed, queried on demand. [`SquareCropModel`]
//! reproduces how the pan/zoom avatar editor derives that region from its
//! own size, the image size, the zoom and the pan position.

use crate::transform::ViewportRect;
use crate::zoom::ZoomFactor;

/// Border radius handed to the editor so its preview is drawn as a circle.
pub const PREVIEW_BORDER_RADIUS: u32 = 9999;

/// Anything that can report the framed viewport.
pub trait CropWidget {
    /// Current viewport, or `None` before the widget has an image laid out.
    fn viewport(&self) -> Option<ViewportRect>;
}

/// A fixed answer, for callers that read the viewport from an external widget.
impl CropWidget for Option<ViewportRect> {
    fn viewport(&self) -> Option<ViewportRect> {
        *self
    }
}

/// Pan/zoom state of a rectangular editor showing one image.
///
/// The pan position is the normalized image coordinate under the editor
/// center; `(0.5, 0.5)` centers the image.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareCropModel {
    editor_width: u32,
    editor_height: u32,
    image: Option<(u32, u32)>,
    zoom: ZoomFactor,
    center: (f64, f64),
}

impl SquareCropModel {
    /// A square editor of `edge × edge` pixels.
    pub fn new(edge: u32) -> Self {
        Self::with_size(edge, edge)
    }

    pub fn with_size(editor_width: u32, editor_height: u32) -> Self {
        Self {
            editor_width,
            editor_height,
            image: None,
            zoom: ZoomFactor::FIT,
            center: (0.5, 0.5),
        }
    }

    /// Lay out a newly loaded image: centered, zoom reset to fit.
    pub fn load_image(&mut self, width: u32, height: u32) {
        self.image = (width > 0 && height > 0).then_some((width, height));
        self.zoom = ZoomFactor::FIT;
        self.center = (0.5, 0.5);
    }

    /// Forget the image; the viewport becomes unavailable.
    pub fn clear(&mut self) {
        self.image = None;
        self.center = (0.5, 0.5);
    }

    pub fn set_zoom(&mut self, zoom: ZoomFactor) {
        self.zoom = zoom;
        self.settle();
    }

    pub fn zoom(&self) -> ZoomFactor {
        self.zoom
    }

    /// Resize the editor (e.g. when the window crosses the compact breakpoint).
    pub fn resize(&mut self, editor_width: u32, editor_height: u32) {
        self.editor_width = editor_width;
        self.editor_height = editor_height;
        self.settle();
    }

    /// Move the pan position to a normalized image coordinate.
    pub fn set_position(&mut self, x: f64, y: f64) {
        self.center = (x, y);
        self.settle();
    }

    pub fn position(&self) -> (f64, f64) {
        self.center
    }

    /// Apply a drag of `(dx, dy)` editor pixels; the image follows the pointer.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let (Some(rect), Some((drawn_w, drawn_h))) = (self.viewport(), self.drawn_size()) else {
            return;
        };
        let x = rect.x - dx / drawn_w;
        let y = rect.y - dy / drawn_h;
        self.set_position(x + rect.width / 2.0, y + rect.height / 2.0);
    }

    /// Size of the whole image as drawn in the editor at the current zoom.
    ///
    /// At zoom 1 the image covers the editor along its shorter fit.
    fn drawn_size(&self) -> Option<(f64, f64)> {
        let (iw, ih) = self.image?;
        let (iw, ih) = (iw as f64, ih as f64);
        let cover = (self.editor_width as f64 / iw).max(self.editor_height as f64 / ih);
        let zoom = self.zoom.value();
        Some((iw * cover * zoom, ih * cover * zoom))
    }

    /// Pull the stored pan position back to the center of the clamped viewport.
    fn settle(&mut self) {
        if let Some(rect) = self.viewport() {
            self.center = (rect.x + rect.width / 2.0, rect.y + rect.height / 2.0);
        }
    }
}

impl CropWidget for SquareCropModel {
    fn viewport(&self) -> Option<ViewportRect> {
        let (iw, ih) = self.image?;
        let zoom = self.zoom.value();
        if !zoom.is_finite() || zoom <= 0.0 || self.editor_width == 0 || self.editor_height == 0 {
            return None;
        }

        let editor_aspect = self.editor_width as f64 / self.editor_height as f64;
        let image_aspect = iw as f64 / ih as f64;
        let x_scale = (editor_aspect / image_aspect).min(1.0);
        let y_scale = (image_aspect / editor_aspect).min(1.0);

        let width = x_scale / zoom;
        let height = y_scale / zoom;
        let x = self.center.0 - width / 2.0;
        let y = self.center.1 - height / 2.0;

        // A rect larger than the image may slide until its edge meets the image edge
        let (x_min, x_max, y_min, y_max) = if width > 1.0 || height > 1.0 {
            (-width, 1.0, -height, 1.0)
        } else {
            (0.0, 1.0 - width, 0.0, 1.0 - height)
        };

        if !(x.is_finite() && y.is_finite()) {
            return None;
        }

        Some(ViewportRect::new(
            x.clamp(x_min, x_max),
            y.clamp(y_min, y_max),
            width,
            height,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_image_no_viewport() {
        let model = SquareCropModel::new(384);
        assert_eq!(model.viewport(), None);
    }

    #[test]
    fn test_fixed_viewport_widget() {
        let fixed = Some(ViewportRect::FULL);
        assert_eq!(fixed.viewport(), Some(ViewportRect::FULL));
        assert_eq!(None::<ViewportRect>.viewport(), None);
    }

    #[test]
    fn test_portrait_fit_frames_full_width_centered() {
        let mut model = SquareCropModel::new(384);
        model.load_image(1000, 1414);

        let rect = model.viewport().unwrap();
        assert!(approx(rect.x, 0.0));
        assert!(approx(rect.width, 1.0));
        assert!(approx(rect.height, 1000.0 / 1414.0));
        assert!(approx(rect.y, 0.5 - rect.height / 2.0));
        assert!(rect.is_square_for(1000, 1414));
    }

    #[test]
    fn test_landscape_fit_frames_full_height() {
        let mut model = SquareCropModel::new(224);
        model.load_image(1600, 900);

        let rect = model.viewport().unwrap();
        assert!(approx(rect.height, 1.0));
        assert!(approx(rect.y, 0.0));
        assert!(approx(rect.width, 900.0 / 1600.0));
    }

    #[test]
    fn test_zoom_shrinks_viewport() {
        let mut model = SquareCropModel::new(384);
        model.load_image(500, 500);
        model.set_zoom(ZoomFactor::new(2.0));

        let rect = model.viewport().unwrap();
        assert!(approx(rect.width, 0.5));
        assert!(approx(rect.x, 0.25));
    }

    #[test]
    fn test_position_is_clamped_to_image() {
        let mut model = SquareCropModel::new(384);
        model.load_image(500, 500);
        model.set_zoom(ZoomFactor::new(2.0));
        model.set_position(0.0, 1.0);

        let rect = model.viewport().unwrap();
        assert!(approx(rect.x, 0.0));
        assert!(approx(rect.y, 0.5));
        // Stored position settles on the clamped center
        assert!(approx(model.position().0, 0.25));
        assert!(approx(model.position().1, 0.75));
    }

    #[test]
    fn test_pan_follows_drag() {
        let mut model = SquareCropModel::new(100);
        model.load_image(100, 100);
        model.set_zoom(ZoomFactor::new(2.0));

        // Dragging the image left reveals more of its right side
        model.pan_by(-20.0, 0.0);
        let rect = model.viewport().unwrap();
        assert!(approx(rect.x, 0.25 + 20.0 / 200.0));
        assert!(approx(rect.y, 0.25));
    }

    #[test]
    fn test_load_image_resets_zoom_and_position() {
        let mut model = SquareCropModel::new(100);
        model.load_image(100, 100);
        model.set_zoom(ZoomFactor::new(3.0));
        model.set_position(0.9, 0.9);

        model.load_image(200, 100);
        assert_eq!(model.zoom(), ZoomFactor::FIT);
        assert_eq!(model.position(), (0.5, 0.5));
    }

    #[test]
    fn test_zoom_below_fit_allows_overhang() {
        let mut model = SquareCropModel::new(100);
        model.load_image(100, 100);
        model.set_zoom(ZoomFactor::new(0.5));
        model.set_position(-1.0, -1.0);

        let rect = model.viewport().unwrap();
        assert!(approx(rect.width, 2.0));
        assert!(approx(rect.x, -2.0));
    }

    #[test]
    fn test_invalid_zoom_has_no_viewport() {
        let mut model = SquareCropModel::new(100);
        model.load_image(100, 100);
        model.set_zoom(ZoomFactor::new(0.0));
        assert_eq!(model.viewport(), None);
    }

    #[test]
    fn test_clear() {
        let mut model = SquareCropModel::new(100);
        model.load_image(10, 10);
        model.clear();
        assert_eq!(model.viewport(), None);
    }
}
