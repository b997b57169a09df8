//! Zoom factor of the crop widget.

use serde::{Deserialize, Serialize};

/// Magnification of the crop preview, 1.0 = image fits the editor.
///
/// The value is stored as given; range and step are enforced by the zoom
/// control through [`ZoomFactor::snap`] before a change is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomFactor(f64);

impl ZoomFactor {
    /// Smallest zoom (fit, 100%)
    pub const MIN: f64 = 1.0;
    /// Largest zoom (500%)
    pub const MAX: f64 = 5.0;
    /// Slider step
    pub const STEP: f64 = 0.01;
    /// Zoom applied when a new image is selected.
    pub const FIT: ZoomFactor = ZoomFactor(Self::MIN);

    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Clamp `value` to `[min, max]` and quantize it to `step` increments from `min`.
    pub fn snap(value: f64, min: f64, max: f64, step: f64) -> Self {
        if !value.is_finite() {
            return Self(min);
        }
        let clamped = value.clamp(min, max);
        let steps = ((clamped - min) / step).round();
        Self((min + steps * step).clamp(min, max))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// Percentage label shown on the slider, e.g. `250%`.
    pub fn label(self) -> String {
        format!("{}%", (self.0 * 100.0 + 0.5).floor() as i64)
    }
}

impl Default for ZoomFactor {
    fn default() -> Self {
        Self::FIT
    }
}
