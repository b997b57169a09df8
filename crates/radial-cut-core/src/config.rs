//! Editor configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::zoom::ZoomFactor;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("Invalid zoom range: min ({min}) must be positive and not above max ({max})")]
    ZoomRange { min: f64, max: f64 },

    #[error("Invalid zoom step: {0} (must be positive)")]
    ZoomStep(f64),

    #[error("Editor edge must be non-zero")]
    EditorEdge,
}

/// Tunables of the crop editor and export.
///
/// Deserializes from partial input; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Lower bound of the zoom slider
    pub min_zoom: f64,
    /// Upper bound of the zoom slider
    pub max_zoom: f64,
    /// Zoom slider step
    pub zoom_step: f64,
    /// Background under transparent pixels for formats without alpha
    pub matte: [u8; 3],
    /// Window widths below this use the compact editor
    pub compact_breakpoint: u32,
    /// Editor edge length on compact screens
    pub compact_editor_edge: u32,
    /// Editor edge length otherwise
    pub editor_edge: u32,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_zoom: ZoomFactor::MIN,
            max_zoom: ZoomFactor::MAX,
            zoom_step: ZoomFactor::STEP,
            matte: [0, 0, 0],
            compact_breakpoint: 500,
            compact_editor_edge: 224,
            editor_edge: 384,
        }
    }
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let range_ok = self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom;
        if !range_ok {
            return Err(ConfigError::ZoomRange {
                min: self.min_zoom,
                max: self.max_zoom,
            });
        }
        if self.zoom_step.is_nan() || self.zoom_step <= 0.0 {
            return Err(ConfigError::ZoomStep(self.zoom_step));
        }
        if self.editor_edge == 0 || self.compact_editor_edge == 0 {
            return Err(ConfigError::EditorEdge);
        }
        Ok(())
    }

    /// Edge length of the square crop editor for a given window width.
    pub fn editor_edge_for(&self, window_width: u32) -> u32 {
        if window_width < self.compact_breakpoint {
            self.compact_editor_edge
        } else {
            self.editor_edge
        }
    }

    /// Apply the slider's range and step to a raw value.
    pub fn snap_zoom(&self, value: f64) -> ZoomFactor {
        ZoomFactor::snap(value, self.min_zoom, self.max_zoom, self.zoom_step)
    }
}
