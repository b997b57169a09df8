//! Radial Cut Core - circular profile picture cropping
//!
//! This crate turns an uploaded photo into a square, circle-masked profile
//! picture: the photo is canonicalized onto an `S×S` canvas, positioned by
//! the crop widget's viewport, masked to the inscribed circle and encoded
//! in the requested format. It also holds the editor's interaction state
//! and the controller that drives it against a [`Host`].

pub mod config;
pub mod controller;
pub mod decode;
pub mod encode;
pub mod export;
pub mod host;
pub mod mask;
pub mod naming;
pub mod state;
pub mod transform;
pub mod widget;
pub mod zoom;

pub use config::{ConfigError, EditorConfig};
pub use controller::{Controller, PendingExport};
pub use decode::{accept_attribute, DecodeError, DecodedImage, SourceImage, ACCEPTED_MIME_TYPES};
pub use encode::{EncodeError, ExportFormat, MenuEntry};
pub use export::{export_radial, render_radial, ExportError, ExportedImage, MAX_CANVAS_AREA};
pub use host::{Host, HostError};
pub use mask::CircularMask;
pub use naming::download_stem;
pub use state::{transition, EditorState, Event, ExportResult, ResultView, Transition};
pub use transform::{compute_placement, square_side, DrawPlacement, ViewportRect};
pub use widget::{CropWidget, SquareCropModel, PREVIEW_BORDER_RADIUS};
pub use zoom::ZoomFactor;
