//! Owner of the editor state.
//!
//! The controller is the only thing that mutates [`EditorState`]. UI
//! handlers call its methods; it applies [`transition`]s, revokes the URLs
//! they drop, runs the export pipeline and reports failures through the
//! [`Host`].
//!
//! Exports come in two steps so the page can show the pending result view
//! before the pipeline blocks: [`Controller::begin_export`] opens the view,
//! [`Controller::complete_export`] renders and publishes.

use crate::config::EditorConfig;
use crate::decode::SourceImage;
use crate::export::{export_radial, ExportError};
use crate::host::Host;
use crate::naming::download_stem;
use crate::state::{transition, EditorState, Event, ExportResult};
use crate::transform::ViewportRect;
use crate::widget::CropWidget;
use crate::zoom::ZoomFactor;

/// An export whose result view is open and pending.
///
/// Holds its own copy of the source and framing, so the result belongs to
/// what was on screen when the export was requested.
#[derive(Debug, Clone)]
pub struct PendingExport {
    source: SourceImage,
    viewport: Option<ViewportRect>,
    mime_type: Option<String>,
}

pub struct Controller<H: Host> {
    state: EditorState,
    config: EditorConfig,
    host: H,
}

impl<H: Host> Controller<H> {
    pub fn new(host: H, config: EditorConfig) -> Self {
        Self {
            state: EditorState::default(),
            config,
            host,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Replace the selected image (or clear it with `None`) and reset zoom.
    ///
    /// Never fails: if the host cannot provide a preview URL the image is
    /// still selected, without a preview.
    pub fn select_image(&mut self, image: Option<SourceImage>) {
        let preview_url = image.as_ref().and_then(|img| {
            if !img.is_accepted_type() {
                log::warn!("selected file has unexpected type {:?}", img.mime_type());
            }
            self.host
                .create_object_url(img.bytes(), img.mime_type())
                .map_err(|e| log::warn!("no preview for selected image: {e}"))
                .ok()
        });

        self.dispatch(Event::ImageSelected { image, preview_url });
    }

    /// Store a zoom value already range-checked by the zoom control.
    pub fn set_zoom(&mut self, value: f64) {
        self.dispatch(Event::ZoomChanged(ZoomFactor::new(value)));
    }

    /// Export the selected image as framed by `widget`, in one step.
    ///
    /// `mime_type` defaults to the source's own type. Failures have already
    /// been shown to the user when this returns `Err`.
    pub fn request_export<W: CropWidget + ?Sized>(
        &mut self,
        widget: &W,
        mime_type: Option<&str>,
    ) -> Result<(), ExportError> {
        let pending = self.begin_export(widget, mime_type)?;
        self.complete_export(pending)
    }

    /// Open the result view in its pending state and capture what to export.
    ///
    /// The view reads the framed region now; the pipeline runs in
    /// [`Controller::complete_export`], after the page has had a chance to
    /// render its loader.
    pub fn begin_export<W: CropWidget + ?Sized>(
        &mut self,
        widget: &W,
        mime_type: Option<&str>,
    ) -> Result<PendingExport, ExportError> {
        let Some(source) = self.state.source_image().cloned() else {
            return Err(self.fail(ExportError::NoImage));
        };

        let pending = PendingExport {
            source,
            viewport: widget.viewport(),
            mime_type: mime_type.map(str::to_owned),
        };
        self.dispatch(Event::ExportStarted);
        Ok(pending)
    }

    /// Render, encode and publish a started export.
    ///
    /// Runs to completion even if the view was closed or the image replaced
    /// meanwhile; the finished URL is then released straight away.
    pub fn complete_export(&mut self, pending: PendingExport) -> Result<(), ExportError> {
        match self.run_export(&pending) {
            Ok(result) => {
                self.dispatch(Event::ExportSucceeded(result));
                Ok(())
            }
            Err(e) => {
                self.dispatch(Event::ExportFailed);
                Err(self.fail(e))
            }
        }
    }

    /// Dismiss the result view, releasing its URL.
    pub fn close_result(&mut self) {
        self.dispatch(Event::ResultClosed);
    }

    fn run_export(&mut self, pending: &PendingExport) -> Result<ExportResult, ExportError> {
        let source = &pending.source;
        let exported = export_radial(
            source,
            pending.viewport.as_ref(),
            pending.mime_type.as_deref(),
            self.config.matte,
        )?;
        let download_name = download_stem(source.name(), self.host.now_millis());

        let url = self
            .host
            .create_object_url(&exported.bytes, exported.mime_type())?;
        log::debug!("export ready: {} {}x{}", exported.mime_type(), exported.side, exported.side);

        Ok(ExportResult {
            url,
            mime_type: exported.mime_type().to_string(),
            download_name,
        })
    }

    /// Tell the user, and escalate the kinds that warrant it.
    fn fail(&mut self, error: ExportError) -> ExportError {
        self.host.notify(error.notice());
        if error.escalates() {
            self.host.escalate(&error);
        }
        error
    }

    fn dispatch(&mut self, event: Event) {
        let step = transition(std::mem::take(&mut self.state), event);
        self.state = step.state;
        for url in step.revoke {
            self.host.revoke_object_url(&url);
        }
    }
}
