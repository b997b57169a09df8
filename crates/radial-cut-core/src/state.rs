//! Interaction state of the editor screen as pure transitions.
//!
//! [`transition`] takes the current [`EditorState`] and an [`Event`] and
//! returns the next state plus the object URLs that became stale. The
//! caller owns the URLs' lifecycle and must revoke every URL listed in
//! [`Transition::revoke`].
//!
//! Invariants kept by every transition:
//! - at most one source (and one source preview URL) is held
//! - at most one result URL is held
//! - a URL leaves the state only through `revoke`

use crate::decode::SourceImage;
use crate::encode::ExportFormat;
use crate::zoom::ZoomFactor;

/// The selected source and the URL its preview is displayed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSource {
    pub image: SourceImage,
    pub preview_url: Option<String>,
}

/// A finished export held by the result view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Object URL of the encoded blob
    pub url: String,
    /// MIME type of the blob
    pub mime_type: String,
    /// Suggested download name, without extension
    pub download_name: String,
}

impl ExportResult {
    /// Download name with the extension of the blob's format, e.g. `me.webp`.
    pub fn file_name(&self) -> String {
        match ExportFormat::from_mime(&self.mime_type) {
            Some(format) => format!("{}.{}", self.download_name, format.extension()),
            None => self.download_name.clone(),
        }
    }
}

/// What the result view shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultView {
    /// Closed
    #[default]
    Hidden,
    /// Open, waiting for the export to finish
    Pending,
    /// Open, showing a finished export
    Ready(ExportResult),
}

impl ResultView {
    pub fn is_visible(&self) -> bool {
        !matches!(self, ResultView::Hidden)
    }

    fn url(&self) -> Option<&str> {
        match self {
            ResultView::Ready(result) => Some(&result.url),
            _ => None,
        }
    }
}

/// Everything the editor screen renders from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    pub source: Option<SelectedSource>,
    pub zoom: ZoomFactor,
    pub result: ResultView,
}

impl EditorState {
    pub fn source_image(&self) -> Option<&SourceImage> {
        self.source.as_ref().map(|s| &s.image)
    }

    /// Export buttons are enabled only with an image selected.
    pub fn can_export(&self) -> bool {
        self.source.is_some()
    }

    pub fn result_url(&self) -> Option<&str> {
        self.result.url()
    }
}

/// A change request from the UI or the export pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A file was picked (or the selection cleared).
    ImageSelected {
        image: Option<SourceImage>,
        preview_url: Option<String>,
    },
    /// The zoom slider moved. The value is already range-checked by the control.
    ZoomChanged(ZoomFactor),
    /// An export started.
    ExportStarted,
    /// The export finished and its blob has a URL.
    ExportSucceeded(ExportResult),
    /// The export was aborted.
    ExportFailed,
    /// The result view was dismissed.
    ResultClosed,
}

/// Outcome of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: EditorState,
    /// URLs dropped from the state that must now be revoked.
    pub revoke: Vec<String>,
}

/// Apply `event` to `state`.
pub fn transition(state: EditorState, event: Event) -> Transition {
    let mut state = state;
    let mut revoke = Vec::new();

    match event {
        Event::ImageSelected { image, preview_url } => {
            if let Some(old) = state.source.take() {
                revoke.extend(old.preview_url);
            }
            revoke.extend(take_result_url(&mut state.result));

            state.source = match image {
                Some(image) => Some(SelectedSource { image, preview_url }),
                None => {
                    revoke.extend(preview_url);
                    None
                }
            };
            state.zoom = ZoomFactor::FIT;
        }
        Event::ZoomChanged(zoom) => {
            state.zoom = zoom;
        }
        Event::ExportStarted => {
            if state.source.is_some() {
                revoke.extend(take_result_url(&mut state.result));
                state.result = ResultView::Pending;
            }
        }
        Event::ExportSucceeded(result) => {
            if state.result == ResultView::Pending {
                state.result = ResultView::Ready(result);
            } else {
                // Nobody is waiting for it any more
                revoke.push(result.url);
            }
        }
        Event::ExportFailed => {
            if state.result == ResultView::Pending {
                state.result = ResultView::Hidden;
            }
        }
        Event::ResultClosed => {
            revoke.extend(take_result_url(&mut state.result));
        }
    }

    Transition { state, revoke }
}

/// Hide the result view, returning the URL it held.
fn take_result_url(result: &mut ResultView) -> Option<String> {
    match std::mem::take(result) {
        ResultView::Ready(done) => Some(done.url),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(name: &str) -> SourceImage {
        SourceImage::new(Some(name.to_string()), "image/png", vec![0; 4])
    }

    fn result(url: &str) -> ExportResult {
        ExportResult {
            url: url.to_string(),
            mime_type: "image/png".to_string(),
            download_name: "a".to_string(),
        }
    }

    #[test]
    fn test_result_file_name() {
        assert_eq!(result("blob:1").file_name(), "a.png");

        let mut jpeg = result("blob:2");
        jpeg.mime_type = "image/jpeg".to_string();
        assert_eq!(jpeg.file_name(), "a.jpg");

        let mut unknown = result("blob:3");
        unknown.mime_type = "application/octet-stream".to_string();
        assert_eq!(unknown.file_name(), "a");
    }

    fn select(state: EditorState, name: &str, url: &str) -> Transition {
        transition(
            state,
            Event::ImageSelected {
                image: Some(source(name)),
                preview_url: Some(url.to_string()),
            },
        )
    }

    fn ready_state() -> EditorState {
        let t = select(EditorState::default(), "a.png", "blob:src-1");
        let t = transition(t.state, Event::ExportStarted);
        transition(t.state, Event::ExportSucceeded(result("blob:out-1"))).state
    }

    #[test]
    fn test_select_resets_zoom() {
        let mut state = EditorState::default();
        state.zoom = ZoomFactor::new(3.0);
        let t = select(state, "a.png", "blob:1");

        assert_eq!(t.state.zoom, ZoomFactor::FIT);
        assert!(t.state.can_export());
        assert!(t.revoke.is_empty());
    }

    #[test]
    fn test_reselect_revokes_previous_preview() {
        let t = select(EditorState::default(), "a.png", "blob:1");
        let t = select(t.state, "b.png", "blob:2");

        assert_eq!(t.revoke, vec!["blob:1".to_string()]);
        assert_eq!(t.state.source_image().unwrap().name(), Some("b.png"));
    }

    #[test]
    fn test_clear_selection() {
        let t = select(EditorState::default(), "a.png", "blob:1");
        let t = transition(
            t.state,
            Event::ImageSelected {
                image: None,
                preview_url: None,
            },
        );
        assert!(!t.state.can_export());
        assert_eq!(t.revoke, vec!["blob:1".to_string()]);
    }

    #[test]
    fn test_zoom_is_stored_as_given() {
        let t = transition(EditorState::default(), Event::ZoomChanged(ZoomFactor::new(4.2)));
        assert_eq!(t.state.zoom.value(), 4.2);
    }

    #[test]
    fn test_export_opens_pending_then_ready() {
        let t = select(EditorState::default(), "a.png", "blob:src");
        let t = transition(t.state, Event::ExportStarted);
        assert_eq!(t.state.result, ResultView::Pending);
        assert!(t.state.result.is_visible());

        let t = transition(t.state, Event::ExportSucceeded(result("blob:out")));
        assert_eq!(t.state.result_url(), Some("blob:out"));
        assert!(t.revoke.is_empty());
    }

    #[test]
    fn test_export_without_source_is_noop() {
        let t = transition(EditorState::default(), Event::ExportStarted);
        assert_eq!(t.state, EditorState::default());
        assert!(t.revoke.is_empty());
    }

    #[test]
    fn test_new_export_supersedes_result() {
        let t = transition(ready_state(), Event::ExportStarted);
        assert_eq!(t.revoke, vec!["blob:out-1".to_string()]);
        assert_eq!(t.state.result, ResultView::Pending);
    }

    #[test]
    fn test_close_revokes_result() {
        let t = transition(ready_state(), Event::ResultClosed);
        assert_eq!(t.revoke, vec!["blob:out-1".to_string()]);
        assert!(!t.state.result.is_visible());

        // Closing twice revokes nothing more
        let t = transition(t.state, Event::ResultClosed);
        assert!(t.revoke.is_empty());
    }

    #[test]
    fn test_select_after_result_revokes_it_once() {
        let t = select(ready_state(), "b.png", "blob:src-2");
        assert_eq!(
            t.revoke,
            vec!["blob:src-1".to_string(), "blob:out-1".to_string()]
        );
        assert_eq!(t.state.result, ResultView::Hidden);

        let t = transition(t.state, Event::ExportStarted);
        assert!(t.revoke.is_empty());
        assert_eq!(t.state.result, ResultView::Pending);
    }

    #[test]
    fn test_late_success_is_revoked() {
        let t = select(EditorState::default(), "a.png", "blob:src");
        let t = transition(t.state, Event::ExportStarted);
        let t = transition(t.state, Event::ResultClosed);
        let t = transition(t.state, Event::ExportSucceeded(result("blob:late")));

        assert_eq!(t.revoke, vec!["blob:late".to_string()]);
        assert_eq!(t.state.result, ResultView::Hidden);
    }

    #[test]
    fn test_failure_hides_pending_view() {
        let t = select(EditorState::default(), "a.png", "blob:src");
        let t = transition(t.state, Event::ExportStarted);
        let t = transition(t.state, Event::ExportFailed);
        assert_eq!(t.state.result, ResultView::Hidden);
        assert!(t.revoke.is_empty());
    }
}
