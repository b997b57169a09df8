//! Capabilities the embedding platform provides to the controller.

use thiserror::Error;

use crate::export::ExportError;

/// Failure reported by the host platform.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Host error: {0}")]
pub struct HostError(pub String);

/// Platform services: object URLs, user notices, diagnostics and a clock.
///
/// Every URL returned by [`Host::create_object_url`] is passed to
/// [`Host::revoke_object_url`] exactly once by the controller.
pub trait Host {
    /// Make `bytes` addressable as a URL of type `mime_type`.
    fn create_object_url(&mut self, bytes: &[u8], mime_type: &str) -> Result<String, HostError>;

    /// Release a URL previously returned by `create_object_url`.
    fn revoke_object_url(&mut self, url: &str);

    /// Show a blocking notice to the user.
    fn notify(&mut self, message: &str);

    /// Report an error to the platform's diagnostic log.
    fn escalate(&mut self, error: &ExportError);

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> u64;
}
