//! Session configuration.

use serde::Deserialize;

/// Configuration for a [`MockSession`](super::MockSession).
///
/// Use the builder pattern to customize behavior.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::adapters::mock::SessionConfig;
///
/// let config = SessionConfig::default()
///     .with_auto_resume(true)
///     .with_synthesized_status(204);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Register tasks already resumed (default: false)
    pub auto_resume: bool,
    /// Deliver a cancellation completion to the delegate on cancel (default: true)
    pub notify_on_cancel: bool,
    /// Status of the response synthesized by `ensure_response` (default: 200)
    pub synthesized_status: u16,
    /// MIME type of the synthesized response (default: none)
    pub synthesized_mime_type: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            auto_resume: false,
            notify_on_cancel: true,
            synthesized_status: 200,
            synthesized_mime_type: None,
        }
    }
}

impl SessionConfig {
    /// Create a new SessionConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set whether new tasks start resumed.
    pub fn with_auto_resume(mut self, auto_resume: bool) -> Self {
        self.auto_resume = auto_resume;
        self
    }

    /// Set whether cancel notifies the delegate.
    pub fn with_notify_on_cancel(mut self, notify: bool) -> Self {
        self.notify_on_cancel = notify;
        self
    }

    /// Set the synthesized response status.
    pub fn with_synthesized_status(mut self, status: u16) -> Self {
        self.synthesized_status = status;
        self
    }

    /// Set the synthesized response MIME type.
    pub fn with_synthesized_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.synthesized_mime_type = Some(mime_type.into());
        self
    }
}
