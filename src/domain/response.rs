//! Response metadata delivered to a task.

use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// Response metadata, delivered to the delegate before any data.
///
/// The body is not part of the response; it arrives separately as data
/// chunks and accumulates on the task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// URL the response is for
    pub url: String,
    /// HTTP status code
    pub status: u16,
    /// Response headers
    pub headers: Headers,
    /// MIME type, if known
    pub mime_type: Option<String>,
    /// Expected body length, if announced
    pub expected_content_length: Option<u64>,
}

impl Response {
    /// Create a response with a status and no headers.
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
            headers: HashMap::new(),
            mime_type: None,
            expected_content_length: None,
        }
    }

    /// The minimal success response: status 200, empty headers.
    pub fn ok(url: impl Into<String>) -> Self {
        Self::new(url, 200)
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the MIME type.
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Set the expected content length.
    pub fn with_expected_content_length(mut self, length: u64) -> Self {
        self.expected_content_length = Some(length);
        self
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
