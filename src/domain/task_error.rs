//! Terminal errors carried by task completions.
//!
//! These are the errors the simulated stack reports *to the code under test*
//! (a dropped connection, a cancelled request). They are distinct from
//! [`crate::error::SessionError`], which reports misuse of the double itself.

use thiserror::Error;

/// Error domain used by the well-known constructors.
pub const URL_ERROR_DOMAIN: &str = "NSURLErrorDomain";

const CANCELLED: i64 = -999;
const TIMED_OUT: i64 = -1001;
const CANNOT_FIND_HOST: i64 = -1003;
const NOT_CONNECTED: i64 = -1009;
const USER_CANCELLED_AUTHENTICATION: i64 = -1012;

/// Error a task completes with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{domain} ({code}): {description}")]
pub struct TaskError {
    /// Error domain
    pub domain: String,
    /// Domain-specific code
    pub code: i64,
    /// Human-readable description
    pub description: String,
}

impl TaskError {
    /// Create an error in an arbitrary domain.
    pub fn new(domain: impl Into<String>, code: i64, description: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            code,
            description: description.into(),
        }
    }

    /// Create an error in the URL loading domain.
    pub fn url(code: i64, description: impl Into<String>) -> Self {
        Self::new(URL_ERROR_DOMAIN, code, description)
    }

    /// The request was cancelled.
    pub fn cancelled() -> Self {
        Self::url(CANCELLED, "cancelled")
    }

    /// The request timed out.
    pub fn timed_out() -> Self {
        Self::url(TIMED_OUT, "The request timed out.")
    }

    /// The host name could not be resolved.
    pub fn cannot_find_host() -> Self {
        Self::url(CANNOT_FIND_HOST, "A server with the specified hostname could not be found.")
    }

    /// The device is offline.
    pub fn not_connected() -> Self {
        Self::url(NOT_CONNECTED, "The Internet connection appears to be offline.")
    }

    /// Authentication was cancelled by the delegate.
    pub fn user_cancelled_authentication() -> Self {
        Self::url(USER_CANCELLED_AUTHENTICATION, "cancelled")
    }

    /// Check if this is the cancellation error.
    pub fn is_cancelled(&self) -> bool {
        self.domain == URL_ERROR_DOMAIN && self.code == CANCELLED
    }
}
