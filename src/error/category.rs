//! Error category classification.
//!
//! Every [`SessionError`](super::SessionError) is a mistake in the test that
//! drives the double; the category says which part of the script is wrong.

use std::fmt;

/// High-level categorization of session errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// An event arrived in an order the task lifecycle does not allow.
    Lifecycle,

    /// The scripted challenge resolutions do not match the challenges issued.
    Script,

    /// A task was looked up that the session never created.
    Registry,
}

impl ErrorCategory {
    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Lifecycle => "lifecycle",
            ErrorCategory::Script => "script",
            ErrorCategory::Registry => "registry",
        }
    }

    /// Returns a suggestion for fixing the test.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Lifecycle => {
                "Resume the task before delivering events and deliver nothing after completion"
            }
            ErrorCategory::Script => {
                "Program one challenge response per challenge the code under test will see"
            }
            ErrorCategory::Registry => "Use an identifier returned by this session",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
