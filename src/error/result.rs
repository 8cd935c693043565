//! Result type alias for session operations.

use super::session_error::SessionError;

/// Type alias for Results using SessionError.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::error::SessionResult;
///
/// fn deliver(task: &MockTask) -> SessionResult<()> {
///     task.receive_data("chunk")?;
///     task.complete_with_error(None)
/// }
/// ```
pub type SessionResult<T> = Result<T, SessionError>;
