//! Task trait abstractions.
//!
//! [`SessionTask`] is what production code sees of a task. [`ScriptedTask`]
//! extends it with the calls a test uses to play the role of the network.

use bytes::Bytes;

use crate::domain::{
    AuthChallenge, AuthChallengeResponse, Request, Response, TaskError, TaskId, TaskKind,
    TaskState,
};
use crate::error::SessionResult;

/// A single request/response exchange, as seen by the code under test.
pub trait SessionTask: Send + Sync {
    /// Identifier, unique within the owning session.
    fn task_identifier(&self) -> TaskId;

    /// Kind of task.
    fn kind(&self) -> TaskKind;

    /// The request the task was created for.
    fn original_request(&self) -> &Request;

    /// The most recent response, if any.
    fn response(&self) -> Option<Response>;

    /// Current lifecycle state.
    fn state(&self) -> TaskState;

    /// The terminal error, if the task finished with one.
    fn error(&self) -> Option<TaskError>;

    /// Start the task.
    fn resume(&self) -> SessionResult<()>;

    /// Cancel the task.
    fn cancel(&self) -> SessionResult<()>;
}

/// Test-facing task surface used to script what the network delivers.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::traits::ScriptedTask;
///
/// fn serve<T: ScriptedTask>(task: &T) -> SessionResult<()> {
///     task.receive_response(Response::ok("https://example.com"))?;
///     task.receive_data(Bytes::from_static(b"hello"))?;
///     task.complete_with_error(None)
/// }
/// ```
pub trait ScriptedTask: SessionTask {
    /// Handle to the owning session.
    type Session;

    /// The owning session, if it is still alive.
    fn session(&self) -> Option<Self::Session>;

    /// Canned challenge responses not consumed yet, in consumption order.
    fn authentication_challenge_responses(&self) -> Vec<AuthChallengeResponse>;

    /// Deliver a challenge and return the scripted resolution.
    fn receive_authentication_challenge(
        &self,
        challenge: AuthChallenge,
    ) -> SessionResult<AuthChallengeResponse>;

    /// Deliver response metadata.
    fn receive_response(&self, response: Response) -> SessionResult<()>;

    /// Deliver one chunk of body data.
    fn receive_data(&self, data: Bytes) -> SessionResult<()>;

    /// Finish the task, successfully when `error` is `None`.
    fn complete_with_error(&self, error: Option<TaskError>) -> SessionResult<()>;

    /// Deliver response, data and completion in one call.
    fn complete_with_response(
        &self,
        response: Option<Response>,
        data: Bytes,
        error: Option<TaskError>,
    ) -> SessionResult<()>;
}
