//! Scripted task state machine.
//!
//! A [`MockTask`] models one request/response exchange. The test plays the
//! network by calling `receive_*` and `complete_*`; each call is checked
//! against the lifecycle, applied under the task's lock, and then forwarded
//! to the session's delegate with the lock released. A re-entrant delivery
//! guard spans both steps, so callbacks for one task never overlap.

use bytes::{Bytes, BytesMut};
use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use serde::de::DeserializeOwned;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use tracing::{debug, trace, warn};

use super::arbiter::AuthChallengeArbiter;
use super::config::SessionConfig;
use super::session::{MockSession, SessionShared};
use crate::domain::{
    AuthChallenge, AuthChallengeResponse, Request, Response, TaskError, TaskEvent, TaskId,
    TaskKind, TaskState,
};
use crate::error::{SessionError, SessionResult};
use crate::traits::{ScriptedTask, SessionTask};

/// A challenge the task received and the scripted answer it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChallenge {
    pub challenge: AuthChallenge,
    pub resolution: AuthChallengeResponse,
}

#[derive(Debug)]
struct TaskInner {
    state: TaskState,
    response: Option<Response>,
    data: BytesMut,
    error: Option<TaskError>,
    arbiter: AuthChallengeArbiter,
    resolved: Vec<ResolvedChallenge>,
}

/// One simulated request/response exchange.
///
/// Tasks are created by a [`MockSession`], which owns them; a task only keeps
/// a weak reference back to its session.
///
/// # Example
///
/// ```ignore
/// let session = MockSession::new();
/// let task = session.register(Request::get("https://example.com/feed"));
///
/// task.resume()?;
/// task.receive_response(Response::ok("https://example.com/feed"))?;
/// task.receive_data("first ")?;
/// task.receive_data("second")?;
/// task.complete_with_error(None)?;
///
/// assert_eq!(task.data(), Bytes::from("first second"));
/// ```
pub struct MockTask {
    id: TaskId,
    kind: TaskKind,
    request: Request,
    config: SessionConfig,
    session: Weak<SessionShared>,
    inner: Mutex<TaskInner>,
    delivery: ReentrantMutex<()>,
}

impl MockTask {
    pub(super) fn new(
        id: TaskId,
        kind: TaskKind,
        request: Request,
        config: SessionConfig,
        session: Weak<SessionShared>,
    ) -> Self {
        let state = if config.auto_resume {
            TaskState::Resumed
        } else {
            TaskState::Created
        };
        Self {
            id,
            kind,
            request,
            config,
            session,
            inner: Mutex::new(TaskInner {
                state,
                response: None,
                data: BytesMut::new(),
                error: None,
                arbiter: AuthChallengeArbiter::new(),
                resolved: Vec::new(),
            }),
            delivery: ReentrantMutex::new(()),
        }
    }

    /// Create a data task owned by `session`.
    pub fn create(request: Request, session: &MockSession) -> Arc<Self> {
        session.register(request)
    }

    pub fn task_identifier(&self) -> TaskId {
        self.id
    }

    pub fn kind(&self) -> TaskKind {
        self.kind
    }

    pub fn original_request(&self) -> &Request {
        &self.request
    }

    pub fn state(&self) -> TaskState {
        self.lock().state
    }

    pub fn response(&self) -> Option<Response> {
        self.lock().response.clone()
    }

    /// Everything received so far, in arrival order.
    pub fn data(&self) -> Bytes {
        Bytes::copy_from_slice(&self.lock().data)
    }

    /// Decode the accumulated data as JSON.
    pub fn data_json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.lock().data)
    }

    pub fn error(&self) -> Option<TaskError> {
        self.lock().error.clone()
    }

    /// The owning session, if it is still alive.
    pub fn session(&self) -> Option<MockSession> {
        self.session.upgrade().map(MockSession::from_shared)
    }

    /// Append one canned response to the challenge script.
    pub fn push_challenge_response(&self, response: AuthChallengeResponse) {
        self.lock().arbiter.push(response);
    }

    /// Append canned responses to the challenge script, in order.
    pub fn program_challenge_responses<I>(&self, responses: I)
    where
        I: IntoIterator<Item = AuthChallengeResponse>,
    {
        self.lock().arbiter.extend(responses);
    }

    /// Canned responses not consumed yet.
    pub fn authentication_challenge_responses(&self) -> Vec<AuthChallengeResponse> {
        self.lock().arbiter.remaining()
    }

    /// Challenges received so far with the resolution each got.
    pub fn resolved_challenges(&self) -> Vec<ResolvedChallenge> {
        self.lock().resolved.clone()
    }

    /// Store a synthesized success response unless one is already set.
    ///
    /// Does not notify the delegate and never touches the data buffer.
    pub fn ensure_response(&self) {
        let mut inner = self.lock();
        self.ensure_response_locked(&mut inner);
    }

    /// Run `action` only while the task is running.
    ///
    /// A finished task yields `EventOnFinishedTask`; a task not resumed yet
    /// yields `InvalidStateTransition`.
    pub fn if_running<R>(&self, action: impl FnOnce(&Self) -> R) -> SessionResult<R> {
        let _delivery = self.deliver();
        self.apply(TaskEvent::ScriptedAction, |_| Ok(()))?;
        Ok(action(self))
    }

    pub fn resume(&self) -> SessionResult<()> {
        self.apply(TaskEvent::Resume, |_| Ok(()))
    }

    /// Deliver response metadata, replacing any earlier or synthesized one.
    pub fn receive_response(&self, response: Response) -> SessionResult<()> {
        let _delivery = self.deliver();
        self.apply(TaskEvent::ReceiveResponse, |inner| {
            inner.response = Some(response.clone());
            Ok(())
        })?;
        self.notify(|session| session.did_receive_response(self, &response));
        Ok(())
    }

    /// Deliver one chunk of data; the delegate sees only this chunk.
    pub fn receive_data(&self, data: impl Into<Bytes>) -> SessionResult<()> {
        let chunk = data.into();
        let _delivery = self.deliver();
        self.apply(TaskEvent::ReceiveData, |inner| {
            self.ensure_response_locked(inner);
            inner.data.extend_from_slice(&chunk);
            Ok(())
        })?;
        self.notify(|session| session.did_receive_data(self, &chunk));
        Ok(())
    }

    /// Deliver a challenge, resolving it with the next scripted response.
    pub fn receive_authentication_challenge(
        &self,
        challenge: AuthChallenge,
    ) -> SessionResult<AuthChallengeResponse> {
        let _delivery = self.deliver();
        let resolution = self.apply(TaskEvent::ReceiveChallenge, |inner| {
            let resolution = inner.arbiter.consume().map_err(|exhausted| {
                SessionError::ChallengeQueueExhausted {
                    task_id: self.id,
                    served: exhausted.served,
                }
            })?;
            inner.resolved.push(ResolvedChallenge {
                challenge: challenge.clone(),
                resolution: resolution.clone(),
            });
            Ok(resolution)
        })?;
        self.notify(|session| {
            session.did_receive_challenge(
                self,
                &challenge,
                resolution.disposition(),
                resolution.credential(),
            )
        });
        Ok(resolution)
    }

    /// Finish the task; `None` means success.
    pub fn complete_with_error(&self, error: Option<TaskError>) -> SessionResult<()> {
        let _delivery = self.deliver();
        self.apply(TaskEvent::Complete, |inner| {
            if error.is_none() {
                self.ensure_response_locked(inner);
            }
            inner.error = error.clone();
            Ok(())
        })?;
        self.notify(|session| session.task_did_complete(self, error.as_ref()));
        Ok(())
    }

    /// Deliver the response (if any), the data (if non-empty) and the
    /// completion, stopping at the first step that fails.
    pub fn complete_with_response(
        &self,
        response: Option<Response>,
        data: impl Into<Bytes>,
        error: Option<TaskError>,
    ) -> SessionResult<()> {
        let _delivery = self.deliver();
        let state = self.state();
        if state.is_terminal() {
            return Err(self.reject(SessionError::EventOnFinishedTask {
                task_id: self.id,
                state,
                event: TaskEvent::Complete,
            }));
        }
        if let Some(response) = response {
            self.receive_response(response)?;
        }
        let data = data.into();
        if !data.is_empty() {
            self.receive_data(data)?;
        }
        self.complete_with_error(error)
    }

    /// Cancel a task that has not finished.
    pub fn cancel(&self) -> SessionResult<()> {
        let error = TaskError::cancelled();
        let _delivery = self.deliver();
        self.apply(TaskEvent::Cancel, |inner| {
            inner.error = Some(error.clone());
            Ok(())
        })?;
        if self.config.notify_on_cancel {
            self.notify(|session| session.task_did_complete(self, Some(&error)));
        }
        Ok(())
    }

    // Check and mutation happen under one lock acquisition; the state only
    // changes if `mutate` succeeds.
    fn apply<R>(
        &self,
        event: TaskEvent,
        mutate: impl FnOnce(&mut TaskInner) -> SessionResult<R>,
    ) -> SessionResult<R> {
        let mut inner = self.lock();
        let from = inner.state;
        let to = self.guard(from, event).map_err(|err| self.reject(err))?;
        let out = mutate(&mut *inner).map_err(|err| self.reject(err))?;
        inner.state = to;
        drop(inner);

        if from != to {
            debug!("Task {}: {} -> {} on {}", self.id, from, to, event);
        }
        Ok(out)
    }

    fn guard(&self, from: TaskState, event: TaskEvent) -> SessionResult<TaskState> {
        if from.is_terminal() {
            return Err(match event {
                TaskEvent::Complete => SessionError::DoubleCompletion {
                    task_id: self.id,
                    state: from,
                },
                TaskEvent::Resume | TaskEvent::Cancel => SessionError::InvalidStateTransition {
                    task_id: self.id,
                    from,
                    event,
                },
                _ => SessionError::EventOnFinishedTask {
                    task_id: self.id,
                    state: from,
                    event,
                },
            });
        }
        from.next(event).ok_or(SessionError::InvalidStateTransition {
            task_id: self.id,
            from,
            event,
        })
    }

    fn reject(&self, err: SessionError) -> SessionError {
        warn!("Task {} rejected event: {} [{}]", self.id, err, err.error_code());
        err
    }

    fn ensure_response_locked(&self, inner: &mut TaskInner) {
        if inner.response.is_some() {
            return;
        }
        let mut response = Response::new(self.request.url.clone(), self.config.synthesized_status);
        response.mime_type = self.config.synthesized_mime_type.clone();
        debug!("Task {}: synthesized {} response", self.id, response.status);
        inner.response = Some(response);
    }

    fn notify(&self, deliver: impl FnOnce(&MockSession)) {
        match self.session() {
            Some(session) => deliver(&session),
            None => trace!("Task {} outlived its session; event dropped", self.id),
        }
    }

    // Held from the state check until the delegate returns.
    fn deliver(&self) -> ReentrantMutexGuard<'_, ()> {
        self.delivery.lock()
    }

    fn lock(&self) -> MutexGuard<'_, TaskInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for MockTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTask")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("url", &self.request.url)
            .field("state", &self.state())
            .finish()
    }
}

impl SessionTask for MockTask {
    fn task_identifier(&self) -> TaskId {
        self.id
    }

    fn kind(&self) -> TaskKind {
        self.kind
    }

    fn original_request(&self) -> &Request {
        &self.request
    }

    fn response(&self) -> Option<Response> {
        MockTask::response(self)
    }

    fn state(&self) -> TaskState {
        MockTask::state(self)
    }

    fn error(&self) -> Option<TaskError> {
        MockTask::error(self)
    }

    fn resume(&self) -> SessionResult<()> {
        MockTask::resume(self)
    }

    fn cancel(&self) -> SessionResult<()> {
        MockTask::cancel(self)
    }
}

impl ScriptedTask for MockTask {
    type Session = MockSession;

    fn session(&self) -> Option<MockSession> {
        MockTask::session(self)
    }

    fn authentication_challenge_responses(&self) -> Vec<AuthChallengeResponse> {
        MockTask::authentication_challenge_responses(self)
    }

    fn receive_authentication_challenge(
        &self,
        challenge: AuthChallenge,
    ) -> SessionResult<AuthChallengeResponse> {
        MockTask::receive_authentication_challenge(self, challenge)
    }

    fn receive_response(&self, response: Response) -> SessionResult<()> {
        MockTask::receive_response(self, response)
    }

    fn receive_data(&self, data: Bytes) -> SessionResult<()> {
        MockTask::receive_data(self, data)
    }

    fn complete_with_error(&self, error: Option<TaskError>) -> SessionResult<()> {
        MockTask::complete_with_error(self, error)
    }

    fn complete_with_response(
        &self,
        response: Option<Response>,
        data: Bytes,
        error: Option<TaskError>,
    ) -> SessionResult<()> {
        MockTask::complete_with_response(self, response, data, error)
    }
}
