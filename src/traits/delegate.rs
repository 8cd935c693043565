//! Delegate trait abstraction.
//!
//! Every callback is optional: a delegate implements the ones it cares about
//! and reports them through [`SessionDelegate::responds_to`]. Events for
//! capabilities it does not report are dropped without error.

use bytes::Bytes;
use std::fmt;

use super::task::SessionTask;
use crate::domain::{AuthChallenge, Credential, Disposition, Response, TaskError};

/// One optional delegate callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelegateCapability {
    DidReceiveResponse,
    DidReceiveData,
    TaskDidComplete,
    DidReceiveChallenge,
}

impl DelegateCapability {
    /// All capabilities, in lifecycle order.
    pub const ALL: [DelegateCapability; 4] = [
        DelegateCapability::DidReceiveResponse,
        DelegateCapability::DidReceiveData,
        DelegateCapability::TaskDidComplete,
        DelegateCapability::DidReceiveChallenge,
    ];

    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            DelegateCapability::DidReceiveResponse => "did-receive-response",
            DelegateCapability::DidReceiveData => "did-receive-data",
            DelegateCapability::TaskDidComplete => "task-did-complete",
            DelegateCapability::DidReceiveChallenge => "did-receive-challenge",
        }
    }
}

impl fmt::Display for DelegateCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Receiver of task lifecycle events.
///
/// This is the object the code under test registers with the session.
/// Callbacks run synchronously on the thread that delivered the event and
/// after the task's state has been updated, so a callback may query the task.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::traits::{SessionDelegate, SessionTask};
///
/// struct Collector(Mutex<Vec<u8>>);
///
/// impl SessionDelegate for Collector {
///     fn did_receive_data(&self, _task: &dyn SessionTask, data: &Bytes) {
///         self.0.lock().unwrap().extend_from_slice(data);
///     }
/// }
/// ```
pub trait SessionDelegate: Send + Sync {
    /// Whether this delegate implements `capability`.
    ///
    /// Defaults to `true`; unimplemented callbacks are no-ops anyway.
    fn responds_to(&self, capability: DelegateCapability) -> bool {
        let _ = capability;
        true
    }

    /// Response metadata arrived.
    fn did_receive_response(&self, _task: &dyn SessionTask, _response: &Response) {}

    /// One chunk of body data arrived.
    fn did_receive_data(&self, _task: &dyn SessionTask, _data: &Bytes) {}

    /// The task finished, with `None` on success.
    fn task_did_complete(&self, _task: &dyn SessionTask, _error: Option<&TaskError>) {}

    /// A challenge was resolved with the scripted disposition and credential.
    fn did_receive_challenge(
        &self,
        _task: &dyn SessionTask,
        _challenge: &AuthChallenge,
        _disposition: Disposition,
        _credential: Option<&Credential>,
    ) {
    }
}
