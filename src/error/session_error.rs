//! Errors returned to the test when it drives a task incorrectly.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::domain::{TaskEvent, TaskId, TaskState};

/// Misuse of the session double.
///
/// Each variant is fatal to the offending call only; the task and every other
/// task in the session keep their state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// Completion requested for a task that already completed or was canceled.
    #[error("task {task_id} is already {state}; completion was delivered twice")]
    DoubleCompletion { task_id: TaskId, state: TaskState },

    /// A challenge arrived with no canned response left.
    #[error("task {task_id} has no challenge response left after serving {served}")]
    ChallengeQueueExhausted { task_id: TaskId, served: usize },

    /// An event was delivered to a completed or canceled task.
    #[error("task {task_id} is {state}; {event} is not accepted")]
    EventOnFinishedTask {
        task_id: TaskId,
        state: TaskState,
        event: TaskEvent,
    },

    /// An event that violates the lifecycle order.
    #[error("task {task_id} cannot {event} while {from}")]
    InvalidStateTransition {
        task_id: TaskId,
        from: TaskState,
        event: TaskEvent,
    },

    /// No task with this identifier was registered.
    #[error("no task with identifier {0}")]
    UnknownTask(TaskId),
}

impl SessionError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SessionError::DoubleCompletion { .. }
            | SessionError::EventOnFinishedTask { .. }
            | SessionError::InvalidStateTransition { .. } => ErrorCategory::Lifecycle,
            SessionError::ChallengeQueueExhausted { .. } => ErrorCategory::Script,
            SessionError::UnknownTask(_) => ErrorCategory::Registry,
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            SessionError::DoubleCompletion { .. } => "E_TASK_DOUBLE_COMPLETION",
            SessionError::ChallengeQueueExhausted { .. } => "E_TASK_CHALLENGE_EXHAUSTED",
            SessionError::EventOnFinishedTask { .. } => "E_TASK_FINISHED",
            SessionError::InvalidStateTransition { .. } => "E_TASK_TRANSITION",
            SessionError::UnknownTask(_) => "E_SESSION_UNKNOWN_TASK",
        }
    }

    /// The task the error is about.
    pub fn task_id(&self) -> TaskId {
        match self {
            SessionError::DoubleCompletion { task_id, .. }
            | SessionError::ChallengeQueueExhausted { task_id, .. }
            | SessionError::EventOnFinishedTask { task_id, .. }
            | SessionError::InvalidStateTransition { task_id, .. } => *task_id,
            SessionError::UnknownTask(task_id) => *task_id,
        }
    }
}
