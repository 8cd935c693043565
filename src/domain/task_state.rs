//! Task identity and lifecycle.

use std::fmt;

/// Identifier of a task, unique within its session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of task a session created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    /// Response body delivered in memory as data chunks
    Data,
    /// Request body uploaded, response delivered as data
    Upload,
    /// Response body written to a file by the stack
    Download,
}

impl TaskKind {
    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskKind::Data => "data",
            TaskKind::Upload => "upload",
            TaskKind::Download => "download",
        }
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle state of a task.
///
/// ```text
/// Created --resume--> Resumed --response/data (any order, repeated)--> Completed
///    \_____________________\___________________________________________> Canceled
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    Created,
    Resumed,
    ReceivingResponse,
    ReceivingData,
    Completed,
    Canceled,
}

impl TaskState {
    /// Completed or canceled; nothing leaves these states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Canceled)
    }

    /// Resumed and not yet finished, so events may be delivered.
    pub fn is_running(&self) -> bool {
        matches!(
            self,
            TaskState::Resumed | TaskState::ReceivingResponse | TaskState::ReceivingData
        )
    }

    /// State reached by applying `event`, or `None` if the event is not
    /// allowed from this state.
    pub fn next(self, event: TaskEvent) -> Option<TaskState> {
        match (self, event) {
            (TaskState::Created, TaskEvent::Resume) => Some(TaskState::Resumed),
            (TaskState::Created, TaskEvent::Cancel) => Some(TaskState::Canceled),
            (state, _) if !state.is_running() => None,
            (_, TaskEvent::Resume) => None,
            (_, TaskEvent::ReceiveResponse) => Some(TaskState::ReceivingResponse),
            (_, TaskEvent::ReceiveData) => Some(TaskState::ReceivingData),
            (state, TaskEvent::ReceiveChallenge) => Some(state),
            (state, TaskEvent::ScriptedAction) => Some(state),
            (_, TaskEvent::Complete) => Some(TaskState::Completed),
            (_, TaskEvent::Cancel) => Some(TaskState::Canceled),
        }
    }

    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Created => "created",
            TaskState::Resumed => "resumed",
            TaskState::ReceivingResponse => "receiving-response",
            TaskState::ReceivingData => "receiving-data",
            TaskState::Completed => "completed",
            TaskState::Canceled => "canceled",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Something a test asks a task to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskEvent {
    Resume,
    ReceiveResponse,
    ReceiveData,
    ReceiveChallenge,
    Complete,
    Cancel,
    /// Arbitrary action run through `MockTask::if_running`
    ScriptedAction,
}

impl TaskEvent {
    /// Returns a short label suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskEvent::Resume => "resume",
            TaskEvent::ReceiveResponse => "receive-response",
            TaskEvent::ReceiveData => "receive-data",
            TaskEvent::ReceiveChallenge => "receive-challenge",
            TaskEvent::Complete => "complete",
            TaskEvent::Cancel => "cancel",
            TaskEvent::ScriptedAction => "scripted-action",
        }
    }
}

impl fmt::Display for TaskEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
