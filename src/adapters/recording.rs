//! Recording delegate for assertions on callback order.

use bytes::Bytes;
use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::domain::{AuthChallenge, Credential, Disposition, Response, TaskError, TaskId};
use crate::traits::{DelegateCapability, SessionDelegate, SessionTask};

/// A callback observed by [`RecordingDelegate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateEvent {
    Response {
        task_id: TaskId,
        response: Response,
    },
    Data {
        task_id: TaskId,
        data: Bytes,
    },
    Complete {
        task_id: TaskId,
        error: Option<TaskError>,
    },
    Challenge {
        task_id: TaskId,
        challenge: AuthChallenge,
        disposition: Disposition,
        credential: Option<Credential>,
    },
}

impl DelegateEvent {
    /// The task the event was delivered for.
    pub fn task_id(&self) -> TaskId {
        match self {
            DelegateEvent::Response { task_id, .. }
            | DelegateEvent::Data { task_id, .. }
            | DelegateEvent::Complete { task_id, .. }
            | DelegateEvent::Challenge { task_id, .. } => *task_id,
        }
    }

    /// The capability the event was delivered through.
    pub fn capability(&self) -> DelegateCapability {
        match self {
            DelegateEvent::Response { .. } => DelegateCapability::DidReceiveResponse,
            DelegateEvent::Data { .. } => DelegateCapability::DidReceiveData,
            DelegateEvent::Complete { .. } => DelegateCapability::TaskDidComplete,
            DelegateEvent::Challenge { .. } => DelegateCapability::DidReceiveChallenge,
        }
    }
}

/// Delegate that records every callback it receives, in delivery order.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::adapters::{DelegateEvent, RecordingDelegate};
///
/// let delegate = Arc::new(RecordingDelegate::new());
/// session.set_delegate(&delegate);
///
/// task.complete_with_error(None)?;
///
/// assert!(matches!(delegate.events()[0], DelegateEvent::Complete { error: None, .. }));
/// ```
#[derive(Debug)]
pub struct RecordingDelegate {
    events: Mutex<Vec<DelegateEvent>>,
    capabilities: HashSet<DelegateCapability>,
}

impl RecordingDelegate {
    /// Create a delegate that implements every callback.
    pub fn new() -> Self {
        Self::with_capabilities(&DelegateCapability::ALL)
    }

    /// Create a delegate that implements only `capabilities`.
    pub fn with_capabilities(capabilities: &[DelegateCapability]) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            capabilities: capabilities.iter().copied().collect(),
        }
    }

    /// Get all recorded events.
    pub fn events(&self) -> Vec<DelegateEvent> {
        self.lock().clone()
    }

    /// Get the events recorded for one task.
    pub fn events_for(&self, task_id: TaskId) -> Vec<DelegateEvent> {
        self.lock()
            .iter()
            .filter(|event| event.task_id() == task_id)
            .cloned()
            .collect()
    }

    /// Concatenation of every data chunk delivered for one task.
    pub fn data_for(&self, task_id: TaskId) -> Vec<u8> {
        self.lock()
            .iter()
            .filter_map(|event| match event {
                DelegateEvent::Data { task_id: id, data } if *id == task_id => Some(data.clone()),
                _ => None,
            })
            .flat_map(|data| data.to_vec())
            .collect()
    }

    /// Number of completions delivered for one task.
    pub fn completion_count(&self, task_id: TaskId) -> usize {
        self.lock()
            .iter()
            .filter(|event| {
                event.task_id() == task_id
                    && event.capability() == DelegateCapability::TaskDidComplete
            })
            .count()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all recorded events.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn record(&self, event: DelegateEvent) {
        self.lock().push(event);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<DelegateEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for RecordingDelegate {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionDelegate for RecordingDelegate {
    fn responds_to(&self, capability: DelegateCapability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn did_receive_response(&self, task: &dyn SessionTask, response: &Response) {
        self.record(DelegateEvent::Response {
            task_id: task.task_identifier(),
            response: response.clone(),
        });
    }

    fn did_receive_data(&self, task: &dyn SessionTask, data: &Bytes) {
        self.record(DelegateEvent::Data {
            task_id: task.task_identifier(),
            data: data.clone(),
        });
    }

    fn task_did_complete(&self, task: &dyn SessionTask, error: Option<&TaskError>) {
        self.record(DelegateEvent::Complete {
            task_id: task.task_identifier(),
            error: error.cloned(),
        });
    }

    fn did_receive_challenge(
        &self,
        task: &dyn SessionTask,
        challenge: &AuthChallenge,
        disposition: Disposition,
        credential: Option<&Credential>,
    ) {
        self.record(DelegateEvent::Challenge {
            task_id: task.task_identifier(),
            challenge: challenge.clone(),
            disposition,
            credential: credential.cloned(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::MockSession;
    use crate::domain::Request;

    #[test]
    fn test_recording_delegate_new_is_empty() {
        let delegate = RecordingDelegate::new();
        assert!(delegate.is_empty());
        assert_eq!(delegate.len(), 0);
    }

    #[test]
    fn test_records_in_delivery_order() {
        let session = MockSession::new();
        let task = session.register(Request::get("https://example.com"));
        let delegate = RecordingDelegate::new();

        delegate.did_receive_data(&*task, &Bytes::from("ab"));
        delegate.did_receive_data(&*task, &Bytes::from("cd"));
        delegate.task_did_complete(&*task, None);

        let events = delegate.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].capability(), DelegateCapability::DidReceiveData);
        assert_eq!(events[2].capability(), DelegateCapability::TaskDidComplete);
        assert_eq!(delegate.data_for(task.task_identifier()), b"abcd".to_vec());
        assert_eq!(delegate.completion_count(task.task_identifier()), 1);
    }

    #[test]
    fn test_events_for_filters_by_task() {
        let session = MockSession::new();
        let first = session.register(Request::get("https://example.com/1"));
        let second = session.register(Request::get("https://example.com/2"));
        let delegate = RecordingDelegate::new();

        delegate.task_did_complete(&*first, None);
        delegate.task_did_complete(&*second, Some(&TaskError::timed_out()));

        let events = delegate.events_for(second.task_identifier());
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0],
            DelegateEvent::Complete {
                task_id: second.task_identifier(),
                error: Some(TaskError::timed_out()),
            }
        );
    }

    #[test]
    fn test_with_capabilities_limits_responds_to() {
        let delegate = RecordingDelegate::with_capabilities(&[DelegateCapability::DidReceiveData]);
        assert!(delegate.responds_to(DelegateCapability::DidReceiveData));
        assert!(!delegate.responds_to(DelegateCapability::DidReceiveResponse));
    }

    #[test]
    fn test_clear() {
        let session = MockSession::new();
        let task = session.register(Request::get("https://example.com"));
        let delegate = RecordingDelegate::new();
        delegate.task_did_complete(&*task, None);
        delegate.clear();
        assert!(delegate.is_empty());
    }
}
