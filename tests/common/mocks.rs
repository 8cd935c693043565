//! Delegates standing in for production networking code.
//!
//! [`BodyCollector`] behaves like a typical client: it implements only the
//! data and completion callbacks and depends on nothing but the traits.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;

use urlsession_double::domain::{TaskError, TaskId};
use urlsession_double::traits::{DelegateCapability, SessionDelegate, SessionTask};

/// Outcome of one request as seen by [`BodyCollector`].
#[allow(dead_code)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Body { status: Option<u16>, body: Vec<u8> },
    Failed(TaskError),
}

/// Collects response bodies per task, like a client buffering downloads.
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct BodyCollector {
    buffers: Mutex<HashMap<TaskId, Vec<u8>>>,
    outcomes: Mutex<HashMap<TaskId, Outcome>>,
}

impl BodyCollector {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn outcome(&self, task_id: TaskId) -> Option<Outcome> {
        self.outcomes.lock().unwrap().get(&task_id).cloned()
    }

    #[allow(dead_code)]
    pub fn pending_bytes(&self, task_id: TaskId) -> usize {
        self.buffers
            .lock()
            .unwrap()
            .get(&task_id)
            .map_or(0, |buffer| buffer.len())
    }
}

impl SessionDelegate for BodyCollector {
    fn responds_to(&self, capability: DelegateCapability) -> bool {
        matches!(
            capability,
            DelegateCapability::DidReceiveData | DelegateCapability::TaskDidComplete
        )
    }

    fn did_receive_data(&self, task: &dyn SessionTask, data: &Bytes) {
        self.buffers
            .lock()
            .unwrap()
            .entry(task.task_identifier())
            .or_default()
            .extend_from_slice(data);
    }

    fn task_did_complete(&self, task: &dyn SessionTask, error: Option<&TaskError>) {
        let body = self
            .buffers
            .lock()
            .unwrap()
            .remove(&task.task_identifier())
            .unwrap_or_default();
        let outcome = match error {
            Some(error) => Outcome::Failed(error.clone()),
            None => Outcome::Body {
                status: task.response().map(|response| response.status),
                body,
            },
        };
        self.outcomes
            .lock()
            .unwrap()
            .insert(task.task_identifier(), outcome);
    }
}
