//! Session trait abstraction.

use std::sync::Arc;

use super::task::SessionTask;
use crate::domain::TaskId;

/// A session that owns tasks and can enumerate them.
///
/// Enumeration returns a fresh snapshot on every call, in creation order.
pub trait UrlSession: Send + Sync {
    /// Concrete task type handed out by this session.
    type Task: SessionTask;

    /// All tasks, in creation order.
    fn tasks(&self) -> Vec<Arc<Self::Task>>;

    /// Data tasks only, in creation order.
    fn data_tasks(&self) -> Vec<Arc<Self::Task>>;

    /// Look a task up by identifier.
    fn task(&self, id: TaskId) -> Option<Arc<Self::Task>>;
}
