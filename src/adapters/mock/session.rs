//! Task registry and delegate routing.

use bytes::Bytes;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use super::config::SessionConfig;
use super::task::MockTask;
use crate::adapters::dispatcher::DelegateDispatcher;
use crate::domain::{
    AuthChallenge, Credential, Disposition, Request, Response, TaskError, TaskId, TaskKind,
};
use crate::error::{SessionError, SessionResult};
use crate::traits::{SessionDelegate, SessionTask, UrlSession};

#[derive(Default)]
struct Registry {
    order: Vec<Arc<MockTask>>,
    index: HashMap<TaskId, usize>,
}

pub(super) struct SessionShared {
    config: SessionConfig,
    next_id: AtomicU64,
    registry: RwLock<Registry>,
    dispatcher: DelegateDispatcher,
}

/// Session double that owns scripted tasks.
///
/// Cloning yields another handle to the same session.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::adapters::{MockSession, RecordingDelegate};
///
/// let session = MockSession::new();
/// let delegate = Arc::new(RecordingDelegate::new());
/// session.set_delegate(&delegate);
///
/// let task = session.register(Request::get("https://example.com"));
/// code_under_test(&session);
///
/// assert_eq!(session.tasks().len(), 1);
/// assert_eq!(delegate.completion_count(task.task_identifier()), 1);
/// ```
#[derive(Clone)]
pub struct MockSession {
    shared: Arc<SessionShared>,
}

impl MockSession {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    /// Create a session with `config`.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            shared: Arc::new(SessionShared {
                config,
                next_id: AtomicU64::new(1),
                registry: RwLock::new(Registry::default()),
                dispatcher: DelegateDispatcher::new(),
            }),
        }
    }

    pub(super) fn from_shared(shared: Arc<SessionShared>) -> Self {
        Self { shared }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.shared.config
    }

    /// Register the delegate events are forwarded to.
    ///
    /// The session does not keep the delegate alive.
    pub fn set_delegate<D: SessionDelegate + 'static>(&self, delegate: &Arc<D>) {
        self.shared.dispatcher.set_delegate(delegate);
    }

    pub fn clear_delegate(&self) {
        self.shared.dispatcher.clear_delegate();
    }

    /// Create a data task for `request`.
    pub fn register(&self, request: Request) -> Arc<MockTask> {
        self.register_with_kind(request, TaskKind::Data)
    }

    /// Create a task of `kind` for `request`.
    pub fn register_with_kind(&self, request: Request, kind: TaskKind) -> Arc<MockTask> {
        let id = TaskId(self.shared.next_id.fetch_add(1, Ordering::Relaxed));
        let task = Arc::new(MockTask::new(
            id,
            kind,
            request,
            self.shared.config.clone(),
            Arc::downgrade(&self.shared),
        ));

        let mut registry = self.write_registry();
        let position = registry.order.len();
        registry.index.insert(id, position);
        registry.order.push(task.clone());
        drop(registry);

        debug!(
            "Registered {} task {} for {} {}",
            kind,
            id,
            task.original_request().method,
            task.original_request().url
        );
        task
    }

    pub fn data_task(&self, request: Request) -> Arc<MockTask> {
        self.register_with_kind(request, TaskKind::Data)
    }

    /// Create an upload task; `body` becomes the request body.
    pub fn upload_task(&self, request: Request, body: impl Into<Bytes>) -> Arc<MockTask> {
        self.register_with_kind(request.with_body(body), TaskKind::Upload)
    }

    pub fn download_task(&self, request: Request) -> Arc<MockTask> {
        self.register_with_kind(request, TaskKind::Download)
    }

    /// All tasks, in creation order.
    pub fn tasks(&self) -> Vec<Arc<MockTask>> {
        self.read_registry().order.clone()
    }

    /// Data tasks only, in creation order.
    pub fn data_tasks(&self) -> Vec<Arc<MockTask>> {
        self.read_registry()
            .order
            .iter()
            .filter(|task| task.kind() == TaskKind::Data)
            .cloned()
            .collect()
    }

    pub fn lookup(&self, id: TaskId) -> Option<Arc<MockTask>> {
        let registry = self.read_registry();
        registry
            .index
            .get(&id)
            .and_then(|position| registry.order.get(*position))
            .cloned()
    }

    /// Like [`lookup`](Self::lookup), but a missing task is an error.
    pub fn require(&self, id: TaskId) -> SessionResult<Arc<MockTask>> {
        self.lookup(id).ok_or(SessionError::UnknownTask(id))
    }

    pub fn len(&self) -> usize {
        self.read_registry().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_registry().order.is_empty()
    }

    /// Cancel every task that has not finished; returns how many were canceled.
    pub fn invalidate_and_cancel(&self) -> SessionResult<usize> {
        let mut canceled = 0;
        for task in self.tasks() {
            if task.state().is_terminal() {
                continue;
            }
            task.cancel()?;
            canceled += 1;
        }
        debug!("Session invalidated; canceled {} task(s)", canceled);
        Ok(canceled)
    }

    pub fn did_receive_response(&self, task: &dyn SessionTask, response: &Response) {
        self.shared.dispatcher.did_receive_response(task, response);
    }

    pub fn did_receive_data(&self, task: &dyn SessionTask, data: &Bytes) {
        self.shared.dispatcher.did_receive_data(task, data);
    }

    pub fn task_did_complete(&self, task: &dyn SessionTask, error: Option<&TaskError>) {
        self.shared.dispatcher.task_did_complete(task, error);
    }

    pub fn did_receive_challenge(
        &self,
        task: &dyn SessionTask,
        challenge: &AuthChallenge,
        disposition: Disposition,
        credential: Option<&Credential>,
    ) {
        self.shared
            .dispatcher
            .did_receive_challenge(task, challenge, disposition, credential);
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.shared
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.shared
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockSession {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MockSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockSession")
            .field("tasks", &self.len())
            .field("config", &self.shared.config)
            .field("dispatcher", &self.shared.dispatcher)
            .finish()
    }
}

impl UrlSession for MockSession {
    type Task = MockTask;

    fn tasks(&self) -> Vec<Arc<MockTask>> {
        MockSession::tasks(self)
    }

    fn data_tasks(&self) -> Vec<Arc<MockTask>> {
        MockSession::data_tasks(self)
    }

    fn task(&self, id: TaskId) -> Option<Arc<MockTask>> {
        self.lookup(id)
    }
}
