//! Capability-gated delegate dispatch.
//!
//! The dispatcher holds a non-owning reference to the registered delegate and
//! forwards each event only if the delegate reports the matching capability.
//! A missing, dropped or non-responding delegate makes dispatch a no-op.

use bytes::Bytes;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, Weak};
use tracing::trace;

use crate::domain::{AuthChallenge, Credential, Disposition, Response, TaskError};
use crate::traits::{DelegateCapability, SessionDelegate, SessionTask};

/// Forwards lifecycle events to whichever callbacks the delegate implements.
#[derive(Default)]
pub struct DelegateDispatcher {
    delegate: RwLock<Option<Weak<dyn SessionDelegate>>>,
}

impl DelegateDispatcher {
    /// Create a dispatcher with no delegate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `delegate` without taking ownership of it.
    pub fn set_delegate<D: SessionDelegate + 'static>(&self, delegate: &Arc<D>) {
        let weak = Arc::downgrade(delegate);
        let weak: Weak<dyn SessionDelegate> = weak;
        *self.delegate.write().unwrap_or_else(PoisonError::into_inner) = Some(weak);
    }

    /// Forget the registered delegate.
    pub fn clear_delegate(&self) {
        *self.delegate.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Check if a delegate is registered and still alive.
    pub fn has_delegate(&self) -> bool {
        self.current().is_some()
    }

    pub fn did_receive_response(&self, task: &dyn SessionTask, response: &Response) {
        if let Some(delegate) = self.resolve(task, DelegateCapability::DidReceiveResponse) {
            delegate.did_receive_response(task, response);
        }
    }

    pub fn did_receive_data(&self, task: &dyn SessionTask, data: &Bytes) {
        if let Some(delegate) = self.resolve(task, DelegateCapability::DidReceiveData) {
            delegate.did_receive_data(task, data);
        }
    }

    pub fn task_did_complete(&self, task: &dyn SessionTask, error: Option<&TaskError>) {
        if let Some(delegate) = self.resolve(task, DelegateCapability::TaskDidComplete) {
            delegate.task_did_complete(task, error);
        }
    }

    pub fn did_receive_challenge(
        &self,
        task: &dyn SessionTask,
        challenge: &AuthChallenge,
        disposition: Disposition,
        credential: Option<&Credential>,
    ) {
        if let Some(delegate) = self.resolve(task, DelegateCapability::DidReceiveChallenge) {
            delegate.did_receive_challenge(task, challenge, disposition, credential);
        }
    }

    fn current(&self) -> Option<Arc<dyn SessionDelegate>> {
        self.delegate
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(Weak::upgrade)
    }

    // The read lock is released before returning so callbacks may replace the
    // delegate.
    fn resolve(
        &self,
        task: &dyn SessionTask,
        capability: DelegateCapability,
    ) -> Option<Arc<dyn SessionDelegate>> {
        let Some(delegate) = self.current() else {
            trace!(
                "No live delegate for {} on task {}",
                capability,
                task.task_identifier()
            );
            return None;
        };
        if !delegate.responds_to(capability) {
            trace!(
                "Delegate does not implement {}; skipping task {}",
                capability,
                task.task_identifier()
            );
            return None;
        }
        Some(delegate)
    }
}

impl fmt::Debug for DelegateDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateDispatcher")
            .field("has_delegate", &self.has_delegate())
            .finish()
    }
}
