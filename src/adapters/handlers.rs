//! Closure-based delegate.
//!
//! [`DelegateHandlers`] builds a delegate from independently present
//! closures; it responds to exactly the callbacks that were set.

use bytes::Bytes;
use std::fmt;

use crate::domain::{AuthChallenge, Credential, Disposition, Response, TaskError};
use crate::traits::{DelegateCapability, SessionDelegate, SessionTask};

type ResponseHandler = Box<dyn Fn(&dyn SessionTask, &Response) + Send + Sync>;
type DataHandler = Box<dyn Fn(&dyn SessionTask, &Bytes) + Send + Sync>;
type CompleteHandler = Box<dyn Fn(&dyn SessionTask, Option<&TaskError>) + Send + Sync>;
type ChallengeHandler =
    Box<dyn Fn(&dyn SessionTask, &AuthChallenge, Disposition, Option<&Credential>) + Send + Sync>;

/// A delegate assembled from optional closures.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::adapters::DelegateHandlers;
///
/// let delegate = Arc::new(
///     DelegateHandlers::new()
///         .on_data(|task, chunk| println!("{} got {} bytes", task.task_identifier(), chunk.len()))
///         .on_complete(|_, error| assert!(error.is_none())),
/// );
/// session.set_delegate(&delegate);
/// ```
#[derive(Default)]
pub struct DelegateHandlers {
    on_response: Option<ResponseHandler>,
    on_data: Option<DataHandler>,
    on_complete: Option<CompleteHandler>,
    on_challenge: Option<ChallengeHandler>,
}

impl DelegateHandlers {
    /// Create a delegate that implements nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_response<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn SessionTask, &Response) + Send + Sync + 'static,
    {
        self.on_response = Some(Box::new(handler));
        self
    }

    pub fn on_data<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn SessionTask, &Bytes) + Send + Sync + 'static,
    {
        self.on_data = Some(Box::new(handler));
        self
    }

    pub fn on_complete<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn SessionTask, Option<&TaskError>) + Send + Sync + 'static,
    {
        self.on_complete = Some(Box::new(handler));
        self
    }

    pub fn on_challenge<F>(mut self, handler: F) -> Self
    where
        F: Fn(&dyn SessionTask, &AuthChallenge, Disposition, Option<&Credential>)
            + Send
            + Sync
            + 'static,
    {
        self.on_challenge = Some(Box::new(handler));
        self
    }

    /// Capabilities with a handler set.
    pub fn capabilities(&self) -> Vec<DelegateCapability> {
        DelegateCapability::ALL
            .into_iter()
            .filter(|capability| self.responds_to(*capability))
            .collect()
    }
}

impl SessionDelegate for DelegateHandlers {
    fn responds_to(&self, capability: DelegateCapability) -> bool {
        match capability {
            DelegateCapability::DidReceiveResponse => self.on_response.is_some(),
            DelegateCapability::DidReceiveData => self.on_data.is_some(),
            DelegateCapability::TaskDidComplete => self.on_complete.is_some(),
            DelegateCapability::DidReceiveChallenge => self.on_challenge.is_some(),
        }
    }

    fn did_receive_response(&self, task: &dyn SessionTask, response: &Response) {
        if let Some(handler) = &self.on_response {
            handler(task, response);
        }
    }

    fn did_receive_data(&self, task: &dyn SessionTask, data: &Bytes) {
        if let Some(handler) = &self.on_data {
            handler(task, data);
        }
    }

    fn task_did_complete(&self, task: &dyn SessionTask, error: Option<&TaskError>) {
        if let Some(handler) = &self.on_complete {
            handler(task, error);
        }
    }

    fn did_receive_challenge(
        &self,
        task: &dyn SessionTask,
        challenge: &AuthChallenge,
        disposition: Disposition,
        credential: Option<&Credential>,
    ) {
        if let Some(handler) = &self.on_challenge {
            handler(task, challenge, disposition, credential);
        }
    }
}

impl fmt::Debug for DelegateHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelegateHandlers")
            .field("capabilities", &self.capabilities())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_handlers_respond_to_nothing() {
        let handlers = DelegateHandlers::new();
        assert!(handlers.capabilities().is_empty());
    }

    #[test]
    fn test_capabilities_follow_set_handlers() {
        let handlers = DelegateHandlers::new()
            .on_data(|_, _| {})
            .on_challenge(|_, _, _, _| {});
        assert_eq!(
            handlers.capabilities(),
            vec![
                DelegateCapability::DidReceiveData,
                DelegateCapability::DidReceiveChallenge
            ]
        );
        assert!(!handlers.responds_to(DelegateCapability::TaskDidComplete));
    }

    #[test]
    fn test_debug_lists_capabilities() {
        let handlers = DelegateHandlers::new().on_complete(|_, _| {});
        assert!(format!("{:?}", handlers).contains("TaskDidComplete"));
    }
}
