//! Implementations of the session traits.
//!
//! # Adapters
//!
//! - [`DelegateDispatcher`] - Capability-gated forwarding to a delegate
//! - [`DelegateHandlers`] - Delegate built from optional closures
//! - [`RecordingDelegate`] - Delegate that records every callback
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides the session double itself:
//! - [`mock::MockSession`] - Task registry
//! - [`mock::MockTask`] - Scripted task state machine
//! - [`mock::AuthChallengeArbiter`] - Scripted challenge resolutions

pub mod dispatcher;
pub mod handlers;
pub mod mock;
pub mod recording;

pub use dispatcher::DelegateDispatcher;
pub use handlers::DelegateHandlers;
pub use mock::{AuthChallengeArbiter, MockSession, MockTask, SessionConfig};
pub use recording::{DelegateEvent, RecordingDelegate};
