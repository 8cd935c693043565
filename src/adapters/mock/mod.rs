//! Scripted session double.
//!
//! # Available Mocks
//!
//! - [`MockSession`] - Task registry that routes events to the delegate
//! - [`MockTask`] - One scripted request/response exchange
//! - [`AuthChallengeArbiter`] - Canned challenge resolutions for a task

pub mod arbiter;
pub mod config;
pub mod session;
pub mod task;

pub use arbiter::{ArbiterExhausted, AuthChallengeArbiter};
pub use config::SessionConfig;
pub use session::MockSession;
pub use task::{MockTask, ResolvedChallenge};
