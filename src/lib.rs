//! Scripted URL-session double for testing networking code without I/O.
//!
//! A test creates tasks through a [`MockSession`], then plays the network by
//! delivering responses, data chunks, authentication challenges and
//! completions. Each event reaches the registered delegate exactly as a real
//! stack would deliver it.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod traits;

pub use adapters::{DelegateHandlers, MockSession, MockTask, RecordingDelegate, SessionConfig};
pub use error::{SessionError, SessionResult};
