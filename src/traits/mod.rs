//! Trait abstractions for the session interface.
//!
//! Code under test depends on these traits only, so the double and a real
//! networking stack are interchangeable behind them.
//!
//! # Traits
//!
//! - [`UrlSession`] - Task enumeration and lookup
//! - [`SessionTask`] - The production-facing task surface
//! - [`ScriptedTask`] - The test-facing surface that injects events
//! - [`SessionDelegate`] - Optional lifecycle callbacks

pub mod delegate;
pub mod session;
pub mod task;

pub use delegate::{DelegateCapability, SessionDelegate};
pub use session::UrlSession;
pub use task::{ScriptedTask, SessionTask};
