//! Error handling for the session double.
//!
//! All errors describe mistakes in the test driving the double, never faults
//! of the simulated network. They are returned synchronously from the call
//! that caused them and are never swallowed.
//!
//! | Error | Category | Raised when |
//! |-------|----------|-------------|
//! | `DoubleCompletion` | Lifecycle | completion on a finished task |
//! | `EventOnFinishedTask` | Lifecycle | any other event on a finished task |
//! | `InvalidStateTransition` | Lifecycle | event out of lifecycle order |
//! | `ChallengeQueueExhausted` | Script | challenge with no canned response |
//! | `UnknownTask` | Registry | lookup of an unregistered identifier |

mod category;
mod result;
mod session_error;

pub use category::ErrorCategory;
pub use result::SessionResult;
pub use session_error::SessionError;
