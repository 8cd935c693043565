//! Value types shared by the session, its tasks and their delegates.
//!
//! ## Domain Objects
//!
//! - [`Request`] - The request a task was created for
//! - [`Response`] - Response metadata delivered before any data
//! - [`TaskError`] - Terminal error carried by a completion
//! - [`AuthChallenge`], [`Credential`], [`Disposition`] and
//!   [`AuthChallengeResponse`] - Authentication negotiation
//! - [`TaskId`], [`TaskKind`], [`TaskState`], [`TaskEvent`] - Task identity
//!   and lifecycle

pub mod challenge;
pub mod request;
pub mod response;
pub mod task_error;
pub mod task_state;

pub use challenge::{
    AuthChallenge, AuthChallengeResponse, AuthenticationMethod, Credential,
    CredentialPersistence, Disposition, ProtectionSpace,
};
pub use request::Request;
pub use response::{Headers, Response};
pub use task_error::{TaskError, URL_ERROR_DOMAIN};
pub use task_state::{TaskEvent, TaskId, TaskKind, TaskState};
