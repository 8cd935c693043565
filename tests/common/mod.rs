//! Common test utilities for integration tests.
//!
//! This module provides reusable fixtures for scripting tasks and a small
//! delegate standing in for production code under test.
//!
//! # Example
//!
//! ```ignore
//! use common::{running_task, init_tracing};
//!
//! init_tracing();
//! let session = MockSession::new();
//! let task = running_task(&session, "https://example.com");
//! ```

pub mod mocks;

pub use mocks::*;

use std::sync::Arc;

use urlsession_double::domain::{
    AuthChallenge, AuthenticationMethod, Credential, ProtectionSpace, Request, Response,
};
use urlsession_double::{MockSession, MockTask};

/// Installs a tracing subscriber honoring `RUST_LOG`, once per test binary.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Registers a GET data task and resumes it.
#[allow(dead_code)]
pub fn running_task(session: &MockSession, url: &str) -> Arc<MockTask> {
    let task = session.register(Request::get(url));
    task.resume().expect("fresh task resumes");
    task
}

/// A 200 response with a JSON content type.
#[allow(dead_code)]
pub fn json_response(url: &str) -> Response {
    Response::ok(url)
        .with_header("Content-Type", "application/json")
        .with_mime_type("application/json")
}

/// A basic-auth challenge for `host`.
#[allow(dead_code)]
pub fn basic_challenge(host: &str) -> AuthChallenge {
    AuthChallenge::new(
        ProtectionSpace::new(host, 443)
            .with_realm("api")
            .with_method(AuthenticationMethod::HttpBasic),
    )
    .with_failure_response(Response::new(format!("https://{}/", host), 401))
}

/// Credential used across challenge tests.
#[allow(dead_code)]
pub fn test_credential() -> Credential {
    Credential::new("test-user", "test-password")
}
