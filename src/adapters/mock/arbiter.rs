//! Scripted authentication challenge resolutions.

use std::collections::VecDeque;
use thiserror::Error;

use crate::domain::AuthChallengeResponse;

/// The arbiter ran out of canned responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no challenge response left after serving {served}")]
pub struct ArbiterExhausted {
    /// Responses consumed before the queue ran dry
    pub served: usize,
}

/// FIFO queue of canned challenge resolutions for one task.
///
/// Tests fill it before the task sees its first challenge; every challenge
/// consumes exactly one entry.
///
/// # Example
///
/// ```ignore
/// use urlsession_double::adapters::mock::AuthChallengeArbiter;
///
/// let mut arbiter: AuthChallengeArbiter = [
///     AuthChallengeResponse::Cancel,
///     AuthChallengeResponse::UseCredential(Credential::new("alice", "pw")),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(arbiter.consume()?, AuthChallengeResponse::Cancel);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthChallengeArbiter {
    queue: VecDeque<AuthChallengeResponse>,
    consumed: usize,
}

impl AuthChallengeArbiter {
    /// Create an empty arbiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a response to the end of the script.
    pub fn push(&mut self, response: AuthChallengeResponse) {
        self.queue.push_back(response);
    }

    /// Remove and return the next response.
    pub fn consume(&mut self) -> Result<AuthChallengeResponse, ArbiterExhausted> {
        let response = self.queue.pop_front().ok_or(ArbiterExhausted {
            served: self.consumed,
        })?;
        self.consumed += 1;
        Ok(response)
    }

    /// Responses not consumed yet, in consumption order.
    pub fn remaining(&self) -> Vec<AuthChallengeResponse> {
        self.queue.iter().cloned().collect()
    }

    /// Number of responses consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Check if the next challenge would fail to resolve.
    pub fn is_exhausted(&self) -> bool {
        self.is_empty()
    }
}

impl Extend<AuthChallengeResponse> for AuthChallengeArbiter {
    fn extend<I: IntoIterator<Item = AuthChallengeResponse>>(&mut self, iter: I) {
        self.queue.extend(iter);
    }
}

impl FromIterator<AuthChallengeResponse> for AuthChallengeArbiter {
    fn from_iter<I: IntoIterator<Item = AuthChallengeResponse>>(iter: I) -> Self {
        Self {
            queue: iter.into_iter().collect(),
            consumed: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Credential;

    #[test]
    fn test_consume_is_fifo() {
        let cred = Credential::new("alice", "pw");
        let mut arbiter = AuthChallengeArbiter::new();
        arbiter.push(AuthChallengeResponse::Cancel);
        arbiter.push(AuthChallengeResponse::UseCredential(cred.clone()));

        assert_eq!(arbiter.consume().unwrap(), AuthChallengeResponse::Cancel);
        assert_eq!(
            arbiter.consume().unwrap(),
            AuthChallengeResponse::UseCredential(cred)
        );
        assert_eq!(arbiter.consumed(), 2);
    }

    #[test]
    fn test_exhaustion_reports_served_count() {
        let mut arbiter: AuthChallengeArbiter =
            [AuthChallengeResponse::PerformDefaultHandling].into_iter().collect();
        arbiter.consume().unwrap();

        assert_eq!(arbiter.consume(), Err(ArbiterExhausted { served: 1 }));
        assert!(arbiter.is_exhausted());
    }

    #[test]
    fn test_empty_arbiter_is_exhausted() {
        let mut arbiter = AuthChallengeArbiter::new();
        assert!(arbiter.is_empty());
        assert_eq!(arbiter.consume(), Err(ArbiterExhausted { served: 0 }));
    }

    #[test]
    fn test_exhausted_tracks_queue_contents() {
        let mut arbiter = AuthChallengeArbiter::new();
        assert!(arbiter.is_exhausted());

        arbiter.push(AuthChallengeResponse::Cancel);
        assert!(!arbiter.is_exhausted());
        assert!(!arbiter.is_empty());

        arbiter.consume().unwrap();
        assert_eq!(arbiter.is_exhausted(), arbiter.is_empty());
        assert!(arbiter.is_exhausted());
    }

    #[test]
    fn test_remaining_and_extend() {
        let mut arbiter = AuthChallengeArbiter::new();
        arbiter.extend([
            AuthChallengeResponse::RejectProtectionSpace,
            AuthChallengeResponse::Cancel,
        ]);
        arbiter.consume().unwrap();

        assert_eq!(arbiter.remaining(), vec![AuthChallengeResponse::Cancel]);
        assert_eq!(arbiter.len(), 1);
    }
}
