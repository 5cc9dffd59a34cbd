//! UseCase error types.

use thiserror::Error;

use crate::domain::{DomainError, MessagePushError, RepositoryError};

/// Failure to encode or deliver a fact event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BroadcastError {
    #[error("failed to encode event: {0}")]
    Encode(String),

    #[error(transparent)]
    Push(#[from] MessagePushError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    #[error("failed to deliver initial state: {0}")]
    InitialState(#[from] BroadcastError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    #[error("session '{0}' was not registered")]
    SessionNotFound(String),

    #[error("failed to notify remaining sessions: {0}")]
    BroadcastFailed(#[from] BroadcastError),
}

/// Outcome of a client intent that did not produce a fact.
///
/// `Rejected` covers unknown sessions, ownership violations and invalid
/// payloads. The protocol has no rejection event: the client only observes
/// that its fact was never echoed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentError {
    #[error("intent rejected: {0}")]
    Rejected(#[from] DomainError),

    #[error("broadcast failed: {0}")]
    BroadcastFailed(#[from] BroadcastError),
}

impl From<RepositoryError> for IntentError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::Domain(e) => IntentError::Rejected(e),
        }
    }
}
