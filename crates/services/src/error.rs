//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{ParseOptionKeyError, SessionId, SessionStateError};
use storage::StorageError;

use crate::sessions::Phase;

/// Errors emitted by quiz sessions and the session registry.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot move from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },
    #[error("no practice or test run in progress (currently at {0})")]
    NotInProgress(Phase),
    #[error("no question is awaiting an answer")]
    NoPendingQuestion,
    #[error(transparent)]
    InvalidChoice(#[from] ParseOptionKeyError),
    #[error(transparent)]
    State(#[from] SessionStateError),
    #[error("unknown session {0}")]
    UnknownSession(SessionId),
    #[error("session lock poisoned: {0}")]
    Poisoned(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
