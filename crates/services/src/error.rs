//! Shared error types for the services crate.

use thiserror::Error;

use practice_core::model::{SessionPhase, SessionSummaryError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PracticeSession` lifecycle commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("cannot {action} a session that is {phase:?}")]
    WrongPhase {
        action: &'static str,
        phase: SessionPhase,
    },
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}

/// Errors emitted while loading or saving learner progress.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PersistenceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
