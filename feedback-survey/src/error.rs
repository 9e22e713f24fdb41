use std::path::PathBuf;

use crate::{DefinitionError, QuestionId};

/// Error type for key-value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing file is not a JSON object of strings.
    #[error("Malformed store file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other store implementation failure.
    #[error("Store error: {0}")]
    Other(#[from] anyhow::Error),
}

impl StoreError {
    /// Create a store error from any error type.
    pub fn other(err: impl Into<anyhow::Error>) -> Self {
        Self::Other(err.into())
    }
}

/// Error type for survey runner operations.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// The survey definition cannot be run.
    #[error("Invalid survey definition: {0}")]
    Definition(#[from] DefinitionError),

    /// Persisting or restoring progress failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation does not apply on the current screen.
    #[error("Cannot {operation} while {phase}")]
    WrongPhase {
        operation: &'static str,
        phase: &'static str,
    },

    /// The operation does not apply to the current question's kind.
    #[error("Cannot {operation} on question {question_id}")]
    WrongKind {
        operation: &'static str,
        question_id: QuestionId,
    },
}

impl RunnerError {
    /// Check if this error is a rejected transition rather than a failure.
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::WrongPhase { .. } | Self::WrongKind { .. })
    }
}
