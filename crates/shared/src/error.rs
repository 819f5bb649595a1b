use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    MissingField,
    InvalidCommand,
    InvalidAction,
    InvalidId,
    TypeMismatch,
    UnknownOperation,
    Internal,
}

impl ErrorCode {
    /// Validation failures are the caller's fault; everything else is ours.
    pub fn is_validation(self) -> bool {
        !matches!(self, ErrorCode::Internal)
    }
}

/// Failure of a single slash-command or action request.
///
/// The `Display` output is the user-facing message placed after `Error: `
/// in the response envelope, so internal detail is kept out of it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("No {0} provided")]
    MissingField(&'static str),
    #[error("Invalid command: {0}. Only /schedule is supported.")]
    InvalidCommand(String),
    #[error("Invalid action: {0}. Only delete is supported.")]
    InvalidAction(String),
    #[error("Invalid id: {0}. The id must be a positive integer.")]
    InvalidId(String),
    #[error("Invalid {field}: expected {expected}")]
    TypeMismatch {
        field: &'static str,
        expected: &'static str,
    },
    #[error("Unknown operation. Available operations: {available}")]
    UnknownOperation { available: &'static str },
    #[error("Internal server error")]
    Internal { detail: String },
}

impl CommandError {
    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CommandError::MissingField(_) => ErrorCode::MissingField,
            CommandError::InvalidCommand(_) => ErrorCode::InvalidCommand,
            CommandError::InvalidAction(_) => ErrorCode::InvalidAction,
            CommandError::InvalidId(_) => ErrorCode::InvalidId,
            CommandError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            CommandError::UnknownOperation { .. } => ErrorCode::UnknownOperation,
            CommandError::Internal { .. } => ErrorCode::Internal,
        }
    }
}
