//! CLI-specific error types and exit codes.

use roster_core::{CoreError, PathError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Core domain error.
    #[error("{0}")]
    Core(String),

    /// Invalid user input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Nothing matched the lookup.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Path resolution error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h where one fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Core(_) => 1,
            Self::Arguments(_) => 64, // EX_USAGE
            Self::NotFound(_) => 66,  // EX_NOINPUT
            Self::Database(_) => 74,  // EX_IOERR
            Self::Config(_) => 78,    // EX_CONFIG
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(RepositoryError::NotFound(msg)) => Self::NotFound(msg),
            CoreError::Repository(
                err @ (RepositoryError::NonUnique { .. }
                | RepositoryError::Constraint(_)
                | RepositoryError::InvalidQuery(_)),
            ) => Self::Arguments(err.to_string()),
            CoreError::Repository(repo_err) => Self::Database(repo_err.to_string()),
            CoreError::Validation(msg) => Self::Arguments(msg),
            CoreError::Internal(msg) => Self::Core(msg),
        }
    }
}

impl From<RepositoryError> for CliError {
    fn from(err: RepositoryError) -> Self {
        CoreError::from(err).into()
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        Self::Config(err.to_string())
    }
}
