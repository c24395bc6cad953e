//! Failure kinds surfaced by store, mutation, and run operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Every failure renders as a single human-readable line.
#[derive(Debug, Error)]
pub enum QuickError {
    #[error("Command cannot be empty.")]
    EmptyCommand,

    #[error("Handle must be greater than 0, got {handle}.")]
    InvalidHandle { handle: i64 },

    #[error("A command with handle {handle} already exists.")]
    DuplicateHandle { handle: i64 },

    #[error("No quick command found with handle {handle}.")]
    NotFound { handle: i64 },

    #[error("No handle is left after {max}; pass --handle to choose a free one.")]
    HandlesExhausted { max: i64 },

    #[error("New handle must be different from the current handle.")]
    SameHandle,

    #[error("Failed to load commands from {}: {reason}", path.display())]
    CorruptData { path: PathBuf, reason: String },

    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to launch command with {shell}: {source}")]
    Launch {
        shell: String,
        #[source]
        source: io::Error,
    },

    #[error("Command exited with status {status}.")]
    NonZeroExit { status: i32 },
}

impl QuickError {
    pub(crate) fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        QuickError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        QuickError::CorruptData {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type QuickResult<T> = std::result::Result<T, QuickError>;
