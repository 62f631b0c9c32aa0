use std::time::Duration;
use thiserror::Error;

use crate::model::ItemId;

/// Errors raised while reconciling the view with the remote collection
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SyncError {
    /// No response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// A response arrived with a non-success status
    #[error("Remote rejected request with status {status}: {reason}")]
    Rejected { status: u16, reason: String },

    /// The response body did not match the expected shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("No item with id {0} is present")]
    UnknownItem(ItemId),

    #[error("Item list is already initialized")]
    AlreadyInitialized,
}

/// Coarse classification used by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Rejected,
    Malformed,
    Timeout,
    /// Caller misuse; never caused by the remote
    Usage,
}

impl SyncError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SyncError::Transport(_) => ErrorKind::Transport,
            SyncError::Rejected { .. } => ErrorKind::Rejected,
            SyncError::Malformed(_) => ErrorKind::Malformed,
            SyncError::Timeout(_) => ErrorKind::Timeout,
            SyncError::UnknownItem(_) | SyncError::AlreadyInitialized => ErrorKind::Usage,
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transport | ErrorKind::Timeout)
    }
}

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        SyncError::Transport(err.to_string())
    }
}

pub type SyncResult<T> = Result<T, SyncError>;
