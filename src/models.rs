//! Frontend Models
//!
//! Rows and notices held in the app store.

use list_sync::{DeleteOutcome, Item, ItemId, SyncError, SyncResult};

/// One rendered entry of the item list
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: ItemId,
    pub content: String,
    /// A delete request is in flight
    pub pending: bool,
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id.clone(),
            content: item.content.clone(),
            pending: false,
        }
    }
}

/// Progress of the one-time item list load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded(usize),
    Failed,
}

/// User-visible error with an optional retry target
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u32,
    pub text: String,
    pub retry: Option<ItemId>,
}

/// Text shown when a delete fails; `None` keeps the failure in the log only
pub fn delete_failure_text(err: &SyncError) -> Option<String> {
    match err {
        SyncError::Transport(_) => Some("Could not reach the server to remove this item.".to_string()),
        SyncError::Timeout(_) => Some("Removing this item timed out.".to_string()),
        SyncError::Rejected { status, .. } => {
            Some(format!("The server refused to remove this item (status {}).", status))
        }
        SyncError::Malformed(_) => Some("The server sent an unexpected reply while removing this item.".to_string()),
        SyncError::UnknownItem(_) | SyncError::AlreadyInitialized => None,
    }
}

/// What the page does once a delete task ends
#[derive(Debug, Clone, PartialEq)]
pub enum DeleteReaction {
    /// The entry is gone; retry notices for it are stale
    ClearNotices,
    /// Show this text with a retry action
    Notify(String),
    /// Log only
    Quiet,
}

pub fn delete_reaction(result: &SyncResult<DeleteOutcome>) -> DeleteReaction {
    match result {
        Ok(DeleteOutcome::Removed { .. } | DeleteOutcome::AlreadyRemoved) => DeleteReaction::ClearNotices,
        Ok(DeleteOutcome::Coalesced) => DeleteReaction::Quiet,
        Err(err) => delete_failure_text(err).map_or(DeleteReaction::Quiet, DeleteReaction::Notify),
    }
}

/// Load state to record after `initialize` returns; `None` leaves it alone
pub fn load_state_after(result: &SyncResult<usize>) -> Option<LoadState> {
    match result {
        Ok(count) => Some(LoadState::Loaded(*count)),
        Err(SyncError::AlreadyInitialized) => None,
        Err(_) => Some(LoadState::Failed),
    }
}
