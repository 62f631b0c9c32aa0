//! Collection View
//!
//! Ordered in-memory projection of the remote collection, independent of any
//! rendering surface. Entries only ever leave the view; confirmed deletions
//! are remembered so an id can never come back.

use std::collections::HashSet;

use crate::config::DuplicateDeletePolicy;
use crate::model::{Item, ItemId};

/// Lifecycle of a present entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryState {
    Present,
    /// Delete requests sent and not yet answered
    Deleting { in_flight: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewEntry {
    pub item: Item,
    pub state: EntryState,
}

/// Result of asking the view whether a delete request may be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteAdmission {
    /// Send the request; `first` is true when the entry just left `Present`
    Send { first: bool },
    /// A request is already in flight and the policy coalesces
    InFlight,
    /// Deletion was already confirmed
    Removed,
    /// The id was never in the view
    Unknown,
}

#[derive(Debug, Default)]
pub struct CollectionView {
    entries: Vec<ViewEntry>,
    removed: HashSet<ItemId>,
}

impl CollectionView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; returns false when its id is already known
    pub fn insert(&mut self, item: Item) -> bool {
        if self.removed.contains(&item.id) || self.position(&item.id).is_some() {
            return false;
        }
        self.entries.push(ViewEntry {
            item,
            state: EntryState::Present,
        });
        true
    }

    pub fn begin_delete(&mut self, id: &ItemId, policy: DuplicateDeletePolicy) -> DeleteAdmission {
        if self.removed.contains(id) {
            return DeleteAdmission::Removed;
        }
        let Some(entry) = self.entry_mut(id) else {
            return DeleteAdmission::Unknown;
        };
        match (entry.state, policy) {
            (EntryState::Present, _) => {
                entry.state = EntryState::Deleting { in_flight: 1 };
                DeleteAdmission::Send { first: true }
            }
            (EntryState::Deleting { .. }, DuplicateDeletePolicy::Coalesce) => DeleteAdmission::InFlight,
            (EntryState::Deleting { in_flight }, DuplicateDeletePolicy::Forward) => {
                entry.state = EntryState::Deleting { in_flight: in_flight + 1 };
                DeleteAdmission::Send { first: false }
            }
        }
    }

    /// Drop the entry after a confirmed deletion; true only on the first confirmation
    pub fn confirm_deleted(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.entries.remove(index);
        self.removed.insert(id.clone());
        true
    }

    /// Account for a failed delete request
    ///
    /// Returns the entry's new state, or `None` when the entry is gone.
    pub fn release(&mut self, id: &ItemId) -> Option<EntryState> {
        let entry = self.entry_mut(id)?;
        entry.state = match entry.state {
            EntryState::Deleting { in_flight } if in_flight > 1 => EntryState::Deleting {
                in_flight: in_flight - 1,
            },
            _ => EntryState::Present,
        };
        Some(entry.state)
    }

    pub fn get(&self, id: &ItemId) -> Option<&ViewEntry> {
        self.entries.iter().find(|entry| &entry.item.id == id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|entry| entry.item.id.clone()).collect()
    }

    pub fn entries(&self) -> &[ViewEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_removed(&self, id: &ItemId) -> bool {
        self.removed.contains(id)
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.item.id == id)
    }

    fn entry_mut(&mut self, id: &ItemId) -> Option<&mut ViewEntry> {
        self.entries.iter_mut().find(|entry| &entry.item.id == id)
    }
}
