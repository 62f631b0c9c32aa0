//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.
//! Rows are written only through `StoreSurface`, which the synchronizer drives.

use leptos::prelude::*;
use reactive_stores::Store;
use list_sync::ItemId;
use crate::models::{ItemRow, LoadState, Notice};

#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Rendered item rows in server order
    pub rows: Vec<ItemRow>,
    /// Error notices, newest last
    pub notices: Vec<Notice>,
    pub load_state: LoadState,
    pub next_notice_id: u32,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

pub fn store_append_row(store: &AppStore, row: ItemRow) {
    store.rows().write().push(row);
}

pub fn store_remove_row(store: &AppStore, id: &ItemId) {
    store.rows().write().retain(|row| &row.id != id);
}

pub fn store_set_row_pending(store: &AppStore, id: &ItemId, pending: bool) {
    if let Some(row) = store.rows().write().iter_mut().find(|row| &row.id == id) {
        row.pending = pending;
    }
}

/// Tracked read of a row's pending flag
pub fn store_row_pending(store: &AppStore, id: &ItemId) -> bool {
    store.rows().read().iter().any(|row| &row.id == id && row.pending)
}

pub fn store_rows(store: &AppStore) -> Vec<ItemRow> {
    store.rows().get()
}

pub fn store_set_load_state(store: &AppStore, state: LoadState) {
    store.load_state().set(state);
}

pub fn store_load_state(store: &AppStore) -> LoadState {
    store.load_state().get()
}

pub fn store_load_state_untracked(store: &AppStore) -> LoadState {
    store.load_state().get_untracked()
}

pub fn store_notices(store: &AppStore) -> Vec<Notice> {
    store.notices().get()
}

/// Add a notice and return its id
pub fn store_push_notice(store: &AppStore, text: String, retry: Option<ItemId>) -> u32 {
    let id = store.next_notice_id().get_untracked();
    store.next_notice_id().set(id + 1);
    store.notices().write().push(Notice { id, text, retry });
    id
}

pub fn store_dismiss_notice(store: &AppStore, notice_id: u32) {
    store.notices().write().retain(|notice| notice.id != notice_id);
}

/// Drop every notice offering a retry for `id`
pub fn store_dismiss_notices_for(store: &AppStore, id: &ItemId) {
    store.notices().write().retain(|notice| notice.retry.as_ref() != Some(id));
}
