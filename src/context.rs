//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use leptos::prelude::*;
use leptos::task::spawn_local;

use list_sync::{HttpRemote, ItemId, ListSynchronizer};
use crate::models::{delete_reaction, load_state_after, DeleteReaction, LoadState};
use crate::store::{
    store_dismiss_notice, store_dismiss_notices_for, store_load_state_untracked, store_push_notice,
    store_set_load_state, AppStore,
};
use crate::surface::StoreSurface;
use crate::timer::GlooTimer;

pub type ItemSync = ListSynchronizer<HttpRemote, StoreSurface, GlooTimer>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// The synchronizer lives on the UI thread only
    sync: StoredValue<ItemSync, LocalStorage>,
    store: AppStore,
}

impl AppContext {
    pub fn new(sync: ItemSync, store: AppStore) -> Self {
        Self {
            sync: StoredValue::new_local(sync),
            store,
        }
    }

    /// Backend origin used by every request
    pub fn origin(&self) -> String {
        self.sync.with_value(|sync| sync.config().origin().to_string())
    }

    /// Run the one-time item list load
    ///
    /// Failures are only logged; the list stays empty.
    pub fn load_items(&self) {
        let store = self.store;
        if store_load_state_untracked(&store) != LoadState::Idle {
            log::debug!("[APP] Item list load already started");
            return;
        }
        let sync = self.sync.get_value();
        store_set_load_state(&store, LoadState::Loading);
        spawn_local(async move {
            let result = sync.initialize().await;
            if let Some(state) = load_state_after(&result) {
                store_set_load_state(&store, state);
            }
        });
    }

    /// Delete one item; a failure becomes a notice offering a retry
    pub fn delete_item(&self, id: ItemId) {
        let sync = self.sync.get_value();
        let store = self.store;
        spawn_local(async move {
            let result = sync.delete_item(&id).await;
            match delete_reaction(&result) {
                DeleteReaction::ClearNotices => store_dismiss_notices_for(&store, &id),
                DeleteReaction::Notify(text) => {
                    store_push_notice(&store, text, Some(id));
                }
                DeleteReaction::Quiet => log::debug!("[APP] Delete of {} ended as {:?}", id, result),
            }
        });
    }

    pub fn retry_delete(&self, notice_id: u32, id: ItemId) {
        store_dismiss_notice(&self.store, notice_id);
        self.delete_item(id);
    }

    pub fn dismiss_notice(&self, notice_id: u32) {
        store_dismiss_notice(&self.store, notice_id);
    }
}
