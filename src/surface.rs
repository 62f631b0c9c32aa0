//! Store-backed Rendering Surface
//!
//! Projects the synchronizer's view into `AppState::rows`; the item list
//! renders from there.

use list_sync::{Item, ItemId, RenderSurface};
use crate::models::ItemRow;
use crate::store::{store_append_row, store_remove_row, store_set_row_pending, AppStore};

#[derive(Clone, Copy)]
pub struct StoreSurface {
    store: AppStore,
}

impl StoreSurface {
    pub fn new(store: AppStore) -> Self {
        Self { store }
    }
}

impl RenderSurface for StoreSurface {
    fn append(&mut self, item: &Item) {
        store_append_row(&self.store, ItemRow::from(item));
    }

    fn remove(&mut self, id: &ItemId) {
        store_remove_row(&self.store, id);
    }

    fn set_pending(&mut self, id: &ItemId, pending: bool) {
        store_set_row_pending(&self.store, id, pending);
    }
}
