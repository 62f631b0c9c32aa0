//! List Synchronizer
//!
//! Owns the collection view and the rendering surface, and reconciles both
//! with the remote source. Every surface mutation follows a view mutation in
//! the same synchronous step, so the two never disagree between awaits.

use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::model::{DeleteAck, Item, ItemId};
use crate::remote::RemoteSource;
use crate::surface::RenderSurface;
use crate::timer::{bounded, Timer};
use crate::view::{CollectionView, DeleteAdmission, EntryState, ViewEntry};

/// How a delete request ended without error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The remote confirmed and the entry was removed
    Removed { message: String },
    /// The entry had already been removed by an earlier confirmation
    AlreadyRemoved,
    /// Another request for the same id is in flight; nothing was sent
    Coalesced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

struct Shared<R, S, T> {
    remote: R,
    timer: T,
    config: SyncConfig,
    view: RefCell<CollectionView>,
    surface: RefCell<S>,
    phase: Cell<LoadPhase>,
}

/// Handle to the synchronizer; clones share the same view
pub struct ListSynchronizer<R, S, T> {
    shared: Rc<Shared<R, S, T>>,
}

impl<R, S, T> Clone for ListSynchronizer<R, S, T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<R, S, T> ListSynchronizer<R, S, T>
where
    R: RemoteSource,
    S: RenderSurface,
    T: Timer,
{
    pub fn new(remote: R, surface: S, timer: T, config: SyncConfig) -> Self {
        Self {
            shared: Rc::new(Shared {
                remote,
                timer,
                config,
                view: RefCell::new(CollectionView::new()),
                surface: RefCell::new(surface),
                phase: Cell::new(LoadPhase::Idle),
            }),
        }
    }

    /// Load the collection once and render one entry per item
    ///
    /// Returns the number of entries created.
    pub async fn initialize(&self) -> SyncResult<usize> {
        if self.shared.phase.get() != LoadPhase::Idle {
            log::warn!("[ListSync] initialize called more than once");
            return Err(SyncError::AlreadyInitialized);
        }
        self.shared.phase.set(LoadPhase::Loading);

        match self.fetch_items().await {
            Ok(items) => {
                let count = self.materialize(items);
                self.shared.phase.set(LoadPhase::Loaded);
                log::info!("[ListSync] Loaded {} items", count);
                Ok(count)
            }
            Err(err) => {
                self.shared.phase.set(LoadPhase::Failed);
                log::error!("[ListSync] Failed to load items: {}", err);
                Err(err)
            }
        }
    }

    /// Ask the remote to delete `id` and drop its entry once confirmed
    pub async fn delete_item(&self, id: &ItemId) -> SyncResult<DeleteOutcome> {
        let policy = self.shared.config.duplicate_deletes;
        let admission = self.shared.view.borrow_mut().begin_delete(id, policy);
        match admission {
            DeleteAdmission::Unknown => {
                log::warn!("[ListSync] Delete requested for unknown item {}", id);
                return Err(SyncError::UnknownItem(id.clone()));
            }
            DeleteAdmission::Removed => {
                log::debug!("[ListSync] Item {} already removed", id);
                return Ok(DeleteOutcome::AlreadyRemoved);
            }
            DeleteAdmission::InFlight => {
                log::debug!("[ListSync] Delete of {} already in flight", id);
                return Ok(DeleteOutcome::Coalesced);
            }
            DeleteAdmission::Send { first } => {
                if first {
                    self.shared.surface.borrow_mut().set_pending(id, true);
                }
            }
        }

        match self.request_delete(id).await {
            Ok(ack) => Ok(self.apply_confirmation(id, ack)),
            Err(err) if self.shared.view.borrow().is_removed(id) => {
                log::debug!("[ListSync] Ignoring late failure for removed item {}: {}", id, err);
                Ok(DeleteOutcome::AlreadyRemoved)
            }
            Err(err) => {
                self.apply_failure(id);
                log::error!("[ListSync] Failed to delete item {}: {}", id, err);
                Err(err)
            }
        }
    }

    /// Whether the initial load completed successfully
    pub fn is_loaded(&self) -> bool {
        self.shared.phase.get() == LoadPhase::Loaded
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.shared.view.borrow().ids()
    }

    pub fn entries(&self) -> Vec<ViewEntry> {
        self.shared.view.borrow().entries().to_vec()
    }

    pub fn len(&self) -> usize {
        self.shared.view.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.view.borrow().is_empty()
    }

    pub fn config(&self) -> &SyncConfig {
        &self.shared.config
    }

    /// Read access to the rendering surface
    pub fn surface(&self) -> Ref<'_, S> {
        self.shared.surface.borrow()
    }

    fn materialize(&self, items: Vec<Item>) -> usize {
        let mut fresh = Vec::with_capacity(items.len());
        {
            let mut view = self.shared.view.borrow_mut();
            for item in items {
                if view.insert(item.clone()) {
                    fresh.push(item);
                } else {
                    log::warn!("[ListSync] Skipping duplicate item {}", item.id);
                }
            }
        }

        let mut surface = self.shared.surface.borrow_mut();
        for item in &fresh {
            surface.append(item);
        }
        fresh.len()
    }

    fn apply_confirmation(&self, id: &ItemId, ack: DeleteAck) -> DeleteOutcome {
        if !self.shared.view.borrow_mut().confirm_deleted(id) {
            log::debug!("[ListSync] Repeated confirmation for {}", id);
            return DeleteOutcome::AlreadyRemoved;
        }
        self.shared.surface.borrow_mut().remove(id);
        log::info!("[ListSync] {}", ack.message);
        DeleteOutcome::Removed { message: ack.message }
    }

    fn apply_failure(&self, id: &ItemId) {
        let state = self.shared.view.borrow_mut().release(id);
        if state == Some(EntryState::Present) {
            self.shared.surface.borrow_mut().set_pending(id, false);
        }
    }

    async fn fetch_items(&self) -> SyncResult<Vec<Item>> {
        let limit = self.shared.config.request_timeout();
        let mut attempt = 0;
        loop {
            match bounded(&self.shared.timer, limit, self.shared.remote.list_items()).await {
                Err(err) if err.is_transient() && attempt < self.shared.config.transport_retries => {
                    attempt += 1;
                    log::warn!("[ListSync] Retrying item list ({}): {}", attempt, err);
                }
                result => return result,
            }
        }
    }

    async fn request_delete(&self, id: &ItemId) -> SyncResult<DeleteAck> {
        let limit = self.shared.config.request_timeout();
        let mut attempt = 0;
        loop {
            match bounded(&self.shared.timer, limit, self.shared.remote.delete_item(id)).await {
                Err(err) if err.is_transient() && attempt < self.shared.config.transport_retries => {
                    attempt += 1;
                    log::warn!("[ListSync] Retrying delete of {} ({}): {}", id, attempt, err);
                }
                result => return result,
            }
        }
    }
}
