//! Rendering Surface
//!
//! The on-screen side of the collection view. The synchronizer is the only
//! caller of these methods.

use crate::model::{Item, ItemId};

/// A container of discrete child elements, one per present item
pub trait RenderSurface {
    /// Append a row for `item` at the end of the container
    fn append(&mut self, item: &Item);

    /// Remove the row bound to `id`
    fn remove(&mut self, id: &ItemId);

    /// Mark whether a delete is in flight for `id`
    fn set_pending(&mut self, _id: &ItemId, _pending: bool) {}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceRow {
    pub id: ItemId,
    pub content: String,
    pub pending: bool,
}

/// Headless surface keeping rows in memory
#[derive(Debug, Default)]
pub struct MemorySurface {
    rows: Vec<SurfaceRow>,
    removals: usize,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[SurfaceRow] {
        &self.rows
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }

    pub fn content(&self, id: &ItemId) -> Option<&str> {
        self.row(id).map(|row| row.content.as_str())
    }

    pub fn is_pending(&self, id: &ItemId) -> bool {
        self.row(id).is_some_and(|row| row.pending)
    }

    /// Number of rows removed so far
    pub fn removals(&self) -> usize {
        self.removals
    }

    fn row(&self, id: &ItemId) -> Option<&SurfaceRow> {
        self.rows.iter().find(|row| &row.id == id)
    }
}

impl RenderSurface for MemorySurface {
    fn append(&mut self, item: &Item) {
        self.rows.push(SurfaceRow {
            id: item.id.clone(),
            content: item.content.clone(),
            pending: false,
        });
    }

    fn remove(&mut self, id: &ItemId) {
        let before = self.rows.len();
        self.rows.retain(|row| &row.id != id);
        self.removals += before - self.rows.len();
    }

    fn set_pending(&mut self, id: &ItemId, pending: bool) {
        if let Some(row) = self.rows.iter_mut().find(|row| &row.id == id) {
            row.pending = pending;
        }
    }
}
