//! List Synchronizer
//!
//! Keeps an ordered, client-side view of a remote item collection in step
//! with the server through one initial load and per-item deletions.
//! The view model lives here; rendering surfaces are projections of it.

mod config;
mod error;
mod model;
mod remote;
mod surface;
mod sync;
mod timer;
mod view;

#[cfg(test)]
mod tests;

pub use config::{DuplicateDeletePolicy, SyncConfig};
pub use error::{ErrorKind, SyncError, SyncResult};
pub use model::{DeleteAck, Item, ItemId};
pub use remote::{HttpRemote, RemoteSource};
pub use surface::{MemorySurface, RenderSurface, SurfaceRow};
pub use sync::{DeleteOutcome, ListSynchronizer};
pub use timer::{LocalBoxFuture, Timer};
pub use view::{CollectionView, DeleteAdmission, EntryState, ViewEntry};
