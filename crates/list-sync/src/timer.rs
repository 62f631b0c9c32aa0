//! Request Timeouts

use futures::future::{self, Either};
use std::future::Future;
use std::time::Duration;

use crate::error::{SyncError, SyncResult};

pub use futures::future::LocalBoxFuture;

/// Source of delays on the UI thread's executor
pub trait Timer {
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Race `request` against `limit`; losing the race is `SyncError::Timeout`
pub(crate) async fn bounded<T, F>(timer: &impl Timer, limit: Option<Duration>, request: F) -> SyncResult<T>
where
    F: Future<Output = SyncResult<T>>,
{
    let Some(limit) = limit else {
        return request.await;
    };
    let request = std::pin::pin!(request);
    match future::select(request, timer.sleep(limit)).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SyncError::Timeout(limit)),
    }
}
