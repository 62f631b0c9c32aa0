//! Remote Collection Source
//!
//! Contract the synchronizer needs from the backend, plus the HTTP binding
//! for `GET /items` and `DELETE /items/{id}`.

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;

use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::model::{DeleteAck, Item, ItemId};

/// Longest slice of an error body kept as the rejection reason
const REASON_LIMIT: usize = 200;

/// Read and remove access to the remote item collection
///
/// Futures are polled on the UI thread and need not be `Send`.
#[async_trait(?Send)]
pub trait RemoteSource {
    /// Fetch the full collection in server order
    async fn list_items(&self) -> SyncResult<Vec<Item>>;

    /// Remove exactly one item
    async fn delete_item(&self, id: &ItemId) -> SyncResult<DeleteAck>;
}

/// `RemoteSource` over HTTP
#[derive(Debug, Clone)]
pub struct HttpRemote {
    client: reqwest::Client,
    origin: String,
}

impl HttpRemote {
    pub fn new(config: &SyncConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &SyncConfig) -> Self {
        Self {
            client,
            origin: config.origin().to_string(),
        }
    }

    pub fn items_url(&self) -> String {
        format!("{}/items", self.origin)
    }

    pub fn item_url(&self, id: &ItemId) -> String {
        format!("{}/items/{}", self.origin, utf8_percent_encode(id.as_str(), NON_ALPHANUMERIC))
    }
}

#[async_trait(?Send)]
impl RemoteSource for HttpRemote {
    async fn list_items(&self) -> SyncResult<Vec<Item>> {
        let response = self.client.get(self.items_url()).send().await?;
        read_json(response).await
    }

    async fn delete_item(&self, id: &ItemId) -> SyncResult<DeleteAck> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> SyncResult<T> {
    let status = response.status();
    if !status.is_success() {
        // an unreadable error body still reports the status
        let body = response.text().await.unwrap_or_default();
        return Err(SyncError::Rejected {
            status: status.as_u16(),
            reason: excerpt(&body),
        });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| SyncError::Malformed(e.to_string()))
}

fn excerpt(body: &str) -> String {
    match body.char_indices().nth(REASON_LIMIT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
