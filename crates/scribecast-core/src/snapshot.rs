//! Daily result key resolution and one-shot snapshot fetching.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::entry::ResultEntry;
use crate::error::FetchError;
use crate::store::ObjectStore;

/// Storage key for a given day's results, `results/<YYYY-MM-DD>.json`.
pub fn daily_result_key(date: NaiveDate) -> String {
    format!("results/{}.json", date.format("%Y-%m-%d"))
}

/// Today's key per the server-local clock. Rolls over at local midnight,
/// which resets the visible dataset to whatever the new day's object holds
/// (empty while absent).
pub fn todays_result_key() -> String {
    daily_result_key(chrono::Local::now().date_naive())
}

/// Performs one full get-and-parse of the current day's result blob.
/// No retries, no caching.
#[derive(Clone)]
pub struct SnapshotFetcher {
    store: Arc<dyn ObjectStore>,
}

impl SnapshotFetcher {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// Fetch today's full sequence. A missing key is the normal
    /// start-of-day state and yields an empty sequence.
    pub async fn fetch(&self) -> Result<Vec<ResultEntry>, FetchError> {
        let key = todays_result_key();
        match self.store.get_object(&key).await? {
            Some(blob) => Ok(serde_json::from_slice(&blob)?),
            None => Ok(Vec::new()),
        }
    }
}
