//! Snapshot Fetcher tests against an in-memory fake store.
//!
//! Covers the absent-key empty state, pass-through fidelity, idempotence,
//! and the store-fault / malformed-blob error split.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use scribecast_core::{todays_result_key, FetchError, ObjectStore, SnapshotFetcher, StoreError};

/// In-memory stand-in for the S3 store. `fail_all` forces every call into
/// a store fault to exercise the error path.
#[derive(Default)]
struct FakeStore {
    objects: Mutex<HashMap<String, Bytes>>,
    fail_all: Mutex<Option<String>>,
}

impl FakeStore {
    fn put(&self, key: &str, blob: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert(key.to_string(), Bytes::from(blob.to_string()));
    }

    fn fail_with(&self, message: &str) {
        *self.fail_all.lock().unwrap() = Some(message.to_string());
    }
}

#[async_trait]
impl ObjectStore for FakeStore {
    async fn get_object(&self, key: &str) -> Result<Option<Bytes>, StoreError> {
        if let Some(message) = self.fail_all.lock().unwrap().clone() {
            return Err(StoreError::fault("InternalError", message));
        }
        Ok(self.objects.lock().unwrap().get(key).cloned())
    }

    async fn presigned_get_url(
        &self,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, StoreError> {
        Ok(format!(
            "https://fake.store/{key}?expires={}",
            expires_in.as_secs()
        ))
    }
}

fn fetcher(store: &Arc<FakeStore>) -> SnapshotFetcher {
    SnapshotFetcher::new(Arc::clone(store) as Arc<dyn ObjectStore>)
}

#[tokio::test]
async fn absent_key_yields_empty_sequence() {
    let store = Arc::new(FakeStore::default());
    let entries = fetcher(&store).fetch().await.expect("fetch");
    assert!(entries.is_empty());
}

#[tokio::test]
async fn returns_stored_sequence_unmodified() {
    let store = Arc::new(FakeStore::default());
    store.put(
        &todays_result_key(),
        r#"[
            {"timestamp":"2025-01-30 10:00:00","stt_text":"hello","ai_summary":"greeting","audio_filename":"call1.wav"},
            {"timestamp":"2025-01-30 10:01:00","stt_text":"bye","ai_summary":"farewell","audio_filename":"call2.wav"}
        ]"#,
    );

    let entries = fetcher(&store).fetch().await.expect("fetch");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].timestamp, "2025-01-30 10:00:00");
    assert_eq!(entries[1].timestamp, "2025-01-30 10:01:00");
    // Opaque payload fields survive the round trip untouched.
    assert_eq!(entries[0].extra["stt_text"], "hello");
    assert_eq!(entries[1].extra["audio_filename"], "call2.wav");
}

#[tokio::test]
async fn fetch_is_idempotent_without_upstream_writes() {
    let store = Arc::new(FakeStore::default());
    store.put(
        &todays_result_key(),
        r#"[{"timestamp":"2025-01-30 10:00:00","stt_text":"hello"}]"#,
    );

    let fetcher = fetcher(&store);
    let first = fetcher.fetch().await.expect("first fetch");
    let second = fetcher.fetch().await.expect("second fetch");
    assert_eq!(first, second);
}

#[tokio::test]
async fn store_fault_propagates_with_message() {
    let store = Arc::new(FakeStore::default());
    store.fail_with("connection refused");

    let err = fetcher(&store).fetch().await.expect_err("must fail");
    match err {
        FetchError::Store(store_err) => {
            assert!(store_err.to_string().contains("connection refused"));
        }
        other => panic!("expected store fault, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_blob_is_a_distinct_error() {
    let store = Arc::new(FakeStore::default());
    store.put(&todays_result_key(), "{ not json ");

    let err = fetcher(&store).fetch().await.expect_err("must fail");
    assert!(matches!(err, FetchError::Malformed(_)));
}
