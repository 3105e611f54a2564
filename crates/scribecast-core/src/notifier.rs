//! Per-connection update notifier: the poll-and-diff loop behind `/stream`.
//!
//! Each open SSE connection gets its own notifier task and its own memory of
//! the last seen timestamp. Nothing is shared across connections and nothing
//! is persisted.

use std::time::Duration;

use tokio::sync::mpsc;

use crate::entry::ResultEntry;
use crate::error::FetchError;
use crate::snapshot::SnapshotFetcher;

/// Outcome of one poll tick. Only `Emitted` crosses the transport boundary;
/// the other two exist so the swallow policy is an explicit branch.
#[derive(Debug)]
pub enum TickOutcome {
    /// A new trailing entry was observed and should be pushed to the client.
    Emitted(ResultEntry),
    /// Sequence empty, or the trailing entry is the one already seen.
    NoChange,
    /// The fetch failed; the tick is skipped and the loop keeps running.
    FetchFailed(FetchError),
}

/// Poll loop state for one stream connection.
///
/// The notifier only compares the last element of each fetched sequence to
/// its remembered timestamp. It is lossy by design: entries appended between
/// two ticks other than the final one are never emitted, and insertions or
/// amendments elsewhere in the sequence go unnoticed.
pub struct UpdateNotifier {
    fetcher: SnapshotFetcher,
    last_timestamp: Option<String>,
}

impl UpdateNotifier {
    pub fn new(fetcher: SnapshotFetcher) -> Self {
        Self {
            fetcher,
            last_timestamp: None,
        }
    }

    /// Run one tick: fetch the snapshot and decide whether its trailing
    /// entry is news.
    pub async fn poll_once(&mut self) -> TickOutcome {
        let entries = match self.fetcher.fetch().await {
            Ok(entries) => entries,
            Err(err) => return TickOutcome::FetchFailed(err),
        };
        let Some(last) = entries.last() else {
            return TickOutcome::NoChange;
        };
        if self.last_timestamp.as_deref() == Some(last.timestamp.as_str()) {
            return TickOutcome::NoChange;
        }
        self.last_timestamp = Some(last.timestamp.clone());
        TickOutcome::Emitted(last.clone())
    }

    /// Poll forever at `interval`, pushing each newly observed trailing
    /// entry into `tx`. Fetch failures are logged and skipped; the stream
    /// stays quiet during outages and recovers on a later tick.
    ///
    /// Returns when the receiving side is dropped (client disconnected), so
    /// the transport owns cancellation: no orphaned loops.
    pub async fn run(mut self, interval: Duration, tx: mpsc::Sender<ResultEntry>) {
        loop {
            match self.poll_once().await {
                TickOutcome::Emitted(entry) => {
                    tracing::info!("new result entry at {}", entry.timestamp);
                    if tx.send(entry).await.is_err() {
                        break;
                    }
                }
                TickOutcome::NoChange => {}
                TickOutcome::FetchFailed(err) => {
                    tracing::warn!("snapshot poll failed, skipping tick: {err}");
                }
            }
            tokio::select! {
                _ = tx.closed() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }
    }
}
