//! Scribecast core: object-store access, daily snapshot fetching, and the
//! per-connection update notifier behind the live STT results dashboard.
//!
//! The gateway add-on owns the HTTP surface; everything with state or store
//! I/O lives here so it can be exercised against an in-memory fake store.

pub mod config;
pub mod entry;
pub mod error;
pub mod notifier;
pub mod snapshot;
pub mod store;

pub use config::StoreConfig;
pub use entry::ResultEntry;
pub use error::{ConfigError, FetchError, StoreError};
pub use notifier::{TickOutcome, UpdateNotifier};
pub use snapshot::{daily_result_key, todays_result_key, SnapshotFetcher};
pub use store::{ObjectStore, S3Store};
