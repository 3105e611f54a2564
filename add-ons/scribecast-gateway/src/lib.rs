//! HTTP surface for the live STT results dashboard.
//!
//! Split from `main.rs` so route tests can drive the router directly with a
//! fake object store.

pub mod routes;

pub use routes::{app, AppState};
