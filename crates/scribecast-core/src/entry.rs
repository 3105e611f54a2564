//! One transcription record as stored in the daily results blob.

use serde::{Deserialize, Serialize};

/// A single STT result entry. Only `timestamp` is interpreted (the notifier
/// compares it to detect appends); every other field (`stt_text`,
/// `ai_summary`, `audio_filename`, ...) is carried opaquely and forwarded
/// to clients unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    /// Opaque orderable token set by the upstream STT writer,
    /// e.g. "2025-01-30 10:00:00".
    pub timestamp: String,
    /// Everything else in the record, passed through verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
