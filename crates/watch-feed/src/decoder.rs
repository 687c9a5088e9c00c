//! Inbound message decoding.
//!
//! Each socket message carries exactly one JSON-encoded
//! [`ClassificationEvent`]. Only JSON syntax failures reject a message;
//! field-level oddities are normalised by the event model itself.

use serde_json::Value;
use watch_core::models::ClassificationEvent;

/// Decode one raw socket payload.
///
/// Returns `None` on any parse failure; the caller drops the message
/// silently (no status change, no crash). A syntactically valid payload that
/// is not a JSON object is dropped the same way, since it cannot carry any
/// event fields. Missing or malformed fields inside an object are tolerated
/// and degrade to neutral values rather than rejecting the event.
pub fn decode_event(raw: &str) -> Option<ClassificationEvent> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::debug!(error = %e, "dropping undecodable message");
            return None;
        }
    };
    if !value.is_object() {
        tracing::debug!("dropping non-object message");
        return None;
    }
    serde_json::from_value(value).ok()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
