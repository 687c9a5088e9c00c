//! Stream identifier extraction.
//!
//! Accepts the free-form text a user pastes into the dashboard (a bare
//! 11-character video ID or any of the common URL shapes around one) and
//! returns the identifier, or `None` when no identifier can be found.

use regex::Regex;

/// Extract an 11-character stream identifier from free-form input.
///
/// The trimmed input is returned unchanged when it already has the
/// identifier shape (`[A-Za-z0-9_-]{11}`). Otherwise the URL patterns are
/// tried in fixed priority order and the first capture wins:
///
/// 1. a `v=` query parameter,
/// 2. a `youtu.be/` short-link path segment,
/// 3. a `live/` path segment.
///
/// Pure and idempotent; extracting from an already-extracted identifier
/// returns it unchanged.
pub fn extract_video_id(input: &str) -> Option<String> {
    let s = input.trim();

    let id_shape = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("regex is valid");
    if id_shape.is_match(s) {
        return Some(s.to_string());
    }

    let patterns = [
        r"v=([A-Za-z0-9_-]{11})",
        r"youtu\.be/([A-Za-z0-9_-]{11})",
        r"live/([A-Za-z0-9_-]{11})",
    ];

    for pattern in patterns {
        let re = Regex::new(pattern).expect("regex is valid");
        if let Some(caps) = re.captures(s) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().to_string());
            }
        }
    }

    None
}

// ── Tests ─────────────────────────────────────────────────────────────────────
