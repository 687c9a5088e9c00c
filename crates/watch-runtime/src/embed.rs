//! Embed activation targets.
//!
//! The video player and native chat widget are opaque sinks: activating them
//! means handing each one a URL built from the stream identifier. This
//! module builds those URLs; it never drives an actual embed.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters escaped in the chat embed's domain parameter, matching
/// `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Player embed URL: muted and not auto-playing.
pub fn player_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{video_id}?mute=1&autoplay=0")
}

/// Native chat embed URL, parameterised with the embedding domain.
///
/// An empty domain falls back to `localhost`.
pub fn chat_url(video_id: &str, embed_domain: &str) -> String {
    let domain = if embed_domain.is_empty() {
        "localhost"
    } else {
        embed_domain
    };
    let encoded = utf8_percent_encode(domain, COMPONENT);
    format!("https://www.youtube.com/live_chat?v={video_id}&embed_domain={encoded}")
}

// ── ActiveStream ──────────────────────────────────────────────────────────────

/// The product of a successful start request: the backend-confirmed stream
/// identifier and the two embed activation URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveStream {
    /// Backend-confirmed stream identifier.
    pub video_id: String,
    /// URL activating the video player embed.
    pub player_url: String,
    /// URL activating the native chat embed.
    pub chat_url: String,
}

impl ActiveStream {
    /// Build both embed targets for a confirmed identifier.
    pub fn new(video_id: &str, embed_domain: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            player_url: player_url(video_id),
            chat_url: chat_url(video_id, embed_domain),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
