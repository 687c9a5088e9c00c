//! Tier routing and display-entry construction.
//!
//! Maps each decoded [`ClassificationEvent`] to exactly one display lane and
//! builds the escaped, display-ready [`RenderedEntry`] for it. This module is
//! pure policy; it has no knowledge of how entries end up on screen.

use crate::models::{ClassificationEvent, Tier};

// ── Lane ──────────────────────────────────────────────────────────────────────

/// One of the three ordered display buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lane {
    /// Messages classified `LIKELY_TOXIC`.
    LikelyToxic,
    /// Messages classified `TOXIC_ELEMENTS`, plus everything unclassifiable.
    Elements,
    /// Messages classified `NORMAL`.
    Normal,
}

impl Lane {
    /// Human-readable lane title used by feed renderers.
    pub fn title(self) -> &'static str {
        match self {
            Lane::LikelyToxic => "Likely Toxic",
            Lane::Elements => "Toxic Elements",
            Lane::Normal => "Normal",
        }
    }
}

/// Select the display lane for a tier.
///
/// `System` and unrecognised tiers share the middle lane; this is a
/// deliberate default arm, not an accident of match ordering.
pub fn lane_for(tier: Tier) -> Lane {
    match tier {
        Tier::LikelyToxic => Lane::LikelyToxic,
        Tier::ToxicElements => Lane::Elements,
        Tier::Normal => Lane::Normal,
        Tier::System | Tier::Unknown => Lane::Elements,
    }
}

// ── TagStyle / RenderedEntry ──────────────────────────────────────────────────

/// Visual weight of the classification tag on a rendered entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagStyle {
    /// Red tag: likely toxic.
    Bad,
    /// Amber tag: toxic elements or system notices.
    Mid,
    /// Green tag: normal chat.
    Good,
}

/// A display-ready feed entry. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedEntry {
    /// Author display name, HTML-escaped.
    pub author: String,
    /// Message body, HTML-escaped.
    pub text: String,
    /// Toxicity score as a fixed two-decimal string (`"0.00"` when unknown).
    pub score: String,
    /// Tag colour class.
    pub tag_style: TagStyle,
    /// Tag label text.
    pub tag_text: &'static str,
    /// Whether this entry carries the system-message marker.
    pub system: bool,
    /// Outbound "View User" link, when present.
    pub user_link: Option<String>,
}

/// Tag colour and label for a tier.
fn tag_for(tier: Tier) -> (TagStyle, &'static str) {
    match tier {
        Tier::LikelyToxic => (TagStyle::Bad, "Likely Toxic Chat"),
        Tier::ToxicElements => (TagStyle::Mid, "Toxic Elements in Chat"),
        Tier::System => (TagStyle::Mid, "System"),
        Tier::Normal | Tier::Unknown => (TagStyle::Good, "Normal Chat"),
    }
}

// ── Escaping / formatting ─────────────────────────────────────────────────────

/// Escape the five HTML-special characters.
///
/// Applied to every untrusted string before it reaches a renderer. The
/// ampersand must be replaced first so entities are not double-escaped.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Format a toxicity score for display: two decimals, `"0.00"` when unknown.
pub fn format_score(p_toxic: Option<f64>) -> String {
    match p_toxic {
        Some(p) => format!("{p:.2}"),
        None => "0.00".to_string(),
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

/// Route an event to its lane and build the rendered entry for it.
///
/// Every decoded event yields exactly one `(lane, entry)` pair; entries are
/// never merged or duplicated here.
pub fn route_event(evt: &ClassificationEvent) -> (Lane, RenderedEntry) {
    let (tag_style, tag_text) = tag_for(evt.tier);

    let entry = RenderedEntry {
        author: escape_html(&evt.author),
        text: escape_html(&evt.text),
        score: format_score(evt.p_toxic),
        tag_style,
        tag_text,
        system: evt.tier == Tier::System,
        user_link: evt.links.user_link().map(String::from),
    };

    (lane_for(evt.tier), entry)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
