//! The three ordered display lanes.
//!
//! [`FeedStore`] holds rendered entries per lane, newest-first, unbounded
//! within the session. Insertion goes through the [`FeedSink`] trait so the
//! classification pipeline can be exercised without any display environment.

use std::collections::VecDeque;

use watch_core::router::{Lane, RenderedEntry};

// ── FeedSink ──────────────────────────────────────────────────────────────────

/// Anything that can accept a routed `(lane, entry)` pair.
pub trait FeedSink {
    /// Insert a freshly routed entry at the newest end of its lane.
    fn insert(&mut self, lane: Lane, entry: RenderedEntry);
}

// ── FeedStore ─────────────────────────────────────────────────────────────────

/// Holds the dashboard's three lanes of rendered entries.
///
/// Lanes are append-only from the newest end: entries never reorder, never
/// deduplicate, and never mutate after insertion.
#[derive(Debug, Default)]
pub struct FeedStore {
    likely: VecDeque<RenderedEntry>,
    elements: VecDeque<RenderedEntry>,
    normal: VecDeque<RenderedEntry>,
}

impl FeedStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries of one lane, newest first.
    pub fn lane(&self, lane: Lane) -> &VecDeque<RenderedEntry> {
        match lane {
            Lane::LikelyToxic => &self.likely,
            Lane::Elements => &self.elements,
            Lane::Normal => &self.normal,
        }
    }

    /// Number of entries in one lane.
    pub fn lane_len(&self, lane: Lane) -> usize {
        self.lane(lane).len()
    }

    /// Total number of entries across all lanes.
    pub fn len(&self) -> usize {
        self.likely.len() + self.elements.len() + self.normal.len()
    }

    /// Whether every lane is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lane_mut(&mut self, lane: Lane) -> &mut VecDeque<RenderedEntry> {
        match lane {
            Lane::LikelyToxic => &mut self.likely,
            Lane::Elements => &mut self.elements,
            Lane::Normal => &mut self.normal,
        }
    }
}

impl FeedSink for FeedStore {
    fn insert(&mut self, lane: Lane, entry: RenderedEntry) {
        self.lane_mut(lane).push_front(entry);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use watch_core::router::TagStyle;

    // ── helpers ───────────────────────────────────────────────────────────

    fn entry(text: &str) -> RenderedEntry {
        RenderedEntry {
            author: "a".to_string(),
            text: text.to_string(),
            score: "0.00".to_string(),
            tag_style: TagStyle::Good,
            tag_text: "Normal Chat",
            system: false,
            user_link: None,
        }
    }

    // ── insertion order ───────────────────────────────────────────────────

    #[test]
    fn test_newest_entry_is_first() {
        let mut store = FeedStore::new();
        store.insert(Lane::Normal, entry("E1"));
        store.insert(Lane::Normal, entry("E2"));

        let lane = store.lane(Lane::Normal);
        assert_eq!(lane.len(), 2);
        // E2 arrived later, so it sits above E1.
        assert_eq!(lane[0].text, "E2");
        assert_eq!(lane[1].text, "E1");
    }

    #[test]
    fn test_existing_entries_never_reorder() {
        let mut store = FeedStore::new();
        for i in 0..5 {
            store.insert(Lane::Elements, entry(&format!("E{i}")));
        }
        let texts: Vec<&str> = store
            .lane(Lane::Elements)
            .iter()
            .map(|e| e.text.as_str())
            .collect();
        assert_eq!(texts, ["E4", "E3", "E2", "E1", "E0"]);
    }

    // ── lane independence ─────────────────────────────────────────────────

    #[test]
    fn test_lanes_are_independent() {
        let mut store = FeedStore::new();
        store.insert(Lane::LikelyToxic, entry("bad"));
        store.insert(Lane::Normal, entry("fine"));

        assert_eq!(store.lane_len(Lane::LikelyToxic), 1);
        assert_eq!(store.lane_len(Lane::Elements), 0);
        assert_eq!(store.lane_len(Lane::Normal), 1);
        assert_eq!(store.len(), 2);
    }

    // ── no deduplication ──────────────────────────────────────────────────

    #[test]
    fn test_identical_entries_are_not_merged() {
        let mut store = FeedStore::new();
        store.insert(Lane::Normal, entry("same"));
        store.insert(Lane::Normal, entry("same"));
        assert_eq!(store.lane_len(Lane::Normal), 2);
    }

    // ── empty ─────────────────────────────────────────────────────────────

    #[test]
    fn test_empty_store() {
        let store = FeedStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
    }
}
