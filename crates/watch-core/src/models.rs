use std::fmt;

use serde::de::Deserializer;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

// ── Tier ──────────────────────────────────────────────────────────────────────

/// Severity classification assigned to a single chat message by the producer.
///
/// The wire labels are `LIKELY_TOXIC`, `TOXIC_ELEMENTS`, `NORMAL` and
/// `SYSTEM`. Anything else (including an absent or non-string value)
/// normalises to [`Tier::Unknown`] so that a single odd message can never
/// take the whole feed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tier {
    /// Probability at or above the producer's upper threshold.
    LikelyToxic,
    /// Probability between the producer's two thresholds.
    ToxicElements,
    /// Probability below the lower threshold.
    Normal,
    /// Producer-side notice (e.g. a backend error report), not a chat message.
    System,
    /// Absent or unrecognised classification label.
    #[default]
    Unknown,
}

impl Tier {
    /// Map a wire label to a tier. Unrecognised labels yield [`Tier::Unknown`].
    pub fn from_label(label: &str) -> Self {
        match label {
            "LIKELY_TOXIC" => Tier::LikelyToxic,
            "TOXIC_ELEMENTS" => Tier::ToxicElements,
            "NORMAL" => Tier::Normal,
            "SYSTEM" => Tier::System,
            _ => Tier::Unknown,
        }
    }

    /// The canonical wire label for this tier.
    pub fn label(self) -> &'static str {
        match self {
            Tier::LikelyToxic => "LIKELY_TOXIC",
            Tier::ToxicElements => "TOXIC_ELEMENTS",
            Tier::Normal => "NORMAL",
            Tier::System => "SYSTEM",
            Tier::Unknown => "UNKNOWN",
        }
    }
}

impl<'de> Deserialize<'de> for Tier {
    /// Lenient: any non-string JSON value (or an unknown label) becomes
    /// [`Tier::Unknown`] instead of failing the whole event.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(Tier::from_label).unwrap_or_default())
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

// ── EventLinks ────────────────────────────────────────────────────────────────

/// Optional outbound reference URLs attached to a classification event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventLinks {
    /// Link to the stream's native chat page.
    pub open_chat: Option<String>,
    /// Link to the stream's watch page.
    pub open_watch: Option<String>,
    /// Direct link to the message author's profile.
    pub user: Option<String>,
    /// Search link for the message author, used when `user` is absent.
    pub search_user: Option<String>,
}

impl EventLinks {
    /// The action link for "View User": `user` wins, `search_user` is the
    /// substitute. `None` when neither is present and non-empty.
    pub fn user_link(&self) -> Option<&str> {
        self.user.as_deref().or(self.search_user.as_deref())
    }
}

impl<'de> Deserialize<'de> for EventLinks {
    /// Lenient: a non-object `links` value yields the empty set, and empty
    /// or non-string members are dropped.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let Value::Object(map) = value else {
            return Ok(Self::default());
        };
        let pick = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(String::from)
        };
        Ok(Self {
            open_chat: pick("open_chat"),
            open_watch: pick("open_watch"),
            user: pick("user"),
            search_user: pick("search_user"),
        })
    }
}

// ── ClassificationEvent ───────────────────────────────────────────────────────

/// One classified chat message as delivered over the event socket.
///
/// Every field is optional on the wire; only JSON syntax errors reject a
/// message (handled by the decoder). Malformed fields degrade to neutral
/// values here instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationEvent {
    /// Producer-side timestamp string; display-only.
    #[serde(default, deserialize_with = "lenient_string")]
    pub ts: String,
    /// Identifier of the stream this message belongs to.
    #[serde(default, deserialize_with = "lenient_string")]
    pub video_id: String,
    /// Author display name; untrusted, may be empty.
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// Message body; untrusted, must be escaped before display.
    #[serde(default, deserialize_with = "lenient_string")]
    pub text: String,
    /// Toxicity probability in `[0, 1]`; `None` when absent or non-numeric.
    #[serde(default, deserialize_with = "lenient_probability")]
    pub p_toxic: Option<f64>,
    /// Severity classification; defaults to [`Tier::Unknown`].
    #[serde(default)]
    pub tier: Tier,
    /// Optional outbound reference URLs.
    #[serde(default)]
    pub links: EventLinks,
}

// ── Lenient field deserializers ───────────────────────────────────────────────

/// Accept any JSON value where a string is expected: scalars are rendered to
/// their display form, everything else becomes the empty string.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

/// Accept any JSON value where a probability is expected: non-numeric values
/// become `None` (unknown score).
fn lenient_probability<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_f64())
}

// ── Status ────────────────────────────────────────────────────────────────────

/// The single process-wide connection status surfaced to the user.
///
/// Last-write-wins with no history. `Idle` and `Connecting` only ever show
/// before the first transport event; the remaining four are the user-visible
/// vocabulary of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// No connection attempt has been made yet.
    #[default]
    Idle,
    /// A connection attempt is in flight.
    Connecting,
    /// The event socket is open.
    Connected,
    /// The event socket closed.
    Disconnected,
    /// The event socket failed.
    WsError,
    /// Monitoring was started successfully.
    Running,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Idle => "Idle",
            Status::Connecting => "Connecting",
            Status::Connected => "Connected",
            Status::Disconnected => "Disconnected",
            Status::WsError => "WS Error",
            Status::Running => "Running",
        };
        f.write_str(s)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Tier ──────────────────────────────────────────────────────────────

    #[test]
    fn test_tier_from_label_known() {
        assert_eq!(Tier::from_label("LIKELY_TOXIC"), Tier::LikelyToxic);
        assert_eq!(Tier::from_label("TOXIC_ELEMENTS"), Tier::ToxicElements);
        assert_eq!(Tier::from_label("NORMAL"), Tier::Normal);
        assert_eq!(Tier::from_label("SYSTEM"), Tier::System);
    }

    #[test]
    fn test_tier_from_label_unknown() {
        assert_eq!(Tier::from_label("SPAM"), Tier::Unknown);
        assert_eq!(Tier::from_label(""), Tier::Unknown);
        // Labels are case-sensitive on the wire.
        assert_eq!(Tier::from_label("normal"), Tier::Unknown);
    }

    #[test]
    fn test_tier_deserialize_string() {
        let tier: Tier = serde_json::from_str(r#""LIKELY_TOXIC""#).unwrap();
        assert_eq!(tier, Tier::LikelyToxic);
    }

    #[test]
    fn test_tier_deserialize_non_string_is_unknown() {
        let tier: Tier = serde_json::from_str("42").unwrap();
        assert_eq!(tier, Tier::Unknown);
        let tier: Tier = serde_json::from_str("null").unwrap();
        assert_eq!(tier, Tier::Unknown);
        let tier: Tier = serde_json::from_str("[1, 2]").unwrap();
        assert_eq!(tier, Tier::Unknown);
    }

    #[test]
    fn test_tier_serialize_label() {
        assert_eq!(
            serde_json::to_string(&Tier::ToxicElements).unwrap(),
            r#""TOXIC_ELEMENTS""#
        );
    }

    // ── EventLinks ────────────────────────────────────────────────────────

    #[test]
    fn test_links_user_wins_over_search_user() {
        let links = EventLinks {
            user: Some("https://example.com/u/1".to_string()),
            search_user: Some("https://example.com/search?q=a".to_string()),
            ..Default::default()
        };
        assert_eq!(links.user_link(), Some("https://example.com/u/1"));
    }

    #[test]
    fn test_links_search_user_substitutes() {
        let links = EventLinks {
            search_user: Some("https://example.com/search?q=a".to_string()),
            ..Default::default()
        };
        assert_eq!(links.user_link(), Some("https://example.com/search?q=a"));
    }

    #[test]
    fn test_links_none_when_absent() {
        assert_eq!(EventLinks::default().user_link(), None);
    }

    #[test]
    fn test_links_empty_strings_dropped() {
        let links: EventLinks =
            serde_json::from_str(r#"{"user": "", "search_user": ""}"#).unwrap();
        assert_eq!(links.user_link(), None);
    }

    #[test]
    fn test_links_non_object_is_empty() {
        let links: EventLinks = serde_json::from_str(r#""not an object""#).unwrap();
        assert_eq!(links, EventLinks::default());
        let links: EventLinks = serde_json::from_str("17").unwrap();
        assert_eq!(links, EventLinks::default());
    }

    #[test]
    fn test_links_non_string_member_dropped() {
        let links: EventLinks = serde_json::from_str(r#"{"user": 5}"#).unwrap();
        assert_eq!(links.user, None);
    }

    // ── ClassificationEvent ───────────────────────────────────────────────

    /// The exact payload shape the producer broadcasts.
    const FULL_PAYLOAD: &str = r#"{
        "ts": "2024-05-01 12:00:00",
        "video_id": "dQw4w9WgXcQ",
        "author": "viewer42",
        "text": "hello chat",
        "p_toxic": 0.07,
        "tier": "NORMAL",
        "links": {
            "open_chat": "https://www.youtube.com/live_chat?v=dQw4w9WgXcQ",
            "open_watch": "https://www.youtube.com/watch?v=dQw4w9WgXcQ",
            "search_user": "https://www.youtube.com/results?search_query=viewer42"
        }
    }"#;

    #[test]
    fn test_event_full_payload() {
        let evt: ClassificationEvent = serde_json::from_str(FULL_PAYLOAD).unwrap();
        assert_eq!(evt.video_id, "dQw4w9WgXcQ");
        assert_eq!(evt.author, "viewer42");
        assert_eq!(evt.text, "hello chat");
        assert_eq!(evt.p_toxic, Some(0.07));
        assert_eq!(evt.tier, Tier::Normal);
        assert_eq!(
            evt.links.user_link(),
            Some("https://www.youtube.com/results?search_query=viewer42")
        );
    }

    #[test]
    fn test_event_empty_object() {
        let evt: ClassificationEvent = serde_json::from_str("{}").unwrap();
        assert_eq!(evt.author, "");
        assert_eq!(evt.text, "");
        assert_eq!(evt.p_toxic, None);
        assert_eq!(evt.tier, Tier::Unknown);
        assert_eq!(evt.links, EventLinks::default());
    }

    #[test]
    fn test_event_non_numeric_p_toxic_is_unknown() {
        let evt: ClassificationEvent =
            serde_json::from_str(r#"{"p_toxic": "high"}"#).unwrap();
        assert_eq!(evt.p_toxic, None);
    }

    #[test]
    fn test_event_integer_p_toxic_accepted() {
        let evt: ClassificationEvent = serde_json::from_str(r#"{"p_toxic": 1}"#).unwrap();
        assert_eq!(evt.p_toxic, Some(1.0));
    }

    #[test]
    fn test_event_scalar_author_coerced() {
        let evt: ClassificationEvent = serde_json::from_str(r#"{"author": 42}"#).unwrap();
        assert_eq!(evt.author, "42");
        let evt: ClassificationEvent =
            serde_json::from_str(r#"{"author": {"name": "x"}}"#).unwrap();
        assert_eq!(evt.author, "");
    }

    #[test]
    fn test_event_malformed_links_tolerated() {
        let evt: ClassificationEvent =
            serde_json::from_str(r#"{"text": "hi", "links": "nope"}"#).unwrap();
        assert_eq!(evt.text, "hi");
        assert_eq!(evt.links, EventLinks::default());
    }

    // ── Status ────────────────────────────────────────────────────────────

    #[test]
    fn test_status_display_user_visible_values() {
        // Exact user-visible vocabulary of the dashboard.
        assert_eq!(Status::Connected.to_string(), "Connected");
        assert_eq!(Status::Disconnected.to_string(), "Disconnected");
        assert_eq!(Status::WsError.to_string(), "WS Error");
        assert_eq!(Status::Running.to_string(), "Running");
    }

    #[test]
    fn test_status_default_is_idle() {
        assert_eq!(Status::default(), Status::Idle);
        assert_eq!(Status::Idle.to_string(), "Idle");
    }
}
