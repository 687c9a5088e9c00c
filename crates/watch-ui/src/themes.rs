use ratatui::style::{Color, Modifier, Style};

use watch_core::models::Status;
use watch_core::router::TagStyle;

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned as the safe
/// default.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by watch-ui
/// components.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub success: Style,
    pub warning: Style,
    pub error: Style,

    // ── Classification tags ──────────────────────────────────────────────────
    /// Red tag: likely toxic chat.
    pub tag_bad: Style,
    /// Amber tag: toxic elements and system notices.
    pub tag_mid: Style,
    /// Green tag: normal chat.
    pub tag_good: Style,
    /// Marker appended to system entries.
    pub system_marker: Style,

    // ── Lanes ────────────────────────────────────────────────────────────────
    pub lane_border: Style,
    pub lane_title: Style,

    // ── Input / alerts ───────────────────────────────────────────────────────
    pub input: Style,
    pub alert: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Yellow),
            error: Style::default().fg(Color::Red),

            tag_bad: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            tag_mid: Style::default().fg(Color::Yellow),
            tag_good: Style::default().fg(Color::Green),
            system_marker: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),

            lane_border: Style::default().fg(Color::DarkGray),
            lane_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            input: Style::default().fg(Color::White),
            alert: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// Light-background terminal theme.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            success: Style::default().fg(Color::Green),
            warning: Style::default().fg(Color::Magenta),
            error: Style::default().fg(Color::Red),

            tag_bad: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            tag_mid: Style::default().fg(Color::Magenta),
            tag_good: Style::default().fg(Color::Green),
            system_marker: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            lane_border: Style::default().fg(Color::Gray),
            lane_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            input: Style::default().fg(Color::Black),
            alert: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        }
    }

    /// High-contrast classic theme for terminals without good colour support.
    pub fn classic() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            header_sparkle: Style::default(),
            separator: Style::default(),

            text: Style::default(),
            dim: Style::default().add_modifier(Modifier::DIM),
            bold: Style::default().add_modifier(Modifier::BOLD),
            label: Style::default(),
            value: Style::default().add_modifier(Modifier::BOLD),

            info: Style::default(),
            success: Style::default().add_modifier(Modifier::BOLD),
            warning: Style::default().add_modifier(Modifier::UNDERLINED),
            error: Style::default().add_modifier(Modifier::REVERSED),

            tag_bad: Style::default().add_modifier(Modifier::REVERSED),
            tag_mid: Style::default().add_modifier(Modifier::UNDERLINED),
            tag_good: Style::default(),
            system_marker: Style::default().add_modifier(Modifier::BOLD),

            lane_border: Style::default(),
            lane_title: Style::default().add_modifier(Modifier::BOLD),

            input: Style::default(),
            alert: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Resolve a theme by name. `"auto"` (and anything unrecognised) picks
    /// dark or light from the detected terminal background.
    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            "light" => Self::light(),
            "classic" => Self::classic(),
            _ => match detect_background() {
                BackgroundType::Light => Self::light(),
                _ => Self::dark(),
            },
        }
    }

    // ── Style lookups ────────────────────────────────────────────────────────

    /// The style for a classification tag.
    pub fn tag(&self, tag_style: TagStyle) -> Style {
        match tag_style {
            TagStyle::Bad => self.tag_bad,
            TagStyle::Mid => self.tag_mid,
            TagStyle::Good => self.tag_good,
        }
    }

    /// The style for the status chip.
    pub fn status(&self, status: Status) -> Style {
        match status {
            Status::Connected | Status::Running => self.success,
            Status::Disconnected => self.warning,
            Status::WsError => self.error,
            Status::Idle | Status::Connecting => self.info,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
