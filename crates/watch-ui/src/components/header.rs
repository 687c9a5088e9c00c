use ratatui::text::{Line, Span};

use watch_core::models::Status;

use crate::themes::Theme;

/// Decorative sparkle string placed either side of the application title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Application title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Server, status chip and wall-clock in `[ server | status | clock ]`
///    format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Backend address the dashboard talks to (e.g. "127.0.0.1:8000").
    pub server: &'a str,
    /// Current connection status (the status chip).
    pub status: Status,
    /// Formatted wall-clock string (e.g. "14:03:59").
    pub clock: &'a str,
    /// Theme providing colour styles for each part of the header.
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    /// Construct a new header.
    pub fn new(server: &'a str, status: Status, clock: &'a str, theme: &'a Theme) -> Self {
        Self {
            server,
            status,
            clock,
            theme,
        }
    }

    /// Render the header as a `Vec<Line>` containing exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let separator = "=".repeat(60);

        vec![
            // Title line.
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" CHATWATCH LIVE CHAT MONITOR ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            // Separator line.
            Line::from(Span::styled(separator, self.theme.separator)),
            // Server / status / clock info line.
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.server, self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.status.to_string(), self.theme.status(self.status)),
                Span::styled(" | ", self.theme.label),
                Span::styled(self.clock, self.theme.value),
                Span::styled(" ]", self.theme.label),
            ]),
            // Empty line.
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
