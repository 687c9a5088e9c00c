//! The live moderation dashboard view.
//!
//! Renders the header, the stream input line, the alert line, the three
//! classification lanes (newest entry on top) and the embed panel. All line
//! builders are plain functions over display data so they can be tested
//! without a terminal.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use watch_core::models::Status;
use watch_core::router::{Lane, RenderedEntry};
use watch_feed::feed::FeedStore;
use watch_runtime::embed::ActiveStream;

use crate::components::header::Header;
use crate::themes::Theme;

/// All data required to render the dashboard.
pub struct DashboardData<'a> {
    /// Backend address shown in the header.
    pub server: &'a str,
    /// Current connection status.
    pub status: Status,
    /// Formatted wall-clock string.
    pub clock: &'a str,
    /// Current contents of the stream input field.
    pub input: &'a str,
    /// Active user alert, if any.
    pub alert: Option<&'a str>,
    /// The three lanes of rendered entries.
    pub feed: &'a FeedStore,
    /// Active embed targets once monitoring has started.
    pub active: Option<&'a ActiveStream>,
}

// ── Formatting helpers ────────────────────────────────────────────────────────

/// Truncate a string to at most `max` display columns, appending `…` when
/// anything was cut.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let limit = max.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

// ── Line builders ─────────────────────────────────────────────────────────────

/// Build the display lines for one feed entry:
///
/// ```text
/// <author>  TOXIC: <score> [system]
/// <text>
/// <tag label>
/// View User <url>          (only when a link is present)
/// <blank separator>
/// ```
pub fn entry_lines(entry: &RenderedEntry, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut meta = vec![
        Span::styled(truncate_to_width(&entry.author, width / 2), theme.bold),
        Span::styled("  TOXIC: ", theme.label),
        Span::styled(entry.score.clone(), theme.value),
    ];
    if entry.system {
        meta.push(Span::styled(" [system]".to_string(), theme.system_marker));
    }

    let mut lines = vec![
        Line::from(meta),
        Line::from(Span::styled(
            truncate_to_width(&entry.text, width),
            theme.text,
        )),
        Line::from(Span::styled(entry.tag_text, theme.tag(entry.tag_style))),
    ];
    if let Some(link) = &entry.user_link {
        lines.push(Line::from(vec![
            Span::styled("View User ", theme.label),
            Span::styled(truncate_to_width(link, width.saturating_sub(10)), theme.info),
        ]));
    }
    lines.push(Line::from(""));
    lines
}

/// Build the embed panel lines.
pub fn embed_lines(active: Option<&ActiveStream>, theme: &Theme) -> Vec<Line<'static>> {
    match active {
        Some(stream) => vec![
            Line::from(vec![
                Span::styled("Stream  ", theme.label),
                Span::styled(stream.video_id.clone(), theme.value),
            ]),
            Line::from(vec![
                Span::styled("Player  ", theme.label),
                Span::styled(stream.player_url.clone(), theme.info),
            ]),
            Line::from(vec![
                Span::styled("Chat    ", theme.label),
                Span::styled(stream.chat_url.clone(), theme.info),
            ]),
        ],
        None => vec![Line::from(Span::styled(
            "No active stream. Paste a stream URL above and press Enter.",
            theme.dim,
        ))],
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render the full dashboard into `area`.
pub fn render_dashboard(frame: &mut Frame, area: Rect, data: &DashboardData, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(4), // header
        Constraint::Length(3), // input
        Constraint::Length(1), // alert
        Constraint::Min(8),    // lanes
        Constraint::Length(5), // embeds
    ])
    .split(area);

    let header = Header::new(data.server, data.status, data.clock, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    render_input(frame, chunks[1], data.input, theme);
    render_alert(frame, chunks[2], data.alert, theme);
    render_lanes(frame, chunks[3], data.feed, theme);
    render_embeds(frame, chunks[4], data.active, theme);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(input.to_string(), theme.input),
        Span::styled("█", theme.dim),
    ]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.lane_border)
        .title(" Stream URL or ID (Enter to start, Esc to quit) ");
    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_alert(frame: &mut Frame, area: Rect, alert: Option<&str>, theme: &Theme) {
    if let Some(message) = alert {
        let line = Line::from(Span::styled(format!("⚠ {message}"), theme.alert));
        frame.render_widget(Paragraph::new(line), area);
    }
}

fn render_lanes(frame: &mut Frame, area: Rect, feed: &FeedStore, theme: &Theme) {
    let columns = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);

    for (lane, column) in [Lane::LikelyToxic, Lane::Elements, Lane::Normal]
        .into_iter()
        .zip(columns.iter())
    {
        render_lane(frame, *column, lane, feed, theme);
    }
}

fn render_lane(frame: &mut Frame, area: Rect, lane: Lane, feed: &FeedStore, theme: &Theme) {
    let entries = feed.lane(lane);
    let title = format!(" {} ({}) ", lane.title(), entries.len());
    let inner_width = area.width.saturating_sub(2) as usize;
    let inner_height = area.height.saturating_sub(2) as usize;

    // Entries are stored newest-first; emit until the lane is full.
    let mut lines: Vec<Line> = Vec::new();
    for entry in entries {
        if lines.len() >= inner_height {
            break;
        }
        lines.extend(entry_lines(entry, inner_width, theme));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.lane_border)
        .title(Span::styled(title, theme.lane_title));
    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_embeds(frame: &mut Frame, area: Rect, active: Option<&ActiveStream>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.lane_border)
        .title(" Embeds ");
    frame.render_widget(
        Paragraph::new(Text::from(embed_lines(active, theme))).block(block),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
