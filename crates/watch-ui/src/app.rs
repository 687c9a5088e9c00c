//! Main application state and TUI event loop for chatwatch.
//!
//! [`App`] owns the theme, the feed store, the input field, and the last
//! observed status. It drives the dashboard event loop: draw, poll the
//! keyboard, drain runtime events, repeat.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tokio::sync::{mpsc, watch};

use watch_core::models::Status;
use watch_feed::feed::{FeedSink, FeedStore};
use watch_runtime::embed::ActiveStream;
use watch_runtime::events::{ControlCommand, UiEvent};

use crate::dashboard_view::{self, DashboardData};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the chatwatch TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Backend address shown in the header.
    pub server: String,
    /// Current contents of the stream input field.
    pub input: String,
    /// Active user alert (extraction failure, backend rejection, timeout).
    pub alert: Option<String>,
    /// Last observed connection status.
    pub status: Status,
    /// The three display lanes.
    pub feed: FeedStore,
    /// Embed targets once monitoring has started.
    pub active: Option<ActiveStream>,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, server: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            server,
            input: String::new(),
            alert: None,
            status: Status::Idle,
            feed: FeedStore::new(),
            active: None,
            should_quit: false,
        }
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the dashboard event loop.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// the terminal loop stays on the current thread while runtime updates
    /// arrive on the async channels via `try_recv`. The loop exits on Esc or
    /// Ctrl+C; printable keys belong to the input field.
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::Receiver<UiEvent>,
        mut status_rx: watch::Receiver<Status>,
        cmd_tx: mpsc::Sender<ControlCommand>,
    ) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            // Status is last-write-wins: only the current value matters.
            self.status = *status_rx.borrow_and_update();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key, &cmd_tx);
                    }
                }
            }

            // Drain any pending runtime updates (non-blocking).
            loop {
                match ui_rx.try_recv() {
                    Ok(update) => self.apply_event(update),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── State transitions ─────────────────────────────────────────────────────

    /// Apply one runtime update to the application state.
    pub fn apply_event(&mut self, update: UiEvent) {
        match update {
            UiEvent::Classified { lane, entry } => self.feed.insert(lane, entry),
            UiEvent::MonitorStarted(stream) => {
                self.alert = None;
                self.active = Some(stream);
            }
            UiEvent::MonitorFailed(message) => self.alert = Some(message),
        }
    }

    /// Take the current input as a start command, if it is non-empty.
    ///
    /// Clears any previous alert; the input itself stays visible so the user
    /// can see what was submitted.
    pub fn submit_input(&mut self) -> Option<ControlCommand> {
        let raw = self.input.trim();
        if raw.is_empty() {
            return None;
        }
        self.alert = None;
        Some(ControlCommand::Start(raw.to_string()))
    }

    // ── Private helpers ───────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent, cmd_tx: &mpsc::Sender<ControlCommand>) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Enter => {
                if let Some(command) = self.submit_input() {
                    // A full command queue means a start is already in
                    // flight; dropping the extra submit matches the
                    // single-request control surface.
                    let _ = cmd_tx.try_send(command);
                }
            }
            KeyCode::Backspace => {
                let _ = self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    /// Render the current application state into `frame`.
    fn render(&self, frame: &mut Frame) {
        let clock = chrono::Local::now().format("%H:%M:%S").to_string();
        let data = DashboardData {
            server: &self.server,
            status: self.status,
            clock: &clock,
            input: &self.input,
            alert: self.alert.as_deref(),
            feed: &self.feed,
            active: self.active.as_ref(),
        };
        dashboard_view::render_dashboard(frame, frame.area(), &data, &self.theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
