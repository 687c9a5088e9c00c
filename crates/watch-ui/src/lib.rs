//! Terminal UI layer for chatwatch.
//!
//! Provides themes, the header component, the three-lane dashboard view, and
//! the main application event loop built on top of [`ratatui`] for rendering
//! the live moderation feed in the terminal.

pub mod app;
pub mod components;
pub mod dashboard_view;
pub mod themes;

pub use watch_core as core;
