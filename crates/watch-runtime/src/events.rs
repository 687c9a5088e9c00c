//! Channel contract between the background runtime and the presentation
//! layer.
//!
//! [`UiEvent`] flows runtime → UI over an `mpsc` channel; [`ControlCommand`]
//! flows UI → runtime. Connection status travels separately on a
//! `tokio::sync::watch` channel because it is a last-write-wins value with
//! no history.

use watch_core::router::{Lane, RenderedEntry};

use crate::embed::ActiveStream;

/// A command from the UI to the control task.
#[derive(Debug, Clone)]
pub enum ControlCommand {
    /// Start monitoring the stream referenced by the raw user input.
    Start(String),
}

/// An update from the background runtime for the UI to consume.
#[derive(Debug, Clone)]
pub enum UiEvent {
    /// A chat message was decoded and routed; insert it into its lane.
    Classified {
        /// Destination lane.
        lane: Lane,
        /// Display-ready entry.
        entry: RenderedEntry,
    },
    /// Monitoring started; the embeds are active.
    MonitorStarted(ActiveStream),
    /// Monitoring could not be started; show the message as a user alert.
    MonitorFailed(String),
}
