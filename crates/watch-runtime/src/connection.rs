//! Persistent event-socket lifecycle.
//!
//! [`ConnectionManager`] owns the process's single WebSocket connection to
//! the classification producer, its state machine, and the status value
//! surfaced to the user. It never retries on its own; reconnection happens
//! only through a later [`ConnectionManager::connect`] call.

use std::sync::{Arc, Mutex};

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use watch_core::models::Status;
use watch_core::router::route_event;
use watch_feed::decoder::decode_event;

use crate::events::UiEvent;

// ── ConnState ─────────────────────────────────────────────────────────────────

/// Lifecycle state of the event socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnState {
    /// No connection attempt has been made.
    #[default]
    Idle,
    /// A connection attempt is in flight.
    Connecting,
    /// The socket is open and receiving messages.
    Open,
    /// The socket closed (remote close or end of stream).
    Closed,
    /// The socket failed (connect or read error).
    Error,
}

// ── ConnectionManager ─────────────────────────────────────────────────────────

/// Exclusive owner of the event socket.
///
/// Exactly one instance exists per process; the mutex-guarded state makes
/// [`ConnectionManager::connect`] idempotent while a connection is live, so
/// duplicate sockets cannot be created no matter how often it is called.
pub struct ConnectionManager {
    /// WebSocket endpoint, scheme-mapped from the configured security flag.
    endpoint: String,
    /// Shared lifecycle state, also written by the socket task.
    state: Arc<Mutex<ConnState>>,
    /// The process-wide status value (last-write-wins, no history).
    status: watch::Sender<Status>,
    /// Routed entries on their way to the feed renderer.
    events: mpsc::Sender<UiEvent>,
}

impl ConnectionManager {
    /// Create a manager for `endpoint`. No connection is attempted yet.
    pub fn new(
        endpoint: String,
        status: watch::Sender<Status>,
        events: mpsc::Sender<UiEvent>,
    ) -> Self {
        Self {
            endpoint,
            state: Arc::new(Mutex::new(ConnState::Idle)),
            status,
            events,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnState {
        *self.state.lock().expect("connection state mutex poisoned")
    }

    /// Current status value.
    pub fn status(&self) -> Status {
        *self.status.borrow()
    }

    /// Subscribe to status updates.
    pub fn subscribe_status(&self) -> watch::Receiver<Status> {
        self.status.subscribe()
    }

    /// Start a connection attempt unless one is already live.
    ///
    /// Returns `false` (and does nothing) when the state is `Connecting` or
    /// `Open`. Otherwise the state flips to `Connecting` before this call
    /// returns, so an immediately following `connect()` is a no-op, and the
    /// socket task is spawned.
    pub fn connect(&self) -> bool {
        {
            let mut state = self.state.lock().expect("connection state mutex poisoned");
            if matches!(*state, ConnState::Connecting | ConnState::Open) {
                let current = *state;
                tracing::debug!(state = ?current, "connect() ignored; connection already live");
                return false;
            }
            *state = ConnState::Connecting;
        }
        self.status.send_replace(Status::Connecting);

        let endpoint = self.endpoint.clone();
        let state = Arc::clone(&self.state);
        let status = self.status.clone();
        let events = self.events.clone();
        tokio::spawn(socket_task(endpoint, state, status, events));

        true
    }
}

// ── Socket task ───────────────────────────────────────────────────────────────

/// Connect, then pump messages through decode → route → UI channel until the
/// socket closes or fails.
async fn socket_task(
    endpoint: String,
    state: Arc<Mutex<ConnState>>,
    status: watch::Sender<Status>,
    events: mpsc::Sender<UiEvent>,
) {
    let mut ws = match connect_async(&endpoint).await {
        Ok((ws, _response)) => ws,
        Err(e) => {
            tracing::warn!(error = %e, endpoint = %endpoint, "event socket connect failed");
            set_state(&state, ConnState::Error);
            status.send_replace(Status::WsError);
            return;
        }
    };

    set_state(&state, ConnState::Open);
    status.send_replace(Status::Connected);
    tracing::info!(endpoint = %endpoint, "event socket open");

    loop {
        match ws.next().await {
            Some(Ok(Message::Text(raw))) => {
                // Decode failures are swallowed: no crash, no status change.
                let Some(evt) = decode_event(&raw) else {
                    continue;
                };
                let (lane, entry) = route_event(&evt);
                if events.send(UiEvent::Classified { lane, entry }).await.is_err() {
                    tracing::debug!("event channel closed; stopping socket task");
                    set_state(&state, ConnState::Closed);
                    status.send_replace(Status::Disconnected);
                    return;
                }
            }
            Some(Ok(Message::Close(_))) | None => {
                tracing::info!("event socket closed");
                set_state(&state, ConnState::Closed);
                status.send_replace(Status::Disconnected);
                return;
            }
            // Ping/pong/binary frames carry no events.
            Some(Ok(_)) => {}
            Some(Err(e)) => {
                tracing::warn!(error = %e, "event socket failed");
                set_state(&state, ConnState::Error);
                status.send_replace(Status::WsError);
                return;
            }
        }
    }
}

fn set_state(state: &Arc<Mutex<ConnState>>, next: ConnState) {
    *state.lock().expect("connection state mutex poisoned") = next;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
