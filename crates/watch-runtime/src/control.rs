//! Backend control surface.
//!
//! [`MonitorClient`] turns a raw user input into a running monitoring
//! session: extract the stream identifier, ask the backend to start
//! monitoring, and build the embed activation targets from the confirmed
//! identifier. Completely independent from the event-socket lifecycle; the
//! socket is connected once, eagerly, at startup.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};

use watch_core::error::{Result, WatchError};
use watch_core::extractor::extract_video_id;
use watch_core::models::Status;

use crate::embed::ActiveStream;
use crate::events::{ControlCommand, UiEvent};

// ── Wire types ────────────────────────────────────────────────────────────────

/// Body of `POST /start`: the user's raw input, not the extracted identifier.
#[derive(Debug, Serialize)]
struct StartRequest {
    stream: String,
}

/// Backend response envelope for the start request.
///
/// An absent `ok` counts as a rejection, the same way the dashboard treated
/// a falsy value.
#[derive(Debug, Deserialize)]
struct StartResponse {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    video_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

// ── MonitorClient ─────────────────────────────────────────────────────────────

/// HTTP client for the backend's monitoring control endpoint.
pub struct MonitorClient {
    http: reqwest::Client,
    base_url: String,
    embed_domain: String,
    request_timeout: Duration,
}

impl MonitorClient {
    /// Create a client for `base_url` (scheme + host, no trailing slash).
    ///
    /// Every request carries `request_timeout`; an expired request surfaces
    /// as [`WatchError::RequestTimeout`] rather than waiting indefinitely.
    pub fn new(
        base_url: String,
        embed_domain: String,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| WatchError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url,
            embed_domain,
            request_timeout,
        })
    }

    /// Start monitoring the stream referenced by `raw_input`.
    ///
    /// Fails with [`WatchError::InvalidInput`] before any network traffic
    /// when no identifier can be extracted. On `ok: false` the backend's
    /// message (or a generic fallback) surfaces as
    /// [`WatchError::BackendRejected`]. On success the embeds are built from
    /// the backend-confirmed identifier, falling back to the locally
    /// extracted one when the response omits it.
    pub async fn start_monitoring(&self, raw_input: &str) -> Result<ActiveStream> {
        let extracted = extract_video_id(raw_input).ok_or(WatchError::InvalidInput)?;

        let request = StartRequest {
            stream: raw_input.to_string(),
        };
        let response = self
            .http
            .post(format!("{}/start", self.base_url))
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_http_error(e))?;
        let body: StartResponse = response
            .json()
            .await
            .map_err(|e| self.map_http_error(e))?;

        if !body.ok {
            let message = body.error.unwrap_or_else(|| "Connect failed".to_string());
            return Err(WatchError::BackendRejected(message));
        }

        let video_id = body.video_id.unwrap_or(extracted);
        Ok(ActiveStream::new(&video_id, &self.embed_domain))
    }

    fn map_http_error(&self, e: reqwest::Error) -> WatchError {
        if e.is_timeout() {
            WatchError::RequestTimeout(self.request_timeout)
        } else {
            WatchError::Http(e.to_string())
        }
    }
}

// ── Control task ──────────────────────────────────────────────────────────────

/// Spawn the control task: turns [`ControlCommand`]s from the UI into
/// backend calls and reports the outcome back as [`UiEvent`]s.
///
/// A successful start sets the status value to `Running` (overriding
/// whatever the socket last wrote, per last-write-wins). Failures surface as
/// [`UiEvent::MonitorFailed`] alerts and leave the status untouched.
pub fn spawn_control_task(
    client: MonitorClient,
    mut commands: mpsc::Receiver<ControlCommand>,
    events: mpsc::Sender<UiEvent>,
    status: watch::Sender<Status>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            match command {
                ControlCommand::Start(raw_input) => {
                    match client.start_monitoring(&raw_input).await {
                        Ok(stream) => {
                            tracing::info!(video_id = %stream.video_id, "monitoring started");
                            status.send_replace(Status::Running);
                            if events.send(UiEvent::MonitorStarted(stream)).await.is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "start monitoring failed");
                            if events
                                .send(UiEvent::MonitorFailed(e.to_string()))
                                .await
                                .is_err()
                            {
                                return;
                            }
                        }
                    }
                }
            }
        }
        tracing::debug!("command channel closed; control task exiting");
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // ── helpers ───────────────────────────────────────────────────────────

    fn client_for(server: &MockServer) -> MonitorClient {
        MonitorClient::new(
            server.uri(),
            "localhost".to_string(),
            Duration::from_secs(5),
        )
        .expect("client")
    }

    // ── happy path ────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_start_monitoring_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .and(body_json(json!({"stream": "https://youtu.be/dQw4w9WgXcQ"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "video_id": "dQw4w9WgXcQ"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .start_monitoring("https://youtu.be/dQw4w9WgXcQ")
            .await
            .expect("should start");

        assert_eq!(stream.video_id, "dQw4w9WgXcQ");
        assert_eq!(
            stream.player_url,
            "https://www.youtube.com/embed/dQw4w9WgXcQ?mute=1&autoplay=0"
        );
        assert!(stream.chat_url.contains("embed_domain=localhost"));
    }

    #[tokio::test]
    async fn test_backend_confirmed_id_wins_over_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "video_id": "BBBBBBBBBBB"
            })))
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .start_monitoring("AAAAAAAAAAA")
            .await
            .expect("should start");

        assert_eq!(stream.video_id, "BBBBBBBBBBB");
    }

    #[tokio::test]
    async fn test_missing_video_id_falls_back_to_extracted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let stream = client_for(&server)
            .start_monitoring("dQw4w9WgXcQ")
            .await
            .expect("should start");

        assert_eq!(stream.video_id, "dQw4w9WgXcQ");
    }

    // ── extraction failure ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_invalid_input_makes_no_backend_call() {
        let server = MockServer::start().await;
        // Zero expected requests: extraction fails before any HTTP.
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .start_monitoring("not a url")
            .await
            .expect_err("must fail");

        assert!(matches!(err, WatchError::InvalidInput));
    }

    // ── backend rejection ─────────────────────────────────────────────────

    #[tokio::test]
    async fn test_backend_rejection_surfaces_backend_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": false,
                "error": "stream is offline"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .start_monitoring("dQw4w9WgXcQ")
            .await
            .expect_err("must fail");

        match err {
            WatchError::BackendRejected(msg) => assert_eq!(msg, "stream is offline"),
            other => panic!("expected BackendRejected, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_backend_rejection_generic_fallback_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": false})))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .start_monitoring("dQw4w9WgXcQ")
            .await
            .expect_err("must fail");

        match err {
            WatchError::BackendRejected(msg) => assert_eq!(msg, "Connect failed"),
            other => panic!("expected BackendRejected, got {other:?}"),
        }
    }

    // ── timeout ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"ok": true, "video_id": "dQw4w9WgXcQ"}))
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let client = MonitorClient::new(
            server.uri(),
            "localhost".to_string(),
            Duration::from_millis(100),
        )
        .expect("client");

        let err = client
            .start_monitoring("dQw4w9WgXcQ")
            .await
            .expect_err("must time out");

        assert!(matches!(err, WatchError::RequestTimeout(_)));
    }

    // ── control task ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_control_task_success_sets_running() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/start"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "ok": true,
                "video_id": "dQw4w9WgXcQ"
            })))
            .mount(&server)
            .await;

        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let (status_tx, status_rx) = watch::channel(Status::Connected);
        let handle = spawn_control_task(client_for(&server), cmd_rx, event_tx, status_tx);

        cmd_tx
            .send(ControlCommand::Start("dQw4w9WgXcQ".to_string()))
            .await
            .expect("send command");

        let event = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
            .await
            .expect("timed out")
            .expect("channel open");
        match event {
            UiEvent::MonitorStarted(stream) => assert_eq!(stream.video_id, "dQw4w9WgXcQ"),
            other => panic!("expected MonitorStarted, got {other:?}"),
        }
        assert_eq!(*status_rx.borrow(), Status::Running);

        drop(cmd_tx);
        handle.await.expect("task");
    }

    #[tokio::test]
    async fn test_control_task_failure_reports_alert_and_keeps_status() {
        let server = MockServer::start().await;
        let (cmd_tx, cmd_rx) = mpsc::channel(4);
        let (event_tx, mut event_rx) = mpsc::channel(4);
        let (status_tx, status_rx) = watch::channel(Status::Connected);
        let handle = spawn_control_task(client_for(&server), cmd_rx, event_tx, status_tx);

        cmd_tx
            .send(ControlCommand::Start("not a url".to_string()))
            .await
            .expect("send command");

        let event = tokio::time::timeout(Duration::from_secs(5), event_rx.recv())
            .await
            .expect("timed out")
            .expect("channel open");
        match event {
            UiEvent::MonitorFailed(msg) => {
                assert_eq!(msg, "Could not extract video ID from input.");
            }
            other => panic!("expected MonitorFailed, got {other:?}"),
        }
        // Status is untouched by a failed start.
        assert_eq!(*status_rx.borrow(), Status::Connected);

        drop(cmd_tx);
        handle.await.expect("task");
    }
}
