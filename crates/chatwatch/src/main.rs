mod bootstrap;

use std::time::Duration;

use anyhow::Result;
use tokio::sync::{mpsc, watch};

use watch_core::models::Status;
use watch_core::settings::Settings;
use watch_runtime::connection::ConnectionManager;
use watch_runtime::control::{spawn_control_task, MonitorClient};
use watch_ui::app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("chatwatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Server: {}, Secure: {}, Theme: {}",
        settings.server,
        settings.secure,
        settings.theme
    );

    let (ui_tx, ui_rx) = mpsc::channel(256);
    let (status_tx, status_rx) = watch::channel(Status::Idle);
    let (cmd_tx, cmd_rx) = mpsc::channel(8);

    // The event socket is a process-wide singleton, connected once, eagerly
    // at startup. Monitoring requests are independent of its lifecycle.
    let connection =
        ConnectionManager::new(settings.ws_endpoint(), status_tx.clone(), ui_tx.clone());
    connection.connect();

    let client = MonitorClient::new(
        settings.http_base(),
        settings.resolve_embed_domain(),
        Duration::from_secs(settings.request_timeout),
    )?;
    let control = spawn_control_task(client, cmd_rx, ui_tx, status_tx);

    let app = App::new(&settings.theme, settings.server.clone());

    // Run the TUI event loop. The loop exits on Esc / Ctrl+C inside the TUI.
    // We also listen for Ctrl+C at the OS level so that signals received
    // while the terminal is in raw mode are handled cleanly.
    tokio::select! {
        result = app.run(ui_rx, status_rx, cmd_tx) => {
            control.abort();
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Ctrl+C received; shutting down");
            control.abort();
        }
    }

    Ok(())
}
