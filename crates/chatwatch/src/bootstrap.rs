use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Ensure the standard `~/.chatwatch/` directory hierarchy exists.
///
/// Creates the following directories if absent (including any missing parents):
/// - `~/.chatwatch/`
/// - `~/.chatwatch/logs/`
/// - `~/.chatwatch/cache/`
pub fn ensure_directories() -> anyhow::Result<()> {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let watch_dir = home.join(".chatwatch");
    std::fs::create_dir_all(&watch_dir)?;
    std::fs::create_dir_all(watch_dir.join("logs"))?;
    std::fs::create_dir_all(watch_dir.join("cache"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
///
/// The `log_file` parameter is accepted for forward-compatibility but file
/// logging is not yet wired – all output currently goes to stderr.
pub fn setup_logging(log_level: &str, _log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    // Map the CLI log-level names to tracing level names (tracing uses lowercase).
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ── test_ensure_directories ───────────────────────────────────────────────

    #[test]
    fn test_ensure_directories() {
        let tmp = TempDir::new().expect("tempdir");

        // Override HOME so that dirs::home_dir() resolves to our temp dir.
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", tmp.path());

        let result = ensure_directories();

        // Restore HOME.
        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }

        result.expect("ensure_directories should succeed");

        let watch_dir = tmp.path().join(".chatwatch");
        assert!(watch_dir.is_dir(), ".chatwatch dir must exist");
        assert!(watch_dir.join("logs").is_dir(), "logs subdir must exist");
        assert!(watch_dir.join("cache").is_dir(), "cache subdir must exist");
    }
}
