use clap::{CommandFactory, Parser};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Live chat toxicity dashboard for stream moderators
#[derive(Parser, Debug, Clone)]
#[command(
    name = "chatwatch",
    about = "Live chat toxicity dashboard for stream moderators",
    version
)]
pub struct Settings {
    /// Backend address (host:port) serving the start endpoint and event socket
    #[arg(long, default_value = "127.0.0.1:8000")]
    pub server: String,

    /// Talk to the backend over TLS (wss:// and https://)
    #[arg(long)]
    pub secure: bool,

    /// Domain reported to the chat embed (defaults to the server host)
    #[arg(long)]
    pub embed_domain: Option<String>,

    /// Seconds to wait for the backend start request before giving up
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..=300))]
    pub request_timeout: u64,

    /// Display theme
    #[arg(long, default_value = "auto", value_parser = ["light", "dark", "classic", "auto"])]
    pub theme: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Clear saved configuration
    #[arg(long)]
    pub clear: bool,
}

// ── Endpoint derivation ────────────────────────────────────────────────────────

impl Settings {
    /// WebSocket endpoint for the event stream, scheme-mapped from `secure`.
    pub fn ws_endpoint(&self) -> String {
        let scheme = if self.secure { "wss" } else { "ws" };
        format!("{scheme}://{}/ws", self.server)
    }

    /// Base URL for backend HTTP requests, scheme-mapped from `secure`.
    pub fn http_base(&self) -> String {
        let scheme = if self.secure { "https" } else { "http" };
        format!("{scheme}://{}", self.server)
    }

    /// Embedding domain reported to the chat embed.
    ///
    /// Explicit `--embed-domain` wins; otherwise the host part of `server`
    /// is used, with `"localhost"` as the final fallback.
    pub fn resolve_embed_domain(&self) -> String {
        if let Some(domain) = &self.embed_domain {
            if !domain.is_empty() {
                return domain.clone();
            }
        }
        match self.server.split(':').next() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => "localhost".to_string(),
        }
    }
}

// ── LastUsedParams ─────────────────────────────────────────────────────────────

/// Persisted last-used parameters saved to `~/.chatwatch/last_used.json`.
#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct LastUsedParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout: Option<u64>,
}

impl LastUsedParams {
    /// Return the default path to the persisted config file.
    /// Uses `~/.chatwatch/last_used.json`.
    pub fn config_path() -> PathBuf {
        Self::config_path_in(&dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    /// Return the config path rooted at `base_dir` (used for testing).
    pub fn config_path_in(base_dir: &std::path::Path) -> PathBuf {
        base_dir.join(".chatwatch").join("last_used.json")
    }

    /// Load persisted params from the default path.
    /// Returns `Default` when the file is absent or cannot be parsed.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load persisted params from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        serde_json::from_str(&content).unwrap_or_default()
    }

    /// Atomically write params to the default path, creating parent
    /// directories if needed.
    pub fn save(&self) -> Result<(), std::io::Error> {
        self.save_to(&Self::config_path())
    }

    /// Atomically write params to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;

        // Write to a temp file then rename for atomicity.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, &json)?;
        std::fs::rename(&tmp, path)?;

        Ok(())
    }

    /// Delete the default config file if it exists.
    pub fn clear() -> Result<(), std::io::Error> {
        Self::clear_at(&Self::config_path())
    }

    /// Delete the config file at an explicit path if it exists.
    pub fn clear_at(path: &std::path::Path) -> Result<(), std::io::Error> {
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}

// ── Settings impl ──────────────────────────────────────────────────────────────

impl Settings {
    /// Parse CLI arguments, merge with last-used params where no explicit CLI
    /// value was provided, and persist the result.
    pub fn load_with_last_used() -> Self {
        Self::load_with_last_used_impl(
            std::env::args_os().collect(),
            &LastUsedParams::config_path(),
        )
    }

    /// Full implementation – accepts args and an explicit config path so that
    /// tests can redirect to a temporary directory.
    pub fn load_with_last_used_impl(
        args: Vec<std::ffi::OsString>,
        config_path: &std::path::Path,
    ) -> Self {
        // Build raw ArgMatches so we can query ValueSource.
        let matches = Settings::command().get_matches_from(args.clone());

        // Parse into the typed struct using the same args.
        let mut settings = Settings::parse_from(args);

        if settings.clear {
            let _ = LastUsedParams::clear_at(config_path);
            return Self::apply_debug_override(settings);
        }

        let last = LastUsedParams::load_from(config_path);

        // Merge last-used values for fields that were NOT explicitly set on
        // the command line (CLI always wins).
        if !is_arg_explicitly_set(&matches, "server") {
            if let Some(v) = last.server {
                settings.server = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "secure") {
            if let Some(v) = last.secure {
                settings.secure = v;
            }
        }
        // NOTE: clap stores the arg id using the *field name* (underscores),
        // not the long-flag spelling (hyphens).
        if !is_arg_explicitly_set(&matches, "embed_domain") && settings.embed_domain.is_none() {
            settings.embed_domain = last.embed_domain;
        }
        if !is_arg_explicitly_set(&matches, "theme") {
            if let Some(v) = last.theme {
                settings.theme = v;
            }
        }
        if !is_arg_explicitly_set(&matches, "request_timeout") {
            if let Some(v) = last.request_timeout {
                settings.request_timeout = v;
            }
        }

        settings = Self::apply_debug_override(settings);

        // Persist current settings for next run.
        let params = LastUsedParams::from(&settings);
        let _ = params.save_to(config_path);

        settings
    }

    /// `--debug` overrides the configured log level.
    fn apply_debug_override(mut settings: Settings) -> Settings {
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }
        settings
    }
}

// ── Conversion ─────────────────────────────────────────────────────────────────

impl From<&Settings> for LastUsedParams {
    fn from(s: &Settings) -> Self {
        LastUsedParams {
            theme: Some(s.theme.clone()),
            server: Some(s.server.clone()),
            secure: Some(s.secure),
            embed_domain: s.embed_domain.clone(),
            request_timeout: Some(s.request_timeout),
        }
    }
}

// ── Helper: check if an arg was explicitly set on the command line ─────────────

/// Returns `true` when `name` was supplied explicitly on the command line
/// (not via default value or environment variable).
fn is_arg_explicitly_set(matches: &clap::ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(clap::parser::ValueSource::CommandLine)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
