//! Logging initialization.
//!
//! Configures the `tracing` subscriber with level filtering via the
//! `GRIDBOARD_LOG` environment variable, falling back to the configured
//! level when the variable is unset or invalid.
//!
//! The TUI owns the terminal, so it logs to a file. Every other command
//! logs to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Debug level for this run
//! GRIDBOARD_LOG=debug gridboard
//!
//! # Module-specific filtering
//! GRIDBOARD_LOG=gridboard::layout=trace,warn gridboard dump
//! ```

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::schema::{LogConfig, LogLevel};
use crate::config::xdg;

/// Environment variable holding filter directives.
pub const LOG_ENV: &str = "GRIDBOARD_LOG";

/// Builds the filter: `GRIDBOARD_LOG` if set and valid, `fallback` otherwise.
pub fn build_filter(fallback: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback.as_filter()))
}

/// Log file for the TUI: the configured path or the default under the
/// state directory.
pub fn log_file_path(config: &LogConfig) -> PathBuf {
    if config.file.trim().is_empty() {
        xdg::default_log_path()
    } else {
        xdg::expand_tilde(config.file.trim())
    }
}

/// Initialize logging to stderr.
///
/// Does nothing if a global subscriber is already set.
pub fn init_stderr(level: LogLevel) {
    let _ = fmt()
        .with_env_filter(build_filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize logging to an append-only file, creating parent directories.
///
/// Returns the path written to. Does nothing beyond opening the file if a
/// global subscriber is already set.
pub fn init_file(config: &LogConfig) -> std::io::Result<PathBuf> {
    let path = log_file_path(config);
    let file = open_log_file(&path)?;
    let _ = fmt()
        .with_env_filter(build_filter(config.level))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(path)
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            xdg::ensure_dir(parent)?;
        }
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn env_filter_parses_valid_directives() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            let filter = EnvFilter::try_new(level.as_filter());
            assert!(filter.is_ok(), "failed to parse directive: {}", level.as_filter());
        }
    }

    #[test]
    fn env_filter_parses_module_directive() {
        assert!(EnvFilter::try_new("gridboard::layout=trace,warn").is_ok());
    }

    #[test]
    #[serial(log_env)]
    fn build_filter_prefers_env_var() {
        let original = std::env::var(LOG_ENV).ok();
        std::env::set_var(LOG_ENV, "trace");
        let filter = build_filter(LogLevel::Error);
        match original {
            Some(v) => std::env::set_var(LOG_ENV, v),
            None => std::env::remove_var(LOG_ENV),
        }
        assert_eq!(filter.to_string(), "trace");
    }

    #[test]
    #[serial(log_env)]
    fn build_filter_falls_back_to_level() {
        let original = std::env::var(LOG_ENV).ok();
        std::env::remove_var(LOG_ENV);
        let filter = build_filter(LogLevel::Warn);
        if let Some(v) = original {
            std::env::set_var(LOG_ENV, v);
        }
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn log_file_path_uses_configured_file() {
        let config = LogConfig {
            level: LogLevel::Info,
            file: "/tmp/gridboard-test.log".to_string(),
        };
        assert_eq!(log_file_path(&config), PathBuf::from("/tmp/gridboard-test.log"));
    }

    #[test]
    #[serial(xdg)]
    fn log_file_path_defaults_to_state_dir() {
        let original = std::env::var("XDG_STATE_HOME").ok();
        std::env::set_var("XDG_STATE_HOME", "/state");
        let path = log_file_path(&LogConfig::default());
        match original {
            Some(v) => std::env::set_var("XDG_STATE_HOME", v),
            None => std::env::remove_var("XDG_STATE_HOME"),
        }
        assert_eq!(path, PathBuf::from("/state/gridboard/gridboard.log"));
    }

    #[test]
    fn open_log_file_creates_parents() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("logs/deep/gridboard.log");
        open_log_file(&path).expect("opened");
        assert!(path.exists());
    }
}
