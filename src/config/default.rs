//! Default configuration template and file creation utilities.
//!
//! Provides a commented TOML template that matches `Config::default()` and
//! functions to write it to the XDG config path.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::error::ConfigError;
use crate::config::xdg;

// ---------------------------------------------------------------------------
// Default TOML template
// ---------------------------------------------------------------------------

/// A commented TOML template with all default values.
///
/// Every value here must match `Config::default()` from `schema.rs`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# gridboard configuration
#
# All values shown below are the built-in defaults.
# Location: $XDG_CONFIG_HOME/gridboard/config.toml

# ==============================================================================
# Dashboard
# ==============================================================================

[dashboard]

# Start with the sample widgets (weather, counter, revenue, clock).
# Set to false to start with an empty grid.
seed_defaults = true

# ==============================================================================
# Grid
# ==============================================================================

[grid]

# Number of columns new widgets are packed into.
# Wide terminals show 4 columns, medium ones 3, narrow ones stack widgets.
columns = 3

# Terminal lines per grid row unit.
row_height = 4

# ==============================================================================
# TUI
# ==============================================================================

[tui]

# Redraw tick rate as a human-readable duration.
# Examples: "250ms", "500ms", "1s"
tick_rate = "250ms"

# ==============================================================================
# Weather
# ==============================================================================

[weather]

# Fetch current conditions from Open-Meteo.
enabled = true

# Location for weather widgets that don't set their own.
latitude = 37.7749
longitude = -122.4194

# Time between refreshes.
# Examples: "10m", "30m", "1h"
refresh_interval = "10m"

# ==============================================================================
# Logging
# ==============================================================================

[log]

# Logging verbosity level.
# Options: "error", "warn", "info", "debug", "trace"
# The GRIDBOARD_LOG environment variable overrides this.
level = "info"

# Log file for the TUI. Empty string means the default file under the
# state directory ($XDG_STATE_HOME/gridboard/gridboard.log).
# Other commands log to stderr.
file = ""
"#;

// ---------------------------------------------------------------------------
// File creation functions
// ---------------------------------------------------------------------------

/// Creates (or force-overwrites) the default config file.
///
/// - If the file exists and `force` is `false`, returns `ConfigError::AlreadyExists`.
/// - If the file exists and `force` is `true`, backs it up to `.toml.backup` first.
/// - Returns the path where the config was written.
pub fn create_default_config(force: bool) -> Result<PathBuf, ConfigError> {
    let path = xdg::config_path();
    create_default_config_at(&path, force)?;
    Ok(path)
}

/// [`create_default_config`] for an explicit path.
pub fn create_default_config_at(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() {
        if !force {
            return Err(ConfigError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        let backup_path = path.with_extension("toml.backup");
        fs::rename(path, &backup_path).map_err(|e| ConfigError::WriteError {
            path: backup_path.clone(),
            source: e,
        })?;
        tracing::info!("Backed up existing config to {}", backup_path.display());
    }

    write_default_config(path)?;
    tracing::info!("Wrote default configuration to {}", path.display());
    Ok(())
}

/// Writes the default template to `path`, creating parent dirs and setting 0600 permissions.
fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        xdg::ensure_dir(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|e| {
            ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            }
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
