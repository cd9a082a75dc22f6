//! TOML configuration schema types for gridboard.
//!
//! All structs derive `Deserialize` and `Serialize` with defaults via
//! `#[serde(default)]`, so any subset of the file is valid.
//!
//! Duration fields use human-readable strings (e.g. `"250ms"`, `"10m"`)
//! parsed by the `humantime` crate through the accessor methods.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::weather::Location;

/// Largest supported placement column count.
pub const MAX_COLUMNS: u16 = 12;

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration encompassing all sections.
///
/// Corresponds to the full TOML file structure:
/// ```toml
/// [dashboard]
/// [grid]
/// [tui]
/// [weather]
/// [log]
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Initial dashboard contents.
    pub dashboard: DashboardConfig,
    /// Grid geometry.
    pub grid: GridConfig,
    /// TUI behaviour.
    pub tui: TuiConfig,
    /// Weather widget data source.
    pub weather: WeatherConfig,
    /// Logging.
    pub log: LogConfig,
}

impl Config {
    /// Checks ranges and duration strings.
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_COLUMNS).contains(&self.grid.columns) {
            return Err(invalid(
                "grid.columns",
                format!("must be between 1 and {MAX_COLUMNS}, got {}", self.grid.columns),
            ));
        }
        if self.grid.row_height == 0 {
            return Err(invalid("grid.row_height", "must be at least 1".to_string()));
        }
        self.tui.tick_rate()?;
        self.weather.refresh_interval()?;
        if !(-90.0..=90.0).contains(&self.weather.latitude) {
            return Err(invalid(
                "weather.latitude",
                format!("must be between -90 and 90, got {}", self.weather.latitude),
            ));
        }
        if !(-180.0..=180.0).contains(&self.weather.longitude) {
            return Err(invalid(
                "weather.longitude",
                format!("must be between -180 and 180, got {}", self.weather.longitude),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: String) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message,
    }
}

fn parse_duration(field: &str, value: &str) -> Result<Duration, ConfigError> {
    let duration = humantime::parse_duration(value)
        .map_err(|e| invalid(field, format!("{value:?} is not a duration: {e}")))?;
    if duration.is_zero() {
        return Err(invalid(field, "must be greater than zero".to_string()));
    }
    Ok(duration)
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Initial dashboard contents.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Start with the four sample widgets instead of an empty grid.
    pub seed_defaults: bool,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            seed_defaults: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Grid geometry.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Column count new widgets are packed into.
    pub columns: u16,
    /// Terminal lines per grid row unit.
    pub row_height: u16,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: crate::store::DEFAULT_COLUMNS,
            row_height: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// TUI
// ---------------------------------------------------------------------------

/// TUI behaviour.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TuiConfig {
    /// Redraw tick rate as a human-readable duration (e.g. `"250ms"`).
    pub tick_rate: String,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            tick_rate: "250ms".to_string(),
        }
    }
}

impl TuiConfig {
    /// Parsed tick rate.
    pub fn tick_rate(&self) -> Result<Duration, ConfigError> {
        parse_duration("tui.tick_rate", &self.tick_rate)
    }
}

// ---------------------------------------------------------------------------
// Weather
// ---------------------------------------------------------------------------

/// Weather widget data source.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct WeatherConfig {
    /// Fetch from Open-Meteo at all.
    pub enabled: bool,
    /// Latitude used by weather widgets without their own location.
    pub latitude: f64,
    /// Longitude used by weather widgets without their own location.
    pub longitude: f64,
    /// Time between refreshes (e.g. `"10m"`).
    pub refresh_interval: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            latitude: Location::DEFAULT.latitude,
            longitude: Location::DEFAULT.longitude,
            refresh_interval: "10m".to_string(),
        }
    }
}

impl WeatherConfig {
    /// Parsed refresh interval.
    pub fn refresh_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration("weather.refresh_interval", &self.refresh_interval)
    }

    /// Default location.
    pub fn location(&self) -> Location {
        Location::new(self.latitude, self.longitude)
    }
}

// ---------------------------------------------------------------------------
// Log
// ---------------------------------------------------------------------------

/// Logging configuration from the `[log]` section.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Logging verbosity.
    pub level: LogLevel,
    /// Log file for the TUI. Empty string means the default file under the
    /// state directory.
    pub file: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            file: String::new(),
        }
    }
}

/// Log verbosity levels (kebab-case in TOML).
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    Warn,
    /// Informational messages (default).
    Info,
    /// Debug-level detail.
    Debug,
    /// Full trace output.
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config_all_fields() {
        let toml_str = r#"
[dashboard]
seed_defaults = false

[grid]
columns = 4
row_height = 6

[tui]
tick_rate = "100ms"

[weather]
enabled = false
latitude = 52.52
longitude = 13.41
refresh_interval = "30m"

[log]
level = "debug"
file = "/var/log/gridboard.log"
"#;
        let config: Config = toml::from_str(toml_str).expect("valid TOML should parse");
        assert!(!config.dashboard.seed_defaults);
        assert_eq!(config.grid.columns, 4);
        assert_eq!(config.grid.row_height, 6);
        assert_eq!(config.tui.tick_rate, "100ms");
        assert!(!config.weather.enabled);
        assert_eq!(config.weather.location(), Location::new(52.52, 13.41));
        assert_eq!(config.weather.refresh_interval, "30m");
        assert_eq!(config.log.level, LogLevel::Debug);
        assert_eq!(config.log.file, "/var/log/gridboard.log");
        config.validate().expect("valid values");
    }

    #[test]
    fn parse_empty_string_uses_all_defaults() {
        let config: Config = toml::from_str("").expect("empty string should parse");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn parse_unknown_fields_are_ignored() {
        let toml_str = r#"
unknown_key = "hello"

[grid]
future_field = 42
"#;
        let config: Config = toml::from_str(toml_str).expect("unknown fields should be ignored");
        assert_eq!(config.grid.columns, 3);
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert!(config.dashboard.seed_defaults);
        assert_eq!(config.grid.columns, 3);
        assert_eq!(config.grid.row_height, 4);
        assert_eq!(config.tui.tick_rate().ok(), Some(Duration::from_millis(250)));
        assert_eq!(
            config.weather.refresh_interval().ok(),
            Some(Duration::from_secs(600))
        );
        assert_eq!(config.weather.location(), Location::DEFAULT);
        assert_eq!(config.log.level, LogLevel::Info);
        assert!(config.log.file.is_empty());
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn validate_rejects_zero_columns() {
        let mut config = Config::default();
        config.grid.columns = 0;
        let err = config.validate().expect_err("zero columns");
        assert!(err.to_string().contains("grid.columns"));
    }

    #[test]
    fn validate_rejects_too_many_columns() {
        let mut config = Config::default();
        config.grid.columns = MAX_COLUMNS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_duration() {
        let mut config = Config::default();
        config.tui.tick_rate = "soon".to_string();
        let err = config.validate().expect_err("bad duration");
        assert!(err.to_string().contains("tui.tick_rate"));
    }

    #[test]
    fn validate_rejects_zero_duration() {
        let mut config = Config::default();
        config.weather.refresh_interval = "0s".to_string();
        let err = config.validate().expect_err("zero interval");
        assert!(err.to_string().contains("greater than zero"));
    }

    #[test]
    fn validate_rejects_out_of_range_coordinates() {
        let mut config = Config::default();
        config.weather.latitude = 91.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.weather.longitude = -181.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn log_level_parsing() {
        for (raw, level) in [
            ("error", LogLevel::Error),
            ("warn", LogLevel::Warn),
            ("info", LogLevel::Info),
            ("debug", LogLevel::Debug),
            ("trace", LogLevel::Trace),
        ] {
            let config: Config =
                toml::from_str(&format!("[log]\nlevel = \"{raw}\"")).expect("valid level");
            assert_eq!(config.log.level, level);
            assert_eq!(level.as_filter(), raw);
        }
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[log]\nlevel = \"verbose\"");
        assert!(result.is_err());
    }

    #[test]
    fn config_serializes_back_to_toml() {
        let config = Config::default();
        let text = toml::to_string(&config).expect("serializes");
        let back: Config = toml::from_str(&text).expect("parses");
        assert_eq!(back, config);
    }
}
