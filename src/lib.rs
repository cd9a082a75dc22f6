//! gridboard library
//!
//! A customizable widget dashboard laid out on a responsive grid. The crate
//! is split into the layout engine (placement, reconciliation and the widget
//! store) and the terminal front end that renders it.
//!
//! # Example
//!
//! ```
//! use gridboard::store::DashboardStore;
//! use gridboard::WidgetKind;
//!
//! let mut store = DashboardStore::new(3);
//! let weather = store.add(WidgetKind::Weather).id;
//! let clock = store.add(WidgetKind::Clock).id;
//! assert_eq!(store.get(weather).map(|w| w.layout.x), Some(0));
//! assert_eq!(store.get(clock).map(|w| w.layout.x), Some(2));
//! ```

use std::fmt;
use std::str::FromStr;

/// Configuration loading, schema and XDG path resolution.
pub mod config;

/// Grid geometry: rectangles, placement, breakpoints and reconciliation.
pub mod layout;

/// Tracing subscriber setup.
pub mod logging;

/// Per-widget display preferences.
pub mod settings;

/// The widget collection and its mutation operations.
pub mod store;

/// Terminal user interface.
pub mod tui;

/// Periodic weather refresh for weather widgets.
pub mod weather;

/// Widget renderers and the kind -> renderer registry.
pub mod widgets;

pub use layout::LayoutRect;
pub use settings::WidgetSettings;

/// Identifier assigned to a widget by the store. Never reused.
pub type WidgetId = u64;

/// Kind of dashboard widget.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum WidgetKind {
    /// Current conditions from Open-Meteo.
    Weather,
    /// Animated "users online" counter.
    Counter,
    /// Revenue figure for a time range.
    Revenue,
    /// Local time and date.
    Clock,
    /// Weekly sessions chart.
    Chart,
    /// Static information card.
    Info,
}

impl WidgetKind {
    /// All kinds, in the order the add-widget picker lists them.
    pub const ALL: [WidgetKind; 6] = [
        WidgetKind::Weather,
        WidgetKind::Counter,
        WidgetKind::Revenue,
        WidgetKind::Clock,
        WidgetKind::Chart,
        WidgetKind::Info,
    ];

    /// Short human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            WidgetKind::Weather => "Weather",
            WidgetKind::Counter => "Counter",
            WidgetKind::Revenue => "Revenue",
            WidgetKind::Clock => "Clock",
            WidgetKind::Chart => "Chart",
            WidgetKind::Info => "Info Card",
        }
    }

    /// One-line description shown in the add-widget picker.
    pub fn description(self) -> &'static str {
        match self {
            WidgetKind::Weather => "Display weather information",
            WidgetKind::Counter => "Animated number counter",
            WidgetKind::Revenue => "Display metrics",
            WidgetKind::Clock => "Real-time clock",
            WidgetKind::Chart => "Data visualization",
            WidgetKind::Info => "Display information",
        }
    }
}

impl fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WidgetKind::Weather => "weather",
            WidgetKind::Counter => "counter",
            WidgetKind::Revenue => "revenue",
            WidgetKind::Clock => "clock",
            WidgetKind::Chart => "chart",
            WidgetKind::Info => "info",
        };
        write!(f, "{}", s)
    }
}

/// Error type for parsing WidgetKind from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWidgetKindError(pub String);

impl fmt::Display for ParseWidgetKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid widget kind: {}", self.0)
    }
}

impl std::error::Error for ParseWidgetKindError {}

impl FromStr for WidgetKind {
    type Err = ParseWidgetKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "weather" => Ok(WidgetKind::Weather),
            "counter" => Ok(WidgetKind::Counter),
            "revenue" => Ok(WidgetKind::Revenue),
            "clock" => Ok(WidgetKind::Clock),
            "chart" => Ok(WidgetKind::Chart),
            "info" => Ok(WidgetKind::Info),
            _ => Err(ParseWidgetKindError(s.to_string())),
        }
    }
}

/// A widget on the dashboard.
///
/// Owned by [`store::DashboardStore`]. The layout is replaced wholesale by
/// reconciliation after every move/resize, the settings wholesale by
/// settings changes.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WidgetRecord {
    /// Store-assigned identifier.
    pub id: WidgetId,
    /// Widget kind, selects the renderer.
    #[serde(rename = "type")]
    pub kind: WidgetKind,
    /// Position and size on the grid.
    pub layout: LayoutRect,
    /// Display preferences, `None` until the user changes something.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<WidgetSettings>,
}

impl WidgetRecord {
    /// Creates a record without settings.
    pub fn new(id: WidgetId, kind: WidgetKind, layout: LayoutRect) -> Self {
        Self {
            id,
            kind,
            layout,
            settings: None,
        }
    }

    /// Returns the settings, or the defaults when none are set.
    pub fn settings_or_default(&self) -> WidgetSettings {
        self.settings.clone().unwrap_or_default()
    }
}
