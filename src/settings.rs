//! Per-widget display preferences.
//!
//! Every field is optional so a widget without customisation serializes to
//! an empty object. Settings are always replaced wholesale; the helpers here
//! build the next value from the current one.

use serde::{Deserialize, Serialize};

/// Text colors offered for titles and body text.
pub const TEXT_COLORS: &[(&str, &str)] = &[
    ("#1f2937", "Dark Gray"),
    ("#4f46e5", "Indigo"),
    ("#ec4899", "Pink"),
    ("#22c55e", "Green"),
    ("#f59e0b", "Amber"),
    ("#3b82f6", "Blue"),
    ("#8b5cf6", "Purple"),
    ("#ef4444", "Red"),
];

/// Series colors offered for the chart widget.
pub const CHART_COLORS: &[(&str, &str)] = &[
    ("#0066cc", "Opswat Blue"),
    ("#00a8e8", "Cyan"),
    ("#0073e6", "Light Blue"),
    ("#22c55e", "Green"),
    ("#f59e0b", "Amber"),
    ("#ec4899", "Pink"),
];

/// Smallest text scale factor.
pub const MIN_TEXT_SIZE: f32 = 0.75;
/// Largest text scale factor.
pub const MAX_TEXT_SIZE: f32 = 1.5;
/// Text scale step used by the size controls.
pub const TEXT_SIZE_STEP: f32 = 0.05;

/// Time window for counter and revenue widgets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Since midnight.
    #[default]
    Today,
    /// Current week.
    Week,
    /// Current month.
    Month,
    /// Current year.
    Year,
}

impl TimeRange {
    /// Label shown as the widget subtitle.
    pub fn label(self) -> &'static str {
        match self {
            TimeRange::Today => "Today",
            TimeRange::Week => "This Week",
            TimeRange::Month => "This Month",
            TimeRange::Year => "This Year",
        }
    }

    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        match self {
            TimeRange::Today => TimeRange::Week,
            TimeRange::Week => TimeRange::Month,
            TimeRange::Month => TimeRange::Year,
            TimeRange::Year => TimeRange::Today,
        }
    }
}

/// Chart rendering style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Connected points.
    #[default]
    Line,
    /// One bar per data point.
    Bar,
    /// Filled area under the line.
    Area,
}

impl ChartType {
    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ChartType::Line => ChartType::Bar,
            ChartType::Bar => ChartType::Area,
            ChartType::Area => ChartType::Line,
        }
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            ChartType::Line => "Line Chart",
            ChartType::Bar => "Bar Chart",
            ChartType::Area => "Area Chart",
        }
    }
}

/// Chart series style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    /// Series color as `#rrggbb`.
    pub color: String,
    /// Line width, 1 to 5.
    pub stroke_width: u8,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            color: CHART_COLORS[0].0.to_string(),
            stroke_width: 3,
        }
    }
}

/// How the clock widget presents the time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockDisplayStyle {
    /// Time as the title, long date below.
    #[default]
    Text,
    /// Calendar-style day and month.
    Calendar,
    /// Large digital readout.
    Digital,
}

impl ClockDisplayStyle {
    /// Next option, wrapping around.
    pub fn next(self) -> Self {
        match self {
            ClockDisplayStyle::Text => ClockDisplayStyle::Calendar,
            ClockDisplayStyle::Calendar => ClockDisplayStyle::Digital,
            ClockDisplayStyle::Digital => ClockDisplayStyle::Text,
        }
    }
}

/// Display preferences for a single widget.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetSettings {
    /// Title override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Subtitle override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Text color as `#rrggbb`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    /// Text scale factor, see [`MIN_TEXT_SIZE`] and [`MAX_TEXT_SIZE`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_size: Option<f32>,
    /// Counter/revenue time window.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<TimeRange>,
    /// Chart style selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<ChartType>,
    /// Chart series style.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_style: Option<ChartStyle>,
    /// Clock presentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_style: Option<ClockDisplayStyle>,
    /// Weather location latitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    /// Weather location longitude.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_temperature: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_humidity: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_wind_speed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_weather_code: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_pressure: Option<bool>,
}

impl WidgetSettings {
    /// Effective text scale, clamped to the supported range.
    pub fn text_size(&self) -> f32 {
        self.text_size
            .unwrap_or(1.0)
            .clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE)
    }

    /// Settings with the text size moved by `steps` increments.
    pub fn with_text_size_step(&self, steps: i8) -> Self {
        let size = self.text_size() + f32::from(steps) * TEXT_SIZE_STEP;
        // Round to the step grid so repeated presses don't accumulate drift.
        let size = (size / TEXT_SIZE_STEP).round() * TEXT_SIZE_STEP;
        Self {
            text_size: Some(size.clamp(MIN_TEXT_SIZE, MAX_TEXT_SIZE)),
            ..self.clone()
        }
    }

    /// Settings with the next text color from [`TEXT_COLORS`].
    pub fn with_next_text_color(&self) -> Self {
        Self {
            text_color: Some(next_in_palette(TEXT_COLORS, self.text_color.as_deref())),
            ..self.clone()
        }
    }

    /// Settings with the next time range.
    pub fn with_next_time_range(&self) -> Self {
        Self {
            time_range: Some(self.time_range.unwrap_or_default().next()),
            ..self.clone()
        }
    }

    /// Settings with the next chart type.
    pub fn with_next_chart_type(&self) -> Self {
        Self {
            chart_type: Some(self.chart_type.unwrap_or_default().next()),
            ..self.clone()
        }
    }

    /// Settings with the chart line width cycled through 1..=5.
    pub fn with_next_stroke_width(&self) -> Self {
        let mut style = self.chart_style.clone().unwrap_or_default();
        style.stroke_width = style.stroke_width % 5 + 1;
        Self {
            chart_style: Some(style),
            ..self.clone()
        }
    }

    /// Settings with the next chart series color from [`CHART_COLORS`].
    pub fn with_next_chart_color(&self) -> Self {
        let mut style = self.chart_style.clone().unwrap_or_default();
        style.color = next_in_palette(CHART_COLORS, Some(&style.color));
        Self {
            chart_style: Some(style),
            ..self.clone()
        }
    }

    /// Settings with the next clock display style.
    pub fn with_next_display_style(&self) -> Self {
        Self {
            display_style: Some(self.display_style.unwrap_or_default().next()),
            ..self.clone()
        }
    }

    pub fn show_temperature(&self) -> bool {
        self.show_temperature.unwrap_or(true)
    }

    pub fn show_humidity(&self) -> bool {
        self.show_humidity.unwrap_or(false)
    }

    pub fn show_wind_speed(&self) -> bool {
        self.show_wind_speed.unwrap_or(false)
    }

    pub fn show_weather_code(&self) -> bool {
        self.show_weather_code.unwrap_or(true)
    }

    pub fn show_pressure(&self) -> bool {
        self.show_pressure.unwrap_or(false)
    }

    /// Configured weather location, when both coordinates are set.
    pub fn location(&self) -> Option<(f64, f64)> {
        Some((self.latitude?, self.longitude?))
    }
}

fn next_in_palette(palette: &[(&str, &str)], current: Option<&str>) -> String {
    let next = current
        .and_then(|c| palette.iter().position(|(hex, _)| hex.eq_ignore_ascii_case(c)))
        .map_or(0, |idx| (idx + 1) % palette.len());
    palette[next].0.to_string()
}

/// Parses `#rrggbb` (leading `#` optional) into RGB components.
pub fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let hex = value.strip_prefix('#').unwrap_or(value);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
