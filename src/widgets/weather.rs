//! Current weather conditions.
//!
//! Stateless renderer: reads the reading for the widget's location from
//! [`WidgetContext::weather`] and never fetches on its own. Which fields are
//! shown follows the widget's `show*` settings.

use open_meteo::WeatherData;
use ratatui::layout::Size;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Widget, WidgetContext};
use crate::settings::WidgetSettings;
use crate::weather::{widget_location, Location};
use crate::{WidgetKind, WidgetRecord};

/// Renders the reading for the widget's location.
pub struct WeatherWidget;

/// Factory registered for [`WidgetKind::Weather`].
pub fn create() -> Box<dyn Widget> {
    Box::new(WeatherWidget)
}

/// Display lines for `data`, filtered by the `show*` flags.
pub fn reading_lines(data: &WeatherData, settings: &WidgetSettings) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    if settings.show_temperature() {
        if let Some(t) = data.temperature {
            lines.push(Line::from(vec![
                Span::styled("☀ ", Style::default().fg(Color::Rgb(0xfa, 0xcc, 0x15))),
                Span::styled(format!("{t:.1}°C"), Style::default().add_modifier(Modifier::BOLD)),
            ]));
        }
    }
    if settings.show_weather_code() && data.weather_code.is_some() {
        lines.push(Line::raw(data.description()));
    }
    if settings.show_humidity() {
        if let Some(h) = data.humidity {
            lines.push(Line::styled(format!("Humidity {h:.0}%"), dim));
        }
    }
    if settings.show_wind_speed() {
        if let Some(w) = data.wind_speed {
            lines.push(Line::styled(format!("Wind {w:.1} km/h"), dim));
        }
    }
    if settings.show_pressure() {
        if let Some(p) = data.pressure {
            lines.push(Line::styled(format!("Pressure {p:.0} hPa"), dim));
        }
    }
    lines
}

impl Widget for WeatherWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Weather
    }

    fn default_title(&self, record: &WidgetRecord, context: &WidgetContext) -> String {
        let location = widget_location(record, context.default_location);
        if location.key() == Location::DEFAULT.key() {
            "San Francisco".to_string()
        } else {
            location.to_string()
        }
    }

    fn default_subtitle(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Weather".to_string()
    }

    fn render(&self, record: &WidgetRecord, _size: Size, context: &WidgetContext) -> Vec<Line<'static>> {
        let dim = Style::default().fg(Color::DarkGray);
        let Some(readings) = context.weather else {
            return vec![Line::styled("Weather disabled", dim)];
        };

        let location = widget_location(record, context.default_location);
        match readings.get(location) {
            Some(data) => {
                let lines = reading_lines(data, &record.settings_or_default());
                if lines.is_empty() {
                    vec![Line::styled("No fields selected", dim)]
                } else {
                    lines
                }
            }
            None => match readings.last_error() {
                Some(_) => vec![Line::styled("Weather unavailable", Style::default().fg(Color::Red))],
                None => vec![Line::styled("Loading weather...", dim)],
            },
        }
    }
}
