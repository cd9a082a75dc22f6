//! Local time and date.
//!
//! # Display styles
//!
//! - **Text**: the time is the card title, the long date is the body
//! - **Calendar**: weekday, day of month and month/year as a tear-off sheet
//! - **Digital**: the time as a framed readout, short date below

use chrono::{DateTime, Local};
use ratatui::layout::Size;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Widget, WidgetContext};
use crate::settings::ClockDisplayStyle;
use crate::{WidgetKind, WidgetRecord};

/// Renders the current local time.
pub struct ClockWidget;

/// Factory registered for [`WidgetKind::Clock`].
pub fn create() -> Box<dyn Widget> {
    Box::new(ClockWidget)
}

fn style_of(record: &WidgetRecord) -> ClockDisplayStyle {
    record
        .settings
        .as_ref()
        .and_then(|s| s.display_style)
        .unwrap_or_default()
}

fn time(now: &DateTime<Local>) -> String {
    now.format("%H:%M:%S").to_string()
}

fn long_date(now: &DateTime<Local>) -> String {
    now.format("%A, %B %-d, %Y").to_string()
}

impl Widget for ClockWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Clock
    }

    fn default_title(&self, record: &WidgetRecord, context: &WidgetContext) -> String {
        match style_of(record) {
            ClockDisplayStyle::Text => time(&context.now),
            ClockDisplayStyle::Calendar | ClockDisplayStyle::Digital => "Current Time".to_string(),
        }
    }

    fn default_subtitle(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Clock".to_string()
    }

    fn render(&self, record: &WidgetRecord, _size: Size, context: &WidgetContext) -> Vec<Line<'static>> {
        let now = &context.now;
        let dim = Style::default().fg(Color::DarkGray);
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match style_of(record) {
            ClockDisplayStyle::Text => vec![Line::styled(long_date(now), dim)],
            ClockDisplayStyle::Calendar => vec![
                Line::styled(now.format("%A").to_string(), dim),
                Line::styled(now.format("%-d").to_string(), bold),
                Line::raw(now.format("%B %Y").to_string()),
                Line::styled(time(now), dim),
            ],
            ClockDisplayStyle::Digital => vec![
                Line::from(vec![
                    Span::styled("[ ", dim),
                    Span::styled(time(now), bold.fg(Color::Rgb(0x00, 0x66, 0xcc))),
                    Span::styled(" ]", dim),
                ]),
                Line::styled(now.format("%a %d %b %Y").to_string(), dim),
            ],
        }
    }
}
