//! Animated "users online" counter.
//!
//! Counts up from zero to a per-widget target over the first
//! [`ANIMATION`] of the dashboard's lifetime, then holds.

use std::time::Duration;

use ratatui::layout::Size;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{Widget, WidgetContext};
use crate::{WidgetId, WidgetKind, WidgetRecord};

/// Length of the count-up animation.
pub const ANIMATION: Duration = Duration::from_millis(1200);

/// Renders the counter value with three decimals.
pub struct CounterWidget;

/// Factory registered for [`WidgetKind::Counter`].
pub fn create() -> Box<dyn Widget> {
    Box::new(CounterWidget)
}

/// Final value for widget `id`, in thousands of users, within 1.2..1.8.
pub fn target(id: WidgetId) -> f64 {
    1.2 + (id.wrapping_mul(7919) % 600) as f64 / 1000.0
}

/// Animation progress in `0.0..=1.0`.
pub fn progress(uptime: Duration) -> f64 {
    (uptime.as_secs_f64() / ANIMATION.as_secs_f64()).min(1.0)
}

impl Widget for CounterWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Counter
    }

    fn default_title(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Users Online".to_string()
    }

    fn default_subtitle(&self, record: &WidgetRecord, _context: &WidgetContext) -> String {
        match record.settings.as_ref().and_then(|s| s.time_range) {
            Some(range) => range.label().to_string(),
            None => "Counter".to_string(),
        }
    }

    fn render(&self, record: &WidgetRecord, _size: Size, context: &WidgetContext) -> Vec<Line<'static>> {
        let value = target(record.id) * progress(context.uptime);
        vec![
            Line::from(vec![
                Span::styled("● ", Style::default().fg(Color::Rgb(0x02, 0x84, 0xc7))),
                Span::styled(
                    format!("{value:.3}"),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(
                "Live users viewing your dashboard.",
                Style::default().fg(Color::DarkGray),
            ),
        ]
    }
}
