//! Revenue metric card.

use ratatui::layout::Size;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use super::{group_thousands, Widget, WidgetContext};
use crate::settings::TimeRange;
use crate::{WidgetId, WidgetKind, WidgetRecord};

/// Renders a dollar figure and its trend for the selected time range.
pub struct RevenueWidget;

/// Factory registered for [`WidgetKind::Revenue`].
pub fn create() -> Box<dyn Widget> {
    Box::new(RevenueWidget)
}

/// Daily revenue for widget `id`, within 10,000..50,000.
pub fn daily_revenue(id: WidgetId) -> u64 {
    10_000 + id.wrapping_mul(104_729) % 40_000
}

/// Revenue over `range`, scaled from the daily figure.
pub fn revenue_for(id: WidgetId, range: TimeRange) -> u64 {
    let days = match range {
        TimeRange::Today => 1,
        TimeRange::Week => 7,
        TimeRange::Month => 30,
        TimeRange::Year => 365,
    };
    daily_revenue(id) * days
}

fn comparison(range: TimeRange) -> &'static str {
    match range {
        TimeRange::Today => "vs yesterday",
        TimeRange::Week => "vs last week",
        TimeRange::Month => "vs last month",
        TimeRange::Year => "vs last year",
    }
}

impl Widget for RevenueWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Revenue
    }

    fn default_title(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Revenue".to_string()
    }

    fn default_subtitle(&self, record: &WidgetRecord, _context: &WidgetContext) -> String {
        record.settings_or_default().time_range.unwrap_or_default().label().to_string()
    }

    fn render(&self, record: &WidgetRecord, _size: Size, _context: &WidgetContext) -> Vec<Line<'static>> {
        let range = record.settings_or_default().time_range.unwrap_or_default();
        let green = Style::default().fg(Color::Rgb(0x16, 0xa3, 0x4a));
        vec![
            Line::from(vec![
                Span::styled("▲ ", green),
                Span::styled(
                    format!("${}", group_thousands(revenue_for(record.id, range))),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::styled(format!("+4.2% {}", comparison(range)), green),
        ]
    }
}
