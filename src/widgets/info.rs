//! Static information card.

use ratatui::layout::Size;
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use super::{Widget, WidgetContext};
use crate::{WidgetKind, WidgetRecord};

const BODY: &str =
    "This is a static information card. Use it to highlight important notes for your team.";
const FOOTNOTE: &str = "Everything on this dashboard lives in memory, no reloads.";

/// Renders a fixed note.
pub struct InfoWidget;

/// Factory registered for [`WidgetKind::Info`].
pub fn create() -> Box<dyn Widget> {
    Box::new(InfoWidget)
}

impl Widget for InfoWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Info
    }

    fn default_title(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Info Card".to_string()
    }

    fn default_subtitle(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Static".to_string()
    }

    fn render(&self, _record: &WidgetRecord, size: Size, _context: &WidgetContext) -> Vec<Line<'static>> {
        let mut lines = vec![Line::raw(BODY)];
        // The footnote only fits below the wrapped body on taller cards.
        if size.height >= 4 {
            lines.push(Line::raw(""));
            lines.push(Line::styled(FOOTNOTE, Style::default().fg(Color::DarkGray)));
        }
        lines
    }
}
