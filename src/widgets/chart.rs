//! Weekly sessions chart drawn with block characters.
//!
//! The plot area is the card body minus one row of day labels. Each data
//! point gets an equal slice of the width.

use ratatui::layout::Size;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use super::{hex_color, Widget, WidgetContext};
use crate::settings::{ChartStyle, ChartType};
use crate::{WidgetKind, WidgetRecord};

/// Sessions per weekday.
pub const SESSIONS: [(&str, u32); 7] = [
    ("Mon", 24),
    ("Tue", 31),
    ("Wed", 28),
    ("Thu", 35),
    ("Fri", 32),
    ("Sat", 40),
    ("Sun", 38),
];

/// Renders [`SESSIONS`] as a line, bar or area chart.
pub struct ChartWidget;

/// Factory registered for [`WidgetKind::Chart`].
pub fn create() -> Box<dyn Widget> {
    Box::new(ChartWidget)
}

fn marker(stroke_width: u8) -> char {
    match stroke_width {
        0 | 1 => '·',
        2 => '•',
        3 => '●',
        4 => '◆',
        _ => '█',
    }
}

/// Height of `value` in rows, at least 1 for any non-zero value.
fn level(value: u32, max: u32, rows: u16) -> u16 {
    if max == 0 || value == 0 {
        return 0;
    }
    let scaled = (u64::from(value) * u64::from(rows)).div_ceil(u64::from(max));
    scaled.min(u64::from(rows)) as u16
}

/// Plots `data` into `size`, returning one line per terminal row.
pub fn plot(data: &[(&str, u32)], chart_type: ChartType, stroke_width: u8, size: Size) -> Vec<String> {
    if data.is_empty() || size.width == 0 || size.height == 0 {
        return Vec::new();
    }
    let rows = size.height.saturating_sub(1).max(1);
    let cell = usize::from((size.width / data.len() as u16).max(1));
    let max = data.iter().map(|(_, v)| *v).max().unwrap_or(0);
    let levels: Vec<u16> = data.iter().map(|(_, v)| level(*v, max, rows)).collect();
    let mark = marker(stroke_width);

    let mut out = Vec::with_capacity(usize::from(rows) + 1);
    for row in (1..=rows).rev() {
        let mut line = String::new();
        for &lvl in &levels {
            let filled = match chart_type {
                ChartType::Line => lvl == row,
                ChartType::Bar | ChartType::Area => lvl >= row,
            };
            let text = match (chart_type, filled) {
                (_, false) => " ".repeat(cell),
                (ChartType::Line, true) => centered(mark, cell),
                (ChartType::Bar, true) => {
                    // Leave a gap between neighbouring bars when there is room.
                    let bar = if cell > 1 { cell - 1 } else { cell };
                    format!("{}{}", "█".repeat(bar), " ".repeat(cell - bar))
                }
                (ChartType::Area, true) if lvl == row => "▄".repeat(cell),
                (ChartType::Area, true) => "▒".repeat(cell),
            };
            line.push_str(&text);
        }
        out.push(line);
    }

    if size.height > 1 {
        let labels: String = data
            .iter()
            .map(|(name, _)| {
                let short: String = name.chars().take(cell.min(3)).collect();
                format!("{short:<cell$}")
            })
            .collect();
        out.push(labels);
    }
    out
}

fn centered(ch: char, width: usize) -> String {
    let left = width.saturating_sub(1) / 2;
    let right = width.saturating_sub(left + 1);
    format!("{}{}{}", " ".repeat(left), ch, " ".repeat(right))
}

impl Widget for ChartWidget {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Chart
    }

    fn default_title(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
        "Sessions".to_string()
    }

    fn default_subtitle(&self, record: &WidgetRecord, _context: &WidgetContext) -> String {
        match record.settings.as_ref().and_then(|s| s.chart_type) {
            Some(chart_type) => chart_type.label().to_string(),
            None => "Chart".to_string(),
        }
    }

    fn min_width(&self) -> u16 {
        SESSIONS.len() as u16
    }

    fn render(&self, record: &WidgetRecord, size: Size, _context: &WidgetContext) -> Vec<Line<'static>> {
        let settings = record.settings_or_default();
        let chart_type = settings.chart_type.unwrap_or_default();
        let style = settings.chart_style.unwrap_or_default();
        let color = hex_color(&style.color)
            .or_else(|| hex_color(&ChartStyle::default().color))
            .unwrap_or(Color::Blue);

        let mut rows = plot(&SESSIONS, chart_type, style.stroke_width, size);
        let labels = if size.height > 1 { rows.pop() } else { None };
        let mut lines: Vec<Line<'static>> = rows
            .into_iter()
            .map(|row| Line::from(Span::styled(row, Style::default().fg(color))))
            .collect();
        if let Some(labels) = labels {
            lines.push(Line::styled(labels, Style::default().fg(Color::DarkGray)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRect;
    use crate::WidgetSettings;

    const DATA: [(&str, u32); 3] = [("Mon", 1), ("Tue", 2), ("Wed", 4)];

    #[test]
    fn test_level_scales_to_rows() {
        assert_eq!(level(40, 40, 4), 4);
        assert_eq!(level(20, 40, 4), 2);
        assert_eq!(level(1, 40, 4), 1);
        assert_eq!(level(0, 40, 4), 0);
        assert_eq!(level(5, 0, 4), 0);
    }

    #[test]
    fn test_plot_bar() {
        let rows = plot(&DATA, ChartType::Bar, 3, Size::new(6, 5));
        assert_eq!(
            rows,
            vec![
                "    █ ".to_string(),
                "    █ ".to_string(),
                "  █ █ ".to_string(),
                "█ █ █ ".to_string(),
                "MoTuWe".to_string(),
            ]
        );
    }

    #[test]
    fn test_plot_line_marks_only_the_top() {
        let rows = plot(&DATA, ChartType::Line, 2, Size::new(3, 5));
        assert_eq!(rows[0], "  •");
        assert_eq!(rows[2], " • ");
        assert_eq!(rows[3], "•  ");
    }

    #[test]
    fn test_plot_area_fills_below() {
        let rows = plot(&DATA, ChartType::Area, 3, Size::new(3, 3));
        assert_eq!(rows[0], "  ▄");
        assert_eq!(rows[1], "▄▄▒");
    }

    #[test]
    fn test_plot_degenerate_sizes() {
        assert!(plot(&DATA, ChartType::Line, 3, Size::new(0, 4)).is_empty());
        assert!(plot(&[], ChartType::Line, 3, Size::new(10, 4)).is_empty());
        // One row: plot only, no labels.
        assert_eq!(plot(&DATA, ChartType::Bar, 3, Size::new(3, 1)).len(), 1);
    }

    #[test]
    fn test_stroke_width_picks_marker() {
        assert_eq!(marker(1), '·');
        assert_eq!(marker(3), '●');
        assert_eq!(marker(5), '█');
    }

    #[test]
    fn test_chart_render_includes_day_labels() {
        let ctx = WidgetContext::new(chrono::Local::now());
        let rec = WidgetRecord::new(7, WidgetKind::Chart, LayoutRect::new(0, 4, 2, 2));
        let lines = ChartWidget.render(&rec, Size::new(21, 6), &ctx);
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines.last().map(|l| l.to_string()),
            Some("MonTueWedThuFriSatSun".to_string())
        );
    }

    #[test]
    fn test_chart_subtitle_follows_type() {
        let ctx = WidgetContext::new(chrono::Local::now());
        let mut rec = WidgetRecord::new(7, WidgetKind::Chart, LayoutRect::new(0, 4, 2, 2));
        assert_eq!(ChartWidget.subtitle(&rec, &ctx), "Chart");
        rec.settings = Some(WidgetSettings {
            chart_type: Some(ChartType::Bar),
            ..Default::default()
        });
        assert_eq!(ChartWidget.subtitle(&rec, &ctx), "Bar Chart");
    }
}
