//! Main rendering orchestration for the TUI dashboard.
//!
//! Provides the top-level `render_dashboard` function that composes the
//! header, the widget grid and the footer, plus the add-widget picker and
//! settings editor popups.
//!
//! Grid cells map to terminal cells as follows: the grid area is split into
//! `breakpoint.columns()` equal columns and every grid row is
//! `app.row_height` lines tall. Single-column breakpoints draw the stacked
//! projection instead of the stored layout.

use crate::layout::{stacked_projection, Breakpoint, LayoutRect};
use crate::tui::app::{App, Mode};
use crate::tui::edit::SettingsEditor;
use crate::widgets::{hex_color, Widget, WidgetContext};
use crate::WidgetRecord;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect, Size},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};
use std::time::Instant;

/// Header text displayed at the top of the dashboard.
const HEADER_TEXT: &str = "gridboard";

/// Footer text showing available keybindings.
const FOOTER_TEXT: &str = "[Tab] Select  [a] Add  [d] Remove  [←↑↓→] Move  [Shift+←↑↓→] Resize  \
[e] Edit  [c +/-] Text  [t g w o v] Options  [r] Weather  [q] Quit";

/// Footer text while the add-widget picker is open.
const PICKER_FOOTER_TEXT: &str = "[1-6] Add widget  [Esc] Cancel";

/// Footer text while the settings editor is open.
const EDITOR_FOOTER_TEXT: &str = "[Tab] Next field  [Space] Toggle  [Enter] Save  [Esc] Cancel";

/// Text size at or above which card text is drawn bold.
const LARGE_TEXT: f32 = 1.25;

/// Text size at or below which card text is drawn dim.
const SMALL_TEXT: f32 = 0.85;

/// Renders the full dashboard: header, grid, footer and, in add mode, the picker.
///
/// Updates `app.breakpoint`, `app.content_height` and `app.viewport_height`
/// from the frame size.
pub fn render_dashboard(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.set_width(area.width);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(1),    // grid
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    render_grid(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);

    match (&app.mode, &app.editor) {
        (Mode::AddWidget, _) => render_add_picker(frame, app, area),
        (Mode::EditSettings, Some(editor)) => render_settings_editor(frame, editor, area),
        _ => {}
    }
}

/// Header with title (left) and breakpoint summary (right).
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let summary = format!(
        "{} · {} col{} · {} widget{}",
        app.breakpoint,
        app.breakpoint.columns(),
        if app.breakpoint.columns() == 1 { "" } else { "s" },
        app.store.len(),
        if app.store.len() == 1 { "" } else { "s" },
    );
    let padding_len = (area.width as usize)
        .saturating_sub(HEADER_TEXT.len())
        .saturating_sub(summary.chars().count());

    let header = Paragraph::new(Line::from(vec![
        Span::styled(HEADER_TEXT, Style::default().fg(Color::Cyan)),
        Span::raw(" ".repeat(padding_len)),
        Span::styled(summary, Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, area);
}

/// Footer with key bindings, or the status message while it is active.
fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some((msg, expiry)) if Instant::now() < *expiry => {
            Line::from(Span::styled(msg.clone(), Style::default().fg(Color::Yellow)))
        }
        _ => {
            let text = match app.mode {
                Mode::AddWidget => PICKER_FOOTER_TEXT,
                Mode::EditSettings => EDITOR_FOOTER_TEXT,
                _ => FOOTER_TEXT,
            };
            Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
        }
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Rectangles to draw at `breakpoint`, paired with their records.
///
/// Stacked breakpoints use the single-column projection in insertion order.
pub fn visible_layouts(widgets: &[WidgetRecord], breakpoint: Breakpoint) -> Vec<(&WidgetRecord, LayoutRect)> {
    if breakpoint.is_stacked() {
        widgets
            .iter()
            .zip(stacked_projection(widgets))
            .map(|(record, item)| (record, item.rect))
            .collect()
    } else {
        widgets.iter().map(|w| (w, w.layout)).collect()
    }
}

/// Terminal column where grid column `column` starts.
fn column_edge(grid: Rect, columns: u16, column: u16) -> u16 {
    let offset = u32::from(grid.width) * u32::from(column.min(columns)) / u32::from(columns.max(1));
    grid.x.saturating_add(offset as u16)
}

/// Screen area of a grid rectangle, clipped to the grid viewport.
///
/// Rectangles reaching past the breakpoint's columns are cut at the last
/// column. Returns `None` when nothing of the card is visible.
pub fn card_area(
    rect: LayoutRect,
    grid: Rect,
    columns: u16,
    row_height: u16,
    scroll: u16,
) -> Option<Rect> {
    let columns = columns.max(1);
    let first = rect.x.min(columns - 1);
    let last = rect.x.saturating_add(rect.w).clamp(first + 1, columns);
    let left = column_edge(grid, columns, first);
    let right = column_edge(grid, columns, last);

    let top = i64::from(rect.y) * i64::from(row_height) - i64::from(scroll);
    let bottom = top + i64::from(rect.h) * i64::from(row_height);
    let visible_top = top.max(0);
    let visible_bottom = bottom.min(i64::from(grid.height));
    if visible_bottom <= visible_top || right <= left {
        return None;
    }

    Some(Rect {
        x: left,
        y: grid.y + visible_top as u16,
        width: right - left,
        height: (visible_bottom - visible_top) as u16,
    })
}

/// Draws every visible widget card.
fn render_grid(frame: &mut Frame, app: &mut App, area: Rect) {
    let columns = app.breakpoint.columns();
    let layouts = visible_layouts(app.store.widgets(), app.breakpoint);
    let content_rows = layouts
        .iter()
        .map(|(_, rect)| rect.bottom())
        .max()
        .unwrap_or(0);
    let content_height = u16::try_from(content_rows * u32::from(app.row_height)).unwrap_or(u16::MAX);

    app.content_height = content_height;
    app.viewport_height = area.height;
    app.scroll = app.scroll.min(app.max_scroll());

    if layouts.is_empty() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "No widgets yet. Press [a] to add one.",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(hint, area);
        return;
    }

    let ctx = app.widget_context();
    for (record, rect) in &layouts {
        let Some(card) = card_area(*rect, area, columns, app.row_height, app.scroll) else {
            continue;
        };
        let Some(widget) = app.registry.create(record.kind) else {
            tracing::warn!(kind = %record.kind, "no renderer registered");
            continue;
        };
        let selected = app.selected == Some(record.id);
        render_card(frame, widget.as_ref(), record, card, selected, &ctx);
    }
}

/// Text style for a widget's text color and size settings.
pub fn text_style(record: &WidgetRecord) -> Style {
    let settings = record.settings_or_default();
    let mut style = Style::default();
    if let Some(color) = settings.text_color.as_deref().and_then(hex_color) {
        style = style.fg(color);
    }
    let size = settings.text_size();
    if size >= LARGE_TEXT {
        style = style.add_modifier(Modifier::BOLD);
    } else if size <= SMALL_TEXT {
        style = style.add_modifier(Modifier::DIM);
    }
    style
}

/// Draws one bordered card: title left, subtitle right, body inside.
fn render_card(
    frame: &mut Frame,
    widget: &dyn Widget,
    record: &WidgetRecord,
    area: Rect,
    selected: bool,
    ctx: &WidgetContext,
) {
    let style = text_style(record);
    let border_style = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(Line::from(Span::styled(
            format!(" {} ", widget.title(record, ctx)),
            style.add_modifier(Modifier::BOLD),
        )))
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", widget.subtitle(record, ctx)),
                Style::default().fg(Color::DarkGray),
            ))
            .right_aligned(),
        );

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width < widget.min_width() || inner.height == 0 {
        return;
    }
    let lines = widget.render(record, Size::new(inner.width, inner.height), ctx);
    frame.render_widget(Paragraph::new(lines).style(style), inner);
}

/// Centered popup listing the kinds that can be added.
fn render_add_picker(frame: &mut Frame, app: &App, area: Rect) {
    let kinds = app.registry.available_kinds();
    let lines: Vec<Line> = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!("{:<10}", kind.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(kind.description(), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    let width = 48.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Add Widget ");
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Centered popup with one row per editable field and the last error.
fn render_settings_editor(frame: &mut Frame, editor: &SettingsEditor, area: Rect) {
    let focused = editor.focused();
    let mut lines: Vec<Line> = editor
        .fields()
        .iter()
        .map(|&field| {
            let is_focused = field == focused;
            let marker = if is_focused { " > " } else { "   " };
            let mut value = editor.value_text(field);
            if is_focused && !field.is_toggle() {
                value.push('_');
            }
            let label_style = if is_focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(format!("{:<12}", field.label()), label_style),
                Span::raw(value),
            ])
        })
        .collect();
    if let Some(error) = &editor.error {
        lines.push(Line::from(Span::styled(
            format!("   {error}"),
            Style::default().fg(Color::Red),
        )));
    }

    let width = 52.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Edit {} Settings ", editor.kind.label()));
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}
