//! Event handling for the TUI.
//!
//! Wraps crossterm events and adds a tick variant for the clock, the counter
//! animation and the weather refresh schedule. Key events are translated into
//! [`Action`]s by [`handle_key_event`]; selection, scrolling, the add-widget
//! picker and the settings editor are handled in place, everything that
//! changes the store is returned as an action for
//! [`App::dispatch`](crate::tui::app::App::dispatch).

use crate::tui::app::{App, Mode};
use crate::tui::gesture::{Direction, Gesture};
use crate::{WidgetId, WidgetKind, WidgetSettings};
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    MouseEvent,
};
use futures::StreamExt;
use std::time::Duration;
use tokio::time::interval;

/// Application-level event variants.
#[derive(Debug, Clone, Copy)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse event occurred.
    Mouse(MouseEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI refresh.
    Tick,
}

/// Event handler that merges terminal input events with periodic ticks.
pub struct EventHandler {
    /// Tick interval duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a new EventHandler with the specified tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Waits for the next event, returning either a terminal event or a tick.
    ///
    /// Uses `tokio::select!` to race between crossterm input and the tick timer.
    pub async fn next(&self, reader: &mut EventStream) -> std::io::Result<Event> {
        let mut tick = interval(self.tick_rate);
        // Consume the first immediate tick
        tick.tick().await;

        loop {
            tokio::select! {
                maybe_event = reader.next() => {
                    match maybe_event {
                        Some(Ok(CrosstermEvent::Key(key))) if key.kind != KeyEventKind::Release => {
                            return Ok(Event::Key(key));
                        }
                        Some(Ok(CrosstermEvent::Mouse(mouse))) => return Ok(Event::Mouse(mouse)),
                        Some(Ok(CrosstermEvent::Resize(w, h))) => return Ok(Event::Resize(w, h)),
                        Some(Err(e)) => return Err(e),
                        // Ignore key releases, focus and paste events
                        Some(Ok(_)) => continue,
                        None => return Err(std::io::Error::new(
                            std::io::ErrorKind::UnexpectedEof,
                            "event stream ended",
                        )),
                    }
                }
                _ = tick.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}

/// Action produced by handling a key event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// No action to take.
    None,
    /// Quit the application.
    Quit,
    /// Add a widget of the given kind.
    Add(WidgetKind),
    /// Remove the widget with the given id.
    Remove(WidgetId),
    /// Move or resize a widget at the current breakpoint.
    Gesture(WidgetId, Gesture),
    /// Replace a widget's settings.
    UpdateSettings(WidgetId, WidgetSettings),
    /// Refresh weather readings now.
    RefreshWeather,
}

/// Lines scrolled by `PageUp`/`PageDown`.
pub const PAGE_SCROLL: u16 = 8;

/// Handles a key event by dispatching to the appropriate app method or action.
///
/// While the add-widget picker is open, keys are routed to the picker
/// (`1`-`6` choose a kind, `Esc` closes it). While the settings editor is
/// open, keys are text input and only `Ctrl-C` quits. Otherwise dashboard
/// bindings apply.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Action {
    if app.mode == Mode::EditSettings {
        if is_ctrl_c(key) {
            return Action::Quit;
        }
        return handle_editor_key(app, key);
    }

    if should_quit(key) {
        return Action::Quit;
    }

    if app.mode == Mode::AddWidget {
        return handle_picker_key(app, key);
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        KeyCode::Tab => {
            app.select_next();
            Action::None
        }
        KeyCode::BackTab => {
            app.select_previous();
            Action::None
        }
        KeyCode::Char('a') => {
            app.mode = Mode::AddWidget;
            Action::None
        }
        KeyCode::Char('r') => Action::RefreshWeather,
        KeyCode::Char('e') | KeyCode::Enter => {
            app.open_settings_editor();
            Action::None
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE_SCROLL);
            Action::None
        }
        KeyCode::PageUp => {
            app.scroll_up(PAGE_SCROLL);
            Action::None
        }
        KeyCode::Esc => {
            app.selected = None;
            Action::None
        }
        KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down => {
            let Some(id) = app.selected else {
                return Action::None;
            };
            let direction = match key.code {
                KeyCode::Left => Direction::Left,
                KeyCode::Right => Direction::Right,
                KeyCode::Up => Direction::Up,
                _ => Direction::Down,
            };
            let gesture = if shift {
                Gesture::Resize(direction)
            } else {
                Gesture::Move(direction)
            };
            Action::Gesture(id, gesture)
        }
        KeyCode::Char('d') | KeyCode::Delete => app.selected.map_or(Action::None, Action::Remove),
        KeyCode::Char(c) => handle_settings_key(app, c),
        _ => Action::None,
    }
}

/// Keys of the add-widget picker.
fn handle_picker_key(app: &mut App, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Dashboard;
            Action::None
        }
        KeyCode::Char(c @ '1'..='9') => {
            let index = usize::from(c as u8 - b'1');
            match app.registry.available_kinds().get(index) {
                Some(&kind) => {
                    app.mode = Mode::Dashboard;
                    Action::Add(kind)
                }
                None => Action::None,
            }
        }
        _ => Action::None,
    }
}

/// Keys of the settings editor.
///
/// `Tab`/`Down` and `Shift-Tab`/`Up` move between rows, `Space` flips a
/// toggle, `Enter` applies the draft and `Esc` discards it. Invalid
/// coordinates keep the editor open with the error shown.
fn handle_editor_key(app: &mut App, key: KeyEvent) -> Action {
    let Some(editor) = app.editor.as_mut() else {
        app.close_settings_editor();
        return Action::None;
    };
    match key.code {
        KeyCode::Esc => {
            app.close_settings_editor();
            Action::None
        }
        KeyCode::Enter => match editor.apply() {
            Ok(settings) => {
                let id = editor.id;
                app.close_settings_editor();
                app.set_status("Settings saved");
                Action::UpdateSettings(id, settings)
            }
            Err(e) => {
                tracing::debug!(error = %e, "settings not applied");
                Action::None
            }
        },
        KeyCode::Tab | KeyCode::Down => {
            let _ = editor.focus_next();
            Action::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            let _ = editor.focus_previous();
            Action::None
        }
        KeyCode::Backspace => {
            editor.backspace();
            Action::None
        }
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            editor.input(c);
            Action::None
        }
        _ => Action::None,
    }
}

/// Settings shortcuts for the selected widget.
///
/// Shortcuts that don't apply to the selected widget's kind leave a hint in
/// the footer instead of changing anything.
fn handle_settings_key(app: &mut App, c: char) -> Action {
    let Some(record) = app.selected_record() else {
        return Action::None;
    };
    let id = record.id;
    let kind = record.kind;
    let settings = record.settings_or_default();

    let updated = match c {
        'c' => settings.with_next_text_color(),
        '+' | '=' => settings.with_text_size_step(1),
        '-' | '_' => settings.with_text_size_step(-1),
        't' if matches!(kind, WidgetKind::Counter | WidgetKind::Revenue) => {
            settings.with_next_time_range()
        }
        'g' if kind == WidgetKind::Chart => settings.with_next_chart_type(),
        'w' if kind == WidgetKind::Chart => settings.with_next_stroke_width(),
        'o' if kind == WidgetKind::Chart => settings.with_next_chart_color(),
        'v' if kind == WidgetKind::Clock => settings.with_next_display_style(),
        't' => {
            app.set_status("Time range applies to counter and revenue widgets");
            return Action::None;
        }
        'g' | 'w' | 'o' => {
            app.set_status("Chart options apply to chart widgets");
            return Action::None;
        }
        'v' => {
            app.set_status("Display style applies to clock widgets");
            return Action::None;
        }
        _ => return Action::None,
    };
    Action::UpdateSettings(id, updated)
}

/// Returns true if the key event should trigger application quit.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q')) || is_ctrl_c(key)
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && matches!(key.code, KeyCode::Char('c'))
}
