//! Application state and main event loop for the TUI.
//!
//! Owns the dashboard store, manages terminal setup/teardown, panic hooks,
//! the weather refresh schedule and the core render loop.

use crate::layout::Breakpoint;
use crate::store::DashboardStore;
use crate::tui::edit::SettingsEditor;
use crate::tui::event::{handle_key_event, Action, Event, EventHandler};
use crate::tui::gesture::{self, Gesture};
use crate::tui::ui::render_dashboard;
use crate::weather::{
    weather_locations, Location, WeatherFetcher, WeatherReadings, WeatherUpdate,
};
use crate::widgets::{WidgetContext, WidgetRegistry};
use crate::{WidgetId, WidgetKind, WidgetRecord, WidgetSettings};
use crossterm::event::{MouseEvent, MouseEventKind};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::{CrosstermBackend, Terminal};
use std::fmt;
use std::io::{self, stdout};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// How long footer status messages stay visible.
const STATUS_MESSAGE_DURATION: Duration = Duration::from_secs(2);

/// Lines scrolled per mouse wheel step.
const WHEEL_SCROLL: u16 = 3;

/// Default tick interval.
pub const DEFAULT_TICK_RATE: Duration = Duration::from_millis(250);

/// Default terminal lines per grid row unit.
pub const DEFAULT_ROW_HEIGHT: u16 = 4;

/// Input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Normal dashboard bindings.
    Dashboard,
    /// Add-widget picker is open.
    AddWidget,
    /// Settings editor is open for the selected widget.
    EditSettings,
}

/// Core application state for the TUI.
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Count of ticks processed (useful for testing/diagnostics).
    pub tick_count: u64,
    /// The widgets on the dashboard.
    pub store: DashboardStore,
    /// Renderer for every widget kind.
    pub registry: WidgetRegistry,
    /// Selected widget, if any.
    pub selected: Option<WidgetId>,
    /// Current input mode.
    pub mode: Mode,
    /// Open settings editor, present while `mode` is [`Mode::EditSettings`].
    pub editor: Option<SettingsEditor>,
    /// Breakpoint for the current terminal width. Updated during each render.
    pub breakpoint: Breakpoint,
    /// Vertical scroll offset of the grid, in terminal lines.
    pub scroll: u16,
    /// Total height of the rendered grid, in terminal lines.
    ///
    /// Updated during each render pass, bounds `scroll`.
    pub content_height: u16,
    /// Height of the grid viewport. Updated during each render pass.
    pub viewport_height: u16,
    /// Terminal lines per grid row unit.
    pub row_height: u16,
    /// Temporary status message shown in footer, with expiry time.
    pub status_message: Option<(String, Instant)>,
    /// Latest weather readings per location.
    pub weather: WeatherReadings,
    /// Location used by weather widgets without their own coordinates.
    pub default_location: Location,
    tick_rate: Duration,
    fetcher: Option<WeatherFetcher>,
    weather_rx: Option<mpsc::UnboundedReceiver<WeatherUpdate>>,
    started: Instant,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("should_quit", &self.should_quit)
            .field("tick_count", &self.tick_count)
            .field("store", &self.store)
            .field("selected", &self.selected)
            .field("mode", &self.mode)
            .field("breakpoint", &self.breakpoint)
            .field("scroll", &self.scroll)
            .field("weather_enabled", &self.fetcher.is_some())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Creates an App around `store` with weather disabled.
    ///
    /// The first widget, if any, starts selected.
    pub fn new(store: DashboardStore) -> Self {
        let mut app = Self {
            should_quit: false,
            tick_count: 0,
            store,
            registry: WidgetRegistry::new(),
            selected: None,
            mode: Mode::Dashboard,
            editor: None,
            breakpoint: Breakpoint::Md,
            scroll: 0,
            content_height: 0,
            viewport_height: 0,
            row_height: DEFAULT_ROW_HEIGHT,
            status_message: None,
            weather: WeatherReadings::new(),
            default_location: Location::DEFAULT,
            tick_rate: DEFAULT_TICK_RATE,
            fetcher: None,
            weather_rx: None,
            started: Instant::now(),
        };
        app.init_selection();
        app
    }

    pub fn with_tick_rate(mut self, tick_rate: Duration) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    pub fn with_row_height(mut self, row_height: u16) -> Self {
        self.row_height = row_height.max(1);
        self
    }

    pub fn with_default_location(mut self, location: Location) -> Self {
        self.default_location = location;
        self
    }

    /// Enables weather refreshes through `fetcher`, whose updates arrive on `rx`.
    pub fn with_weather(
        mut self,
        fetcher: WeatherFetcher,
        rx: mpsc::UnboundedReceiver<WeatherUpdate>,
    ) -> Self {
        self.fetcher = Some(fetcher);
        self.weather_rx = Some(rx);
        self
    }

    /// Tick interval of the event loop.
    pub fn tick_rate(&self) -> Duration {
        self.tick_rate
    }

    /// Whether weather fetching is enabled.
    pub fn weather_enabled(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Selects the first widget, or nothing on an empty dashboard.
    pub fn init_selection(&mut self) {
        self.selected = self.store.widgets().first().map(|w| w.id);
    }

    /// Selects the next widget in insertion order, wrapping around.
    pub fn select_next(&mut self) {
        let widgets = self.store.widgets();
        if widgets.is_empty() {
            self.selected = None;
            return;
        }
        let next = match self.selected.and_then(|id| self.store.index_of(id)) {
            Some(i) => (i + 1) % widgets.len(),
            None => 0,
        };
        self.selected = Some(widgets[next].id);
    }

    /// Selects the previous widget in insertion order, wrapping around.
    pub fn select_previous(&mut self) {
        let widgets = self.store.widgets();
        if widgets.is_empty() {
            self.selected = None;
            return;
        }
        let previous = match self.selected.and_then(|id| self.store.index_of(id)) {
            Some(0) | None => widgets.len() - 1,
            Some(i) => i - 1,
        };
        self.selected = Some(widgets[previous].id);
    }

    /// The selected widget's record.
    pub fn selected_record(&self) -> Option<&WidgetRecord> {
        self.selected.and_then(|id| self.store.get(id))
    }

    /// Opens the settings editor for the selected widget.
    ///
    /// Returns `false` when nothing is selected.
    pub fn open_settings_editor(&mut self) -> bool {
        let Some(record) = self.selected_record() else {
            return false;
        };
        self.editor = Some(SettingsEditor::open(record));
        self.mode = Mode::EditSettings;
        true
    }

    /// Closes the settings editor, discarding anything not applied.
    pub fn close_settings_editor(&mut self) {
        self.editor = None;
        self.mode = Mode::Dashboard;
    }

    /// Updates the breakpoint for a terminal `width`.
    pub fn set_width(&mut self, width: u16) {
        let breakpoint = Breakpoint::for_width(width);
        if breakpoint != self.breakpoint {
            tracing::debug!(from = %self.breakpoint, to = %breakpoint, width, "breakpoint changed");
            self.breakpoint = breakpoint;
        }
    }

    /// Largest useful scroll offset for the last rendered frame.
    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }

    /// Shows `message` in the footer for a couple of seconds.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now() + STATUS_MESSAGE_DURATION));
    }

    /// Clears the status message if its expiry time has passed.
    pub fn expire_status_message(&mut self) {
        if let Some((_, expiry)) = &self.status_message {
            if Instant::now() >= *expiry {
                self.status_message = None;
            }
        }
    }

    /// Rendering context for the current frame.
    pub fn widget_context(&self) -> WidgetContext<'_> {
        let ctx = WidgetContext::new(chrono::Local::now())
            .with_uptime(self.started.elapsed())
            .with_default_location(self.default_location);
        if self.weather_enabled() {
            ctx.with_weather(&self.weather)
        } else {
            ctx
        }
    }

    /// Applies an action. Returns `true` when the application should exit.
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::None => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Add(kind) => self.add_widget(kind),
            Action::Remove(id) => self.remove_widget(id),
            Action::Gesture(id, gesture) => self.apply_gesture(id, gesture),
            Action::UpdateSettings(id, settings) => self.update_settings(id, settings),
            Action::RefreshWeather => self.refresh_weather(true),
        }
        self.should_quit
    }

    /// Adds a widget and selects it.
    pub fn add_widget(&mut self, kind: WidgetKind) {
        let record = self.store.add(kind);
        let (id, layout) = (record.id, record.layout);
        tracing::info!(id, %kind, x = layout.x, y = layout.y, "widget added");
        self.selected = Some(id);
        self.set_status(format!("Added {} widget", kind.label()));
        if kind == WidgetKind::Weather {
            self.fetch_missing_weather();
        }
    }

    /// Removes a widget. The selection moves to the widget that took its
    /// place in insertion order.
    pub fn remove_widget(&mut self, id: WidgetId) {
        let index = self.store.index_of(id);
        let Some(removed) = self.store.remove(id) else {
            return;
        };
        tracing::info!(id, kind = %removed.kind, "widget removed");
        if self.selected == Some(id) {
            let widgets = self.store.widgets();
            self.selected = index
                .and_then(|i| widgets.get(i).or_else(|| widgets.last()))
                .map(|w| w.id);
        }
        self.set_status(format!("Removed {} widget", removed.kind.label()));
    }

    /// Runs a move/resize gesture through the reconciler.
    ///
    /// Rejected gestures leave the layout unchanged and explain why in the
    /// footer.
    pub fn apply_gesture(&mut self, id: WidgetId, gesture: Gesture) {
        match gesture::apply(self.store.widgets(), id, gesture, self.breakpoint) {
            Ok(layouts) => self.store.update_layout(&layouts),
            Err(e) => {
                tracing::debug!(id, ?gesture, error = %e, "gesture rejected");
                self.set_status(capitalize(&e.to_string()));
            }
        }
    }

    /// Replaces a widget's settings.
    pub fn update_settings(&mut self, id: WidgetId, settings: WidgetSettings) {
        let weather_moved = self.store.get(id).is_some_and(|w| {
            w.kind == WidgetKind::Weather
                && w.settings.as_ref().and_then(|s| s.location()) != settings.location()
        });
        if self.store.update_settings(id, Some(settings)) && weather_moved {
            self.fetch_missing_weather();
        }
    }

    /// Fetches weather for widget locations that have no reading yet,
    /// without waiting for the next scheduled refresh.
    pub fn fetch_missing_weather(&mut self) {
        let Some(fetcher) = self.fetcher.as_mut() else {
            return;
        };
        let missing: Vec<Location> = weather_locations(self.store.widgets(), self.default_location)
            .into_iter()
            .filter(|&location| self.weather.get(location).is_none())
            .collect();
        if !missing.is_empty() {
            fetcher.fetch_now(&missing);
        }
    }

    /// Starts weather fetches for every weather widget location when the
    /// refresh interval has elapsed, or unconditionally when `force` is set.
    ///
    /// Must be called from within a tokio runtime when weather is enabled.
    pub fn refresh_weather(&mut self, force: bool) {
        let Some(fetcher) = self.fetcher.as_mut() else {
            if force {
                self.set_status("Weather is disabled in the configuration");
            }
            return;
        };
        let now = Instant::now();
        if !force && !fetcher.is_due(now) {
            return;
        }
        let locations = weather_locations(self.store.widgets(), self.default_location);
        if locations.is_empty() {
            if force {
                self.set_status("No weather widgets to refresh");
            }
            return;
        }
        let started = fetcher.refresh(&locations, now);
        if force {
            self.set_status(format!("Refreshing weather ({started} started)"));
        }
    }

    /// Applies weather results that arrived since the last call.
    pub fn drain_weather_updates(&mut self) -> usize {
        let Some(rx) = self.weather_rx.as_mut() else {
            return 0;
        };
        let mut applied = 0;
        while let Ok(update) = rx.try_recv() {
            if let Some(fetcher) = self.fetcher.as_mut() {
                fetcher.complete(&update);
            }
            self.weather.apply(update);
            applied += 1;
        }
        applied
    }

    /// Handles a mouse event: the wheel scrolls the grid.
    fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::ScrollDown => self.scroll_down(WHEEL_SCROLL),
            MouseEventKind::ScrollUp => self.scroll_up(WHEEL_SCROLL),
            _ => {}
        }
    }

    /// Handles one event from the event handler.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                let action = handle_key_event(self, key);
                self.dispatch(action);
            }
            Event::Mouse(mouse) => self.handle_mouse_event(mouse),
            Event::Tick => {
                self.tick_count += 1;
                self.expire_status_message();
                self.refresh_weather(false);
            }
            Event::Resize(width, _) => self.set_width(width),
        }
    }

    /// Runs the TUI application: sets up terminal, enters event loop, restores on exit.
    pub async fn run(&mut self) -> io::Result<()> {
        // Install panic hook that restores terminal before printing panic info
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = restore_terminal();
            original_hook(panic_info);
        }));

        setup_terminal()?;

        let result = self.event_loop().await;

        restore_terminal()?;
        result
    }

    /// Main event loop: renders UI and processes events.
    async fn event_loop(&mut self) -> io::Result<()> {
        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend)?;
        let event_handler = EventHandler::new(self.tick_rate);
        let mut reader = EventStream::new();

        let size = terminal.size()?;
        self.set_width(size.width);
        self.refresh_weather(false);

        loop {
            // Drain weather results before rendering
            self.drain_weather_updates();

            terminal.draw(|frame| render_dashboard(frame, self))?;

            let event = event_handler.next(&mut reader).await?;
            self.handle_event(event);
            if self.should_quit {
                tracing::info!(widgets = self.store.len(), "quitting");
                return Ok(());
            }
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Enables raw mode and switches to the alternate screen.
fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    Ok(())
}

/// Restores the terminal to its original state.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[cfg(test)]
mod tests;
