//! Widget system for the dashboard.
//!
//! This module defines the `Widget` trait that every widget kind implements,
//! and the `WidgetRegistry` mapping kinds to renderer factories.
//!
//! # Architecture
//!
//! A widget renderer is stateless. It receives the [`WidgetRecord`] it
//! draws, the size of the card's inner area and a [`WidgetContext`] with
//! shared state (time, weather readings), and returns the lines of the card
//! body. The card frame, title and subtitle are drawn by the TUI from
//! [`Widget::title`] and [`Widget::subtitle`].
//!
//! Renderers never mutate the store. Removing a widget or changing its
//! settings goes through the application, which calls the store.
//!
//! # Example
//!
//! ```
//! use gridboard::widgets::{WidgetContext, WidgetRegistry};
//! use gridboard::{LayoutRect, WidgetKind, WidgetRecord};
//! use ratatui::layout::Size;
//!
//! let registry = WidgetRegistry::new();
//! let widget = registry.create(WidgetKind::Info).expect("info widget exists");
//! let record = WidgetRecord::new(1, WidgetKind::Info, LayoutRect::new(0, 0, 1, 2));
//! let ctx = WidgetContext::new(chrono::Local::now());
//! assert_eq!(widget.title(&record, &ctx), "Info Card");
//! let lines = widget.render(&record, Size::new(40, 6), &ctx);
//! assert!(!lines.is_empty());
//! ```

pub mod chart;
pub mod clock;
pub mod context;
pub mod counter;
pub mod info;
pub mod revenue;
pub mod weather;

pub use context::WidgetContext;

use std::collections::HashMap;

use ratatui::layout::Size;
use ratatui::style::Color;
use ratatui::text::Line;

use crate::settings::parse_hex_color;
use crate::{WidgetKind, WidgetRecord};

/// Trait for dashboard widget renderers.
///
/// Renderers must be `Send + Sync` so the registry can be shared.
pub trait Widget: Send + Sync {
    /// Kind this renderer draws.
    fn kind(&self) -> WidgetKind;

    /// Title used when the settings don't override it.
    fn default_title(&self, record: &WidgetRecord, context: &WidgetContext) -> String;

    /// Subtitle used when the settings don't override it.
    fn default_subtitle(&self, record: &WidgetRecord, context: &WidgetContext) -> String;

    /// Card body for an inner area of `size`.
    fn render(&self, record: &WidgetRecord, size: Size, context: &WidgetContext) -> Vec<Line<'static>>;

    /// Minimum inner width in columns for useful output.
    fn min_width(&self) -> u16 {
        12
    }

    /// Card title, honouring the title override.
    fn title(&self, record: &WidgetRecord, context: &WidgetContext) -> String {
        record
            .settings
            .as_ref()
            .and_then(|s| s.title.clone())
            .unwrap_or_else(|| self.default_title(record, context))
    }

    /// Card subtitle, honouring the subtitle override.
    fn subtitle(&self, record: &WidgetRecord, context: &WidgetContext) -> String {
        record
            .settings
            .as_ref()
            .and_then(|s| s.subtitle.clone())
            .unwrap_or_else(|| self.default_subtitle(record, context))
    }
}

/// Factory function type for creating widget renderers.
pub type WidgetFactory = fn() -> Box<dyn Widget>;

/// Registry mapping widget kinds to renderer factories.
///
/// Pre-populated with the built-in renderer of every kind. New kinds are
/// added by registration rather than by extending a central match.
///
/// # Example
///
/// ```
/// use gridboard::widgets::WidgetRegistry;
/// use gridboard::WidgetKind;
///
/// let registry = WidgetRegistry::new();
/// assert!(registry.create(WidgetKind::Clock).is_some());
/// assert_eq!(registry.available_kinds().len(), 6);
/// ```
pub struct WidgetRegistry {
    factories: HashMap<WidgetKind, WidgetFactory>,
}

impl WidgetRegistry {
    /// Creates a registry with the built-in renderers.
    pub fn new() -> Self {
        let mut reg = Self::empty();
        reg.register(WidgetKind::Weather, weather::create);
        reg.register(WidgetKind::Counter, counter::create);
        reg.register(WidgetKind::Revenue, revenue::create);
        reg.register(WidgetKind::Clock, clock::create);
        reg.register(WidgetKind::Chart, chart::create);
        reg.register(WidgetKind::Info, info::create);
        reg
    }

    /// Creates a registry with no renderers.
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a renderer factory for `kind`.
    ///
    /// Overwrites any existing factory for the same kind.
    pub fn register(&mut self, kind: WidgetKind, factory: WidgetFactory) {
        self.factories.insert(kind, factory);
    }

    /// Create a renderer for `kind`.
    ///
    /// Returns `None` if no factory is registered for it.
    pub fn create(&self, kind: WidgetKind) -> Option<Box<dyn Widget>> {
        self.factories.get(&kind).map(|f| f())
    }

    /// Registered kinds, in picker order.
    pub fn available_kinds(&self) -> Vec<WidgetKind> {
        let mut kinds: Vec<_> = self.factories.keys().copied().collect();
        kinds.sort();
        kinds
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a `#rrggbb` setting into a terminal color.
pub fn hex_color(value: &str) -> Option<Color> {
    parse_hex_color(value).map(|(r, g, b)| Color::Rgb(r, g, b))
}

/// Formats an integer with `,` thousands separators.
pub(crate) fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRect;
    use crate::WidgetSettings;

    struct MockWidget;

    impl Widget for MockWidget {
        fn kind(&self) -> WidgetKind {
            WidgetKind::Info
        }
        fn default_title(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
            "Mock".to_string()
        }
        fn default_subtitle(&self, _record: &WidgetRecord, _context: &WidgetContext) -> String {
            "mock".to_string()
        }
        fn render(&self, _record: &WidgetRecord, size: Size, _context: &WidgetContext) -> Vec<Line<'static>> {
            vec![Line::raw(format!("mock:{}x{}", size.width, size.height))]
        }
    }

    fn record(kind: WidgetKind) -> WidgetRecord {
        WidgetRecord::new(1, kind, LayoutRect::new(0, 0, 1, 2))
    }

    #[test]
    fn test_registry_creates_every_kind() {
        let reg = WidgetRegistry::new();
        for kind in WidgetKind::ALL {
            let widget = reg.create(kind);
            assert!(widget.is_some(), "expected factory for '{kind}'");
            let widget = widget.expect("already checked");
            assert_eq!(widget.kind(), kind);
        }
    }

    #[test]
    fn test_registry_available_kinds_in_picker_order() {
        let reg = WidgetRegistry::new();
        assert_eq!(reg.available_kinds(), WidgetKind::ALL.to_vec());
    }

    #[test]
    fn test_empty_registry_creates_nothing() {
        let reg = WidgetRegistry::empty();
        assert!(reg.create(WidgetKind::Clock).is_none());
        assert!(reg.available_kinds().is_empty());
    }

    #[test]
    fn test_registry_register_overwrites_existing() {
        let mut reg = WidgetRegistry::new();
        fn mock() -> Box<dyn Widget> {
            Box::new(MockWidget)
        }
        reg.register(WidgetKind::Clock, mock);
        let w = reg.create(WidgetKind::Clock).expect("overwritten factory");
        let ctx = WidgetContext::new(chrono::Local::now());
        assert_eq!(w.title(&record(WidgetKind::Clock), &ctx), "Mock");
    }

    #[test]
    fn test_title_and_subtitle_overrides() {
        let ctx = WidgetContext::new(chrono::Local::now());
        let mut rec = record(WidgetKind::Info);
        assert_eq!(MockWidget.title(&rec, &ctx), "Mock");
        assert_eq!(MockWidget.subtitle(&rec, &ctx), "mock");

        rec.settings = Some(WidgetSettings {
            title: Some("Team Notes".to_string()),
            subtitle: Some("Pinned".to_string()),
            ..Default::default()
        });
        assert_eq!(MockWidget.title(&rec, &ctx), "Team Notes");
        assert_eq!(MockWidget.subtitle(&rec, &ctx), "Pinned");
    }

    #[test]
    fn test_mock_render_receives_size() {
        let ctx = WidgetContext::new(chrono::Local::now());
        let lines = MockWidget.render(&record(WidgetKind::Info), Size::new(30, 4), &ctx);
        assert_eq!(lines[0].to_string(), "mock:30x4");
    }

    #[test]
    fn test_widget_trait_object_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn Widget>();
    }

    #[test]
    fn test_hex_color() {
        assert_eq!(hex_color("#22c55e"), Some(Color::Rgb(0x22, 0xc5, 0x5e)));
        assert_eq!(hex_color("green"), None);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(23456), "23,456");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
