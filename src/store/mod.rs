//! Widget store for the dashboard.
//!
//! [`DashboardStore`] owns the ordered widget collection and is the only
//! place it is mutated. The terminal front end holds one store by value and
//! lends it out immutably to the renderers.

use crate::layout::{place, reconcile, BreakpointLayouts, LayoutRect};
use crate::{WidgetId, WidgetKind, WidgetRecord, WidgetSettings};
use serde::Serialize;

#[cfg(test)]
mod tests;

/// Column count used for placement when none is configured.
pub const DEFAULT_COLUMNS: u16 = 3;

/// Ordered collection of widgets plus the id counter.
///
/// Ids are handed out monotonically and never reused, even after removal.
/// Widgets keep insertion order, which is also the stacking order on
/// single-column screens.
///
/// # Example
///
/// ```
/// use gridboard::store::DashboardStore;
/// use gridboard::WidgetKind;
///
/// let mut store = DashboardStore::with_defaults(3);
/// assert_eq!(store.len(), 4);
///
/// let id = store.add(WidgetKind::Info).id;
/// assert_eq!(id, 5);
/// assert!(store.remove(id).is_some());
/// assert_eq!(store.next_id(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStore {
    /// Widgets in insertion order.
    widgets: Vec<WidgetRecord>,
    /// Id assigned to the next added widget.
    next_id: WidgetId,
    /// Column count the placement algorithm packs into.
    columns: u16,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new(DEFAULT_COLUMNS)
    }
}

impl DashboardStore {
    /// Creates an empty store placing widgets on a `columns`-wide grid.
    ///
    /// A zero column count is treated as one.
    pub fn new(columns: u16) -> Self {
        Self {
            widgets: Vec::new(),
            next_id: 1,
            columns: columns.max(1),
        }
    }

    /// Creates a store seeded with the sample dashboard.
    ///
    /// Weather at the top left, the counter beside it, the clock and the
    /// revenue card on the second row. Ids 1 to 4 are taken.
    pub fn with_defaults(columns: u16) -> Self {
        let seed = [
            (WidgetKind::Weather, LayoutRect::new(0, 0, 2, 2).with_min(1, 2)),
            (WidgetKind::Counter, LayoutRect::new(2, 0, 1, 2).with_min(1, 1)),
            (WidgetKind::Revenue, LayoutRect::new(2, 2, 1, 2).with_min(1, 1)),
            (WidgetKind::Clock, LayoutRect::new(0, 2, 1, 2).with_min(1, 1)),
        ];

        let mut store = Self::new(columns);
        for (kind, layout) in seed {
            let id = store.allocate_id();
            store.widgets.push(WidgetRecord::new(id, kind, layout));
        }
        store
    }

    fn allocate_id(&mut self) -> WidgetId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Adds a widget of `kind` at the first free position and returns it.
    ///
    /// There is no limit on the number of widgets.
    pub fn add(&mut self, kind: WidgetKind) -> &WidgetRecord {
        let layout = place(kind, &self.rects(), self.columns);
        let id = self.allocate_id();
        tracing::debug!(
            id,
            %kind,
            x = layout.x,
            y = layout.y,
            w = layout.w,
            h = layout.h,
            "added widget"
        );

        let index = self.widgets.len();
        self.widgets.push(WidgetRecord::new(id, kind, layout));
        &self.widgets[index]
    }

    /// Removes the widget with `id` and returns it.
    ///
    /// Unknown ids are ignored. Remaining widgets keep their ids and
    /// positions; the grid is not re-packed.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetRecord> {
        let Some(index) = self.widgets.iter().position(|w| w.id == id) else {
            tracing::trace!(id, "remove ignored, no such widget");
            return None;
        };
        let removed = self.widgets.remove(index);
        tracing::debug!(id, kind = %removed.kind, "removed widget");
        Some(removed)
    }

    /// Replaces the settings of widget `id` wholesale.
    ///
    /// Returns `false` when no widget has that id. The layout is untouched.
    pub fn update_settings(&mut self, id: WidgetId, settings: Option<WidgetSettings>) -> bool {
        match self.widgets.iter_mut().find(|w| w.id == id) {
            Some(widget) => {
                widget.settings = settings;
                tracing::debug!(id, "updated widget settings");
                true
            }
            None => {
                tracing::trace!(id, "settings update ignored, no such widget");
                false
            }
        }
    }

    /// Applies a layout report from the rendering surface.
    ///
    /// Rectangles from the primary breakpoint replace the matching widgets'
    /// layouts; everything else stays as it was.
    pub fn update_layout(&mut self, layouts: &BreakpointLayouts) {
        self.widgets = reconcile(&self.widgets, layouts);
    }

    /// Widgets in insertion order.
    pub fn widgets(&self) -> &[WidgetRecord] {
        &self.widgets
    }

    /// Looks up a widget by id.
    pub fn get(&self, id: WidgetId) -> Option<&WidgetRecord> {
        self.widgets.iter().find(|w| w.id == id)
    }

    /// Position of widget `id` in insertion order.
    pub fn index_of(&self, id: WidgetId) -> Option<usize> {
        self.widgets.iter().position(|w| w.id == id)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Id the next [`add`](Self::add) will assign.
    pub fn next_id(&self) -> WidgetId {
        self.next_id
    }

    /// Placement column count.
    pub fn columns(&self) -> u16 {
        self.columns
    }

    /// Current layout rectangles, in insertion order.
    pub fn rects(&self) -> Vec<LayoutRect> {
        self.widgets.iter().map(|w| w.layout).collect()
    }
}
