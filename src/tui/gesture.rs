//! Keyboard move/resize gestures.
//!
//! A gesture moves or resizes one widget by one grid cell at the current
//! breakpoint. The result is a full [`BreakpointLayouts`] report for that
//! breakpoint, the same shape a pointer-driven grid would report after a
//! drag, so it goes through [`DashboardStore::update_layout`] like any other
//! layout change.
//!
//! [`DashboardStore::update_layout`]: crate::store::DashboardStore::update_layout

use thiserror::Error;

use crate::layout::{Breakpoint, BreakpointLayouts, GridItem, LayoutRect};
use crate::{WidgetId, WidgetRecord};

/// Arrow direction of a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// A one-cell layout change for a single widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    /// Shift the widget one cell.
    Move(Direction),
    /// Grow (`Right`, `Down`) or shrink (`Left`, `Up`) the widget one cell.
    Resize(Direction),
}

/// Reasons a gesture is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("no widget with id {0}")]
    UnknownWidget(WidgetId),

    #[error("layout is read-only at the {0} breakpoint, widen the terminal to rearrange")]
    StackedBreakpoint(Breakpoint),

    #[error("widget {id} would overlap widget {other}")]
    Collision { id: WidgetId, other: WidgetId },
}

/// Rectangle a widget would occupy after `gesture`, clamped to `columns`
/// and to its own min/max bounds.
pub fn target_rect(current: LayoutRect, gesture: Gesture, columns: u16) -> LayoutRect {
    let columns = columns.max(1);
    let mut rect = current;
    match gesture {
        Gesture::Move(Direction::Left) => rect.x = rect.x.saturating_sub(1),
        Gesture::Move(Direction::Right) => rect.x = rect.x.saturating_add(1),
        Gesture::Move(Direction::Up) => rect.y = rect.y.saturating_sub(1),
        Gesture::Move(Direction::Down) => rect.y = rect.y.saturating_add(1),
        Gesture::Resize(Direction::Left) => rect.w = rect.w.saturating_sub(1),
        Gesture::Resize(Direction::Right) => {
            rect.w = rect
                .w
                .saturating_add(1)
                .min(columns.saturating_sub(rect.x).max(1));
        }
        Gesture::Resize(Direction::Up) => rect.h = rect.h.saturating_sub(1),
        Gesture::Resize(Direction::Down) => rect.h = rect.h.saturating_add(1),
    }
    rect.clamped(columns)
}

/// Applies `gesture` to widget `id` and returns the layout report for
/// `breakpoint`.
///
/// Every widget appears in the report; only the target's rectangle differs
/// from the current layout. A gesture that cannot change anything (moving
/// left at column 0, shrinking below the minimum) yields an unchanged report.
///
/// # Errors
///
/// - [`GestureError::StackedBreakpoint`] at single-column breakpoints
/// - [`GestureError::UnknownWidget`] when `id` is not in `widgets`
/// - [`GestureError::Collision`] when the new rectangle overlaps a widget
///   the current one does not already overlap
pub fn apply(
    widgets: &[WidgetRecord],
    id: WidgetId,
    gesture: Gesture,
    breakpoint: Breakpoint,
) -> Result<BreakpointLayouts, GestureError> {
    if !breakpoint.is_authoritative() {
        return Err(GestureError::StackedBreakpoint(breakpoint));
    }
    let record = widgets
        .iter()
        .find(|w| w.id == id)
        .ok_or(GestureError::UnknownWidget(id))?;

    let target = target_rect(record.layout, gesture, breakpoint.columns());
    if let Some(other) = widgets.iter().find(|w| {
        w.id != id && target.overlaps(&w.layout) && !record.layout.overlaps(&w.layout)
    }) {
        return Err(GestureError::Collision {
            id,
            other: other.id,
        });
    }

    let items = widgets
        .iter()
        .map(|w| {
            if w.id == id {
                GridItem::new(id.to_string(), target)
            } else {
                GridItem::from_record(w)
            }
        })
        .collect();
    tracing::debug!(id, ?gesture, %breakpoint, ?target, "gesture applied");
    Ok(BreakpointLayouts::new().with(breakpoint, items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::reconcile;
    use crate::store::DashboardStore;

    fn seeded() -> DashboardStore {
        DashboardStore::with_defaults(3)
    }

    fn rect_of(layouts: &BreakpointLayouts, bp: Breakpoint, id: WidgetId) -> LayoutRect {
        layouts
            .get(bp)
            .and_then(|items| items.iter().find(|i| i.i == id.to_string()))
            .map(|i| i.rect)
            .expect("item reported")
    }

    #[test]
    fn move_down_reports_new_position() {
        let store = seeded();
        // clock at (0,2) moves to (0,3)
        let layouts = apply(store.widgets(), 4, Gesture::Move(Direction::Down), Breakpoint::Md)
            .expect("free space below");
        assert_eq!(rect_of(&layouts, Breakpoint::Md, 4).y, 3);
        assert_eq!(layouts.get(Breakpoint::Md).map(<[GridItem]>::len), Some(4));
    }

    #[test]
    fn report_leaves_other_widgets_untouched() {
        let store = seeded();
        let layouts = apply(store.widgets(), 4, Gesture::Move(Direction::Down), Breakpoint::Md)
            .expect("applies");
        for record in store.widgets().iter().filter(|w| w.id != 4) {
            assert_eq!(rect_of(&layouts, Breakpoint::Md, record.id), record.layout);
        }
    }

    #[test]
    fn move_left_at_edge_is_unchanged() {
        let store = seeded();
        let layouts = apply(store.widgets(), 1, Gesture::Move(Direction::Left), Breakpoint::Lg)
            .expect("applies");
        assert_eq!(rect_of(&layouts, Breakpoint::Lg, 1), store.widgets()[0].layout);
    }

    #[test]
    fn move_right_into_neighbour_collides() {
        let store = seeded();
        let err = apply(store.widgets(), 1, Gesture::Move(Direction::Right), Breakpoint::Md)
            .expect_err("counter sits at column 2");
        assert_eq!(err, GestureError::Collision { id: 1, other: 2 });
    }

    #[test]
    fn move_is_clamped_to_breakpoint_columns() {
        let store = seeded();
        // counter at x=2, w=1 cannot move past column 3 at md
        let layouts = apply(store.widgets(), 2, Gesture::Move(Direction::Right), Breakpoint::Md)
            .expect("clamped, not rejected");
        assert_eq!(rect_of(&layouts, Breakpoint::Md, 2).x, 2);

        // at lg there is a fourth column
        let layouts = apply(store.widgets(), 2, Gesture::Move(Direction::Right), Breakpoint::Lg)
            .expect("free column");
        assert_eq!(rect_of(&layouts, Breakpoint::Lg, 2).x, 3);
    }

    #[test]
    fn resize_respects_minimums() {
        let store = seeded();
        // weather has minH 2
        let layouts = apply(store.widgets(), 1, Gesture::Resize(Direction::Up), Breakpoint::Md)
            .expect("applies");
        assert_eq!(rect_of(&layouts, Breakpoint::Md, 1).h, 2);

        let layouts = apply(store.widgets(), 1, Gesture::Resize(Direction::Left), Breakpoint::Md)
            .expect("applies");
        assert_eq!(rect_of(&layouts, Breakpoint::Md, 1).w, 1);
    }

    #[test]
    fn resize_right_stops_at_last_column() {
        let mut store = DashboardStore::new(3);
        let id = store.add(crate::WidgetKind::Chart).id;
        let layouts = apply(store.widgets(), id, Gesture::Resize(Direction::Right), Breakpoint::Md)
            .expect("applies");
        let rect = rect_of(&layouts, Breakpoint::Md, id);
        assert_eq!((rect.x, rect.w), (0, 3));

        let store_rect = LayoutRect::new(0, 0, 3, 2);
        let again = target_rect(store_rect, Gesture::Resize(Direction::Right), 3);
        assert_eq!(again.w, 3);
        assert_eq!(again.x, 0);
    }

    #[test]
    fn resize_respects_maximums() {
        let rect = LayoutRect::new(0, 0, 2, 2).with_max(2, 3);
        assert_eq!(target_rect(rect, Gesture::Resize(Direction::Right), 4).w, 2);
        let taller = target_rect(rect, Gesture::Resize(Direction::Down), 4);
        assert_eq!(taller.h, 3);
        assert_eq!(target_rect(taller, Gesture::Resize(Direction::Down), 4).h, 3);
    }

    #[test]
    fn stacked_breakpoints_reject_gestures() {
        let store = seeded();
        for bp in [Breakpoint::Sm, Breakpoint::Xs] {
            let err = apply(store.widgets(), 1, Gesture::Move(Direction::Down), bp)
                .expect_err("read-only");
            assert_eq!(err, GestureError::StackedBreakpoint(bp));
        }
    }

    #[test]
    fn unknown_widget_is_rejected() {
        let store = seeded();
        let err = apply(store.widgets(), 42, Gesture::Move(Direction::Down), Breakpoint::Lg)
            .expect_err("no such widget");
        assert_eq!(err, GestureError::UnknownWidget(42));
        assert_eq!(err.to_string(), "no widget with id 42");
    }

    #[test]
    fn existing_overlap_does_not_block_gestures() {
        let mut store = DashboardStore::new(3);
        store.add(crate::WidgetKind::Weather);
        let info = store.add(crate::WidgetKind::Info).id;
        let layouts = BreakpointLayouts::new().with(
            Breakpoint::Lg,
            vec![
                GridItem::new("1", LayoutRect::new(0, 0, 2, 2).with_min(1, 2)),
                GridItem::new(info.to_string(), LayoutRect::new(1, 1, 1, 2).with_min(1, 1)),
            ],
        );
        store.update_layout(&layouts);

        let report = apply(store.widgets(), info, Gesture::Move(Direction::Left), Breakpoint::Lg)
            .expect("overlap with weather predates the gesture");
        assert_eq!(rect_of(&report, Breakpoint::Lg, info).x, 0);
    }

    #[test]
    fn report_reconciles_into_store_layout() {
        let store = seeded();
        let layouts = apply(store.widgets(), 3, Gesture::Move(Direction::Down), Breakpoint::Md)
            .expect("free space below revenue");
        let updated = reconcile(store.widgets(), &layouts);
        assert_eq!(updated[2].layout.y, 3);
        assert_eq!(updated[2].layout.min_w, Some(1));
    }
}
