//! Default placement of newly added widgets.
//!
//! [`place`] is a pure function of the widget kind, the rectangles already on
//! the grid and the column count. It never fails: when nothing fits it falls
//! back to `(0, maxY)` without checking bounds. That fallback is only
//! reachable when the default width exceeds the column count, so the result
//! then overflows the grid.

use super::rect::{max_bottom, LayoutRect};
use crate::WidgetKind;

/// Default size and minimum bounds for a widget kind, positioned at the origin.
pub fn default_rect(kind: WidgetKind) -> LayoutRect {
    match kind {
        WidgetKind::Weather => LayoutRect::new(0, 0, 2, 2).with_min(1, 2),
        WidgetKind::Chart => LayoutRect::new(0, 0, 2, 2).with_min(2, 2),
        WidgetKind::Counter | WidgetKind::Revenue | WidgetKind::Clock | WidgetKind::Info => {
            LayoutRect::new(0, 0, 1, 2).with_min(1, 1)
        }
    }
}

/// Computes a default rectangle for a new widget of `kind`.
///
/// Rows are scanned top-down from 0 to the lowest unoccupied row, columns
/// left-to-right, and the first in-bounds position that overlaps no existing
/// rectangle wins. If none does, the widget goes to `(0, maxY)`.
///
/// # Example
///
/// ```
/// use gridboard::layout::{place, LayoutRect};
/// use gridboard::WidgetKind;
///
/// let existing = [LayoutRect::new(0, 0, 2, 2)];
/// let rect = place(WidgetKind::Clock, &existing, 3);
/// assert_eq!((rect.x, rect.y, rect.w, rect.h), (2, 0, 1, 2));
/// ```
pub fn place(kind: WidgetKind, existing: &[LayoutRect], columns: u16) -> LayoutRect {
    let template = default_rect(kind);
    let max_y = max_bottom(existing);

    if template.w <= columns {
        for y in 0..=max_y {
            for x in 0..=(columns - template.w) {
                let candidate = template.at(x, y);
                if !existing.iter().any(|r| r.overlaps(&candidate)) {
                    return candidate;
                }
            }
        }
    }

    tracing::debug!(
        kind = %kind,
        columns,
        max_y,
        "no free slot for widget, falling back to first column of the bottom row"
    );
    template.at(0, max_y)
}
