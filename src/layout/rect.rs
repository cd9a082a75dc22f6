//! Grid rectangles in cell units.

use serde::{Deserialize, Serialize};

/// A widget's position and size on the grid, in cell units.
///
/// Field names follow the grid library's JSON shape (`minW`, `maxH`, ...).
/// Bounds are optional; when present, `min_w <= w <= max_w` and
/// `min_h <= h <= max_h` are expected to hold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayoutRect {
    /// Column of the left edge.
    pub x: u16,
    /// Row of the top edge.
    pub y: u16,
    /// Width in columns.
    pub w: u16,
    /// Height in rows.
    pub h: u16,
    /// Minimum width.
    #[serde(rename = "minW", default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u16>,
    /// Minimum height.
    #[serde(rename = "minH", default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u16>,
    /// Maximum width.
    #[serde(rename = "maxW", default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u16>,
    /// Maximum height.
    #[serde(rename = "maxH", default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u16>,
}

impl LayoutRect {
    /// Creates an unbounded rectangle.
    pub const fn new(x: u16, y: u16, w: u16, h: u16) -> Self {
        Self {
            x,
            y,
            w,
            h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
        }
    }

    /// Sets the minimum size.
    pub const fn with_min(mut self, min_w: u16, min_h: u16) -> Self {
        self.min_w = Some(min_w);
        self.min_h = Some(min_h);
        self
    }

    /// Sets the maximum size.
    pub const fn with_max(mut self, max_w: u16, max_h: u16) -> Self {
        self.max_w = Some(max_w);
        self.max_h = Some(max_h);
        self
    }

    /// Same size and bounds, moved to `(x, y)`.
    pub const fn at(mut self, x: u16, y: u16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// One past the rightmost column.
    pub fn right(&self) -> u32 {
        u32::from(self.x) + u32::from(self.w)
    }

    /// One past the bottom row.
    pub fn bottom(&self) -> u32 {
        u32::from(self.y) + u32::from(self.h)
    }

    /// Half-open interval overlap on both axes.
    ///
    /// Rectangles that only share an edge do not overlap, and a zero-sized
    /// rectangle overlaps nothing.
    pub fn overlaps(&self, other: &LayoutRect) -> bool {
        if self.w == 0 || self.h == 0 || other.w == 0 || other.h == 0 {
            return false;
        }
        u32::from(self.x) < other.right()
            && u32::from(other.x) < self.right()
            && u32::from(self.y) < other.bottom()
            && u32::from(other.y) < self.bottom()
    }

    /// Whether the rectangle lies within `columns` columns.
    pub fn fits_columns(&self, columns: u16) -> bool {
        self.right() <= u32::from(columns)
    }

    /// Whether `w`/`h` respect the min/max bounds that are set.
    pub fn satisfies_bounds(&self) -> bool {
        self.min_w.map_or(true, |m| self.w >= m)
            && self.max_w.map_or(true, |m| self.w <= m)
            && self.min_h.map_or(true, |m| self.h >= m)
            && self.max_h.map_or(true, |m| self.h <= m)
    }

    /// Clamps the size to the bounds, then the size and position to `columns`.
    ///
    /// The column limit wins over `min_w` when the two conflict, so the
    /// result always fits the grid when `columns > 0`.
    pub fn clamped(mut self, columns: u16) -> Self {
        let columns = columns.max(1);
        self.w = clamp_opt(self.w.max(1), self.min_w, self.max_w).min(columns);
        self.h = clamp_opt(self.h.max(1), self.min_h, self.max_h);
        self.x = self.x.min(columns - self.w);
        self
    }
}

fn clamp_opt(value: u16, min: Option<u16>, max: Option<u16>) -> u16 {
    let value = min.map_or(value, |m| value.max(m));
    max.map_or(value, |m| value.min(m))
}

/// Lowest unoccupied row: the largest `y + h`, or 0 for no rectangles.
pub fn max_bottom<'a>(rects: impl IntoIterator<Item = &'a LayoutRect>) -> u16 {
    rects
        .into_iter()
        .map(|r| r.bottom())
        .max()
        .map_or(0, |b| u16::try_from(b).unwrap_or(u16::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rectangles() {
        let a = LayoutRect::new(0, 0, 2, 2);
        let b = LayoutRect::new(1, 1, 2, 2);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn edge_sharing_rectangles_do_not_overlap() {
        let a = LayoutRect::new(0, 0, 2, 2);
        assert!(!a.overlaps(&LayoutRect::new(2, 0, 1, 2)));
        assert!(!a.overlaps(&LayoutRect::new(0, 2, 2, 1)));
    }

    #[test]
    fn zero_sized_rectangle_overlaps_nothing() {
        let a = LayoutRect::new(0, 0, 3, 3);
        assert!(!a.overlaps(&LayoutRect::new(1, 1, 0, 0)));
        assert!(!a.overlaps(&LayoutRect::new(1, 1, 2, 0)));
        assert!(!LayoutRect::new(1, 1, 0, 2).overlaps(&a));
    }

    #[test]
    fn fits_columns_checks_right_edge() {
        assert!(LayoutRect::new(2, 0, 1, 1).fits_columns(3));
        assert!(!LayoutRect::new(2, 0, 2, 1).fits_columns(3));
    }

    #[test]
    fn bounds_are_optional() {
        assert!(LayoutRect::new(0, 0, 5, 5).satisfies_bounds());
        assert!(!LayoutRect::new(0, 0, 1, 1).with_min(1, 2).satisfies_bounds());
        assert!(!LayoutRect::new(0, 0, 3, 1).with_max(2, 2).satisfies_bounds());
    }

    #[test]
    fn clamped_respects_bounds_and_columns() {
        let r = LayoutRect::new(2, 0, 1, 1).with_min(2, 2).clamped(3);
        assert_eq!((r.x, r.y, r.w, r.h), (1, 0, 2, 2));

        let r = LayoutRect::new(0, 0, 9, 9).with_max(2, 3).clamped(4);
        assert_eq!((r.w, r.h), (2, 3));
    }

    #[test]
    fn clamped_prefers_columns_over_min_width() {
        let r = LayoutRect::new(0, 0, 2, 2).with_min(2, 2).clamped(1);
        assert_eq!((r.x, r.w), (0, 1));
    }

    #[test]
    fn max_bottom_of_empty_set_is_zero() {
        let empty: [LayoutRect; 0] = [];
        assert_eq!(max_bottom(&empty), 0);
    }

    #[test]
    fn max_bottom_takes_largest_edge() {
        let rects = [LayoutRect::new(0, 0, 2, 2), LayoutRect::new(2, 2, 1, 3)];
        assert_eq!(max_bottom(&rects), 5);
    }

    #[test]
    fn serializes_with_grid_field_names() {
        let r = LayoutRect::new(0, 0, 2, 2).with_min(1, 2);
        let json = serde_json::to_value(r).expect("serializes");
        assert_eq!(json["minW"], 1);
        assert_eq!(json["minH"], 2);
        assert!(json.get("maxW").is_none());
    }
}
