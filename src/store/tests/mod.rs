//! Tests for the DashboardStore module.
//!
//! - `basic`: construction, seeding and read access
//! - `add`: placement of new widgets
//! - `remove`: removal and id stability
//! - `update`: settings and layout updates

mod basic;
mod remove;
mod update;

use super::DashboardStore;
use crate::layout::{GridItem, LayoutRect};
use crate::WidgetRecord;

/// Builds a grid item reporting `rect` for widget `record`.
pub(super) fn moved(record: &WidgetRecord, rect: LayoutRect) -> GridItem {
    GridItem::new(record.id.to_string(), rect)
}

/// Returns the layout of widget `id`, panicking if it is missing.
pub(super) fn layout_of(store: &DashboardStore, id: u64) -> LayoutRect {
    store
        .get(id)
        .map(|w| w.layout)
        .unwrap_or_else(|| panic!("widget {id} should exist"))
}
