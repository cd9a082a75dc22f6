//! Reconciling rendering-surface layout reports with widget records.
//!
//! After every drag/resize gesture the rendering surface reports the full
//! rectangle set for each breakpoint, keyed by the widget id as a string.
//! Only the primary (largest non-empty authoritative) breakpoint is folded
//! back into the records; narrow breakpoints are projections.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::breakpoint::Breakpoint;
use super::rect::LayoutRect;
use crate::WidgetRecord;

/// One rectangle as reported by the rendering surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridItem {
    /// Widget identifier, stringified.
    pub i: String,
    /// Position, size and bounds.
    #[serde(flatten)]
    pub rect: LayoutRect,
}

impl GridItem {
    /// Creates an item for the given identifier.
    pub fn new(i: impl Into<String>, rect: LayoutRect) -> Self {
        Self { i: i.into(), rect }
    }

    /// The item describing a widget's current layout.
    pub fn from_record(record: &WidgetRecord) -> Self {
        Self::new(record.id.to_string(), record.layout)
    }
}

/// Per-breakpoint rectangle reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BreakpointLayouts(BTreeMap<Breakpoint, Vec<GridItem>>);

impl BreakpointLayouts {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the items for a breakpoint, replacing any previous report.
    pub fn insert(&mut self, breakpoint: Breakpoint, items: Vec<GridItem>) {
        self.0.insert(breakpoint, items);
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, breakpoint: Breakpoint, items: Vec<GridItem>) -> Self {
        self.insert(breakpoint, items);
        self
    }

    /// Items reported for a breakpoint.
    pub fn get(&self, breakpoint: Breakpoint) -> Option<&[GridItem]> {
        self.0.get(&breakpoint).map(Vec::as_slice)
    }

    /// The canonical item set: the first non-empty authoritative breakpoint,
    /// largest first.
    pub fn primary(&self) -> Option<(Breakpoint, &[GridItem])> {
        Breakpoint::AUTHORITATIVE.into_iter().find_map(|bp| {
            self.get(bp)
                .filter(|items| !items.is_empty())
                .map(|items| (bp, items))
        })
    }
}

/// Applies the primary breakpoint's rectangles to `widgets`.
///
/// Returns a new collection with the same length, order, ids, kinds and
/// settings. A widget whose id is missing from the primary set keeps its
/// layout; with no primary set at all every layout is kept.
pub fn reconcile(widgets: &[WidgetRecord], layouts: &BreakpointLayouts) -> Vec<WidgetRecord> {
    let Some((breakpoint, items)) = layouts.primary() else {
        tracing::debug!("layout report has no authoritative breakpoint, keeping layouts");
        return widgets.to_vec();
    };

    let mut unmatched = 0usize;
    let reconciled = widgets
        .iter()
        .map(|widget| {
            let key = widget.id.to_string();
            match items.iter().find(|item| item.i == key) {
                Some(item) => WidgetRecord {
                    layout: item.rect,
                    ..widget.clone()
                },
                None => {
                    unmatched += 1;
                    widget.clone()
                }
            }
        })
        .collect();

    tracing::debug!(%breakpoint, items = items.len(), unmatched, "reconciled layout report");
    reconciled
}

/// Single-column projection used by narrow breakpoints.
///
/// Widgets are stacked in insertion order at `x = 0`, one column wide, each
/// keeping its height. Never fed back into [`reconcile`].
pub fn stacked_projection(widgets: &[WidgetRecord]) -> Vec<GridItem> {
    let mut y = 0u16;
    widgets
        .iter()
        .map(|widget| {
            let rect = LayoutRect {
                x: 0,
                y,
                w: 1,
                ..widget.layout
            };
            y = y.saturating_add(widget.layout.h);
            GridItem::new(widget.id.to_string(), rect)
        })
        .collect()
}
