//! Settings and layout updates.

use super::{layout_of, moved, DashboardStore};
use crate::layout::{Breakpoint, BreakpointLayouts, GridItem, LayoutRect};
use crate::settings::TimeRange;
use crate::WidgetSettings;

#[test]
fn test_update_settings_replaces_wholesale() {
    let mut store = DashboardStore::with_defaults(3);
    let first = WidgetSettings {
        title: Some("Sales".to_string()),
        time_range: Some(TimeRange::Week),
        ..Default::default()
    };
    assert!(store.update_settings(3, Some(first)));

    let second = WidgetSettings {
        subtitle: Some("Q3".to_string()),
        ..Default::default()
    };
    assert!(store.update_settings(3, Some(second.clone())));

    let settings = store.get(3).and_then(|w| w.settings.clone());
    assert_eq!(settings, Some(second));
}

#[test]
fn test_update_settings_can_clear() {
    let mut store = DashboardStore::with_defaults(3);
    store.update_settings(1, Some(WidgetSettings::default()));
    assert!(store.update_settings(1, None));
    assert!(store.get(1).is_some_and(|w| w.settings.is_none()));
}

#[test]
fn test_update_settings_unknown_id_is_a_no_op() {
    let mut store = DashboardStore::with_defaults(3);
    let before = store.clone();
    assert!(!store.update_settings(77, Some(WidgetSettings::default())));
    assert_eq!(store, before);
}

#[test]
fn test_update_settings_keeps_layout() {
    let mut store = DashboardStore::with_defaults(3);
    let layout = layout_of(&store, 4);
    store.update_settings(
        4,
        Some(WidgetSettings {
            text_size: Some(1.5),
            ..Default::default()
        }),
    );
    assert_eq!(layout_of(&store, 4), layout);
}

#[test]
fn test_update_layout_applies_primary_breakpoint() {
    let mut store = DashboardStore::with_defaults(3);
    let counter = store.get(2).cloned().expect("counter exists");
    let layouts = BreakpointLayouts::new().with(
        Breakpoint::Md,
        vec![moved(&counter, LayoutRect::new(0, 6, 3, 2).with_min(1, 1))],
    );

    store.update_layout(&layouts);

    assert_eq!(layout_of(&store, 2), LayoutRect::new(0, 6, 3, 2).with_min(1, 1));
    assert_eq!(layout_of(&store, 1), LayoutRect::new(0, 0, 2, 2).with_min(1, 2));
}

#[test]
fn test_update_layout_missing_widget_keeps_layout() {
    let mut store = DashboardStore::with_defaults(3);
    store.add(crate::WidgetKind::Info);
    let before = layout_of(&store, 5);

    let layouts = BreakpointLayouts::new().with(
        Breakpoint::Lg,
        vec![GridItem::new("1", LayoutRect::new(2, 0, 2, 2))],
    );
    store.update_layout(&layouts);

    assert_eq!(layout_of(&store, 5), before);
    assert_eq!(layout_of(&store, 1), LayoutRect::new(2, 0, 2, 2));
}

#[test]
fn test_update_layout_ignores_stacked_breakpoints() {
    let mut store = DashboardStore::with_defaults(3);
    let before = store.clone();
    let layouts = BreakpointLayouts::new()
        .with(Breakpoint::Sm, vec![GridItem::new("1", LayoutRect::new(0, 9, 1, 2))])
        .with(Breakpoint::Xs, vec![GridItem::new("2", LayoutRect::new(0, 9, 1, 2))]);
    store.update_layout(&layouts);
    assert_eq!(store, before);
}

#[test]
fn test_update_layout_keeps_settings_and_order() {
    let mut store = DashboardStore::with_defaults(3);
    let settings = WidgetSettings {
        title: Some("Visitors".to_string()),
        ..Default::default()
    };
    store.update_settings(2, Some(settings.clone()));

    let layouts = BreakpointLayouts::new().with(
        Breakpoint::Md,
        vec![
            GridItem::new("4", LayoutRect::new(1, 2, 1, 2)),
            GridItem::new("2", LayoutRect::new(0, 4, 1, 2)),
        ],
    );
    store.update_layout(&layouts);

    let ids: Vec<_> = store.widgets().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
    assert_eq!(store.get(2).and_then(|w| w.settings.clone()), Some(settings));
    assert_eq!(store.next_id(), 5);
}
