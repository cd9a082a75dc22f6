//! Construction and read access.

use super::{layout_of, DashboardStore};
use crate::layout::LayoutRect;
use crate::WidgetKind;

#[test]
fn test_store_new_is_empty() {
    let store = DashboardStore::new(3);
    assert!(store.is_empty());
    assert_eq!(store.len(), 0);
    assert_eq!(store.next_id(), 1);
    assert_eq!(store.columns(), 3);
}

#[test]
fn test_store_default_uses_three_columns() {
    assert_eq!(DashboardStore::default().columns(), 3);
}

#[test]
fn test_store_zero_columns_is_one() {
    assert_eq!(DashboardStore::new(0).columns(), 1);
}

#[test]
fn test_with_defaults_seeds_four_widgets() {
    let store = DashboardStore::with_defaults(3);
    let kinds: Vec<_> = store.widgets().iter().map(|w| (w.id, w.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (1, WidgetKind::Weather),
            (2, WidgetKind::Counter),
            (3, WidgetKind::Revenue),
            (4, WidgetKind::Clock),
        ]
    );
    assert_eq!(store.next_id(), 5);
}

#[test]
fn test_with_defaults_layouts() {
    let store = DashboardStore::with_defaults(3);
    assert_eq!(layout_of(&store, 1), LayoutRect::new(0, 0, 2, 2).with_min(1, 2));
    assert_eq!(layout_of(&store, 2), LayoutRect::new(2, 0, 1, 2).with_min(1, 1));
    assert_eq!(layout_of(&store, 3), LayoutRect::new(2, 2, 1, 2).with_min(1, 1));
    assert_eq!(layout_of(&store, 4), LayoutRect::new(0, 2, 1, 2).with_min(1, 1));
}

#[test]
fn test_seed_layouts_do_not_overlap() {
    let rects = DashboardStore::with_defaults(3).rects();
    for (i, a) in rects.iter().enumerate() {
        for b in &rects[i + 1..] {
            assert!(!a.overlaps(b), "{a:?} overlaps {b:?}");
        }
    }
}

#[test]
fn test_get_unknown_returns_none() {
    let store = DashboardStore::with_defaults(3);
    assert!(store.get(42).is_none());
    assert!(store.index_of(42).is_none());
}

#[test]
fn test_index_of_follows_insertion_order() {
    let store = DashboardStore::with_defaults(3);
    assert_eq!(store.index_of(1), Some(0));
    assert_eq!(store.index_of(4), Some(3));
}

#[test]
fn test_snapshot_serializes_widgets_and_counter() {
    let store = DashboardStore::with_defaults(3);
    let value = serde_json::to_value(&store).expect("serializes");
    assert_eq!(value["nextId"], 5);
    assert_eq!(value["columns"], 3);
    assert_eq!(value["widgets"][0]["type"], "weather");
    assert_eq!(value["widgets"][0]["layout"]["minH"], 2);
    assert!(value["widgets"][0]["layout"].get("maxW").is_none());
}
