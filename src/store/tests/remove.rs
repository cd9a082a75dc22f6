//! Removing widgets.

use super::{layout_of, DashboardStore};
use crate::WidgetKind;

#[test]
fn test_remove_unknown_id_is_a_no_op() {
    let mut store = DashboardStore::with_defaults(3);
    let before = store.clone();
    assert!(store.remove(99).is_none());
    assert_eq!(store, before);
}

#[test]
fn test_remove_returns_the_widget() {
    let mut store = DashboardStore::with_defaults(3);
    let removed = store.remove(2).expect("widget 2 exists");
    assert_eq!(removed.kind, WidgetKind::Counter);
    assert_eq!(store.len(), 3);
    assert!(store.get(2).is_none());
}

#[test]
fn test_remove_does_not_repack() {
    let mut store = DashboardStore::with_defaults(3);
    let revenue = layout_of(&store, 3);
    store.remove(1);
    assert_eq!(layout_of(&store, 3), revenue);
    let ids: Vec<_> = store.widgets().iter().map(|w| w.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);
}

#[test]
fn test_ids_are_not_reused_after_remove() {
    let mut store = DashboardStore::new(3);
    let first = store.add(WidgetKind::Clock).id;
    store.remove(first);
    let second = store.add(WidgetKind::Clock).id;
    assert_ne!(first, second);
    assert_eq!(second, 2);
}

#[test]
fn test_remove_twice_second_is_no_op() {
    let mut store = DashboardStore::with_defaults(3);
    assert!(store.remove(4).is_some());
    assert!(store.remove(4).is_none());
    assert_eq!(store.len(), 3);
}

#[test]
fn test_freed_space_is_reused_by_add() {
    let mut store = DashboardStore::with_defaults(3);
    store.remove(2);
    let added = store.add(WidgetKind::Counter).layout;
    assert_eq!((added.x, added.y), (2, 0));
}
