//! Integration tests for the multi-value filter's reconciliation rules.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use column_filter::filter::{
    EffectiveSelection, InitialQuery, MultiSelectFilter, DEFAULT_ALL_TEXT,
};

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("column_filter=trace")
        .with_test_writer()
        .try_init();
}

fn set(values: &[&str]) -> HashSet<String> {
    values.iter().map(|value| value.to_string()).collect()
}

fn selected_set(filter: &MultiSelectFilter) -> HashSet<String> {
    filter.selected().into_iter().collect()
}

#[test]
fn test_populate_without_query_selects_every_value() {
    setup();
    let data = ["x", "y", "z", "y"];
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(data);

    assert_eq!(selected_set(&filter), set(&["x", "y", "z"]));
    assert_eq!(
        filter.selected_values(),
        EffectiveSelection::Values(set(&["x", "y", "z"]))
    );
}

#[test]
fn test_populate_with_single_value_query() {
    setup();
    let mut filter =
        MultiSelectFilter::new("col").with_initial_query(InitialQuery::Single("b".to_string()));
    filter.populate(["a", "b", "c"]);

    assert_eq!(selected_set(&filter), set(&["b"]));
}

#[test]
fn test_populate_with_list_query() {
    setup();
    let mut filter =
        MultiSelectFilter::new("col").with_initial_query(InitialQuery::from_values(["a", "c"]));
    filter.populate(["a", "b", "c"]);

    assert_eq!(selected_set(&filter), set(&["a", "c"]));
    assert_eq!(filter.not_selected(), vec!["b"]);
}

#[test]
fn test_unfiltered_update_selects_new_values() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(["a", "b"]);

    filter.update(["a", "b", "c"]);

    assert_eq!(filter.options(), &["a", "b", "c"]);
    assert_eq!(selected_set(&filter), set(&["a", "b", "c"]));
}

#[test]
fn test_filtered_update_preserves_exclusion() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(["a", "b", "c"]);
    filter.set_user_selection(["a", "c"]);

    filter.update(["a", "b", "c", "d"]);

    assert_eq!(filter.options(), &["a", "b", "c", "d"]);
    assert_eq!(selected_set(&filter), set(&["a", "c", "d"]));
    assert!(!filter.selected_values().matches("b"));
}

#[test]
fn test_reset_restores_unfiltered_mode() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(["a", "b", "c"]);
    filter.set_user_selection(["b"]);
    filter.update(["a", "b", "c", "d"]);

    filter.reset();
    assert_eq!(selected_set(&filter), set(&["a", "b", "c", "d"]));
    assert!(filter.is_unfiltered());

    filter.update(["a", "b", "c", "d"]);
    assert_eq!(selected_set(&filter), set(&["a", "b", "c", "d"]));
}

#[test]
fn test_all_text_forces_unfiltered_update() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(["a", "b", "c"]);
    filter.set_user_selection([DEFAULT_ALL_TEXT, "a"]);
    assert!(!filter.not_selected().is_empty());

    filter.update(["a", "b", "c", "d"]);

    assert!(filter.is_all_selected());
    for value in ["a", "b", "c", "d"] {
        assert!(filter.is_selected(value), "{value} should be selected");
    }
    assert_eq!(filter.selected_values(), EffectiveSelection::All);
}

#[test]
fn test_data_value_spelled_like_all_text_never_clears_the_filter() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    filter.populate(["a", DEFAULT_ALL_TEXT, "b"]);
    assert!(!filter.options().iter().any(|option| option == DEFAULT_ALL_TEXT));

    filter.set_user_selection(["b"]);
    filter.update([DEFAULT_ALL_TEXT, "c"]);
    assert!(!filter.is_all_selected());
    assert_eq!(selected_set(&filter), set(&["b", "c"]));

    filter.reset();

    assert!(!filter.is_all_selected());
    assert_eq!(selected_set(&filter), set(&["a", "b", "c"]));
    assert_eq!(
        filter.selected_values(),
        EffectiveSelection::Values(set(&["a", "b", "c"]))
    );
}

#[test]
fn test_notifications_follow_populate_edit_and_reset_only() {
    setup();
    let mut filter = MultiSelectFilter::new("col");
    let changes = Arc::new(AtomicUsize::new(0));
    let changes_clone = changes.clone();
    filter.selection_changed.connect(move |_| {
        changes_clone.fetch_add(1, Ordering::SeqCst);
    });

    filter.populate(["a", "b"]);
    filter.update(["a", "b", "c"]);
    filter.set_user_selection(["a"]);
    filter.update(["a", "b", "c", "d"]);
    filter.reset();

    assert_eq!(changes.load(Ordering::SeqCst), 3);
}

#[test]
fn test_consumer_reads_selection_from_slot() {
    setup();
    let filter = Arc::new(parking_lot::Mutex::new(MultiSelectFilter::new("col")));
    let visible = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let rows = ["a", "b", "a", "c"];

    // The slot runs while the filter is being mutated, so the consumer only
    // records that a recompute is due and re-reads afterwards.
    let dirty = Arc::new(AtomicUsize::new(0));
    let dirty_clone = dirty.clone();
    filter.lock().selection_changed.connect(move |_| {
        dirty_clone.fetch_add(1, Ordering::SeqCst);
    });

    filter.lock().populate(["a", "b", "c"]);
    filter.lock().set_user_selection(["a", "c"]);

    if dirty.swap(0, Ordering::SeqCst) > 0 {
        let effective = filter.lock().selected_values();
        *visible.lock() = rows
            .iter()
            .filter(|cell| effective.matches(cell))
            .map(|cell| cell.to_string())
            .collect();
    }

    assert_eq!(*visible.lock(), vec!["a", "a", "c"]);
}
