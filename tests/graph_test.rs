//! Graph Engine Integration Tests
//!
//! End-to-end expand/collapse behavior through the public `GraphView` API,
//! including the multi-parent pin-open scenarios.

mod common;

use common::{diamond_base, linear_items, view_with, visible_ids};
use pretty_assertions::assert_eq;

use flowview::{Link, WorkflowFragment, WorkflowItem};

// ═══════════════════════════════════════════════════════════════
// INTEGRATION TESTS: basic expand/collapse
// ═══════════════════════════════════════════════════════════════

#[test]
fn initial_load_shows_only_the_root() {
    let view = view_with(linear_items());
    assert_eq!(visible_ids(&view), vec!["a"]);
    assert!(view.snapshot().links.is_empty());
}

#[test]
fn expanding_root_adds_children_and_links() {
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();

    let snapshot = view.snapshot();
    assert_eq!(visible_ids(&view), vec!["a", "b", "c"]);
    assert_eq!(
        snapshot.links,
        vec![
            Link { source: 0, target: 1 },
            Link { source: 0, target: 2 },
        ]
    );

    view.toggle("b").unwrap();
    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "d"]);
    assert!(view
        .snapshot()
        .links
        .contains(&Link { source: 1, target: 3 }));
}

#[test]
fn collapsing_a_branch_hides_its_open_descendants() {
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();

    view.toggle("a").unwrap();
    assert_eq!(visible_ids(&view), vec!["a"]);
    assert!(view.snapshot().links.is_empty());
}

#[test]
fn expand_collapse_round_trip_restores_membership() {
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();
    let before = visible_ids(&view);

    view.toggle("b").unwrap();
    view.toggle("b").unwrap();
    assert_eq!(visible_ids(&view), before);
}

#[test]
fn toggling_a_leaf_is_a_noop() {
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();
    let before = view.snapshot();

    view.toggle("c").unwrap();
    assert_eq!(view.snapshot(), before);
}

#[test]
fn unknown_node_errors_and_changes_nothing() {
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();
    let before = view.snapshot();

    let err = view.toggle("nonexistent").unwrap_err();
    assert_eq!(err.code(), "FLOW-010");
    assert_eq!(view.snapshot(), before);
}

#[test]
fn snapshot_order_is_stable_across_mutations() {
    // a renderer keys position state by order, so surviving nodes must
    // keep their relative order through expand/collapse cycles
    let mut view = view_with(linear_items());
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("b").unwrap();

    assert_eq!(visible_ids(&view), vec!["a", "b", "c"]);
}

// ═══════════════════════════════════════════════════════════════
// INTEGRATION TESTS: multi-parent pin-open behavior
// ═══════════════════════════════════════════════════════════════

/// Load the diamond base plus the second-parent record for x
fn diamond_view() -> flowview::GraphView {
    let mut view = view_with(diamond_base());
    view.load_workflow(&WorkflowFragment::new(vec![WorkflowItem::new("x", "c")]))
        .unwrap();
    view
}

#[test]
fn second_expansion_path_relinks_instead_of_duplicating() {
    let mut view = diamond_view();
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "x"]);

    view.toggle("c").unwrap();
    // no duplicate x; one extra link instead
    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "x"]);
    assert_eq!(
        view.snapshot().links,
        vec![
            Link { source: 0, target: 1 }, // a -> b
            Link { source: 0, target: 2 }, // a -> c
            Link { source: 1, target: 3 }, // b -> x
            Link { source: 2, target: 3 }, // c -> x
        ]
    );
}

#[test]
fn pinned_node_survives_its_parents_collapse() {
    let mut view = diamond_view();
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("c").unwrap();

    let x = view.model().node("x").unwrap();
    assert!(x.pinned_open);

    view.toggle("b").unwrap(); // collapse attempt on x's primary parent
    assert!(view.model().is_visible("x"));
    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "x"]);
}

#[test]
fn pins_propagate_up_both_ancestor_chains() {
    let mut view = diamond_view();
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("c").unwrap();

    for id in ["x", "b", "c", "a"] {
        assert!(
            view.model().node(id).unwrap().pinned_open,
            "{} must be pinned",
            id
        );
    }
}

#[test]
fn deep_pin_chain_survives_grandparent_collapse() {
    // a -> b -> m -> x, and a -> c with a second record x/c:
    // after c relinks x, collapsing a must keep the whole chain to x alive
    let mut view = view_with(vec![
        WorkflowItem::root("a"),
        WorkflowItem::new("b", "a"),
        WorkflowItem::new("c", "a"),
        WorkflowItem::new("m", "b"),
        WorkflowItem::new("x", "m"),
        WorkflowItem::new("x", "c"),
    ]);
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("m").unwrap();
    view.toggle("c").unwrap(); // relinks x, pins x + m + b + c (+ a)

    view.toggle("a").unwrap(); // collapse the root
    // everything on x's chains is pinned, so nothing disappears
    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "m", "x"]);

    // links must survive intact too
    let snapshot = view.snapshot();
    assert_eq!(snapshot.links.len(), 5);
}

#[test]
fn unpinned_sibling_is_still_removed_when_pins_exist() {
    let mut view = view_with(vec![
        WorkflowItem::root("a"),
        WorkflowItem::new("b", "a"),
        WorkflowItem::new("c", "a"),
        WorkflowItem::new("free", "a"),
        WorkflowItem::new("x", "b"),
        WorkflowItem::new("x", "c"),
    ]);
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("c").unwrap();

    view.toggle("a").unwrap(); // collapse root: only "free" is removable
    let ids = visible_ids(&view);
    assert!(!ids.contains(&"free".to_string()));
    assert!(ids.contains(&"x".to_string()));
}

#[test]
fn hidden_node_forgets_extra_parents_and_pins() {
    let mut view = diamond_view();
    view.toggle("a").unwrap();
    view.toggle("b").unwrap(); // x visible, unpinned (single path so far)

    view.toggle("b").unwrap(); // hide x
    view.toggle("b").unwrap(); // show it again

    let x = view.model().node("x").unwrap();
    assert!(x.extra_parents.is_empty());
    assert!(!x.pinned_open);
}

// ═══════════════════════════════════════════════════════════════
// INTEGRATION TESTS: expand_all
// ═══════════════════════════════════════════════════════════════

#[test]
fn expand_all_materializes_every_reachable_node() {
    let mut view = view_with(linear_items());
    view.expand_all().unwrap();

    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "d"]);
    assert_eq!(view.snapshot().links.len(), 3);
}

#[test]
fn expand_all_handles_multi_parent_edges() {
    let mut view = diamond_view();
    view.expand_all().unwrap();

    assert_eq!(visible_ids(&view), vec!["a", "b", "c", "x"]);
    assert_eq!(view.snapshot().links.len(), 4);
    assert!(view.model().node("x").unwrap().pinned_open);
}

#[test]
fn expand_all_twice_is_stable() {
    let mut view = diamond_view();
    view.expand_all().unwrap();
    let first = view.snapshot();

    view.expand_all().unwrap();
    assert_eq!(view.snapshot(), first);
}

#[test]
fn expand_all_on_empty_view_is_a_noop() {
    let mut view = flowview::GraphView::new();
    view.expand_all().unwrap();
    assert!(view.snapshot().is_empty());
}

// ═══════════════════════════════════════════════════════════════
// INTEGRATION TESTS: link determinism
// ═══════════════════════════════════════════════════════════════

#[test]
fn snapshots_of_the_same_state_are_identical() {
    let mut view = diamond_view();
    view.toggle("a").unwrap();
    view.toggle("b").unwrap();
    view.toggle("c").unwrap();

    assert_eq!(view.snapshot(), view.snapshot());
}
