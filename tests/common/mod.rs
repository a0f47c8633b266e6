//! Shared fixtures for integration tests
#![allow(dead_code)] // each test binary uses a subset

use flowview::{GraphView, WorkflowFragment, WorkflowItem};

/// Build a view with a fragment already loaded
pub fn view_with(items: Vec<WorkflowItem>) -> GraphView {
    let mut view = GraphView::new();
    view.load_workflow(&WorkflowFragment::new(items))
        .expect("fixture fragment must load");
    view
}

/// Visible ids in materialization order
pub fn visible_ids(view: &GraphView) -> Vec<String> {
    view.snapshot()
        .nodes
        .iter()
        .map(|n| n.id.to_string())
        .collect()
}

/// a -> {b, c}, b -> d
pub fn linear_items() -> Vec<WorkflowItem> {
    vec![
        WorkflowItem::root("a"),
        WorkflowItem::new("b", "a"),
        WorkflowItem::new("c", "a"),
        WorkflowItem::new("d", "b"),
    ]
}

/// a -> {b, c}, x reachable from both b and c (second record merged later)
pub fn diamond_base() -> Vec<WorkflowItem> {
    vec![
        WorkflowItem::root("a"),
        WorkflowItem::new("b", "a"),
        WorkflowItem::new("c", "a"),
        WorkflowItem::new("x", "b"),
    ]
}
