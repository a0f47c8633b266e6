//! GraphModel - authoritative graph state
//!
//! Holds three layers of state:
//! - the *universe*: every workflow record ever merged (never discarded)
//! - the *arena*: one `Node` per currently visible id, keyed by id
//! - the *derived* link list, rebuilt in full after every mutation
//!
//! The visible order is an id list separate from the arena, so traversals
//! recurse over ids and mutate the map - never over a stale array snapshot.
//! Uses `Arc<str>` + `FxHashMap` + `SmallVec` so id-heavy scans stay cheap.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::Serialize;
use smallvec::SmallVec;

use crate::ast::WorkflowItem;
use crate::error::{FlowViewError, Result};
use crate::util::intern;

/// Stack-allocated id list: most steps have 0-4 children or extra parents
pub type IdVec = SmallVec<[Arc<str>; 4]>;

/// One universe record: an interned (id, parent, label) triple
#[derive(Debug, Clone)]
pub struct TreeRecord {
    pub id: Arc<str>,
    /// `None` marks a root record
    pub parent: Option<Arc<str>>,
    pub text: Arc<str>,
}

impl TreeRecord {
    /// Intern a workflow item into a universe record
    pub fn from_item(item: &WorkflowItem) -> Self {
        Self {
            id: intern(&item.id),
            parent: if item.is_root() {
                None
            } else {
                Some(intern(&item.parent))
            },
            text: intern(item.display_text()),
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// One materialized node of the visible graph
#[derive(Debug, Clone)]
pub struct Node {
    pub id: Arc<str>,
    /// Structural parent fixed at materialization; `None` for the root
    pub primary_parent: Option<Arc<str>>,
    /// Additional incoming edges discovered while visible.
    /// Grows monotonically until the node is hidden; insertion-ordered,
    /// deduplicated, and never contains the primary parent.
    pub extra_parents: IdVec,
    /// Ids currently shown as this node's open children.
    /// Empty means collapsed.
    pub children: IdVec,
    /// Exempt from ancestor-triggered collapse cascades
    pub pinned_open: bool,
    /// Display label copied from the materializing record
    pub text: Arc<str>,
}

impl Node {
    fn from_record(record: &TreeRecord, primary_parent: Option<Arc<str>>) -> Self {
        Self {
            id: Arc::clone(&record.id),
            primary_parent,
            extra_parents: IdVec::new(),
            children: IdVec::new(),
            pinned_open: false,
            text: Arc::clone(&record.text),
        }
    }

    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Record an extra incoming edge. Idempotent; the primary parent is
    /// never duplicated as an extra edge. Returns true if the edge is new.
    pub fn add_extra_parent(&mut self, parent: &Arc<str>) -> bool {
        if self.primary_parent.as_deref() == Some(parent.as_ref()) {
            return false;
        }
        if self.extra_parents.iter().any(|p| p == parent) {
            return false;
        }
        self.extra_parents.push(Arc::clone(parent));
        true
    }

    /// Register an open child (idempotent)
    pub fn add_child(&mut self, child: &Arc<str>) {
        if !self.children.iter().any(|c| c == child) {
            self.children.push(Arc::clone(child));
        }
    }
}

/// Derived edge between visible indices.
/// `source` is the parent's index, `target` the child's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
}

/// Authoritative graph state: universe + visible arena + derived links
#[derive(Debug, Default)]
pub struct GraphModel {
    /// All known records, newest fragment first
    tree_data: Vec<TreeRecord>,
    /// Visible nodes keyed by id
    nodes: FxHashMap<Arc<str>, Node>,
    /// Visible ids in materialization order (stable across mutations, so a
    /// renderer's per-node position state survives incremental updates)
    visible: Vec<Arc<str>>,
    /// Rebuilt by `recompute_links` after every mutation
    links: Vec<Link>,
    /// Designated root id, first-wins
    root: Option<Arc<str>>,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────
    // Universe
    // ─────────────────────────────────────────────

    /// Splice a fragment's records in front of the existing universe,
    /// so newer fragments win discovery order.
    pub(crate) fn prepend_records(&mut self, records: Vec<TreeRecord>) {
        let mut merged = records;
        merged.append(&mut self.tree_data);
        self.tree_data = merged;
    }

    pub fn records(&self) -> &[TreeRecord] {
        &self.tree_data
    }

    pub fn universe_size(&self) -> usize {
        self.tree_data.len()
    }

    /// Whether any universe record carries this id
    pub fn is_known(&self, id: &str) -> bool {
        self.tree_data.iter().any(|r| r.id.as_ref() == id)
    }

    /// Universe records whose parent is `id`, in universe order
    pub(crate) fn child_records_of<'a>(
        &'a self,
        id: &'a str,
    ) -> impl Iterator<Item = &'a TreeRecord> + 'a {
        self.tree_data
            .iter()
            .filter(move |r| r.parent.as_deref() == Some(id))
    }

    // ─────────────────────────────────────────────
    // Root
    // ─────────────────────────────────────────────

    pub fn root_id(&self) -> Option<&Arc<str>> {
        self.root.as_ref()
    }

    /// Seed the visible set with its sole initial node
    pub(crate) fn set_root(&mut self, record: &TreeRecord) {
        debug_assert!(self.root.is_none(), "root already designated");
        self.root = Some(Arc::clone(&record.id));
        self.materialize(record, None);
    }

    // ─────────────────────────────────────────────
    // Visible arena
    // ─────────────────────────────────────────────

    pub fn visible_ids(&self) -> &[Arc<str>] {
        &self.visible
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Materialize a record as a visible node.
    /// No-op if the id is already visible (one node per id, always).
    pub(crate) fn materialize(&mut self, record: &TreeRecord, primary_parent: Option<Arc<str>>) {
        if self.nodes.contains_key(record.id.as_ref()) {
            return;
        }
        let node = Node::from_record(record, primary_parent);
        self.visible.push(Arc::clone(&record.id));
        self.nodes.insert(Arc::clone(&record.id), node);
    }

    /// Drop a node from the arena and the visible order
    pub(crate) fn remove_visible(&mut self, id: &str) {
        if self.nodes.remove(id).is_some() {
            self.visible.retain(|v| v.as_ref() != id);
        }
    }

    /// Clear the visible arena, links, and root designation.
    /// Universe records are kept. Returns how many nodes were hidden.
    pub(crate) fn reset(&mut self) -> usize {
        let hidden = self.visible.len();
        self.nodes.clear();
        self.visible.clear();
        self.links.clear();
        self.root = None;
        hidden
    }

    // ─────────────────────────────────────────────
    // Derived links
    // ─────────────────────────────────────────────

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Rebuild the link list from scratch in O(V+E).
    ///
    /// One link per (node, visible parent) pair: the primary parent when the
    /// node is not the root, plus every extra parent. A parent missing from
    /// the visible set after a completed mutation is an engine invariant
    /// violation and fails hard rather than dropping the edge.
    pub(crate) fn recompute_links(&mut self) -> Result<()> {
        let index: FxHashMap<&str, usize> = self
            .visible
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_ref(), i))
            .collect();

        let mut links = Vec::with_capacity(self.visible.len());
        for (target, id) in self.visible.iter().enumerate() {
            let node = &self.nodes[id];

            if let Some(parent) = &node.primary_parent {
                let source = *index.get(parent.as_ref()).ok_or_else(|| {
                    FlowViewError::DanglingLink {
                        child: id.to_string(),
                        parent: parent.to_string(),
                    }
                })?;
                links.push(Link { source, target });
            }

            for parent in &node.extra_parents {
                let source = *index.get(parent.as_ref()).ok_or_else(|| {
                    FlowViewError::DanglingLink {
                        child: id.to_string(),
                        parent: parent.to_string(),
                    }
                })?;
                links.push(Link { source, target });
            }
        }

        self.links = links;
        Ok(())
    }
}
