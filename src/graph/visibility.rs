//! VisibilityEngine - expand/collapse transitions over the GraphModel
//!
//! Each node is either collapsed (no open children) or expanded. A toggle
//! flips the state:
//! - expanded -> collapsed: cascade-remove open descendants, except nodes
//!   pinned open by an extra-parent dependency
//! - collapsed -> expanded: materialize children from the universe; children
//!   already visible through another path gain an extra-parent edge instead
//!   of a duplicate node, and the pin propagates up their ancestor chains
//!
//! Pins are transitive: when a node gains an extra-parent edge, every visible
//! ancestor reachable over primary or extra edges is pinned too. That is what
//! keeps a collapse anywhere along the chain from stranding the dependent
//! node. A pin only exempts a node from an *ancestor's* cascade; toggling a
//! pinned node directly collapses it as normal.

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::error::{FlowViewError, Result};
use crate::event::{EventEmitter, GraphEventKind};
use crate::util::intern;

use super::model::{GraphModel, IdVec, TreeRecord};

/// What one expand transition changed
#[derive(Debug, Default)]
struct ExpandOutcome {
    /// Ids newly materialized under the toggled node
    added: Vec<Arc<str>>,
    /// Already-visible ids that gained an extra-parent edge
    relinked: Vec<Arc<str>>,
}

impl ExpandOutcome {
    fn is_empty(&self) -> bool {
        self.added.is_empty() && self.relinked.is_empty()
    }
}

/// Mutating engine over an exclusively borrowed model
pub struct VisibilityEngine<'a> {
    model: &'a mut GraphModel,
    emitter: &'a dyn EventEmitter,
}

impl<'a> VisibilityEngine<'a> {
    pub fn new(model: &'a mut GraphModel, emitter: &'a dyn EventEmitter) -> Self {
        Self { model, emitter }
    }

    /// Toggle a node between collapsed and expanded.
    ///
    /// Ids known to the universe but not currently visible are ignored;
    /// ids known nowhere fail with `UnknownNode`. Either way the model is
    /// left untouched on the non-toggling paths.
    pub fn toggle(&mut self, id: &str) -> Result<()> {
        if !self.model.is_visible(id) {
            if self.model.is_known(id) {
                debug!(id, "toggle ignored: node known but not visible");
                return Ok(());
            }
            return Err(FlowViewError::UnknownNode { id: id.to_string() });
        }

        let id = intern(id);
        let expanded = self.model.node(&id).is_some_and(|n| n.is_expanded());
        if expanded {
            self.collapse(&id)
        } else {
            self.expand(&id)
        }
    }

    /// Expand every reachable node, depth-first, until nothing new appears.
    ///
    /// Tolerates already-expanded nodes and terminates: each id is visited
    /// at most once and the universe bounds what can be materialized.
    pub fn expand_all(&mut self) -> Result<()> {
        let start: Vec<Arc<str>> = self.model.visible_ids().to_vec();
        let mut visited = FxHashSet::default();
        for id in start {
            self.expand_all_from(&id, &mut visited);
        }
        self.model.recompute_links()
    }

    fn expand_all_from(&mut self, id: &Arc<str>, visited: &mut FxHashSet<Arc<str>>) {
        if !visited.insert(Arc::clone(id)) {
            return;
        }

        let outcome = self.apply_expand(id);
        if !outcome.is_empty() {
            self.emitter.emit(GraphEventKind::NodeExpanded {
                id: Arc::clone(id),
                added: outcome.added,
                relinked: outcome.relinked,
            });
        }

        let children: Vec<Arc<str>> = self
            .model
            .node(id)
            .map(|n| n.children.iter().cloned().collect())
            .unwrap_or_default();
        for child in children {
            self.expand_all_from(&child, visited);
        }
    }

    // ─────────────────────────────────────────────
    // collapsed -> expanded
    // ─────────────────────────────────────────────

    fn expand(&mut self, id: &Arc<str>) -> Result<()> {
        let outcome = self.apply_expand(id);
        if outcome.is_empty() {
            // no children in the universe, or nothing new: stays collapsed
            return Ok(());
        }

        self.model.recompute_links()?;
        self.emitter.emit(GraphEventKind::NodeExpanded {
            id: Arc::clone(id),
            added: outcome.added,
            relinked: outcome.relinked,
        });
        Ok(())
    }

    /// Materialize/relink the children of `id` without recomputing links
    fn apply_expand(&mut self, id: &Arc<str>) -> ExpandOutcome {
        let records: Vec<TreeRecord> = self.model.child_records_of(id).cloned().collect();
        let mut outcome = ExpandOutcome::default();

        for record in &records {
            if self.model.is_visible(&record.id) {
                // Reached through a second path: same node, one more edge.
                // A child rediscovered through its own primary parent is just
                // re-listed; only a genuinely foreign path pins it.
                let foreign = self
                    .model
                    .node(&record.id)
                    .is_some_and(|n| n.primary_parent.as_ref() != Some(id));
                if foreign {
                    let new_edge = match self.model.node_mut(&record.id) {
                        Some(node) => {
                            let new_edge = node.add_extra_parent(id);
                            node.pinned_open = true;
                            new_edge
                        }
                        None => false,
                    };
                    self.pin_ancestors_of(&record.id);
                    if new_edge {
                        outcome.relinked.push(Arc::clone(&record.id));
                    }
                }
            } else {
                self.model.materialize(record, Some(Arc::clone(id)));
                outcome.added.push(Arc::clone(&record.id));
            }

            if let Some(node) = self.model.node_mut(id) {
                node.add_child(&record.id);
            }
        }

        outcome
    }

    /// Pin every visible ancestor of `start`, transitively, over primary and
    /// extra edges alike, up to the roots. Idempotent.
    fn pin_ancestors_of(&mut self, start: &str) {
        let mut queue: Vec<Arc<str>> = match self.model.node(start) {
            Some(node) => parent_ids(node.primary_parent.as_ref(), &node.extra_parents),
            None => return,
        };
        let mut seen: FxHashSet<Arc<str>> = FxHashSet::default();

        while let Some(id) = queue.pop() {
            if !seen.insert(Arc::clone(&id)) {
                continue;
            }
            if let Some(node) = self.model.node_mut(&id) {
                node.pinned_open = true;
                queue.extend(parent_ids(node.primary_parent.as_ref(), &node.extra_parents));
            }
        }
    }

    // ─────────────────────────────────────────────
    // expanded -> collapsed
    // ─────────────────────────────────────────────

    fn collapse(&mut self, id: &Arc<str>) -> Result<()> {
        let mut removed = Vec::new();
        self.collapse_children(id, &mut removed);

        if removed.is_empty() {
            // every child pinned (or none open): links are unchanged
            return Ok(());
        }

        let retained = self.model.node(id).map_or(0, |n| n.children.len());
        self.model.recompute_links()?;
        self.emitter.emit(GraphEventKind::NodeCollapsed {
            id: Arc::clone(id),
            removed,
            retained,
        });
        Ok(())
    }

    /// Remove the non-pinned open descendants of `id`, recursively.
    ///
    /// Recursion walks ids against the arena, never a stale list snapshot.
    /// Each child's own subtree is collapsed (respecting its own pins)
    /// before the child itself is dropped, so nothing dangles.
    fn collapse_children(&mut self, id: &str, removed: &mut Vec<Arc<str>>) {
        let children: IdVec = match self.model.node(id) {
            Some(node) => node.children.clone(),
            None => return,
        };

        let mut retained = IdVec::new();
        for child in children {
            let pinned = self.model.node(&child).is_some_and(|n| n.pinned_open);
            if pinned {
                retained.push(child);
            } else {
                self.collapse_children(&child, removed);
                self.model.remove_visible(&child);
                removed.push(child);
            }
        }

        if let Some(node) = self.model.node_mut(id) {
            node.children = retained;
        }
    }
}

fn parent_ids(primary: Option<&Arc<str>>, extras: &IdVec) -> Vec<Arc<str>> {
    let mut ids: Vec<Arc<str>> = Vec::with_capacity(extras.len() + 1);
    if let Some(p) = primary {
        ids.push(Arc::clone(p));
    }
    ids.extend(extras.iter().cloned());
    ids
}
