//! GraphView - the facade external callers drive
//!
//! Owns the model and the event log; routes each action through the right
//! engine and hands out immutable snapshots. Nothing outside this module
//! mutates the model directly.

use crate::ast::WorkflowFragment;
use crate::error::Result;
use crate::event::{EventLog, GraphEventKind};

use super::ingest::IngestAdapter;
use super::model::GraphModel;
use super::snapshot::GraphSnapshot;
use super::visibility::VisibilityEngine;

/// An interactive view over a workflow universe
#[derive(Debug, Default)]
pub struct GraphView {
    model: GraphModel,
    events: EventLog,
}

impl GraphView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fragment; on first load this also seeds the root
    pub fn load_workflow(&mut self, fragment: &WorkflowFragment) -> Result<()> {
        IngestAdapter::new(&mut self.model, &self.events).merge(fragment)
    }

    /// Toggle a node between collapsed and expanded
    pub fn toggle(&mut self, id: &str) -> Result<()> {
        VisibilityEngine::new(&mut self.model, &self.events).toggle(id)
    }

    /// Expand everything reachable from the current visible set
    pub fn expand_all(&mut self) -> Result<()> {
        VisibilityEngine::new(&mut self.model, &self.events).expand_all()
    }

    /// Hide everything and drop the root designation; the universe stays.
    /// The next `load_workflow` (even with an empty fragment) re-seeds.
    pub fn reset(&mut self) {
        let hidden = self.model.reset();
        self.events.emit(GraphEventKind::ViewReset { hidden });
    }

    /// Capture the current visible nodes + links for the renderer
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::capture(&self.model)
    }

    /// Read access to the underlying state (tests, diagnostics)
    pub fn model(&self) -> &GraphModel {
        &self.model
    }

    /// The mutation audit trail
    pub fn events(&self) -> &EventLog {
        &self.events
    }
}
