//! IngestAdapter - merges workflow fragments into the model
//!
//! Fragments arrive from the outside (a file load, a drop event) and are
//! spliced in front of the existing universe, so the newest description of
//! a step wins discovery order. Visibility state is left alone except for
//! root seeding: the first root-marked record ever seen becomes the root
//! and seeds the visible set; later root declarations lose first-wins and
//! stay in the universe as unattached records.

use std::sync::Arc;

use tracing::{info, warn};

use crate::ast::WorkflowFragment;
use crate::error::Result;
use crate::event::{EventEmitter, GraphEventKind};

use super::model::{GraphModel, TreeRecord};

pub struct IngestAdapter<'a> {
    model: &'a mut GraphModel,
    emitter: &'a dyn EventEmitter,
}

impl<'a> IngestAdapter<'a> {
    pub fn new(model: &'a mut GraphModel, emitter: &'a dyn EventEmitter) -> Self {
        Self { model, emitter }
    }

    /// Merge a fragment into the universe.
    ///
    /// Validates the fragment, prepends its records, then runs root seeding.
    /// Already-visible nodes are untouched; newly reachable children appear
    /// only when an ancestor is next expanded.
    pub fn merge(&mut self, fragment: &WorkflowFragment) -> Result<()> {
        fragment.validate()?;

        let records: Vec<TreeRecord> = fragment.items.iter().map(TreeRecord::from_item).collect();
        self.model.prepend_records(records);

        self.emitter.emit(GraphEventKind::FragmentMerged {
            item_count: fragment.len(),
            universe_size: self.model.universe_size(),
        });
        info!(
            items = fragment.len(),
            universe = self.model.universe_size(),
            "fragment merged"
        );

        self.seed_root_if_needed(fragment)
    }

    /// First-wins root designation over the merged universe.
    ///
    /// Runs after every merge so an empty merge following a reset re-seeds
    /// from the records that are already known.
    fn seed_root_if_needed(&mut self, fragment: &WorkflowFragment) -> Result<()> {
        if self.model.root_id().is_some() {
            // only the new records can introduce fresh losing declarations
            let fresh: Vec<Arc<str>> = fragment
                .root_ids()
                .iter()
                .map(|id| crate::util::intern(id))
                .collect();
            self.warn_losing_roots(fresh);
            return Ok(());
        }

        let Some(winner) = self
            .model
            .records()
            .iter()
            .find(|r| r.is_root())
            .cloned()
        else {
            return Ok(());
        };

        self.model.set_root(&winner);
        self.emitter.emit(GraphEventKind::RootSeeded {
            id: Arc::clone(&winner.id),
        });
        info!(id = %winner.id, "root seeded");

        let all: Vec<Arc<str>> = self
            .model
            .records()
            .iter()
            .filter(|r| r.is_root())
            .map(|r| Arc::clone(&r.id))
            .collect();
        self.warn_losing_roots(all);
        self.model.recompute_links()
    }

    /// Log root-marked ids that lost the first-wins race (once per id)
    fn warn_losing_roots(&mut self, candidates: Vec<Arc<str>>) {
        let Some(root) = self.model.root_id().cloned() else {
            return;
        };

        let mut losers: Vec<Arc<str>> = Vec::new();
        for id in candidates {
            if id != root && !losers.contains(&id) {
                losers.push(id);
            }
        }

        for id in losers {
            warn!(id = %id, root = %root, "duplicate root ignored (first wins)");
            self.emitter
                .emit(GraphEventKind::DuplicateRootIgnored { id });
        }
    }
}
