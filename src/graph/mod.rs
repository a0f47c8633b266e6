//! Graph Module - incremental visible-set engine
//!
//! Contains the materialization engine behind the interactive DAG view:
//! - `model`: universe records, visible-node arena, derived links
//! - `visibility`: expand/collapse transitions and pin propagation
//! - `ingest`: fragment merging and root seeding
//! - `view`: the facade external callers drive
//! - `snapshot`: read-only output for the rendering collaborator
//!
//! The model is owned by `GraphView` and mutated only through the engines;
//! everything a renderer sees is an owned snapshot.

mod ingest;
mod model;
mod snapshot;
mod view;
mod visibility;

// Re-export public types
pub use ingest::IngestAdapter;
pub use model::{GraphModel, IdVec, Link, Node, TreeRecord};
pub use snapshot::{GraphSnapshot, NodeView};
pub use view::GraphView;
pub use visibility::VisibilityEngine;
