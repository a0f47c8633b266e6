//! AST Module - workflow input types
//!
//! Contains the serde-parsed types the engine consumes:
//! - `WorkflowItem`: one step record (id + structural parent + label)
//! - `WorkflowFragment`: a list of items, as delivered by a drop event or file
//!
//! A step that depends on several predecessors arrives as several records
//! sharing an id, each carrying one parent. The fragment is the wire format;
//! the graph engine owns everything derived from it.

mod workflow;

pub use workflow::{WorkflowFragment, WorkflowItem, ROOT_SENTINEL};
