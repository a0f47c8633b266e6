//! Flowview - incremental visible-set engine for workflow DAG views
//!
//! ## Module Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        DOMAIN MODEL                          │
//! │  ast/       YAML/JSON → Rust types (WorkflowItem, Fragment)  │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      APPLICATION LAYER                       │
//! │  graph/     visible-set engine (GraphModel, VisibilityEngine,│
//! │             IngestAdapter, GraphView, GraphSnapshot)         │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    INFRASTRUCTURE LAYER                      │
//! │  event/     mutation audit trail (EventLog, EventEmitter)    │
//! │  util/      string interning                                 │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`ast`] | Input parsing → `WorkflowItem`, `WorkflowFragment` |
//! | [`graph`] | Expand/collapse materialization over the item universe |
//! | [`event`] | Append-only audit trail of completed mutations |
//! | [`util`] | `Arc<str>` interning for node ids |
//! | [`config`] | CLI defaults in `~/.config/flowview/config.toml` |
//! | [`error`] | Error types with stable codes and fix suggestions |

// ═══════════════════════════════════════════════════════════════
// DOMAIN MODEL - input → Rust types
// ═══════════════════════════════════════════════════════════════
pub mod ast;

// ═══════════════════════════════════════════════════════════════
// APPLICATION LAYER - the engine
// ═══════════════════════════════════════════════════════════════
pub mod graph;

// ═══════════════════════════════════════════════════════════════
// INFRASTRUCTURE LAYER - events, utilities
// ═══════════════════════════════════════════════════════════════
pub mod event;
pub mod util;

// ═══════════════════════════════════════════════════════════════
// CROSS-CUTTING - error handling, configuration
// ═══════════════════════════════════════════════════════════════
pub mod config;
pub mod error;

// ═══════════════════════════════════════════════════════════════
// PUBLIC API RE-EXPORTS
// ═══════════════════════════════════════════════════════════════

// Error types
pub use error::{FixSuggestion, FlowViewError};

// Config types
pub use config::FlowViewConfig;

// AST types (Domain Model)
pub use ast::{WorkflowFragment, WorkflowItem, ROOT_SENTINEL};

// Graph types (Application Layer)
pub use graph::{GraphSnapshot, GraphView, Link, NodeView};

// Event types
pub use event::{Event, EventEmitter, EventLog, GraphEventKind, NoopEmitter};
