//! Event Module - mutation audit trail for the graph view
//!
//! Every completed mutation appends an event, so a rendering collaborator
//! (or a test) can replay what changed without diffing snapshots.
//! Key types:
//! - `Event`: envelope with id + timestamp + kind
//! - `GraphEventKind`: merge/seed/expand/collapse/reset variants
//! - `EventLog`: thread-safe, append-only log
//! - `EventEmitter`: trait for dependency injection
//! - `NoopEmitter`: zero-cost no-op for tests

mod emitter;
mod log;

pub use emitter::{EventEmitter, NoopEmitter};
pub use log::{Event, EventLog, GraphEventKind};
