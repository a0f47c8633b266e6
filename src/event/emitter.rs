//! EventEmitter Trait - abstraction for event emission
//!
//! Enables dependency injection: the real EventLog in production,
//! NoopEmitter in tests that don't assert on the audit trail.

use super::log::{EventLog, GraphEventKind};

/// Trait for emitting events during graph mutations
pub trait EventEmitter: Send + Sync {
    /// Emit an event and return its ID
    fn emit(&self, kind: GraphEventKind) -> u64;
}

/// Implement EventEmitter for EventLog (the real implementation)
impl EventEmitter for EventLog {
    fn emit(&self, kind: GraphEventKind) -> u64 {
        EventLog::emit(self, kind)
    }
}

/// No-op emitter for testing (zero allocation, always returns 0)
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new NoopEmitter
    pub fn new() -> Self {
        Self
    }
}

impl EventEmitter for NoopEmitter {
    fn emit(&self, _kind: GraphEventKind) -> u64 {
        0
    }
}
