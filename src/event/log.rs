//! EventLog - append-only record of graph mutations
//!
//! - Event: envelope with id + timestamp + kind
//! - GraphEventKind: one variant per mutation the engine can complete
//! - EventLog: thread-safe, append-only log
//!
//! The engine itself is synchronous; the log is still thread-safe so a
//! renderer on another thread can read it while the UI thread mutates.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Single event in the graph mutation log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic sequence ID (for ordering)
    pub id: u64,
    /// Time since the log was created (ms)
    pub timestamp_ms: u64,
    /// Event type and data
    pub kind: GraphEventKind,
}

/// All mutation event types
///
/// Uses `Arc<str>` for node ids to enable zero-cost cloning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GraphEventKind {
    // ═══════════════════════════════════════════
    // UNIVERSE LEVEL
    // ═══════════════════════════════════════════
    FragmentMerged {
        /// Items in the merged fragment
        item_count: usize,
        /// Total records known after the merge
        universe_size: usize,
    },
    RootSeeded {
        id: Arc<str>,
    },
    /// A later root-marked record lost the first-wins race
    DuplicateRootIgnored {
        id: Arc<str>,
    },

    // ═══════════════════════════════════════════
    // VISIBILITY LEVEL
    // ═══════════════════════════════════════════
    NodeExpanded {
        id: Arc<str>,
        /// Ids newly materialized under the toggled node
        added: Vec<Arc<str>>,
        /// Already-visible ids that gained an extra-parent edge
        relinked: Vec<Arc<str>>,
    },
    NodeCollapsed {
        id: Arc<str>,
        /// Ids removed from the visible set (cascade included)
        removed: Vec<Arc<str>>,
        /// Pinned children left in place
        retained: usize,
    },
    ViewReset {
        /// Nodes that were visible before the reset
        hidden: usize,
    },
}

impl GraphEventKind {
    /// Extract the toggled/seeded node id if the event targets one
    pub fn node_id(&self) -> Option<&str> {
        match self {
            Self::RootSeeded { id }
            | Self::DuplicateRootIgnored { id }
            | Self::NodeExpanded { id, .. }
            | Self::NodeCollapsed { id, .. } => Some(id),
            Self::FragmentMerged { .. } | Self::ViewReset { .. } => None,
        }
    }

    /// Check if this event changed the visible set
    pub fn is_visibility_event(&self) -> bool {
        matches!(
            self,
            Self::RootSeeded { .. }
                | Self::NodeExpanded { .. }
                | Self::NodeCollapsed { .. }
                | Self::ViewReset { .. }
        )
    }
}

/// Thread-safe, append-only event log
#[derive(Clone)]
pub struct EventLog {
    events: Arc<RwLock<Vec<Event>>>,
    start_time: Instant,
    next_id: Arc<AtomicU64>,
}

impl EventLog {
    /// Create a new event log (call when the view is created)
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            start_time: Instant::now(),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Emit an event (thread-safe, returns event ID)
    pub fn emit(&self, kind: GraphEventKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let event = Event {
            id,
            timestamp_ms: self.start_time.elapsed().as_millis() as u64,
            kind,
        };

        self.events.write().push(event);
        id
    }

    /// Get all events (cloned - use `with_events` for zero-copy access)
    pub fn events(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    /// Zero-copy access to events via callback
    ///
    /// Holds the read lock for the duration of the callback - keep it short.
    pub fn with_events<T>(&self, f: impl FnOnce(&[Event]) -> T) -> T {
        f(&self.events.read())
    }

    /// Filter events touching a specific node id
    pub fn filter_node(&self, id: &str) -> Vec<Event> {
        self.with_events(|events| {
            events
                .iter()
                .filter(|e| e.kind.node_id() == Some(id))
                .cloned()
                .collect()
        })
    }

    /// Number of events
    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expanded(id: &str, added: &[&str]) -> GraphEventKind {
        GraphEventKind::NodeExpanded {
            id: Arc::from(id),
            added: added.iter().map(|s| Arc::from(*s)).collect(),
            relinked: Vec::new(),
        }
    }

    #[test]
    fn eventkind_node_id_extraction() {
        let kind = expanded("align", &["sort"]);
        assert_eq!(kind.node_id(), Some("align"));

        let merged = GraphEventKind::FragmentMerged {
            item_count: 3,
            universe_size: 3,
        };
        assert_eq!(merged.node_id(), None);
    }

    #[test]
    fn eventkind_visibility_classification() {
        assert!(expanded("a", &[]).is_visibility_event());
        assert!(GraphEventKind::ViewReset { hidden: 2 }.is_visibility_event());
        assert!(!GraphEventKind::FragmentMerged {
            item_count: 1,
            universe_size: 4,
        }
        .is_visibility_event());
        assert!(!GraphEventKind::DuplicateRootIgnored { id: Arc::from("r2") }
            .is_visibility_event());
    }

    #[test]
    fn eventkind_serializes_with_type_tag() {
        let kind = GraphEventKind::NodeCollapsed {
            id: Arc::from("align"),
            removed: vec![Arc::from("sort")],
            retained: 1,
        };

        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "node_collapsed");
        assert_eq!(json["id"], "align");
        assert_eq!(json["removed"][0], "sort");
        assert_eq!(json["retained"], 1);
    }

    #[test]
    fn eventkind_deserializes_from_tagged_json() {
        let json = serde_json::json!({
            "type": "root_seeded",
            "id": "align"
        });

        let kind: GraphEventKind = serde_json::from_value(json).unwrap();
        assert_eq!(
            kind,
            GraphEventKind::RootSeeded {
                id: Arc::from("align")
            }
        );
    }

    #[test]
    fn eventlog_new_starts_empty() {
        let log = EventLog::new();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
    }

    #[test]
    fn eventlog_emit_returns_monotonic_ids() {
        let log = EventLog::new();

        let id1 = log.emit(GraphEventKind::RootSeeded { id: Arc::from("a") });
        let id2 = log.emit(expanded("a", &["b", "c"]));
        let id3 = log.emit(expanded("b", &["d"]));

        assert_eq!(id1, 0);
        assert_eq!(id2, 1);
        assert_eq!(id3, 2);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn eventlog_filter_node_returns_only_matching() {
        let log = EventLog::new();
        log.emit(GraphEventKind::FragmentMerged {
            item_count: 4,
            universe_size: 4,
        });
        log.emit(expanded("a", &["b"]));
        log.emit(expanded("b", &[]));
        log.emit(GraphEventKind::NodeCollapsed {
            id: Arc::from("a"),
            removed: vec![Arc::from("b")],
            retained: 0,
        });

        let a_events = log.filter_node("a");
        assert_eq!(a_events.len(), 2);
        assert!(a_events.iter().all(|e| e.kind.node_id() == Some("a")));

        assert_eq!(log.filter_node("b").len(), 1);
    }

    #[test]
    fn eventlog_is_clone_sharing_storage() {
        let log = EventLog::new();
        log.emit(GraphEventKind::RootSeeded { id: Arc::from("a") });

        let cloned = log.clone();
        assert_eq!(cloned.len(), 1);

        log.emit(expanded("a", &[]));
        assert_eq!(cloned.len(), 2);
    }

    #[test]
    fn event_timestamps_are_monotonic() {
        let log = EventLog::new();
        log.emit(GraphEventKind::RootSeeded { id: Arc::from("a") });
        log.emit(expanded("a", &[]));

        let events = log.events();
        assert!(events[1].timestamp_ms >= events[0].timestamp_ms);
    }
}
