//! String interner - one `Arc<str>` per unique id
//!
//! The graph engine stores the same id in the universe, the arena, the
//! visible order, children lists, and extra-parent lists. Interning keeps a
//! single allocation per unique id regardless of how many places hold it.

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashSet;

static INTERNER: Mutex<Option<FxHashSet<Arc<str>>>> = Mutex::new(None);

/// Intern a string, returning a shared `Arc<str>`.
///
/// Repeated calls with the same text return clones of the same allocation.
pub fn intern(s: &str) -> Arc<str> {
    let mut guard = INTERNER.lock();
    let set = guard.get_or_insert_with(FxHashSet::default);
    if let Some(existing) = set.get(s) {
        return Arc::clone(existing);
    }
    let arc: Arc<str> = Arc::from(s);
    set.insert(Arc::clone(&arc));
    arc
}
