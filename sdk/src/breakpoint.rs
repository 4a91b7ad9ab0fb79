//! Breakpoint registry shared between the interceptor and the control side

use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use wfdbg_core::EventIndex;

/// Mutable set of event indices at which replay should pause.
///
/// Reads come from the interception hook on the replay context; writes come
/// from the control transport. Replacing or mutating the set mid-session
/// affects only boundaries not yet evaluated; a boundary already passed is
/// never retroactively paused.
///
/// Cheap to clone; clones share the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct BreakpointRegistry {
    indices: Arc<RwLock<HashSet<EventIndex>>>,
}

impl BreakpointRegistry {
    /// Create an empty registry ("never suspend automatically").
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active set wholesale.
    pub fn set<I>(&self, indices: I)
    where
        I: IntoIterator<Item = EventIndex>,
    {
        let mut guard = self.indices.write();
        guard.clear();
        guard.extend(indices);
    }

    /// Add a single breakpoint. Returns false if it was already set.
    pub fn add(&self, index: EventIndex) -> bool {
        self.indices.write().insert(index)
    }

    /// Remove a single breakpoint. Returns true if it was set.
    pub fn remove(&self, index: EventIndex) -> bool {
        self.indices.write().remove(&index)
    }

    /// Non-blocking membership check.
    pub fn contains(&self, index: EventIndex) -> bool {
        self.indices.read().contains(&index)
    }

    /// Remove every breakpoint.
    pub fn clear(&self) {
        self.indices.write().clear();
    }

    /// Check whether any breakpoints are set.
    pub fn is_empty(&self) -> bool {
        self.indices.read().is_empty()
    }

    /// Get the number of breakpoints set.
    pub fn len(&self) -> usize {
        self.indices.read().len()
    }

    /// Sorted snapshot of the set, for logging and inspection.
    pub fn snapshot(&self) -> Vec<EventIndex> {
        let mut indices: Vec<EventIndex> = self.indices.read().iter().copied().collect();
        indices.sort_unstable();
        indices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_empty_registry_matches_nothing() {
        let registry = BreakpointRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains(1));
    }

    #[test]
    fn test_set_replaces_wholesale() {
        let registry = BreakpointRegistry::new();
        registry.set([3, 9, 15, 21]);
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(9));

        registry.set([42]);
        assert!(!registry.contains(9));
        assert!(registry.contains(42));
        assert_eq!(registry.snapshot(), vec![42]);
    }

    #[test]
    fn test_add_and_remove() {
        let registry = BreakpointRegistry::new();
        assert!(registry.add(7));
        assert!(!registry.add(7));
        assert!(registry.contains(7));

        assert!(registry.remove(7));
        assert!(!registry.remove(7));
        assert!(!registry.contains(7));
    }

    #[test]
    fn test_clones_share_state() {
        let registry = BreakpointRegistry::new();
        let clone = registry.clone();
        registry.set([5]);
        assert!(clone.contains(5));
        clone.clear();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let registry = BreakpointRegistry::new();
        registry.set([21, 3, 15, 9]);
        assert_eq!(registry.snapshot(), vec![3, 9, 15, 21]);
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        let registry = BreakpointRegistry::new();
        let writer = {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    registry.set([i]);
                }
            })
        };
        let reader = {
            let registry = registry.clone();
            thread::spawn(move || {
                for i in 0..1000 {
                    // Any answer is fine; this must just never tear or panic.
                    let _ = registry.contains(i);
                }
            })
        };
        writer.join().unwrap();
        reader.join().unwrap();
        assert_eq!(registry.snapshot(), vec![999]);
    }
}
