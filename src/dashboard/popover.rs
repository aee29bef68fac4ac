//! Scoped dismiss subscription for the lifecycle popover.
//!
//! The popover must own exactly one dismissal hook while open and none
//! otherwise. Acquisition hands out a guard value; dropping the guard (close,
//! replacement, or view unmount) releases the hook. The registry counts live
//! guards so tests can assert nothing leaked across open/close cycles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Tracks live dismiss scopes for one dashboard instance.
#[derive(Debug, Default, Clone)]
pub struct DismissRegistry {
    active: Arc<AtomicUsize>,
}

impl DismissRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the dismissal hook for a newly opened popover.
    pub fn acquire(&self) -> DismissScope {
        self.active.fetch_add(1, Ordering::SeqCst);
        DismissScope {
            active: Arc::clone(&self.active),
        }
    }

    /// Number of live scopes. At most one while the invariant holds.
    pub fn active(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

/// Guard for an open popover's dismissal hook. Released on drop.
#[derive(Debug)]
pub struct DismissScope {
    active: Arc<AtomicUsize>,
}

impl Drop for DismissScope {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_and_drop_balance() {
        let registry = DismissRegistry::new();
        assert_eq!(registry.active(), 0);

        let scope = registry.acquire();
        assert_eq!(registry.active(), 1);

        drop(scope);
        assert_eq!(registry.active(), 0);
    }

    #[test]
    fn test_replacing_a_scope_never_stacks() {
        let registry = DismissRegistry::new();
        let mut slot: Option<DismissScope> = None;

        for _ in 0..10 {
            // Assigning drops the previous guard before the count is read.
            slot = Some(registry.acquire());
            assert_eq!(registry.active(), 1);
        }

        slot.take();
        assert_eq!(registry.active(), 0);
    }
}
