//! Shared registry snapshot
//!
//! Readers are wait-free (`ArcSwap` load + immutable data reads). Each load
//! builds a complete registry off to the side and swaps it in, so a reader
//! never observes a half-loaded batch.

use crate::config::ExternalFramework;
use crate::gvk::GroupVersionKind;
use crate::registry::{FrameworkRegistry, GenericAdapter};
use crate::Result;
use arc_swap::ArcSwap;
use std::sync::Arc;

#[derive(Debug)]
pub struct SharedRegistry {
    snap: ArcSwap<FrameworkRegistry>,
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedRegistry {
    /// Create a shared registry holding an empty snapshot
    pub fn new() -> Self {
        Self {
            snap: ArcSwap::from_pointee(FrameworkRegistry::new()),
        }
    }

    /// Load a batch and publish it, even when some entries were rejected.
    ///
    /// The returned error is the batch outcome of [`FrameworkRegistry::load`].
    pub fn load<I>(&self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = ExternalFramework>,
    {
        let (next, outcome) = FrameworkRegistry::from_batch(entries);
        self.snap.store(Arc::new(next));
        outcome
    }

    /// Get a generic adapter from the current snapshot
    #[inline]
    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<GenericAdapter> {
        self.snap.load().lookup(gvk)
    }

    /// Get all adapters in the current snapshot
    pub fn list_all(&self) -> Vec<GenericAdapter> {
        self.snap.load().list_all()
    }

    /// Current snapshot; stays valid and unchanged across later loads
    pub fn snapshot(&self) -> Arc<FrameworkRegistry> {
        self.snap.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_load_publishes_valid_subset() {
        let shared = SharedRegistry::new();
        let err = shared
            .load(vec![ExternalFramework::new("Pod.v1."), ExternalFramework::new("")])
            .unwrap_err();

        assert!(matches!(err, Error::BatchPartialFailure { count: 1 }));
        assert!(shared.lookup(&GroupVersionKind::new("", "v1", "Pod")).is_some());
        assert_eq!(shared.list_all().len(), 1);
    }

    #[test]
    fn test_snapshot_isolated_from_reload() {
        let shared = SharedRegistry::new();
        shared.load(vec![ExternalFramework::new("Job.v1.batch")]).unwrap();
        let before = shared.snapshot();

        shared.load(Vec::new()).unwrap();

        assert_eq!(before.len(), 1);
        assert!(shared.snapshot().is_empty());
        assert!(shared.lookup(&GroupVersionKind::new("batch", "v1", "Job")).is_none());
    }

    #[test]
    fn test_concurrent_readers() {
        let shared = Arc::new(SharedRegistry::new());
        let gvk = GroupVersionKind::new("batch", "v1", "Job");
        shared.load(vec![ExternalFramework::new("Job.v1.batch")]).unwrap();

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let shared = Arc::clone(&shared);
                let gvk = gvk.clone();
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let snap = shared.snapshot();
                        // Every snapshot is one complete batch: both entries or just Job.
                        assert!(snap.lookup(&gvk).is_some());
                        assert!(matches!(snap.len(), 1 | 2));
                    }
                })
            })
            .collect();

        for _ in 0..50 {
            shared
                .load(vec![ExternalFramework::new("Job.v1.batch"), ExternalFramework::new("Pod.v1.")])
                .unwrap();
            shared.load(vec![ExternalFramework::new("Job.v1.batch")]).unwrap();
        }

        for reader in readers {
            reader.join().unwrap();
        }
    }
}
