//! Handle registries for long-lived artifacts.
//!
//! A registry hands out monotone-increasing ids that are never reused, so a
//! foreign caller can hold a plain integer instead of transporting the
//! artifact. Entries are `Arc`s: lookups clone the handle under a shard lock
//! and every long computation (setup, prove, verify) runs after the lock is
//! released. Values are immutable once inserted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

const SHARDS: usize = 16;

pub struct Registry<T> {
    shards: [Mutex<HashMap<u64, Arc<T>>>; SHARDS],
    next_id: AtomicU64,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self {
            shards: std::array::from_fn(|_| Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(1),
        }
    }

    fn shard(&self, id: u64) -> &Mutex<HashMap<u64, Arc<T>>> {
        &self.shards[(id % SHARDS as u64) as usize]
    }

    /// Stores `value` and returns its freshly allocated id (always > 0).
    pub fn insert(&self, value: T) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.shard(id)
            .lock()
            .expect("registry shard poisoned")
            .insert(id, Arc::new(value));
        id
    }

    /// Clones the handle out of the registry; the caller computes outside
    /// the lock.
    pub fn get(&self, id: u64) -> Option<Arc<T>> {
        self.shard(id)
            .lock()
            .expect("registry shard poisoned")
            .get(&id)
            .cloned()
    }

    /// Idempotent; removing an unknown id is a no-op. The id is never handed
    /// out again.
    pub fn remove(&self, id: u64) {
        self.shard(id)
            .lock()
            .expect("registry shard poisoned")
            .remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc as StdArc;
    use std::thread;

    #[test]
    fn ids_are_monotone_and_start_at_one() {
        let registry = Registry::new();
        let a = registry.insert("a");
        let b = registry.insert("b");
        let c = registry.insert("c");
        assert_eq!((a, b, c), (1, 2, 3));
    }

    #[test]
    fn removed_ids_are_never_reissued() {
        let registry = Registry::new();
        let a = registry.insert(1u32);
        registry.remove(a);
        let b = registry.insert(2u32);
        assert!(b > a);
        assert!(registry.get(a).is_none());
        assert_eq!(*registry.get(b).unwrap(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let registry = Registry::new();
        let id = registry.insert(());
        registry.remove(id);
        registry.remove(id);
        registry.remove(9999);
    }

    #[test]
    fn concurrent_inserts_yield_distinct_ids() {
        let registry = StdArc::new(Registry::new());
        let mut handles = Vec::new();
        for t in 0..8 {
            let registry = StdArc::clone(&registry);
            handles.push(thread::spawn(move || {
                (0..100).map(|i| registry.insert(t * 1000 + i)).collect::<Vec<u64>>()
            }));
        }
        let mut seen = HashSet::new();
        for handle in handles {
            for id in handle.join().unwrap() {
                assert!(seen.insert(id), "id {id} issued twice");
            }
        }
        assert_eq!(seen.len(), 800);
    }
}
