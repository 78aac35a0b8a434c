//! In-memory slot store using DashMap

use dashmap::DashMap;
use parking_lot::RwLock;

use memoflight_core::{SlotEntry, SlotStore, StoreProvider};

/// Operation counters, readable through [`MemoryStore::stats`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreStats {
    /// `get` calls that found an entry
    pub reads: u64,
    /// `get` calls that found nothing
    pub read_misses: u64,
    /// Entries installed
    pub writes: u64,
    /// Slots cleared by `set(group, None)`
    pub deletes: u64,
}

/// In-memory slot store
///
/// One group maps to at most one [`SlotEntry`]; installing replaces the
/// previous entry. Reads clone the entry out of the map so callers never
/// hold a map guard.
///
/// The inherent inspection methods (`len`, `is_empty`, `stats`) are not
/// part of the [`SlotStore`] contract; they exist for the read-only handle
/// the facade exposes for inspection and testing.
pub struct MemoryStore<T: Clone + Send + Sync + 'static> {
    slots: DashMap<String, SlotEntry<T>>,
    stats: RwLock<StoreStats>,
}

impl<T: Clone + Send + Sync + 'static> MemoryStore<T> {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
            stats: RwLock::new(StoreStats::default()),
        }
    }

    /// Number of groups currently holding an entry
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no group holds an entry
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Snapshot of the operation counters
    pub fn stats(&self) -> StoreStats {
        *self.stats.read()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> SlotStore<T> for MemoryStore<T> {
    fn get(&self, group: &str) -> Option<SlotEntry<T>> {
        let entry = self.slots.get(group).map(|e| e.value().clone());
        let mut stats = self.stats.write();
        match entry {
            Some(_) => stats.reads += 1,
            None => stats.read_misses += 1,
        }
        entry
    }

    fn set(&self, group: &str, entry: Option<SlotEntry<T>>) {
        match entry {
            Some(entry) => {
                self.slots.insert(group.to_string(), entry);
                self.stats.write().writes += 1;
            }
            None => {
                if self.slots.remove(group).is_some() {
                    self.stats.write().deletes += 1;
                }
            }
        }
    }

    fn clear(&self) {
        self.slots.clear();
    }
}

/// Provides a fresh [`MemoryStore`] per wrapped function
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProvider;

impl StoreProvider for MemoryProvider {
    type Store<T: Clone + Send + Sync + 'static> = MemoryStore<T>;

    fn provide<T: Clone + Send + Sync + 'static>(&self) -> Self::Store<T> {
        MemoryStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memoflight_core::{Expiry, resolved_promise};

    fn entry(key: &str, value: i32, generation: u64) -> SlotEntry<i32> {
        SlotEntry::settled(
            key,
            resolved_promise(value),
            Some(value),
            Expiry::Never,
            generation,
        )
    }

    #[test]
    fn test_set_then_get() {
        let store = MemoryStore::new();
        store.set("g", Some(entry("k", 1, 0)));

        let got = store.get("g").expect("entry should exist");
        assert_eq!(got.key, "k");
        assert_eq!(got.value, Some(1));
    }

    #[test]
    fn test_set_replaces_previous_entry() {
        let store = MemoryStore::new();
        store.set("g", Some(entry("k", 1, 0)));
        store.set("g", Some(entry("k", 2, 1)));

        assert_eq!(store.len(), 1);
        let got = store.get("g").unwrap();
        assert_eq!(got.value, Some(2));
        assert_eq!(got.generation, 1);
    }

    #[test]
    fn test_set_none_clears_the_slot() {
        let store = MemoryStore::new();
        store.set("g", Some(entry("k", 1, 0)));
        store.set("g", None);
        assert!(store.get("g").is_none());
        // Clearing an already-empty slot is a no-op
        store.set("g", None);
        assert_eq!(store.stats().deletes, 1);
    }

    #[test]
    fn test_clear_removes_every_group() {
        let store = MemoryStore::new();
        store.set("a", Some(entry("k", 1, 0)));
        store.set("b", Some(entry("k", 2, 1)));
        assert_eq!(store.len(), 2);

        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_stats_counters() {
        let store = MemoryStore::new();
        store.set("g", Some(entry("k", 1, 0)));
        let _ = store.get("g");
        let _ = store.get("missing");

        let stats = store.stats();
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.reads, 1);
        assert_eq!(stats.read_misses, 1);
    }

    #[test]
    fn test_provider_builds_independent_stores() {
        let provider = MemoryProvider;
        let a = provider.provide::<i32>();
        let b = provider.provide::<i32>();
        a.set("g", Some(entry("k", 1, 0)));
        assert!(b.is_empty());
    }
}
