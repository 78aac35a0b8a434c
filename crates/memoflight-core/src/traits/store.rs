//! Storage collaborator traits

use crate::types::SlotEntry;

/// Contract between the lifecycle engine and a storage collaborator
///
/// One store instance backs one wrapped function. The store holds at most
/// one entry per group; installing a new entry replaces the previous one
/// from the caller's perspective.
///
/// All three operations are synchronous: a `set` must be visible to every
/// subsequent `get` on the same group. No ordering or atomicity guarantees
/// are required beyond that per-group read-after-write consistency; the
/// engine serializes its own check-then-write transitions.
pub trait SlotStore<T: Clone>: Send + Sync {
    /// Current entry for a group, if any
    fn get(&self, group: &str) -> Option<SlotEntry<T>>;

    /// Install an entry for a group, or clear the slot when `None`
    fn set(&self, group: &str, entry: Option<SlotEntry<T>>);

    /// Remove every entry held for this wrapped function
    fn clear(&self);
}

/// Manufactures one store instance per wrapped function
///
/// The factory consumes this to give every cache it creates its own
/// storage collaborator, without committing the factory to a concrete
/// store type.
pub trait StoreProvider: Send + Sync {
    /// Store type produced for a result type `T`
    type Store<T: Clone + Send + Sync + 'static>: SlotStore<T> + 'static;

    /// Build a fresh, empty store
    fn provide<T: Clone + Send + Sync + 'static>(&self) -> Self::Store<T>;
}
