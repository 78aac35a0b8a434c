use memoflight_core::{Freshness, ResolvedKey, SharedPromise, SlotStore};

use crate::cache::AsyncCache;

/// A view of one logical entry, bound to a fixed key/args pair
///
/// Created by [`AsyncCache::context`]; the resolver ran exactly once, at
/// capture time, so repeated operations on the same entry neither
/// re-supply arguments nor re-derive the key tuple.
pub struct CacheContext<'a, A, T, S>
where
    A: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    cache: &'a AsyncCache<A, T, S>,
    resolved: ResolvedKey,
    args: A,
}

impl<'a, A, T, S> CacheContext<'a, A, T, S>
where
    A: Clone + Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    pub(crate) fn new(cache: &'a AsyncCache<A, T, S>, resolved: ResolvedKey, args: A) -> Self {
        Self {
            cache,
            resolved,
            args,
        }
    }

    /// The key tuple this context is bound to
    pub fn resolved_key(&self) -> &ResolvedKey {
        &self.resolved
    }

    /// [`AsyncCache::call`] for the captured arguments
    pub fn call(&self) -> SharedPromise<T> {
        self.cache
            .call_resolved(self.resolved.clone(), self.args.clone())
    }

    /// [`AsyncCache::reload`] for the captured arguments
    pub fn reload(&self) -> SharedPromise<T> {
        self.cache
            .reload_resolved(self.resolved.clone(), self.args.clone())
    }

    /// [`AsyncCache::get`] for the captured key tuple
    pub fn get(&self) -> Option<T> {
        self.cache.get_resolved(&self.resolved)
    }

    /// [`AsyncCache::set`] for the captured key tuple
    pub fn set(&self, value: T) {
        self.cache
            .set_resolved(&self.resolved, value, self.cache.config().ttl);
    }

    /// [`AsyncCache::delete`] for the captured key tuple
    pub fn delete(&self) {
        self.cache.delete_resolved(&self.resolved);
    }

    /// [`AsyncCache::is_fresh`] for the captured key tuple
    pub fn is_fresh(&self) -> bool {
        self.freshness().is_fresh()
    }

    /// [`AsyncCache::is_settled`] for the captured key tuple
    pub fn is_settled(&self) -> bool {
        self.freshness().is_settled()
    }

    /// [`AsyncCache::freshness`] for the captured key tuple
    pub fn freshness(&self) -> Freshness {
        self.cache.freshness_resolved(&self.resolved)
    }
}
