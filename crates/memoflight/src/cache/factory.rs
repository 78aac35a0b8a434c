use std::sync::Arc;

use parking_lot::Mutex;

use memoflight_core::{CacheConfig, Producer, ResolveKey, SlotStore, StoreProvider};

#[cfg(feature = "memory")]
use memoflight_storage::MemoryProvider;

use crate::cache::AsyncCache;

/// Type-erased registry entry for a wrapped function
///
/// Lets the factory enumerate and clear heterogeneously-typed caches.
pub trait CacheHandle: Send + Sync {
    /// Drop every entry this wrapped function has cached
    fn clear(&self);
}

impl<A, T, S> CacheHandle for AsyncCache<A, T, S>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    fn clear(&self) {
        AsyncCache::clear(self);
    }
}

/// Creates wrapped functions and keeps a registry of every one it created
///
/// Each wrapped function gets its own store from the provider. The
/// registry is scoped to this factory instance: no global singleton is
/// shared across unrelated factories, and a new factory starts empty.
#[cfg(feature = "memory")]
pub struct CacheFactory<P: StoreProvider = MemoryProvider> {
    provider: P,
    registry: Mutex<Vec<Arc<dyn CacheHandle>>>,
}

#[cfg(not(feature = "memory"))]
pub struct CacheFactory<P: StoreProvider> {
    provider: P,
    registry: Mutex<Vec<Arc<dyn CacheHandle>>>,
}

impl<P: StoreProvider> CacheFactory<P> {
    /// Create a factory whose caches are backed by `provider`'s stores
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            registry: Mutex::new(Vec::new()),
        }
    }

    /// Wrap a producer with default configuration and the singleton
    /// resolver
    pub fn create<A, T, F>(&self, producer: F) -> Arc<AsyncCache<A, T, P::Store<T>>>
    where
        A: Send + 'static,
        T: Clone + Send + Sync + 'static,
        F: Producer<A, T> + 'static,
    {
        self.register(AsyncCache::new(self.provider.provide::<T>(), producer))
    }

    /// Wrap a producer with explicit configuration
    pub fn create_with<A, T, F>(
        &self,
        producer: F,
        config: CacheConfig,
    ) -> Arc<AsyncCache<A, T, P::Store<T>>>
    where
        A: Send + 'static,
        T: Clone + Send + Sync + 'static,
        F: Producer<A, T> + 'static,
    {
        self.register(AsyncCache::new(self.provider.provide::<T>(), producer).with_config(config))
    }

    /// Wrap a producer with explicit configuration and key resolver
    pub fn create_keyed<A, T, F, R, K>(
        &self,
        producer: F,
        config: CacheConfig,
        resolver: R,
    ) -> Arc<AsyncCache<A, T, P::Store<T>>>
    where
        A: Send + 'static,
        T: Clone + Send + Sync + 'static,
        F: Producer<A, T> + 'static,
        R: Fn(&A) -> K + Send + Sync + 'static,
        K: ResolveKey,
    {
        self.register(
            AsyncCache::new(self.provider.provide::<T>(), producer)
                .with_config(config)
                .with_resolver(resolver),
        )
    }

    fn register<A, T, S>(&self, cache: AsyncCache<A, T, S>) -> Arc<AsyncCache<A, T, S>>
    where
        A: Send + 'static,
        T: Clone + Send + Sync + 'static,
        S: SlotStore<T> + 'static,
    {
        let cache = Arc::new(cache);
        self.registry
            .lock()
            .push(Arc::clone(&cache) as Arc<dyn CacheHandle>);
        cache
    }

    /// Every wrapped function created through this factory so far
    pub fn all(&self) -> Vec<Arc<dyn CacheHandle>> {
        self.registry.lock().clone()
    }

    /// Clear every wrapped function created through this factory
    pub fn clear_all(&self) {
        for cache in self.registry.lock().iter() {
            cache.clear();
        }
    }
}

#[cfg(feature = "memory")]
impl CacheFactory<MemoryProvider> {
    /// Factory backed by fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(MemoryProvider)
    }
}

#[cfg(feature = "memory")]
impl Default for CacheFactory<MemoryProvider> {
    fn default() -> Self {
        Self::in_memory()
    }
}
