//! The wrapped-function facade and its entry lifecycle engine

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::FutureExt;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

use memoflight_core::{
    CacheConfig, CacheError, CacheMetrics, Expiry, Freshness, KeyResolver, NoopMetrics, Producer,
    ResolveKey, ResolvedKey, SharedPromise, SlotEntry, SlotStore, rejected_promise,
    resolved_promise, singleton_resolver,
};

mod context;
mod factory;

pub use context::CacheContext;
pub use factory::{CacheFactory, CacheHandle};

/// An async producer function wrapped with a per-group entry cache
///
/// Generic over:
/// - `A`: the producer's argument type
/// - `T`: the producer's result type
/// - `S`: the storage collaborator backing this function
///
/// Calling [`call`](Self::call) behaves like invoking the producer, except
/// that concurrent callers resolving to the same key tuple share one
/// invocation, and settled results are served from the cache while fresh.
/// Every auxiliary operation resolves the same key tuple from the supplied
/// arguments.
///
/// Cloning creates a new handle to the SAME wrapped function: clones share
/// the store, the generation counter, and the transition lock.
///
/// Operations that issue producer work ([`call`](Self::call),
/// [`reload`](Self::reload)) must run inside a tokio runtime: settlement is
/// recorded by a spawned continuation.
pub struct AsyncCache<A, T, S>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    producer: Arc<dyn Producer<A, T>>,
    resolver: KeyResolver<A>,
    store: Arc<S>,
    config: CacheConfig,
    metrics: Arc<dyn CacheMetrics>,
    /// Install token source; settlement continuations compare tokens to
    /// detect that their entry was superseded
    next_generation: Arc<AtomicU64>,
    /// Serializes check-then-write transitions on the store
    transition: Arc<Mutex<()>>,
}

impl<A, T, S> AsyncCache<A, T, S>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    /// Wrap `producer`, backed by `store`
    ///
    /// Defaults: entries never expire, stale values are served by `get`,
    /// and the resolver maps every argument list to the constant empty
    /// key, so the function evaluates as a global singleton. Supply
    /// [`with_resolver`](Self::with_resolver) to key by arguments.
    pub fn new<F>(store: S, producer: F) -> Self
    where
        F: Producer<A, T> + 'static,
    {
        Self {
            producer: Arc::new(producer),
            resolver: singleton_resolver(),
            store: Arc::new(store),
            config: CacheConfig::default(),
            metrics: Arc::new(NoopMetrics),
            next_generation: Arc::new(AtomicU64::new(0)),
            transition: Arc::new(Mutex::new(())),
        }
    }

    /// Set configuration
    pub fn with_config(mut self, config: CacheConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the key resolver
    ///
    /// The closure may return a scalar (used as both group and key), a
    /// `(group, key)` pair of `Display` values, or a [`ResolvedKey`].
    pub fn with_resolver<R, K>(mut self, resolver: R) -> Self
    where
        R: Fn(&A) -> K + Send + Sync + 'static,
        K: ResolveKey,
    {
        self.resolver = Arc::new(move |args: &A| resolver(args).resolve_key());
        self
    }

    /// Set a metrics collector
    pub fn with_metrics<M: CacheMetrics>(mut self, metrics: M) -> Self {
        self.metrics = Arc::new(metrics);
        self
    }

    /// This function's configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Read-only handle to the storage collaborator, for inspection and
    /// testing only; not part of the behavioral contract
    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolve(&self, args: &A) -> ResolvedKey {
        (self.resolver)(args)
    }

    /// Invoke the wrapped function
    ///
    /// If the resolved group holds an entry for the same key that is still
    /// pending or fresh, its shared promise is returned and no producer
    /// work is issued. Otherwise this reloads. The returned promise yields
    /// the producer outcome, failure included.
    pub fn call(&self, args: A) -> SharedPromise<T> {
        let resolved = self.resolve(&args);
        self.call_resolved(resolved, args)
    }

    /// Unconditionally invoke the producer, superseding the group's
    /// current entry of any state
    pub fn reload(&self, args: A) -> SharedPromise<T> {
        let resolved = self.resolve(&args);
        self.reload_resolved(resolved, args)
    }

    /// The cached value, if the resolved entry exists and is observable
    ///
    /// A stale entry's value is still returned unless the function was
    /// configured with `must_revalidate`, in which case only fresh values
    /// are observable and callers must reload first.
    pub fn get(&self, args: &A) -> Option<T> {
        let resolved = self.resolve(args);
        self.get_resolved(&resolved)
    }

    /// Install a settled value without invoking the producer, using the
    /// configured TTL
    pub fn set(&self, args: &A, value: T) {
        self.set_with_ttl(args, value, self.config.ttl);
    }

    /// Install a settled value with an explicit TTL (`None` never expires)
    pub fn set_with_ttl(&self, args: &A, value: T, ttl: Option<Duration>) {
        let resolved = self.resolve(args);
        self.set_resolved(&resolved, value, ttl);
    }

    /// Install a settled, already-expired entry carrying a rejected
    /// promise, the manual counterpart of a failed load
    pub fn set_failed(&self, args: &A, error: CacheError) {
        let resolved = self.resolve(args);
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = SlotEntry::settled(
            resolved.key.clone(),
            rejected_promise(error),
            None,
            Expiry::elapsed(),
            generation,
        );
        let _transition = self.transition.lock();
        self.store.set(&resolved.group, Some(entry));
        debug!(target: "memoflight", group = %resolved.group, key = %resolved.key, "seeded failure");
    }

    /// Remove the resolved group's entry unconditionally
    pub fn delete(&self, args: &A) {
        let resolved = self.resolve(args);
        self.delete_resolved(&resolved);
    }

    /// True iff the resolved entry exists, its key matches, it is settled,
    /// and it has not expired (strictly)
    pub fn is_fresh(&self, args: &A) -> bool {
        self.freshness(args).is_fresh()
    }

    /// True iff the resolved entry exists with a matching key and has any
    /// recorded outcome, even a stale or failed one. Distinguishes
    /// "still loading" from "has an answer".
    pub fn is_settled(&self, args: &A) -> bool {
        self.freshness(args).is_settled()
    }

    /// Full freshness classification for the resolved key tuple
    pub fn freshness(&self, args: &A) -> Freshness {
        let resolved = self.resolve(args);
        self.freshness_resolved(&resolved)
    }

    /// Remove every entry cached by this wrapped function
    pub fn clear(&self) {
        let _transition = self.transition.lock();
        self.store.clear();
        debug!(target: "memoflight", "cleared");
    }

    /// Capture a fixed key/args pair for repeated operations on the same
    /// logical entry, without re-running the resolver each time
    pub fn context(&self, args: A) -> CacheContext<'_, A, T, S>
    where
        A: Clone,
    {
        let resolved = self.resolve(&args);
        CacheContext::new(self, resolved, args)
    }

    pub(crate) fn call_resolved(&self, resolved: ResolvedKey, args: A) -> SharedPromise<T> {
        if let Some(entry) = self.store.get(&resolved.group) {
            if entry.matches(&resolved.key) {
                // A pending entry dedups concurrent callers even though it
                // is reported neither fresh nor settled.
                if !entry.settled || entry.is_fresh(Instant::now()) {
                    trace!(
                        target: "memoflight",
                        group = %resolved.group,
                        key = %resolved.key,
                        "sharing existing promise"
                    );
                    self.metrics.record_hit(&resolved.group);
                    return entry.promise;
                }
                self.metrics.record_stale(&resolved.group);
            } else {
                self.metrics.record_miss(&resolved.group);
            }
        } else {
            self.metrics.record_miss(&resolved.group);
        }
        self.reload_resolved(resolved, args)
    }

    pub(crate) fn reload_resolved(&self, resolved: ResolvedKey, args: A) -> SharedPromise<T> {
        let producer = Arc::clone(&self.producer);
        let promise: SharedPromise<T> =
            async move { producer.produce(args).await }.boxed().shared();
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        {
            let _transition = self.transition.lock();
            // Carry the previous value snapshot forward only when it
            // answers for the same key; a key change starts from a clean
            // slot.
            let carried = self
                .store
                .get(&resolved.group)
                .filter(|prev| prev.matches(&resolved.key))
                .and_then(|prev| prev.value);
            self.store.set(
                &resolved.group,
                Some(SlotEntry::pending(
                    resolved.key.clone(),
                    promise.clone(),
                    carried,
                    generation,
                )),
            );
        }

        debug!(
            target: "memoflight",
            group = %resolved.group,
            key = %resolved.key,
            generation,
            "reload issued"
        );
        self.metrics.record_reload(&resolved.group);
        self.spawn_settlement(resolved, generation, promise.clone());
        promise
    }

    /// Register the settlement continuation for a just-installed entry
    ///
    /// The task awaits the shared promise (which also guarantees the
    /// producer is driven to completion even if every caller drops), then
    /// writes the outcome back, unless the entry was superseded meanwhile.
    fn spawn_settlement(&self, resolved: ResolvedKey, generation: u64, promise: SharedPromise<T>) {
        let store = Arc::clone(&self.store);
        let transition = Arc::clone(&self.transition);
        let metrics = Arc::clone(&self.metrics);
        let ttl = self.config.ttl;

        tokio::spawn(async move {
            let outcome = promise.await;
            let success = outcome.is_ok();

            let _transition = transition.lock();
            let Some(current) = store.get(&resolved.group) else {
                trace!(
                    target: "memoflight",
                    group = %resolved.group,
                    generation,
                    "settlement discarded: slot cleared"
                );
                metrics.record_discarded(&resolved.group);
                return;
            };
            if current.generation != generation {
                trace!(
                    target: "memoflight",
                    group = %resolved.group,
                    generation,
                    superseded_by = current.generation,
                    "settlement discarded: entry superseded"
                );
                metrics.record_discarded(&resolved.group);
                return;
            }

            let mut settled = current;
            settled.settled = true;
            match outcome {
                Ok(value) => {
                    settled.value = Some(value);
                    settled.expire_at = Expiry::after(ttl);
                }
                // A failed load settles already expired; the carried value
                // snapshot is left untouched.
                Err(_) => settled.expire_at = Expiry::elapsed(),
            }
            store.set(&resolved.group, Some(settled));
            metrics.record_settlement(&resolved.group, success);
        });
    }

    pub(crate) fn get_resolved(&self, resolved: &ResolvedKey) -> Option<T> {
        let entry = self.store.get(&resolved.group)?;
        if !entry.matches(&resolved.key) {
            return None;
        }
        if self.config.must_revalidate && !entry.is_fresh(Instant::now()) {
            return None;
        }
        entry.value
    }

    pub(crate) fn set_resolved(&self, resolved: &ResolvedKey, value: T, ttl: Option<Duration>) {
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        let entry = SlotEntry::settled(
            resolved.key.clone(),
            resolved_promise(value.clone()),
            Some(value),
            Expiry::after(ttl),
            generation,
        );
        let _transition = self.transition.lock();
        self.store.set(&resolved.group, Some(entry));
        debug!(target: "memoflight", group = %resolved.group, key = %resolved.key, "seeded value");
    }

    pub(crate) fn delete_resolved(&self, resolved: &ResolvedKey) {
        let _transition = self.transition.lock();
        self.store.set(&resolved.group, None);
        debug!(target: "memoflight", group = %resolved.group, "deleted");
    }

    pub(crate) fn freshness_resolved(&self, resolved: &ResolvedKey) -> Freshness {
        match self.store.get(&resolved.group) {
            Some(entry) if entry.matches(&resolved.key) => {
                if !entry.settled {
                    Freshness::Pending
                } else if entry.is_fresh(Instant::now()) {
                    Freshness::Fresh
                } else {
                    Freshness::Stale
                }
            }
            _ => Freshness::Absent,
        }
    }
}

impl<A, T, S> Clone for AsyncCache<A, T, S>
where
    A: Send + 'static,
    T: Clone + Send + Sync + 'static,
    S: SlotStore<T> + 'static,
{
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
            resolver: self.resolver.clone(),
            store: self.store.clone(),
            config: self.config.clone(),
            metrics: self.metrics.clone(),
            next_generation: self.next_generation.clone(),
            transition: self.transition.clone(),
        }
    }
}
